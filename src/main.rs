//! 소셜 인증 서비스 메인 애플리케이션
//!
//! 설정을 읽고 사용자 저장소와 서비스를 구성한 뒤 Actix-web HTTP 서버를 구동합니다.
//! 서명 키(`JWT_SECRET`)가 없으면 서버를 띄우지 않고 종료합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use social_auth_backend::config::{
    DatabaseConfig, JwtConfig, RateLimitConfig, ServerConfig, StorageBackend,
};
use social_auth_backend::db::Database;
use social_auth_backend::errors::AppError;
use social_auth_backend::repositories::users::{InMemoryUserRepository, UserRepository, UserStore};
use social_auth_backend::routes::configure_all_routes;
use social_auth_backend::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 소셜 인증 서비스 시작중...");

    let jwt_config = JwtConfig::from_env().map_err(fatal)?;
    info!(
        "🔑 JWT 설정 로드됨: 액세스 {}분, 리프레시 {}일, 로그아웃 정책 {:?}",
        jwt_config.access_ttl_minutes, jwt_config.refresh_ttl_days, jwt_config.logout_policy
    );

    let store = initialize_user_store().await.map_err(fatal)?;
    let state = AppState::new(store, &jwt_config).map_err(fatal)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(web::Data::new(state)).await
}

/// 초기화 실패를 로그로 남기고 프로세스 종료용 에러로 변환합니다.
fn fatal(e: AppError) -> io::Error {
    error!("❌ 초기화 실패: {}", e);
    io::Error::other(e.to_string())
}

/// HTTP 서버를 구성하고 실행합니다
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패, Rate Limiting 설정 오류 또는 서버 실행 오류
async fn start_http_server(state: web::Data<AppState>) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 유효하지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        _ => dotenv().map(|_| ()),
    };

    // 로거 초기화 전이므로 결과는 표준 에러로 남긴다
    if let Err(e) = loaded {
        eprintln!("{} 프로필 환경 파일 로드 실패: {}", profile, e);
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=social_auth_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 설정에 따라 사용자 저장소를 생성합니다
///
/// MongoDB 백엔드는 연결 확인과 인덱스 생성까지 마친 뒤 반환합니다.
async fn initialize_user_store() -> Result<Arc<dyn UserStore>, AppError> {
    let config = DatabaseConfig::from_env();

    match config.backend {
        StorageBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");
            let database = Arc::new(Database::new(&config).await?);
            let repository = UserRepository::new(database);
            repository.create_indexes().await?;
            Ok(Arc::new(repository))
        }
        StorageBackend::Memory => {
            warn!("⚠️ 인메모리 사용자 저장소 사용중. 재시작 시 데이터가 사라집니다");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
    }
}

/// CORS 설정을 구성합니다
///
/// # Allowed Origins
///
/// * `http://localhost:3000` - 프론트엔드 개발 서버
/// * `http://localhost:8080` - 자체 서버
/// * `127.0.0.1` 동등한 주소들
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
