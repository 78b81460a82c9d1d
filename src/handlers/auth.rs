//! Authentication HTTP Handlers
//!
//! 토큰 수명주기 서비스의 연산을 HTTP 엔드포인트로 노출합니다.
//! 상태 코드 매핑은 [`AppError`]의 `ResponseError` 구현이 담당합니다.
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/auth/register` | - | 회원가입 후 토큰 쌍 발급 |
//! | `POST` | `/auth/login` | - | 로그인 |
//! | `POST` | `/auth/refresh` | - | 리프레시 토큰 회전 |
//! | `POST` | `/auth/logout` | - | 리프레시 토큰 폐기 |
//! | `POST` | `/auth/revoke-all` | 필수 | 모든 세션 폐기 |
use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::domain::dto::tokens::{ApiResponse, LogoutRequest, RefreshRequest, TokenResponse};
use crate::domain::dto::users::{AuthResponse, CreateUserRequest, LoginRequest, UserResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::state::AppState;

/// 리프레시 토큰 쿠키 이름
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// 회원가입 핸들러
///
/// 사용자를 생성한 뒤 바로 세션을 시작하여 토큰 쌍을 반환합니다.
///
/// # Endpoint
/// `POST /auth/register`
///
/// # Errors
///
/// * 400 - 입력값 검증 실패
/// * 409 - 이메일 또는 사용자명 중복
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(payload.into_inner()).await?;
    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

    let tokens = state.token_service.start_session(&user_id).await?;

    let response = AuthResponse::new(user_id, tokens).with_user(UserResponse::from(user));
    Ok(HttpResponse::Created().json(response))
}

/// 로그인 핸들러
///
/// # Endpoint
/// `POST /auth/login`
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let outcome = state
        .token_service
        .login(&payload.identifier, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse::new(outcome.user_id, outcome.tokens)))
}

/// 토큰 갱신 핸들러
///
/// 리프레시 토큰은 요청 본문(`refresh_token` / `refreshToken`)에서 먼저 찾고,
/// 없으면 `refresh_token` 쿠키를 확인합니다.
///
/// # Endpoint
/// `POST /auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<RefreshRequest>>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = extract_refresh_token(&req, body.as_deref())?;

    let pair = state.token_service.refresh(&refresh_token).await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

/// 로그아웃 핸들러
///
/// 활성 집합에 없는 토큰도 성공으로 응답합니다.
///
/// # Endpoint
/// `POST /auth/logout`
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    payload: web::Json<LogoutRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.token_service.logout(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("로그아웃되었습니다")))
}

/// 모든 세션 폐기 핸들러
///
/// # Endpoint
/// `POST /auth/revoke-all`
#[post("/revoke-all", wrap = "AuthMiddleware::required()")]
pub async fn revoke_all(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.token_service.revoke_all(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("모든 세션이 종료되었습니다")))
}

/// HTTP 요청에서 리프레시 토큰 추출
fn extract_refresh_token(
    req: &HttpRequest,
    body: Option<&RefreshRequest>,
) -> Result<String, AppError> {
    let from_body = body
        .and_then(|b| b.refresh_token.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = from_body {
        return Ok(token.to_string());
    }

    req.cookie(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::ValidationError("리프레시 토큰이 필요합니다".to_string()))
}
