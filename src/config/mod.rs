//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 한 곳에서 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 저장소, 서버, 요청 제한, 패스워드 해싱
//! - [`auth_config`] - JWT 서명 키, 토큰 수명, 로그아웃 정책
//!
//! 보안에 민감한 값(`JWT_SECRET`)은 기본값이 없으며, 애플리케이션 시작 시
//! 한 번 읽혀 서비스 생성자에 주입됩니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="127.0.0.1"
//! export PORT="8080"
//!
//! # 저장소
//! export STORAGE_BACKEND="mongodb"     # mongodb | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="social_auth_dev"
//!
//! # JWT
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_ACCESS_EXPIRATION_MINUTES="60"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! export LOGOUT_POLICY="lenient"       # lenient | strict
//!
//! # 보안
//! export ENVIRONMENT="production"      # development, test, staging, production
//! export BCRYPT_COST="12"              # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
