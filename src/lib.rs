//! 소셜 콘텐츠 백엔드 인증 서비스
//!
//! 회원가입/로그인과 액세스/리프레시 토큰 쌍의 수명주기를 담당합니다.
//!
//! # Features
//!
//! - **토큰 쌍 발급**: 발급마다 새 nonce를 가진 HS256 JWT 액세스/리프레시 토큰
//! - **리프레시 토큰 회전**: 저장소 수준의 조건부 갱신으로 토큰당 한 번만 회전
//! - **재사용 감지**: 이미 소비된 리프레시 토큰이 다시 오면 해당 사용자의 세션 전체 폐기
//! - **액세스 게이트**: 헤더 없음 / 만료 / 잘못된 토큰을 구분하는 인증 미들웨어
//! - **MongoDB**: 사용자와 활성 리프레시 토큰 집합 저장 (개발용 인메모리 저장소 제공)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenService, UserService, JwtService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    UserStore    │ ← MongoDB / 인메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use social_auth_backend::config::JwtConfig;
//! use social_auth_backend::repositories::users::InMemoryUserRepository;
//! use social_auth_backend::state::AppState;
//!
//! let state = AppState::new(Arc::new(InMemoryUserRepository::new()), &JwtConfig::from_env()?)?;
//! let outcome = state.token_service.login("alice", "123456").await?;
//! let rotated = state.token_service.refresh(&outcome.tokens.refresh_token).await?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
pub mod state;
