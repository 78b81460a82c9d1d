//! 미들웨어 모듈
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Bearer` / `JWT` 스킴의 액세스 토큰 검증
//! - 헤더 없음(401), 만료(401, `token_expired`), 그 밖의 검증 실패(403)를 구분하여 응답
//! - 사용자 정보를 request extension에 저장
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! App::new()
//!     .app_data(state.clone())
//!     .service(
//!         web::scope("/api/v1/users")
//!             .wrap(AuthMiddleware::required())
//!             .route("/me", web::get().to(get_current_user))
//!     )
//! ```

pub mod auth_middleware;
pub mod auth_inner;

pub use auth_middleware::AuthMiddleware;
