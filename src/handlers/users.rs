//! # User HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `GET` | `/users/me` | 필수 | 현재 사용자 프로필 조회 |
use actix_web::{get, web, HttpResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::state::AppState;

/// 현재 사용자 정보 조회
///
/// # Endpoint
/// `GET /users/me`
///
/// # Errors
///
/// * 401 - 토큰 없음 또는 만료
/// * 403 - 잘못된 토큰
/// * 404 - 토큰 발급 후 사용자가 삭제된 경우
#[get("/me", wrap = "AuthMiddleware::required()")]
pub async fn get_current_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.user_service.get_user_by_id(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
