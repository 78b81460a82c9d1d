//! HTTP 핸들러
//!
//! 각 핸들러는 `web::Data<AppState>`에서 서비스를 꺼내 호출하고,
//! 서비스가 반환한 [`AppError`](crate::errors::AppError)를 그대로 응답으로 돌려줍니다.

pub mod users;
pub mod auth;
