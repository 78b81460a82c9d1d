use serde::Deserialize;
use validator::Validate;

/// 토큰 갱신 요청 DTO
///
/// 바디에 토큰이 없으면 핸들러가 `refresh_token` 쿠키를 확인합니다.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// 로그아웃 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct LogoutRequest {
    #[serde(alias = "refreshToken")]
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}
