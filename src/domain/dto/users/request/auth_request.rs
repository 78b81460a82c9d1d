//! 로그인 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 로그인 요청
///
/// `identifier`는 이메일 또는 사용자명입니다. 기존 클라이언트가 보내는
/// `email` / `username` 필드명도 그대로 받습니다.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "email", alias = "username")]
    #[validate(length(min = 1, message = "이메일 또는 사용자명을 입력해주세요"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_alias_accepted() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"123456"}"#).unwrap();
        assert_eq!(req.identifier, "a@b.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_password_rejected() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"identifier":"alice","password":""}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
