use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::TokenPair;

/// 외부에 노출되는 사용자 정보
///
/// 비밀번호 해시와 리프레시 토큰 집합은 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            email,
            profile_picture,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            email,
            profile_picture,
            created_at,
            updated_at,
        }
    }
}

/// 로그인/회원가입 응답
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl AuthResponse {
    pub fn new(user_id: String, tokens: TokenPair) -> Self {
        Self {
            user_id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in,
            user: None,
        }
    }

    pub fn with_user(mut self, user: UserResponse) -> Self {
        self.user = Some(user);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_secrets() {
        let mut user = User::new_local(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        let oid = ObjectId::new();
        user.id = Some(oid);
        user.refresh_tokens.insert("secret-token".to_string());

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(response.id, oid.to_hex());
        assert!(!json.contains("secret-token"));
        assert!(!json.contains("password_hash"));
    }
}
