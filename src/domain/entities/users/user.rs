//! User Entity Implementation
//!
//! 사용자 엔티티와 활성 리프레시 토큰 집합을 정의합니다.

use std::collections::HashSet;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// `refresh_tokens`는 현재 유효한 리프레시 토큰 문자열의 집합입니다.
/// 하나의 토큰 문자열은 동시에 두 사용자의 집합에 존재하지 않습니다.
///
/// 집합은 저장소의 원자적 연산(`add`, `rotate`, `remove`, `clear`)으로만
/// 변경됩니다. 엔티티를 읽어 수정한 뒤 통째로 저장하는 방식은 사용하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이름 (unique)
    pub username: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// bcrypt 해시
    pub password_hash: String,
    /// 프로필 이미지 경로
    #[serde(default)]
    pub profile_picture: String,
    /// 활성 리프레시 토큰 집합
    #[serde(default)]
    pub refresh_tokens: HashSet<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성
    ///
    /// ID는 저장소가 생성 시점에 부여합니다. 토큰 집합은 비어 있는 상태로 시작합니다.
    pub fn new_local(username: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            email,
            password_hash,
            profile_picture: String::new(),
            refresh_tokens: HashSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 주어진 리프레시 토큰이 활성 집합에 있는지 확인
    pub fn has_refresh_token(&self, token: &str) -> bool {
        self.refresh_tokens.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_starts_without_tokens() {
        let user = User::new_local(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );

        assert!(user.id.is_none());
        assert!(user.refresh_tokens.is_empty());
        assert!(user.profile_picture.is_empty());
        assert_eq!(user.id_string(), None);
    }

    #[test]
    fn test_missing_token_field_deserializes_as_empty_set() {
        let document = mongodb::bson::doc! {
            "_id": ObjectId::new(),
            "username": "bob",
            "email": "bob@example.com",
            "password_hash": "hash",
            "created_at": DateTime::now(),
            "updated_at": DateTime::now(),
        };

        let user: User = mongodb::bson::from_document(document).unwrap();
        assert!(user.refresh_tokens.is_empty());
        assert!(!user.has_refresh_token("anything"));
    }
}
