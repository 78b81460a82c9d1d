//! # 인메모리 사용자 리포지토리
//!
//! 개발 환경(`STORAGE_BACKEND=memory`)과 테스트에서 사용하는 [`UserStore`] 구현입니다.
//! 프로세스가 종료되면 데이터가 사라집니다.
//!
//! 토큰 집합 변경은 모두 하나의 쓰기 락 안에서 확인과 변경을 함께 수행하므로
//! MongoDB 구현의 조건부 갱신과 같은 원자성을 가집니다.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::{
    domain::entities::users::user::User,
    errors::{AppError, AppResult},
    repositories::users::user_store::UserStore,
    utils::string_utils::normalize_email,
};

/// 프로세스 메모리 기반 사용자 저장소
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, HashMap<String, User>>> {
        self.users
            .read()
            .map_err(|_| AppError::InternalError("사용자 저장소 락이 손상되었습니다".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, HashMap<String, User>>> {
        self.users
            .write()
            .map_err(|_| AppError::InternalError("사용자 저장소 락이 손상되었습니다".to_string()))
    }

}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.write()?;

        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id.to_hex(), user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn find_by_credential(&self, identifier: &str) -> AppResult<Option<User>> {
        let users = self.read()?;

        let email = normalize_email(identifier);
        let by_email = users.values().find(|u| u.email == email);
        Ok(by_email
            .or_else(|| users.values().find(|u| u.username == identifier))
            .cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<User>> {
        Ok(self
            .read()?
            .values()
            .find(|u| u.refresh_tokens.contains(token))
            .cloned())
    }

    async fn add_refresh_token(&self, user_id: &str, token: &str) -> AppResult<bool> {
        let mut users = self.write()?;

        match users.get_mut(user_id) {
            Some(user) => {
                user.refresh_tokens.insert(token.to_string());
                user.updated_at = DateTime::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rotate_refresh_token(&self, user_id: &str, old: &str, new: &str) -> AppResult<bool> {
        let mut users = self.write()?;

        let Some(user) = users.get_mut(user_id) else {
            return Ok(false);
        };

        if !user.refresh_tokens.remove(old) {
            return Ok(false);
        }
        user.refresh_tokens.insert(new.to_string());
        user.updated_at = DateTime::now();

        Ok(true)
    }

    async fn remove_refresh_token(&self, user_id: &str, token: &str) -> AppResult<bool> {
        let mut users = self.write()?;

        let removed = users
            .get_mut(user_id)
            .map(|user| {
                let removed = user.refresh_tokens.remove(token);
                if removed {
                    user.updated_at = DateTime::now();
                }
                removed
            })
            .unwrap_or(false);

        Ok(removed)
    }

    async fn clear_refresh_tokens(&self, user_id: &str) -> AppResult<()> {
        let mut users = self.write()?;

        if let Some(user) = users.get_mut(user_id) {
            user.refresh_tokens.clear();
            user.updated_at = DateTime::now();
        }

        Ok(())
    }
}
