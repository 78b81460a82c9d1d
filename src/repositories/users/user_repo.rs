//! # 사용자 리포지토리 구현
//!
//! MongoDB `users` 컬렉션 기반의 [`UserStore`] 구현입니다.
//!
//! ## 특징
//!
//! - **조건부 갱신**: 리프레시 토큰 회전은 필터에 기존 토큰을 포함한
//!   단일 `update_one` 파이프라인으로 수행됩니다.
//! - **데이터 무결성**: email/username 유니크 인덱스
//! - **토큰 조회 인덱스**: `refresh_tokens` 멀티키 인덱스

use std::sync::Arc;
use async_trait::async_trait;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::users::user::User,
    errors::{AppError, AppResult},
    repositories::users::user_store::UserStore,
    utils::string_utils::normalize_email,
};

/// 사용자 데이터 액세스 리포지토리
///
/// ## 인덱스
///
/// - `email_unique`, `username_unique`: 중복 가입 방지
/// - `refresh_tokens_lookup`: 로그아웃 시 토큰 문자열로 소유자 조회
/// - `created_at_desc`: 최신 가입자 조회
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::new(Arc::new(database));
/// repo.create_indexes().await?;
///
/// let rotated = repo.rotate_refresh_token(&user_id, &old, &new).await?;
/// if !rotated {
///     // 이미 소비된 토큰
/// }
/// ```
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(Self::COLLECTION)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.collection().find_one(doc! { "email": email }).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.collection().find_one(doc! { "username": username }).await?)
    }

    /// 컬렉션 인덱스를 생성합니다. 이미 존재하면 MongoDB가 무시합니다.
    ///
    /// `refresh_tokens` 인덱스는 유니크가 아닙니다. 빈 배열을 가진 문서가
    /// 여러 개일 때 유니크 멀티키 인덱스는 중복으로 판정합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let refresh_tokens_index = IndexModel::builder()
            .keys(doc! { "refresh_tokens": 1 })
            .options(IndexOptions::builder()
                .name("refresh_tokens_lookup".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, username_index, refresh_tokens_index, created_at_index])
            .await?;

        info!("users 컬렉션 인덱스 생성 완료");
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        let result = self.collection().insert_one(&user).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string())
        })?;
        user.id = Some(id);

        debug!("사용자 생성: {}", id.to_hex());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        Ok(self.collection().find_one(doc! { "_id": object_id }).await?)
    }

    async fn find_by_credential(&self, identifier: &str) -> AppResult<Option<User>> {
        if let Some(user) = self.find_by_email(&normalize_email(identifier)).await? {
            return Ok(Some(user));
        }
        self.find_by_username(identifier).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<User>> {
        Ok(self.collection().find_one(doc! { "refresh_tokens": token }).await?)
    }

    async fn add_refresh_token(&self, user_id: &str, token: &str) -> AppResult<bool> {
        let Ok(object_id) = ObjectId::parse_str(user_id) else {
            return Ok(false);
        };

        let result = self
            .collection()
            .update_one(
                doc! { "_id": object_id },
                doc! {
                    "$addToSet": { "refresh_tokens": token },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await?;

        Ok(result.matched_count == 1)
    }

    async fn rotate_refresh_token(&self, user_id: &str, old: &str, new: &str) -> AppResult<bool> {
        let Ok(object_id) = ObjectId::parse_str(user_id) else {
            return Ok(false);
        };

        // 필터에 old를 포함하므로 동시에 들어온 두 요청 중 하나만 문서를 매칭한다
        let pipeline = vec![doc! {
            "$set": {
                "refresh_tokens": {
                    "$concatArrays": [
                        {
                            "$filter": {
                                "input": { "$ifNull": ["$refresh_tokens", []] },
                                "cond": { "$ne": ["$$this", old] },
                            }
                        },
                        [new],
                    ]
                },
                "updated_at": "$$NOW",
            }
        }];

        let result = self
            .collection()
            .update_one(doc! { "_id": object_id, "refresh_tokens": old }, pipeline)
            .await?;

        Ok(result.modified_count == 1)
    }

    async fn remove_refresh_token(&self, user_id: &str, token: &str) -> AppResult<bool> {
        let Ok(object_id) = ObjectId::parse_str(user_id) else {
            return Ok(false);
        };

        let result = self
            .collection()
            .update_one(
                doc! { "_id": object_id, "refresh_tokens": token },
                doc! {
                    "$pull": { "refresh_tokens": token },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await?;

        Ok(result.modified_count == 1)
    }

    async fn clear_refresh_tokens(&self, user_id: &str) -> AppResult<()> {
        let Ok(object_id) = ObjectId::parse_str(user_id) else {
            return Ok(());
        };

        self.collection()
            .update_one(
                doc! { "_id": object_id },
                doc! {
                    "$set": {
                        "refresh_tokens": Vec::<String>::new(),
                        "updated_at": DateTime::now(),
                    }
                },
            )
            .await?;

        Ok(())
    }
}
