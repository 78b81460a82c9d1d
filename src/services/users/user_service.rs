//! # 사용자 관리 서비스 구현
//!
//! 회원가입과 프로필 조회, 비밀번호 해싱/검증을 담당합니다.
//!
//! ## 보안 설계
//!
//! - **bcrypt 해싱**: cost는 [`PasswordConfig::bcrypt_cost`]로 환경별 결정
//! - **민감 정보 필터링**: 외부로 나가는 값은 항상 [`UserResponse`]로 변환
//! - **중복 방지**: 이메일/사용자명 중복은 저장소에서 `ConflictError`로 거부

use std::sync::Arc;
use std::time::Instant;
use bcrypt::hash;
use log::{debug, info};
use validator::Validate;
use crate::{
    config::PasswordConfig,
    domain::{
        dto::users::{request::CreateUserRequest, response::UserResponse},
        entities::users::user::User,
    },
    errors::{AppError, AppResult, ErrorContext},
    repositories::users::UserStore,
    utils::string_utils::{normalize_email, validate_required_string},
};

/// 사용자 관리 서비스
pub struct UserService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    /// 현재 환경의 bcrypt cost로 서비스를 생성합니다.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self::with_bcrypt_cost(store, PasswordConfig::bcrypt_cost())
    }

    pub fn with_bcrypt_cost(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// 새 사용자를 등록합니다.
    ///
    /// 토큰 발급은 하지 않습니다. 가입 직후 로그인 상태가 필요하면
    /// 호출하는 쪽에서 `TokenService::start_session`을 이어서 호출합니다.
    ///
    /// # Arguments
    ///
    /// * `request` - 사용자명, 이메일, 평문 비밀번호
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 입력값 검증 실패
    /// * `AppError::ConflictError` - 이메일 또는 사용자명 중복
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    pub async fn register(&self, request: CreateUserRequest) -> AppResult<User> {
        request.validate()?;

        let username = validate_required_string(&request.username, "사용자명")?;
        let email = normalize_email(&request.email);

        let hash_start = Instant::now();
        let password_hash = hash(&request.password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;
        debug!("Password hashing took: {:?}", hash_start.elapsed());

        let created = self
            .store
            .create(User::new_local(username, email, password_hash))
            .await?;

        info!(
            "회원가입 완료: {} ({})",
            created.username,
            created.id_string().unwrap_or_default()
        );
        Ok(created)
    }

    /// ID로 사용자 정보를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자가 없는 경우
    pub async fn get_user_by_id(&self, id: &str) -> AppResult<UserResponse> {
        self.store
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }
}

/// 평문 비밀번호와 bcrypt 해시를 비교합니다.
///
/// # Errors
///
/// * `AppError::InternalError` - 저장된 해시 형식이 잘못된 경우
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let verify_start = Instant::now();
    let is_valid = bcrypt::verify(password, password_hash).context("비밀번호 검증 실패")?;
    debug!("Password verification took: {:?}", verify_start.elapsed());

    Ok(is_valid)
}
