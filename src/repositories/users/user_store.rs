//! 사용자 저장소 인터페이스
//!
//! 토큰 수명주기 서비스가 호출하는 영속성 계약입니다.
//! 리프레시 토큰 집합은 반드시 이 trait의 원자적 연산으로만 변경합니다.

use async_trait::async_trait;
use crate::domain::entities::users::user::User;
use crate::errors::AppResult;

/// 사용자 저장소
///
/// # 원자성 요구사항
///
/// [`UserStore::rotate_refresh_token`]은 "기존 토큰이 집합에 있으면 제거하고
/// 새 토큰을 추가"를 하나의 조건부 갱신으로 수행해야 합니다. 같은 토큰으로
/// 동시에 들어온 두 요청 중 하나만 `true`를 받고, 나머지는 `false`를 받습니다.
/// 이 보장은 프로세스 내 락이 아닌 저장소 수준에서 이루어져야 여러 서버
/// 인스턴스가 떠 있어도 유지됩니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 사용자를 생성하고 ID가 채워진 엔티티를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 또는 사용자명 중복
    async fn create(&self, user: User) -> AppResult<User>;

    /// ID로 사용자를 조회합니다. 형식이 잘못된 ID는 `None`으로 처리합니다.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// 이메일 또는 사용자명으로 사용자를 조회합니다. 이메일을 먼저 확인합니다.
    ///
    /// 이메일은 정규화(공백 제거, 소문자)한 값으로 비교하고 사용자명은 그대로 비교합니다.
    async fn find_by_credential(&self, identifier: &str) -> AppResult<Option<User>>;

    /// 주어진 리프레시 토큰을 집합에 가진 사용자를 조회합니다.
    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<User>>;

    /// 리프레시 토큰을 사용자 집합에 추가합니다. 사용자가 없으면 `false`.
    async fn add_refresh_token(&self, user_id: &str, token: &str) -> AppResult<bool>;

    /// `old`가 집합에 있을 때만 `old`를 제거하고 `new`를 추가합니다.
    ///
    /// # Returns
    ///
    /// * `true` - 회전 성공
    /// * `false` - 사용자가 없거나 `old`가 이미 집합에 없음
    async fn rotate_refresh_token(&self, user_id: &str, old: &str, new: &str) -> AppResult<bool>;

    /// 리프레시 토큰 하나를 제거합니다. 실제로 제거되었으면 `true`.
    async fn remove_refresh_token(&self, user_id: &str, token: &str) -> AppResult<bool>;

    /// 사용자의 리프레시 토큰 집합을 비웁니다.
    async fn clear_refresh_tokens(&self, user_id: &str) -> AppResult<()>;
}
