//! 토큰 수명주기 시나리오 테스트
//!
//! 인메모리 저장소 위에서 로그인, 회전, 재사용 감지, 로그아웃, 동시 갱신을 검증합니다.

use std::sync::Arc;
use std::task::Poll;

use async_trait::async_trait;
use futures_util::future::{join, poll_fn};
use social_auth_backend::config::JwtConfig;
use social_auth_backend::domain::dto::users::CreateUserRequest;
use social_auth_backend::domain::entities::users::user::User;
use social_auth_backend::errors::{AppError, AppResult};
use social_auth_backend::repositories::users::{InMemoryUserRepository, UserStore};
use social_auth_backend::services::auth::TokenService;
use social_auth_backend::services::users::UserService;

const SECRET: &str = "integration-test-secret";

struct Harness {
    tokens: TokenService,
    users: UserService,
    store: Arc<dyn UserStore>,
}

impl Harness {
    fn new(store: Arc<dyn UserStore>) -> Self {
        let config = JwtConfig::new(SECRET).unwrap();
        Self {
            tokens: TokenService::new(&config, store.clone()).unwrap(),
            users: UserService::with_bcrypt_cost(store.clone(), 4),
            store,
        }
    }

    async fn register(&self, username: &str) -> String {
        let user = self
            .users
            .register(CreateUserRequest {
                username: username.to_string(),
                email: format!("{}@user.com", username),
                password: "123456".to_string(),
            })
            .await
            .unwrap();
        user.id_string().unwrap()
    }

    async fn active_tokens(&self, user_id: &str) -> usize {
        self.store
            .find_by_id(user_id)
            .await
            .unwrap()
            .unwrap()
            .refresh_tokens
            .len()
    }
}

fn in_memory() -> Arc<dyn UserStore> {
    Arc::new(InMemoryUserRepository::new())
}

#[actix_web::test]
async fn test_sequential_logins_yield_distinct_pairs() {
    let h = Harness::new(in_memory());
    let user_id = h.register("tester").await;

    let first = h.tokens.login("tester@user.com", "123456").await.unwrap();
    let second = h.tokens.login("tester@user.com", "123456").await.unwrap();

    assert_ne!(first.tokens.access_token, second.tokens.access_token);
    assert_ne!(first.tokens.refresh_token, second.tokens.refresh_token);
    assert_eq!(h.active_tokens(&user_id).await, 2);
}

#[actix_web::test]
async fn test_login_with_registered_mixed_case_email() {
    let h = Harness::new(in_memory());
    let user = h
        .users
        .register(CreateUserRequest {
            username: "bob".to_string(),
            email: "Bob@Example.com".to_string(),
            password: "123456".to_string(),
        })
        .await
        .unwrap();
    let user_id = user.id_string().unwrap();

    let outcome = h.tokens.login("Bob@Example.com", "123456").await.unwrap();
    assert_eq!(outcome.user_id, user_id);

    let lowered = h.tokens.login("bob@example.com", "123456").await.unwrap();
    assert_eq!(lowered.user_id, user_id);
}

#[actix_web::test]
async fn test_rotation_then_replay_revokes_whole_chain() {
    let h = Harness::new(in_memory());
    let user_id = h.register("tester").await;

    let login = h.tokens.login("tester", "123456").await.unwrap();
    let r1 = login.tokens.refresh_token;

    let rotated = h.tokens.refresh(&r1).await.unwrap();
    let r2 = rotated.refresh_token;
    assert_ne!(r1, r2);
    assert_eq!(h.active_tokens(&user_id).await, 1);

    // r1 재사용: 재사용 감지로 세션 전체 폐기
    let replay = h.tokens.refresh(&r1).await.unwrap_err();
    assert!(matches!(replay, AppError::InvalidRefreshToken));
    assert_eq!(h.active_tokens(&user_id).await, 0);

    // 정상 회전으로 받은 r2도 더 이상 쓸 수 없다
    let after = h.tokens.refresh(&r2).await.unwrap_err();
    assert!(matches!(after, AppError::InvalidRefreshToken));

    // 다시 로그인하면 정상 동작
    let relogin = h.tokens.login("tester", "123456").await.unwrap();
    let r3 = h.tokens.refresh(&relogin.tokens.refresh_token).await.unwrap();
    assert!(!r3.access_token.is_empty());
    assert_eq!(h.active_tokens(&user_id).await, 1);
}

#[actix_web::test]
async fn test_logout_then_refresh_fails() {
    let h = Harness::new(in_memory());
    let user_id = h.register("tester").await;

    let login = h.tokens.login("tester", "123456").await.unwrap();
    h.tokens.logout(&login.tokens.refresh_token).await.unwrap();
    assert_eq!(h.active_tokens(&user_id).await, 0);

    let err = h.tokens.refresh(&login.tokens.refresh_token).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidRefreshToken));
}

#[actix_web::test]
async fn test_logout_is_idempotent() {
    let h = Harness::new(in_memory());
    h.register("tester").await;
    let login = h.tokens.login("tester", "123456").await.unwrap();

    h.tokens.logout("garbage").await.unwrap();
    h.tokens.logout(&login.tokens.refresh_token).await.unwrap();
    h.tokens.logout(&login.tokens.refresh_token).await.unwrap();
    h.tokens.logout(&login.tokens.access_token).await.unwrap();
}

#[actix_web::test]
async fn test_logout_only_touches_presented_token() {
    let h = Harness::new(in_memory());
    let user_id = h.register("tester").await;

    let phone = h.tokens.login("tester", "123456").await.unwrap();
    let laptop = h.tokens.login("tester", "123456").await.unwrap();

    h.tokens.logout(&phone.tokens.refresh_token).await.unwrap();

    assert_eq!(h.active_tokens(&user_id).await, 1);
    assert!(h.tokens.refresh(&laptop.tokens.refresh_token).await.is_ok());
}

#[actix_web::test]
async fn test_access_token_is_not_a_refresh_token() {
    let h = Harness::new(in_memory());
    let user_id = h.register("tester").await;
    let login = h.tokens.login("tester", "123456").await.unwrap();

    let err = h.tokens.refresh(&login.tokens.access_token).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidToken(_)));
    assert_eq!(h.active_tokens(&user_id).await, 1);
}

#[actix_web::test]
async fn test_gate_does_not_consult_refresh_set() {
    let h = Harness::new(in_memory());
    let user_id = h.register("tester").await;
    let login = h.tokens.login("tester", "123456").await.unwrap();

    h.tokens.revoke_all(&user_id).await.unwrap();

    let header = format!("Bearer {}", login.tokens.access_token);
    assert_eq!(h.tokens.authenticate(Some(&header)).unwrap(), user_id);
}

/// 모든 저장소 호출 앞에서 한 번씩 양보하는 래퍼
///
/// 같은 태스크 안에서 `join`으로 묶인 두 갱신 요청이 읽기와 쓰기 사이에서
/// 서로 교차하도록 만듭니다.
struct YieldingStore {
    inner: InMemoryUserRepository,
}

async fn yield_once() {
    let mut yielded = false;
    poll_fn(|cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

#[async_trait]
impl UserStore for YieldingStore {
    async fn create(&self, user: User) -> AppResult<User> {
        yield_once().await;
        self.inner.create(user).await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        yield_once().await;
        self.inner.find_by_id(id).await
    }

    async fn find_by_credential(&self, identifier: &str) -> AppResult<Option<User>> {
        yield_once().await;
        self.inner.find_by_credential(identifier).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<User>> {
        yield_once().await;
        self.inner.find_by_refresh_token(token).await
    }

    async fn add_refresh_token(&self, user_id: &str, token: &str) -> AppResult<bool> {
        yield_once().await;
        self.inner.add_refresh_token(user_id, token).await
    }

    async fn rotate_refresh_token(&self, user_id: &str, old: &str, new: &str) -> AppResult<bool> {
        yield_once().await;
        self.inner.rotate_refresh_token(user_id, old, new).await
    }

    async fn remove_refresh_token(&self, user_id: &str, token: &str) -> AppResult<bool> {
        yield_once().await;
        self.inner.remove_refresh_token(user_id, token).await
    }

    async fn clear_refresh_tokens(&self, user_id: &str) -> AppResult<()> {
        yield_once().await;
        self.inner.clear_refresh_tokens(user_id).await
    }
}

#[actix_web::test]
async fn test_concurrent_refresh_single_winner() {
    let h = Harness::new(Arc::new(YieldingStore {
        inner: InMemoryUserRepository::new(),
    }));
    let user_id = h.register("racer").await;
    let login = h.tokens.login("racer", "123456").await.unwrap();
    let token = login.tokens.refresh_token;

    let (a, b) = join(h.tokens.refresh(&token), h.tokens.refresh(&token)).await;

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);

    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(loser, Err(AppError::InvalidRefreshToken)));

    // 패자가 재사용 감지를 일으켰으므로 승자의 새 토큰까지 폐기된다
    assert_eq!(h.active_tokens(&user_id).await, 0);
}
