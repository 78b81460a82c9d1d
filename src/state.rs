//! 애플리케이션 공유 상태
//!
//! 서비스 인스턴스를 한 번 생성하여 `web::Data<AppState>`로 모든 워커에 공유합니다.

use std::sync::Arc;
use crate::config::JwtConfig;
use crate::errors::AppResult;
use crate::repositories::users::UserStore;
use crate::services::{auth::TokenService, users::UserService};

/// 핸들러와 미들웨어가 공유하는 서비스 묶음
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// 저장소와 JWT 설정으로 서비스를 구성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 서명 키가 비어 있는 경우
    pub fn new(store: Arc<dyn UserStore>, jwt_config: &JwtConfig) -> AppResult<Self> {
        let token_service = Arc::new(TokenService::new(jwt_config, store.clone())?);
        let user_service = Arc::new(UserService::new(store));

        Ok(Self {
            token_service,
            user_service,
        })
    }

    pub fn from_parts(token_service: Arc<TokenService>, user_service: Arc<UserService>) -> Self {
        Self {
            token_service,
            user_service,
        }
    }
}
