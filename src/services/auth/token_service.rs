//! 토큰 수명주기 관리 서비스 구현
//!
//! 액세스/리프레시 토큰 쌍의 발급, 회전, 폐기와 요청 인증을 담당합니다.
//!
//! ## 리프레시 토큰 상태
//!
//! 리프레시 토큰의 상태는 소유자의 `refresh_tokens` 집합 포함 여부로 표현됩니다.
//!
//! ```text
//!              login / refresh
//!                    │
//!                    ▼
//!               ┌─────────┐   refresh 성공    ┌──────────┐
//!               │ ISSUED  │ ────────────────▶ │ CONSUMED │
//!               └─────────┘                   └──────────┘
//!                 │     │                          │
//!        logout   │     │ 재사용 감지               │ 재사용 시도
//!                 ▼     ▼                          ▼
//!          ┌─────────┐ ┌─────────────────────────────────┐
//!          │ REVOKED │ │ 소유자의 모든 리프레시 토큰 폐기    │
//!          └─────────┘ └─────────────────────────────────┘
//! ```
//!
//! 집합에 없는 토큰으로 갱신을 시도하면 해당 사용자의 세션 전체를 폐기합니다.
//! 탈취된 토큰을 쓴 공격자와 정상 사용자 모두 다시 로그인해야 합니다.

use std::sync::Arc;
use chrono::{Duration, Utc};
use log::{debug, info, warn};
use uuid::Uuid;
use crate::{
    config::{JwtConfig, LogoutPolicy},
    domain::models::token::{LoginOutcome, TokenClaims, TokenKind, TokenPair, VerificationError},
    errors::{AppError, AppResult},
    repositories::users::UserStore,
    services::auth::jwt_service::{JwtService, TokenSigner},
    services::users::user_service::verify_password,
    utils::token_utils::{extract_token_from_header, fingerprint},
};

/// 토큰 수명주기 관리자
///
/// 서명 키와 저장소는 생성 시점에 주입됩니다. 요청 처리 중에는 환경 변수를
/// 읽지 않습니다.
///
/// # Examples
///
/// ```rust,ignore
/// let store: Arc<dyn UserStore> = Arc::new(InMemoryUserRepository::new());
/// let tokens = TokenService::new(&JwtConfig::from_env()?, store)?;
///
/// let outcome = tokens.login("alice@example.com", "123456").await?;
/// let rotated = tokens.refresh(&outcome.tokens.refresh_token).await?;
/// tokens.logout(&rotated.refresh_token).await?;
/// ```
pub struct TokenService {
    store: Arc<dyn UserStore>,
    signer: Arc<dyn TokenSigner>,
    access_ttl: Duration,
    refresh_ttl: Duration,
    logout_policy: LogoutPolicy,
}

impl TokenService {
    /// HS256 서명 서비스를 구성하여 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 서명 키가 비어 있는 경우
    pub fn new(config: &JwtConfig, store: Arc<dyn UserStore>) -> AppResult<Self> {
        let signer = Arc::new(JwtService::new(config)?);
        Ok(Self::with_signer(config, store, signer))
    }

    /// 서명 서비스를 직접 주입하여 생성합니다.
    pub fn with_signer(
        config: &JwtConfig,
        store: Arc<dyn UserStore>,
        signer: Arc<dyn TokenSigner>,
    ) -> Self {
        Self {
            store,
            signer,
            access_ttl: config.access_ttl(),
            refresh_ttl: config.refresh_ttl(),
            logout_policy: config.logout_policy,
        }
    }

    /// 토큰 쌍을 서명합니다.
    ///
    /// 호출마다 새 nonce(`jti`)를 생성하며, 두 토큰은 `sub`와 `jti`를 공유하고
    /// `kind`와 만료 시간만 다릅니다. 이 함수는 저장소를 변경하지 않습니다.
    /// 발급된 리프레시 토큰을 클라이언트에 돌려주기 전에 집합에 추가하는 것은
    /// 호출하는 쪽([`Self::start_session`], [`Self::refresh`])의 책임입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    pub fn issue_token_pair(&self, user_id: &str) -> AppResult<TokenPair> {
        let now = Utc::now();
        let nonce = Uuid::new_v4().to_string();

        let access_claims = TokenClaims {
            sub: user_id.to_string(),
            jti: nonce.clone(),
            kind: TokenKind::Access,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };
        let refresh_claims = TokenClaims {
            sub: user_id.to_string(),
            jti: nonce,
            kind: TokenKind::Refresh,
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };

        Ok(TokenPair {
            access_token: self.signer.sign(&access_claims)?,
            refresh_token: self.signer.sign(&refresh_claims)?,
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    /// 새 토큰 쌍을 발급하고 리프레시 토큰을 사용자 집합에 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 저장 직전에 사용자가 사라진 경우
    pub async fn start_session(&self, user_id: &str) -> AppResult<TokenPair> {
        let pair = self.issue_token_pair(user_id)?;

        if !self.store.add_refresh_token(user_id, &pair.refresh_token).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        debug!(
            "리프레시 토큰 발급: 사용자 {} 토큰 {}",
            user_id,
            fingerprint(&pair.refresh_token)
        );
        Ok(pair)
    }

    /// 이메일 또는 사용자명과 비밀번호로 로그인합니다.
    ///
    /// 사용자가 없는 경우와 비밀번호가 틀린 경우를 구분하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidCredentials` - 인증 실패
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .store
            .find_by_credential(identifier.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            info!("로그인 실패: 비밀번호 불일치");
            return Err(AppError::InvalidCredentials);
        }

        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let tokens = self.start_session(&user_id).await?;
        info!("로그인 성공: 사용자 {}", user_id);

        Ok(LoginOutcome { tokens, user_id })
    }

    /// 리프레시 토큰을 회전시켜 새 토큰 쌍을 발급합니다.
    ///
    /// 처리 순서 (각 분기는 종료 상태)
    ///
    /// 1. 서명/만료 검증 실패 또는 리프레시 용도가 아닌 토큰: `InvalidToken`, 상태 변경 없음
    /// 2. 토큰 주체가 존재하지 않음: `NotFound`
    /// 3. 토큰이 소유자 집합에 없음: 집합 전체를 비운 뒤 `InvalidRefreshToken`
    /// 4. 조건부 회전(기존 제거 + 신규 추가)이 경쟁에서 밀림: 3과 동일하게 처리
    /// 5. 회전 성공: 새 토큰 쌍 반환
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.verify_refresh_token(refresh_token)?;
        let user_id = claims.sub;

        let user = self
            .store
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("토큰 소유자를 찾을 수 없습니다".to_string()))?;

        if !user.has_refresh_token(refresh_token) {
            return Err(self.revoke_on_reuse(&user_id, refresh_token).await);
        }

        let pair = self.issue_token_pair(&user_id)?;

        let rotated = self
            .store
            .rotate_refresh_token(&user_id, refresh_token, &pair.refresh_token)
            .await?;

        if !rotated {
            return Err(self.revoke_on_reuse(&user_id, refresh_token).await);
        }

        debug!(
            "리프레시 토큰 회전: 사용자 {} {} -> {}",
            user_id,
            fingerprint(refresh_token),
            fingerprint(&pair.refresh_token)
        );
        Ok(pair)
    }

    /// 리프레시 토큰 하나를 폐기합니다.
    ///
    /// 어느 집합에도 없는 토큰은 성공으로 처리합니다.
    /// 서명 검증에 실패한 토큰은 정책에 따라 처리가 달라집니다.
    ///
    /// * `LogoutPolicy::Lenient` - 토큰 문자열로 소유자를 찾아 제거합니다.
    /// * `LogoutPolicy::Strict` - `InvalidToken`을 반환합니다.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        let verified = self.verify_refresh_token(refresh_token);

        let owner_id = match (verified, self.logout_policy) {
            (Ok(claims), _) => Some(claims.sub),
            (Err(err), LogoutPolicy::Strict) => return Err(err),
            (Err(_), LogoutPolicy::Lenient) => self
                .store
                .find_by_refresh_token(refresh_token)
                .await?
                .and_then(|user| user.id_string()),
        };

        let removed = match owner_id {
            Some(user_id) => {
                self.store
                    .remove_refresh_token(&user_id, refresh_token)
                    .await?
            }
            None => false,
        };

        if removed {
            info!("로그아웃: 토큰 {} 폐기", fingerprint(refresh_token));
        } else {
            debug!("로그아웃: 활성 집합에 없는 토큰 {}", fingerprint(refresh_token));
        }
        Ok(())
    }

    /// 사용자의 모든 리프레시 토큰을 폐기합니다.
    pub async fn revoke_all(&self, user_id: &str) -> AppResult<()> {
        self.store.clear_refresh_tokens(user_id).await?;
        info!("전체 세션 폐기: 사용자 {}", user_id);
        Ok(())
    }

    /// Authorization 헤더를 검증하고 토큰 주체(사용자 ID)를 반환합니다.
    ///
    /// 리프레시 토큰 집합은 조회하지 않습니다. 이미 발급된 액세스 토큰은
    /// 만료될 때까지 유효합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Unauthorized` - 헤더가 없거나 토큰을 추출할 수 없음
    /// * `AppError::TokenExpired` - 만료된 토큰
    /// * `AppError::Forbidden` - 그 밖의 검증 실패 또는 액세스 용도가 아닌 토큰
    pub fn authenticate(&self, header_value: Option<&str>) -> AppResult<String> {
        let header_value = header_value
            .ok_or_else(|| AppError::Unauthorized("Authorization 헤더가 없습니다".to_string()))?;

        let token = extract_token_from_header(header_value).ok_or_else(|| {
            AppError::Unauthorized("유효하지 않은 인증 헤더 형식입니다".to_string())
        })?;

        let claims = self.signer.verify(token).map_err(|e| match e {
            VerificationError::Expired => AppError::TokenExpired,
            VerificationError::Invalid(reason) => AppError::Forbidden(reason),
        })?;

        if claims.kind != TokenKind::Access {
            return Err(AppError::Forbidden("액세스 토큰이 아닙니다".to_string()));
        }

        Ok(claims.sub)
    }

    fn verify_refresh_token(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.signer.verify(token).map_err(|e| match e {
            VerificationError::Expired => {
                AppError::InvalidToken("리프레시 토큰이 만료되었습니다".to_string())
            }
            VerificationError::Invalid(reason) => AppError::InvalidToken(reason),
        })?;

        if claims.kind != TokenKind::Refresh {
            return Err(AppError::InvalidToken("리프레시 토큰이 아닙니다".to_string()));
        }

        Ok(claims)
    }

    /// 재사용 감지 시 소유자의 토큰 집합을 비우고 반환할 에러를 만듭니다.
    ///
    /// 폐기에 실패하면 저장소 에러를 그대로 반환합니다.
    async fn revoke_on_reuse(&self, user_id: &str, presented: &str) -> AppError {
        warn!(
            "리프레시 토큰 재사용 감지: 사용자 {} 토큰 {}. 모든 세션을 폐기합니다",
            user_id,
            fingerprint(presented)
        );

        match self.store.clear_refresh_tokens(user_id).await {
            Ok(()) => AppError::InvalidRefreshToken,
            Err(e) => {
                log::error!("재사용 감지 후 세션 폐기 실패: 사용자 {}: {}", user_id, e);
                e
            }
        }
    }
}
