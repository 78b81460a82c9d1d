//! # Authentication Configuration Module
//!
//! JWT 서명 키, 토큰 수명, 로그아웃 정책 등 인증 관련 설정을 관리합니다.
//!
//! 서명 키는 요청마다 환경 변수에서 읽지 않습니다. 애플리케이션 시작 시
//! [`JwtConfig::from_env`]로 한 번 읽어 서비스 생성자에 주입하며,
//! 키가 없으면 이 시점에 `ConfigurationError`로 실패합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"      # 필수
//! export JWT_ACCESS_EXPIRATION_MINUTES="60"          # 기본값 60
//! export JWT_REFRESH_EXPIRATION_DAYS="7"             # 기본값 7
//! export LOGOUT_POLICY="lenient"                     # lenient | strict
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::JwtConfig;
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let signer = JwtService::new(&jwt_config)?;
//! ```

use std::env;
use chrono::Duration;
use log::warn;
use crate::errors::{AppError, AppResult};

const DEFAULT_ACCESS_TTL_MINUTES: i64 = 60;
const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

/// 로그아웃 시 토큰 서명 검증 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoutPolicy {
    /// 서명 검증에 실패해도 토큰 문자열로 소유자를 찾아 제거합니다.
    /// 어느 집합에도 없는 토큰은 성공으로 처리합니다.
    #[default]
    Lenient,
    /// 유효한 리프레시 토큰만 로그아웃을 허용합니다.
    Strict,
}

impl LogoutPolicy {
    /// 문자열에서 정책을 파싱합니다. 알 수 없는 값은 `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Some(LogoutPolicy::Lenient),
            "strict" => Some(LogoutPolicy::Strict),
            _ => None,
        }
    }
}

/// JWT 토큰 설정
///
/// 액세스 토큰과 리프레시 토큰은 같은 서명 키를 사용하고, 수명만 다릅니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC 서명 키
    pub secret: String,
    /// 액세스 토큰 수명 (분)
    pub access_ttl_minutes: i64,
    /// 리프레시 토큰 수명 (일)
    pub refresh_ttl_days: i64,
    /// 로그아웃 검증 정책
    pub logout_policy: LogoutPolicy,
}

impl JwtConfig {
    /// 기본 수명과 정책으로 설정을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 서명 키가 비어 있는 경우
    pub fn new(secret: impl Into<String>) -> AppResult<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "JWT 서명 키가 설정되지 않았습니다".to_string(),
            ));
        }

        Ok(Self {
            secret,
            access_ttl_minutes: DEFAULT_ACCESS_TTL_MINUTES,
            refresh_ttl_days: DEFAULT_REFRESH_TTL_DAYS,
            logout_policy: LogoutPolicy::default(),
        })
    }

    /// 프로세스 환경 변수에서 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - `JWT_SECRET`이 없거나 비어 있는 경우
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 조회 함수를 받아 설정을 구성합니다.
    ///
    /// 숫자 파싱에 실패하거나 0 이하인 값은 경고 후 기본값을 사용합니다.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").ok_or_else(|| {
            AppError::ConfigurationError("JWT_SECRET 환경 변수가 필요합니다".to_string())
        })?;

        let mut config = Self::new(secret)?;

        config.access_ttl_minutes = parse_positive(
            lookup("JWT_ACCESS_EXPIRATION_MINUTES"),
            "JWT_ACCESS_EXPIRATION_MINUTES",
            DEFAULT_ACCESS_TTL_MINUTES,
        );
        config.refresh_ttl_days = parse_positive(
            lookup("JWT_REFRESH_EXPIRATION_DAYS"),
            "JWT_REFRESH_EXPIRATION_DAYS",
            DEFAULT_REFRESH_TTL_DAYS,
        );

        if let Some(raw) = lookup("LOGOUT_POLICY") {
            config.logout_policy = LogoutPolicy::parse(&raw).unwrap_or_else(|| {
                warn!("알 수 없는 LOGOUT_POLICY 값: {}. lenient 사용", raw);
                LogoutPolicy::Lenient
            });
        }

        Ok(config)
    }

    /// 액세스 토큰 수명
    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_ttl_minutes)
    }

    /// 리프레시 토큰 수명
    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_ttl_days)
    }

    /// 로그아웃 정책을 지정한 사본을 반환합니다.
    pub fn with_logout_policy(mut self, policy: LogoutPolicy) -> Self {
        self.logout_policy = policy;
        self
    }
}

fn parse_positive(raw: Option<String>, key: &str, default: i64) -> i64 {
    match raw {
        None => default,
        Some(value) => match value.parse::<i64>() {
            Ok(parsed) if parsed > 0 => parsed,
            _ => {
                warn!("{} 파싱 실패: {}. 기본값 {} 사용", key, value, default);
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let result = JwtConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }

    #[test]
    fn test_blank_secret_is_configuration_error() {
        let result = JwtConfig::from_lookup(lookup_from(&[("JWT_SECRET", "   ")]));
        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }

    #[test]
    fn test_defaults_applied() {
        let config = JwtConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.access_ttl_minutes, 60);
        assert_eq!(config.refresh_ttl_days, 7);
        assert_eq!(config.logout_policy, LogoutPolicy::Lenient);
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ACCESS_EXPIRATION_MINUTES", "15"),
            ("JWT_REFRESH_EXPIRATION_DAYS", "-3"),
            ("LOGOUT_POLICY", "STRICT"),
        ]))
        .unwrap();

        assert_eq!(config.access_ttl(), Duration::minutes(15));
        assert_eq!(config.refresh_ttl(), Duration::days(7));
        assert_eq!(config.logout_policy, LogoutPolicy::Strict);
    }

    #[test]
    fn test_logout_policy_parse() {
        assert_eq!(LogoutPolicy::parse("lenient"), Some(LogoutPolicy::Lenient));
        assert_eq!(LogoutPolicy::parse(" Strict "), Some(LogoutPolicy::Strict));
        assert_eq!(LogoutPolicy::parse("whatever"), None);
    }
}
