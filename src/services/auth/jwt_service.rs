//! JWT 서명 서비스 구현
//!
//! HS256 HMAC 서명으로 토큰 클레임을 서명하고 검증합니다.
//! 서명 키는 생성 시점에 한 번 주입되며, 키 없이 생성할 수 없습니다.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use crate::config::JwtConfig;
use crate::domain::models::token::{TokenClaims, VerificationError};
use crate::errors::{AppError, AppResult};

/// 토큰 서명/검증 인터페이스
pub trait TokenSigner: Send + Sync {
    /// 클레임을 서명하여 토큰 문자열을 만듭니다.
    fn sign(&self, claims: &TokenClaims) -> AppResult<String>;

    /// 토큰의 서명과 만료를 검증하고 클레임을 반환합니다.
    ///
    /// 용도(`kind`) 확인은 호출하는 쪽의 책임입니다.
    fn verify(&self, token: &str) -> Result<TokenClaims, VerificationError>;
}

/// HS256 JWT 서명 서비스
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// 설정에서 서명 키를 받아 서비스를 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 서명 키가 비어 있는 경우
    pub fn new(config: &JwtConfig) -> AppResult<Self> {
        Self::from_secret(&config.secret)
    }

    pub fn from_secret(secret: &str) -> AppResult<Self> {
        if secret.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "JWT 서명 키가 설정되지 않았습니다".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }
}

impl TokenSigner for JwtService {
    fn sign(&self, claims: &TokenClaims) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, VerificationError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => VerificationError::Expired,
                _ => VerificationError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::domain::models::token::TokenKind;

    fn claims(exp_offset_secs: i64) -> TokenClaims {
        let now = Utc::now().timestamp();
        TokenClaims {
            sub: "user-1".to_string(),
            jti: "nonce-1".to_string(),
            kind: TokenKind::Access,
            iat: now,
            exp: now + exp_offset_secs,
        }
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            JwtService::from_secret(""),
            Err(AppError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_sign_and_verify() {
        let service = JwtService::from_secret("test-secret").unwrap();
        let original = claims(300);

        let token = service.sign(&original).unwrap();
        assert_eq!(service.verify(&token).unwrap(), original);
    }

    #[test]
    fn test_expired_is_distinguished() {
        let service = JwtService::from_secret("test-secret").unwrap();
        let token = service.sign(&claims(-3600)).unwrap();

        assert_eq!(service.verify(&token), Err(VerificationError::Expired));
    }

    #[test]
    fn test_wrong_secret_and_garbage_are_invalid() {
        let signer = JwtService::from_secret("secret-a").unwrap();
        let verifier = JwtService::from_secret("secret-b").unwrap();
        let token = signer.sign(&claims(300)).unwrap();

        assert!(matches!(verifier.verify(&token), Err(VerificationError::Invalid(_))));
        assert!(matches!(verifier.verify("garbage"), Err(VerificationError::Invalid(_))));
    }
}
