//! # 토큰 유틸리티
//!
//! Authorization 헤더 파싱과 로그용 토큰 지문 계산을 담당합니다.

use sha2::{Digest, Sha256};

/// 허용하는 Authorization 스킴 (대소문자 무관)
const ACCEPTED_SCHEMES: [&str; 2] = ["bearer", "jwt"];

/// Authorization 헤더 값에서 토큰을 추출합니다.
///
/// `Bearer <token>`과 `JWT <token>` 형식을 받습니다. 스킴이 다르거나
/// 토큰 부분이 비어 있으면 `None`을 반환합니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(extract_token_from_header("Bearer abc"), Some("abc"));
/// assert_eq!(extract_token_from_header("jwt abc"), Some("abc"));
/// assert_eq!(extract_token_from_header("Basic abc"), None);
/// ```
pub fn extract_token_from_header(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;

    if !ACCEPTED_SCHEMES.contains(&scheme.to_lowercase().as_str()) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// 로그에 남길 토큰 지문 (SHA-256 앞 12자리)
///
/// 토큰 원문은 로그에 기록하지 않습니다.
pub fn fingerprint(token: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(token.as_bytes()));
    digest[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_and_jwt_schemes() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_token_from_header("bearer abc"), Some("abc"));
        assert_eq!(extract_token_from_header("JWT abc"), Some("abc"));
        assert_eq!(extract_token_from_header("jwt   abc  "), Some("abc"));
    }

    #[test]
    fn test_extract_rejects_other_shapes() {
        assert_eq!(extract_token_from_header(""), None);
        assert_eq!(extract_token_from_header("Bearer"), None);
        assert_eq!(extract_token_from_header("Bearer   "), None);
        assert_eq!(extract_token_from_header("Basic dXNlcjpwYXNz"), None);
        assert_eq!(extract_token_from_header("abc.def.ghi"), None);
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let a = fingerprint("token-a");
        assert_eq!(a.len(), 12);
        assert_eq!(a, fingerprint("token-a"));
        assert_ne!(a, fingerprint("token-b"));
    }
}
