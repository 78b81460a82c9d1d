//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 토큰 수명주기(발급, 회전, 폐기)와 사용자 저장소에서 발생하는 실패를
//! 하나의 타입으로 표현합니다. `thiserror`로 메시지를 정의하고
//! `actix_web::ResponseError`로 HTTP 응답 변환을 담당합니다.
//!
//! 코어 서비스는 항상 이름 있는 에러 종류를 반환하며, 상태 코드 매핑은
//! 이 모듈의 `ResponseError` 구현 한 곳에서만 결정됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn refresh(token: &str) -> Result<TokenPair, AppError> {
//!     let claims = signer.verify(token).map_err(|_| AppError::InvalidToken(
//!         "리프레시 토큰 검증 실패".to_string()
//!     ))?;
//!     // ...
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 서명 키 누락 등 설정 오류 (500)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 로그인 실패. 사용자 존재 여부를 드러내지 않습니다 (400)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 서명/만료/형식 검증에 실패했거나 용도가 맞지 않는 토큰 (403)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// 검증은 통과했지만 소유자의 활성 집합에 없는 리프레시 토큰 (400)
    ///
    /// 이 에러가 반환될 때는 이미 해당 사용자의 모든 리프레시 토큰이 폐기된 상태입니다.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// 만료된 액세스 토큰 (401)
    #[error("Token expired")]
    TokenExpired,

    /// 인증 정보 없음 (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 잘못된 인증 정보 (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 리소스 찾을 수 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 충돌/중복 에러 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트가 분기 처리에 사용하는 안정적인 에러 코드
    ///
    /// 메시지는 바뀔 수 있지만 코드는 바뀌지 않습니다.
    /// 특히 `token_expired`는 클라이언트의 자동 갱신 트리거로 사용됩니다.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ConfigurationError(_) => "configuration_error",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken(_) => "invalid_token",
            AppError::InvalidRefreshToken => "invalid_refresh_token",
            AppError::TokenExpired => "token_expired",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::ValidationError(_) => "validation_error",
            AppError::ConflictError(_) => "conflict",
            AppError::DatabaseError(_) => "database_error",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::InvalidRefreshToken
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::TokenExpired | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken(_) | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::ConfigurationError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 서버 측 에러(500)는 내부 상세 메시지를 숨깁니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() {
            "서버 내부 오류가 발생했습니다".to_string()
        } else {
            self.to_string()
        };

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": self.code(),
            "message": message
        }))
    }
}

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        // 유니크 인덱스 위반은 조회 후 삽입 사이의 경쟁에서도 발생한다
        match e.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(w)) if w.code == DUPLICATE_KEY_CODE => {
                AppError::ConflictError("이미 사용 중인 이메일 또는 사용자명입니다".to_string())
            }
            _ => AppError::DatabaseError(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_credential_and_refresh_errors_are_bad_request() {
        assert_eq!(
            AppError::InvalidCredentials.error_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidRefreshToken.error_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_gate_errors_are_distinguishable() {
        assert_eq!(
            AppError::Unauthorized("no header".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Forbidden("bad signature".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_ne!(AppError::TokenExpired.code(), AppError::Unauthorized(String::new()).code());
    }

    #[test]
    fn test_invalid_token_response() {
        let error = AppError::InvalidToken("malformed".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(error.code(), "invalid_token");
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("User not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_configuration_error_response() {
        let error = AppError::ConfigurationError("JWT_SECRET".to_string());
        assert_eq!(
            error.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    fn write_error(code: i32) -> mongodb::error::Error {
        use mongodb::bson::{doc, from_document};
        use mongodb::error::{ErrorKind, WriteError, WriteFailure};

        let write_error: WriteError =
            from_document(doc! { "code": code, "errmsg": "write failed" }).unwrap();
        mongodb::error::Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    #[test]
    fn test_duplicate_key_maps_to_conflict() {
        let error = AppError::from(write_error(11000));
        assert!(matches!(error, AppError::ConflictError(_)));
        assert_eq!(error.status_code(), StatusCode::CONFLICT);

        let other = AppError::from(write_error(121));
        assert!(matches!(other, AppError::DatabaseError(_)));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
