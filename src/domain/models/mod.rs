//! 영속되지 않는 도메인 모델
//!
//! - [`token`] - 서명된 토큰 봉투의 클레임과 토큰 쌍
//! - [`auth`] - 액세스 게이트를 통과한 요청의 주체

pub mod auth;
pub mod token;
