//! 비즈니스 로직 계층
//!
//! - [`auth`] - 토큰 서명과 토큰 수명주기 관리
//! - [`users`] - 회원가입, 프로필 조회, 비밀번호 검증

pub mod users;
pub mod auth;
