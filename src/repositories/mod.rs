//! 데이터 액세스 계층
//!
//! [`users::user_store::UserStore`] trait과 그 구현체(MongoDB, 인메모리)를 제공합니다.

pub mod users;
