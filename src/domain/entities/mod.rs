//! 영속 엔티티
//!
//! MongoDB 컬렉션 한 개에 대응하는 타입을 정의합니다.

pub mod users;
