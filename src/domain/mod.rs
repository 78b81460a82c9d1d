//! # Domain Layer Module
//!
//! 인증 코어가 다루는 도메인 타입을 모아둔 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 저장소에 영속되는 객체 (User)
//! ├── models    - 영속되지 않는 도메인 모델 (토큰 클레임, 인증된 사용자)
//! └── dto       - HTTP 요청/응답 계약
//! ```
//!
//! 서비스 계층은 `entities`와 `models`만 다루고, `dto`는 핸들러 경계에서만
//! 변환됩니다.

pub mod entities;
pub mod dto;
pub mod models;
