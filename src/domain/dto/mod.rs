//! 데이터 전송 객체
//!
//! HTTP 요청 바디와 응답 바디의 형태를 정의합니다. 요청 DTO는 `validator`로
//! 검증되며, 응답 DTO는 민감 정보(비밀번호 해시, 리프레시 토큰 집합)를
//! 포함하지 않습니다.

pub mod tokens;
pub mod users;
