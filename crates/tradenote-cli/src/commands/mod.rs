//! CLI 명령어 구현 모듈.
//!
//! 각 명령은 출력할 문자열을 반환하며, 출력 자체는 바이너리가 담당합니다.

pub mod output;
pub mod records;
pub mod report;
