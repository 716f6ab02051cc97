//! # retime-app
//!
//! `retime` 바이너리의 라이브러리 부분.
//! 사용자 입력 정리와 세션 컨트롤러를 통합 테스트에서도 쓸 수 있도록 분리한다.

pub mod input;
pub mod session;

pub use session::{LoadCheck, RetimeSession};
