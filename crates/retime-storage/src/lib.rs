//! # retime-storage
//!
//! 로컬 세션 저장소.
//! 측정 구간을 JSON 세션 파일로 저장/로드하고, 최근에 연 파일 이력을 관리한다.
//!
//! ## 모듈
//! - `session_file`: 세션 파일 형식과 파일 저장소
//! - `history`: 최근 세션 파일 이력

pub mod history;
pub mod session_file;

pub use history::SessionHistory;
pub use session_file::{SessionFileStorage, SessionRecord};
