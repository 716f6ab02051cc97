//! Retime 도메인 모델.
//!
//! 측정 구간(`TimeSpan`)과 그 안에서 제외할 로드 구간(`LoadInterval`).
//! 프레임 경계는 모두 정수 프레임, 프레임레이트는 `Decimal`.

pub mod load;
pub mod time_span;

pub use load::LoadInterval;
pub use time_span::{TimeSpan, DEFAULT_FRAMERATE, DEFAULT_PRECISION};

/// 프레임 번호 (영상 시간의 최소 단위)
pub type Frame = i64;
