//! 로드 구간 모델.

use super::Frame;
use serde::{Deserialize, Serialize};

/// 공식 기록에서 제외되는 로딩 구간.
///
/// 자체 유효성 검증은 하지 않는다. 시작/종료 순서, 길이 0, 전체 구간 초과 여부는
/// 소유자인 [`TimeSpan`](super::TimeSpan)이 추가/수정 시점에 검사한다.
///
/// 세션 파일에는 `[start_frame, end_frame]` 2-원소 배열로 저장된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Frame, Frame)", into = "(Frame, Frame)")]
pub struct LoadInterval {
    /// 시작 프레임
    pub start_frame: Frame,
    /// 종료 프레임
    pub end_frame: Frame,
}

impl LoadInterval {
    pub fn new(start_frame: Frame, end_frame: Frame) -> Self {
        Self {
            start_frame,
            end_frame,
        }
    }

    /// 로드 길이 (프레임, `i64` 범위에서 포화)
    pub fn length(&self) -> Frame {
        self.end_frame.saturating_sub(self.start_frame)
    }
}

impl From<(Frame, Frame)> for LoadInterval {
    fn from((start_frame, end_frame): (Frame, Frame)) -> Self {
        Self::new(start_frame, end_frame)
    }
}

impl From<LoadInterval> for (Frame, Frame) {
    fn from(load: LoadInterval) -> Self {
        (load.start_frame, load.end_frame)
    }
}
