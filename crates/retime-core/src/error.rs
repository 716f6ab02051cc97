//! Retime 핵심 에러 타입.
//!
//! 저장소/앱 crate는 이 타입을 그대로 전파하거나 `anyhow`로 감싼다.

use std::path::PathBuf;
use thiserror::Error;

/// 사용자 입력 유효성 검증 실패.
///
/// 메시지는 그대로 사용자에게 표시된다. 실패한 연산은 상태를 전혀 바꾸지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 구간 종료 프레임이 시작 프레임보다 앞섬
    #[error("The time ends before it starts.")]
    SpanEndsBeforeStart,

    /// 로드 시작/종료가 모두 0 (입력 없음)
    #[error("No input provided for the load.")]
    NoLoadInput,

    /// 길이 0인 로드
    #[error("The duration of the load is zero.")]
    ZeroLengthLoad,

    /// 로드 종료 프레임이 시작 프레임보다 앞섬
    #[error("The load ends before it starts.")]
    LoadEndsBeforeStart,

    /// 로드 합계가 전체 구간 길이를 초과
    #[error("The load time exceeds the time.")]
    LoadExceedsTime,

    /// 음수 프레임레이트
    #[error("The framerate cannot be negative.")]
    NegativeFramerate,

    /// 디버그 정보 파싱 실패
    #[error("The debug info provided is invalid. Please re-enter debug info.")]
    InvalidDebugInfo,

    /// 편집할 로드 없음
    #[error("There are no loads to edit.")]
    NoLoads,

    /// 세션 이력 없음
    #[error("There is no session history.")]
    NoSessionHistory,
}

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 입력 유효성 검증 실패 (복구 가능, 사용자에게 표시)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 로드 인덱스 범위 초과 (호출자 버그)
    #[error("로드 인덱스 범위 초과: {index} (로드 {len}개)")]
    LoadIndexOutOfRange {
        /// 요청한 인덱스
        index: usize,
        /// 현재 로드 개수
        len: usize,
    },

    /// 세션 파일 손상 (구조 오류 또는 불변식 위반)
    #[error("The file provided is corrupted: {} ({reason})", path.display())]
    Corrupted {
        /// 파일 경로
        path: PathBuf,
        /// 실패 사유
        reason: String,
    },

    /// 세션 파일 경로 미지정 (저장 대상 없음)
    #[error("저장할 파일 경로가 지정되지 않았습니다")]
    NoFilePath,

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 유효성 검증 에러인 경우 해당 값 반환
    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(v) => Some(*v),
            _ => None,
        }
    }
}
