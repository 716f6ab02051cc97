//! 세션 파일 저장소.
//!
//! 세션 파일 형식:
//!
//! ```json
//! {
//!   "start_frame": 0,
//!   "end_frame": 7200,
//!   "framerate": "60",
//!   "loads": [[100, 160], [900, 1020]]
//! }
//! ```
//!
//! `framerate`는 문자열로 기록하고, 읽을 때는 숫자도 받는다.

use retime_core::error::CoreError;
use retime_core::models::{Frame, LoadInterval, TimeSpan, DEFAULT_PRECISION};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 세션 파일 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub start_frame: Frame,
    pub end_frame: Frame,
    pub framerate: Decimal,
    pub loads: Vec<LoadInterval>,
}

impl From<&TimeSpan> for SessionRecord {
    fn from(time: &TimeSpan) -> Self {
        Self {
            start_frame: time.start_frame(),
            end_frame: time.end_frame(),
            framerate: time.framerate(),
            loads: time.loads().to_vec(),
        }
    }
}

impl SessionRecord {
    /// 측정 구간으로 변환
    ///
    /// 구간과 로드는 편집 시와 같은 규칙으로 검증된다. 종료 프레임이 0(미입력)인
    /// 세션도 그대로 복원된다.
    pub fn into_time_span(self, precision: u32) -> Result<TimeSpan, CoreError> {
        let mut time = TimeSpan::default().with_precision(precision);
        time.mutate(Some(self.start_frame), None, Some(self.framerate))?;
        if self.end_frame != 0 {
            time.mutate(None, Some(self.end_frame), None)?;
        }
        time.replace_loads(self.loads)?;
        Ok(time)
    }
}

/// 세션 파일 저장소
#[derive(Debug, Clone)]
pub struct SessionFileStorage {
    /// 열린 구간에 적용할 표시 정밀도
    precision: u32,
}

impl Default for SessionFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl SessionFileStorage {
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// 세션 파일 열기
    ///
    /// 파일을 읽지 못하면 I/O 에러, 구조가 잘못되었거나 값이 검증을 통과하지 못하면
    /// `Corrupted`를 반환한다. 어느 경우든 호출자의 현재 세션은 건드리지 않는다.
    pub fn open(&self, path: &Path) -> Result<TimeSpan, CoreError> {
        let content = fs::read_to_string(path)?;

        let record: SessionRecord =
            serde_json::from_str(&content).map_err(|e| corrupted(path, e.to_string()))?;
        let load_count = record.loads.len();
        let time = record
            .into_time_span(self.precision)
            .map_err(|e| corrupted(path, e.to_string()))?;

        info!(
            "세션 열기: {} ({}..{}, 로드 {}개)",
            path.display(),
            time.start_frame(),
            time.end_frame(),
            load_count
        );
        Ok(time)
    }

    /// 세션 파일 저장 (덮어쓰기)
    pub fn save(&self, path: &Path, time: &TimeSpan) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                debug!("세션 디렉토리 생성: {}", parent.display());
            }
        }

        let content = serde_json::to_string_pretty(&SessionRecord::from(time))?;
        fs::write(path, content)?;

        info!("세션 저장: {}", path.display());
        Ok(())
    }
}

fn corrupted(path: &Path, reason: String) -> CoreError {
    CoreError::Corrupted {
        path: PathBuf::from(path),
        reason,
    }
}
