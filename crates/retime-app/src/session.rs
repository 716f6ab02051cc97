//! 리타임 세션 컨트롤러.
//!
//! 현재 측정 구간, 열린 파일 경로, 최근 파일 이력, 설정을 묶어 관리한다.
//! 입력 칸 문자열을 정리해 구간에 반영하고, 파일 열기/저장과 이력 전환을 처리한다.

use crate::input::{clean_framerate, parse_frame_input};
use retime_core::config::AppConfig;
use retime_core::error::{CoreError, ValidationError};
use retime_core::models::{Frame, LoadInterval, TimeSpan};
use retime_storage::{SessionFileStorage, SessionHistory};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 로드 추가 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadCheck {
    /// 추가됨
    Added,
    /// 평균 대비 지나치게 길어 추가하지 않음 (`force`로 다시 호출하면 추가)
    SuspiciouslyLong {
        /// 새 로드 길이 (프레임)
        length: Frame,
        /// 기존 로드 평균 길이 (프레임, 내림)
        average: Frame,
    },
}

/// 리타임 세션
#[derive(Debug)]
pub struct RetimeSession {
    time: TimeSpan,
    file_path: Option<PathBuf>,
    history: SessionHistory,
    config: AppConfig,
    storage: SessionFileStorage,
}

impl RetimeSession {
    /// 설정값으로 빈 세션 생성
    pub fn new(config: AppConfig) -> Self {
        Self {
            time: fresh_time(&config),
            file_path: None,
            history: SessionHistory::default(),
            storage: SessionFileStorage::new(config.retime.precision),
            config,
        }
    }

    pub fn time(&self) -> &TimeSpan {
        &self.time
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ============================================================
    // 세션 파일
    // ============================================================

    /// 새 구간으로 교체
    ///
    /// 열려 있던 파일은 이력으로 옮겨진다.
    pub fn new_time(&mut self) {
        self.time = fresh_time(&self.config);
        self.retire_current_path();
        info!("새 세션");
    }

    /// 세션 파일 열기
    ///
    /// 실패하면 현재 구간, 경로, 이력은 그대로다.
    pub fn open(&mut self, path: &Path) -> Result<(), CoreError> {
        let time = self.storage.open(path)?;
        self.history.remove(path);
        self.install(time, path.to_path_buf());
        Ok(())
    }

    /// 현재 파일에 저장
    pub fn save(&self) -> Result<(), CoreError> {
        let path = self.file_path.as_deref().ok_or(CoreError::NoFilePath)?;
        self.storage.save(path, &self.time)
    }

    /// 새 경로에 저장하고 현재 파일로 지정
    pub fn save_as(&mut self, path: &Path) -> Result<(), CoreError> {
        self.storage.save(path, &self.time)?;

        if self.file_path.as_deref() != Some(path) {
            self.retire_current_path();
            self.history.remove(path);
            self.file_path = Some(path.to_path_buf());
        }
        Ok(())
    }

    /// 이력의 파일 다시 열기 (0이 가장 최근)
    ///
    /// 연 경로는 이력에서 빠지고 직전 파일이 이력 맨 앞에 들어간다.
    pub fn open_from_history(&mut self, index: usize) -> Result<(), CoreError> {
        let path = self
            .history
            .get(index)
            .map(Path::to_path_buf)
            .ok_or(ValidationError::NoSessionHistory)?;

        let time = self.storage.open(&path)?;
        let path = self.history.take(index).unwrap_or(path);
        self.install(time, path);
        Ok(())
    }

    /// 최근 파일 이력 비우기 (현재 파일은 유지)
    pub fn clear_history(&mut self) {
        self.history.clear();
        info!("세션 이력 비움");
    }

    fn install(&mut self, time: TimeSpan, path: PathBuf) {
        self.time = time;
        self.retire_current_path();
        self.file_path = Some(path);
    }

    fn retire_current_path(&mut self) {
        if let Some(previous) = self.file_path.take() {
            self.history.push(previous);
        }
    }

    // ============================================================
    // 구간 입력
    // ============================================================

    /// 시작 프레임 입력 (숫자 또는 디버그 정보)
    pub fn set_start(&mut self, input: &str) -> Result<Frame, CoreError> {
        let frame = parse_frame_input(input, self.time.framerate())?;
        self.time.mutate(Some(frame), None, None)?;
        Ok(frame)
    }

    /// 종료 프레임 입력 (숫자 또는 디버그 정보)
    pub fn set_end(&mut self, input: &str) -> Result<Frame, CoreError> {
        let frame = parse_frame_input(input, self.time.framerate())?;
        self.time.mutate(None, Some(frame), None)?;
        Ok(frame)
    }

    /// 프레임레이트 입력
    pub fn set_framerate(&mut self, input: &str) -> Result<Decimal, CoreError> {
        let framerate = clean_framerate(input);
        self.time.mutate(None, None, Some(framerate))?;
        Ok(self.time.framerate())
    }

    /// 표시 정밀도 변경
    pub fn set_precision(&mut self, precision: u32) {
        self.time.set_precision(precision);
        self.storage = SessionFileStorage::new(precision);
    }

    // ============================================================
    // 로드
    // ============================================================

    /// 로드 추가
    ///
    /// 기존 로드가 있고 새 로드가 평균의 `long_load_factor`배를 넘으면 `force` 없이는 추가하지 않는다.
    pub fn add_load(
        &mut self,
        start_frame: Frame,
        end_frame: Frame,
        force: bool,
    ) -> Result<LoadCheck, CoreError> {
        let length = end_frame.saturating_sub(start_frame);
        let loads = self.time.loads();

        if !force && !loads.is_empty() {
            let factor = Frame::from(self.config.retime.long_load_factor);
            let count = loads.len() as Frame;
            // length > factor * (total / count)
            if length.saturating_mul(count) > factor.saturating_mul(self.time.total_load_length()) {
                let average = self.time.average_load_length();
                warn!("긴 로드: {} 프레임 (평균 {})", length, average);
                return Ok(LoadCheck::SuspiciouslyLong { length, average });
            }
        }

        self.time.add_load(start_frame, end_frame)?;
        Ok(LoadCheck::Added)
    }

    /// 로드 편집 (지정한 값만 변경)
    pub fn edit_load(
        &mut self,
        index: usize,
        start_frame: Option<Frame>,
        end_frame: Option<Frame>,
    ) -> Result<(), CoreError> {
        self.require_loads()?;
        self.time.mutate_load(index, start_frame, end_frame)
    }

    /// 선택한 로드 일괄 삭제
    pub fn delete_loads(&mut self, indices: &[usize]) -> Result<Vec<LoadInterval>, CoreError> {
        self.require_loads()?;
        self.time.delete_loads(indices)
    }

    pub fn clear_loads(&mut self) {
        self.time.clear_loads();
    }

    fn require_loads(&self) -> Result<(), CoreError> {
        if self.time.loads().is_empty() {
            return Err(ValidationError::NoLoads.into());
        }
        Ok(())
    }

    // ============================================================
    // 표시
    // ============================================================

    /// 실시간 표시 문자열 (로드 포함, 로드 제외)
    pub fn displays(&self) -> (String, String) {
        (self.time.iso_format(false), self.time.iso_format(true))
    }

    /// 로드 목록 표시 (`"1: 1.000"`)
    pub fn load_list(&self) -> Vec<String> {
        (0..self.time.loads().len())
            .filter_map(|index| {
                let seconds = self.time.load_seconds(index).ok()?;
                Some(format!("{}: {}", index + 1, seconds))
            })
            .collect()
    }

    /// 설정된 템플릿으로 모드 노트 생성
    pub fn mod_note(&self) -> String {
        self.config.mod_note.format.render(&self.time)
    }
}

/// 설정의 프레임레이트/정밀도로 빈 구간 생성
fn fresh_time(config: &AppConfig) -> TimeSpan {
    let mut time = TimeSpan::default().with_precision(config.retime.precision);
    if let Err(e) = time.mutate(None, None, Some(config.retime.default_framerate)) {
        warn!("설정 프레임레이트 무시 ({}): {}", config.retime.default_framerate, e);
    }
    debug!("빈 구간 @ {} FPS", time.framerate());
    time
}
