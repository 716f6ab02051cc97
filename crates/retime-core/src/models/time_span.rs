//! 측정 구간 모델.
//!
//! 시작/종료 프레임, 프레임레이트, 표시 정밀도, 로드 목록을 소유하고
//! 경과 시간(로드 포함/제외)과 포맷 문자열을 파생한다.
//!
//! 파생값은 저장하지 않고 매 조회 시 다시 계산한다. 로드 개수가 작아 비용이 없고,
//! 변경 후 오래된 값이 읽힐 여지가 없다.

use super::{Frame, LoadInterval};
use crate::error::{CoreError, ValidationError};
use crate::format::TimeComponents;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

/// 기본 프레임레이트 (60 FPS)
pub const DEFAULT_FRAMERATE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// 기본 표시 정밀도 (소수점 이하 자릿수)
pub const DEFAULT_PRECISION: u32 = 3;

/// 모드 노트에 붙는 도구 출처 링크
pub const ATTRIBUTION: &str =
    "[Conner's Retime Tool](https://github.com/connerglover/conners-retime-tool)";

/// 측정 구간
///
/// 모든 변경은 검증을 통과해야 적용되며, 실패 시 상태는 그대로 유지된다.
/// 로드는 삽입 순서로 보관되고 인덱스(0부터)로만 접근한다.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSpan {
    start_frame: Frame,
    end_frame: Frame,
    framerate: Decimal,
    precision: u32,
    loads: Vec<LoadInterval>,
}

impl Default for TimeSpan {
    fn default() -> Self {
        Self {
            start_frame: 0,
            end_frame: 0,
            framerate: DEFAULT_FRAMERATE,
            precision: DEFAULT_PRECISION,
            loads: Vec::new(),
        }
    }
}

impl TimeSpan {
    /// 구간 생성
    ///
    /// 종료가 시작보다 앞서면 `mutate`와 동일하게 거부한다.
    pub fn new(start_frame: Frame, end_frame: Frame, framerate: Decimal) -> Result<Self, CoreError> {
        if start_frame > end_frame {
            return Err(ValidationError::SpanEndsBeforeStart.into());
        }
        check_framerate(framerate)?;

        Ok(Self {
            start_frame,
            end_frame,
            framerate,
            ..Self::default()
        })
    }

    /// 정밀도 지정
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// 로드 목록 지정 (검증 포함)
    pub fn with_loads(mut self, loads: Vec<LoadInterval>) -> Result<Self, CoreError> {
        self.replace_loads(loads)?;
        Ok(self)
    }

    pub fn start_frame(&self) -> Frame {
        self.start_frame
    }

    pub fn end_frame(&self) -> Frame {
        self.end_frame
    }

    pub fn framerate(&self) -> Decimal {
        self.framerate
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn loads(&self) -> &[LoadInterval] {
        &self.loads
    }

    /// 인덱스로 로드 조회
    pub fn load(&self, index: usize) -> Result<&LoadInterval, CoreError> {
        self.loads.get(index).ok_or(CoreError::LoadIndexOutOfRange {
            index,
            len: self.loads.len(),
        })
    }

    /// 종료 프레임이 설정되었는지 여부
    ///
    /// 종료 프레임 0은 "아직 입력되지 않음"으로 취급한다. 이 상태에서는 시작 프레임만
    /// 변경할 때 순서 검사를 건너뛰며, 길이가 일시적으로 음수가 될 수 있다.
    pub fn has_end(&self) -> bool {
        self.end_frame != 0
    }

    // ============================================================
    // 변경 연산
    // ============================================================

    /// 구간 부분 변경
    ///
    /// 지정한 값만 바뀌고 나머지는 유지된다. 검증 실패 시 아무것도 바뀌지 않는다.
    pub fn mutate(
        &mut self,
        start_frame: Option<Frame>,
        end_frame: Option<Frame>,
        framerate: Option<Decimal>,
    ) -> Result<(), CoreError> {
        match (start_frame, end_frame) {
            (Some(start), Some(end)) if start > end => {
                return Err(ValidationError::SpanEndsBeforeStart.into());
            }
            (Some(start), None) if start > self.end_frame && self.has_end() => {
                return Err(ValidationError::SpanEndsBeforeStart.into());
            }
            (None, Some(end)) if self.start_frame > end => {
                return Err(ValidationError::SpanEndsBeforeStart.into());
            }
            _ => {}
        }

        // 종료가 입력된 상태라면 새 구간 길이가 로드 합계 이상이어야 한다
        let new_start = start_frame.unwrap_or(self.start_frame);
        let new_end = end_frame.unwrap_or(self.end_frame);
        if new_end != 0
            && !self.loads.is_empty()
            && new_end.saturating_sub(new_start) < self.total_load_length()
        {
            return Err(ValidationError::LoadExceedsTime.into());
        }

        if let Some(framerate) = framerate {
            check_framerate(framerate)?;
        }

        if let Some(start) = start_frame {
            self.start_frame = start;
        }
        if let Some(end) = end_frame {
            self.end_frame = end;
        }
        if let Some(framerate) = framerate {
            self.framerate = framerate.normalize();
        }

        debug!(
            "구간 변경: {}..{} @ {} FPS",
            self.start_frame, self.end_frame, self.framerate
        );
        Ok(())
    }

    /// 표시 정밀도 변경
    pub fn set_precision(&mut self, precision: u32) {
        self.precision = precision;
    }

    /// 로드 추가
    ///
    /// 검사 순서: 입력 없음 → 길이 0 → 역순 → 전체 구간 초과. 처음 실패한 검사가 반환된다.
    pub fn add_load(&mut self, start_frame: Frame, end_frame: Frame) -> Result<(), CoreError> {
        let load = LoadInterval::new(start_frame, end_frame);
        check_new_load(&load, self.length_excluding_loads())?;

        self.loads.push(load);
        debug!(
            "로드 추가 #{}: {}..{} ({} 프레임)",
            self.loads.len(),
            start_frame,
            end_frame,
            load.length()
        );
        Ok(())
    }

    /// 로드 부분 변경
    ///
    /// 변경 결과가 역순, 길이 0, 전체 구간 초과가 되면 거부한다.
    pub fn mutate_load(
        &mut self,
        index: usize,
        start_frame: Option<Frame>,
        end_frame: Option<Frame>,
    ) -> Result<(), CoreError> {
        let current = *self.load(index)?;

        let updated = LoadInterval::new(
            start_frame.unwrap_or(current.start_frame),
            end_frame.unwrap_or(current.end_frame),
        );
        if updated.start_frame > updated.end_frame {
            return Err(ValidationError::LoadEndsBeforeStart.into());
        }
        if updated.length() == 0 {
            return Err(ValidationError::ZeroLengthLoad.into());
        }
        let remaining = self
            .length_excluding_loads()
            .saturating_add(current.length())
            .saturating_sub(updated.length());
        if remaining < 0 {
            return Err(ValidationError::LoadExceedsTime.into());
        }

        self.loads[index] = updated;
        debug!(
            "로드 변경 #{}: {}..{}",
            index + 1,
            updated.start_frame,
            updated.end_frame
        );
        Ok(())
    }

    /// 로드 삭제
    ///
    /// 이후 로드의 인덱스는 하나씩 당겨진다.
    pub fn delete_load(&mut self, index: usize) -> Result<LoadInterval, CoreError> {
        self.load(index)?;
        let removed = self.loads.remove(index);
        debug!("로드 삭제 #{}", index + 1);
        Ok(removed)
    }

    /// 로드 여러 개 삭제
    ///
    /// 인덱스는 호출 시점 기준이다. 내림차순으로 지우므로 중간에 인덱스가 밀리지 않는다.
    /// 하나라도 범위를 벗어나면 아무것도 지우지 않는다. 중복 인덱스는 한 번만 처리한다.
    pub fn delete_loads(&mut self, indices: &[usize]) -> Result<Vec<LoadInterval>, CoreError> {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        if let Some(&largest) = sorted.first() {
            self.load(largest)?;
        }

        let removed = sorted
            .into_iter()
            .map(|index| self.loads.remove(index))
            .collect::<Vec<_>>();
        debug!("로드 {}개 삭제", removed.len());
        Ok(removed)
    }

    /// 로드 전체 삭제
    pub fn clear_loads(&mut self) {
        self.loads.clear();
        debug!("로드 전체 삭제");
    }

    /// 로드 목록 통째로 교체
    ///
    /// 각 로드를 순서대로 `add_load`와 같은 규칙으로 검사한다. 실패 시 기존 목록 유지.
    pub fn replace_loads(&mut self, loads: Vec<LoadInterval>) -> Result<(), CoreError> {
        let mut remaining = self.length();
        for load in &loads {
            check_new_load(load, remaining)?;
            remaining = remaining.saturating_sub(load.length());
        }

        self.loads = loads;
        Ok(())
    }

    // ============================================================
    // 파생값
    // ============================================================

    /// 전체 길이 (프레임)
    ///
    /// 프레임 연산은 `i64` 범위에서 포화(saturating)된다.
    pub fn length(&self) -> Frame {
        self.end_frame.saturating_sub(self.start_frame)
    }

    /// 로드 길이 합계 (프레임)
    pub fn total_load_length(&self) -> Frame {
        self.loads
            .iter()
            .map(LoadInterval::length)
            .fold(0, Frame::saturating_add)
    }

    /// 로드를 제외한 길이 (프레임)
    pub fn length_excluding_loads(&self) -> Frame {
        self.length().saturating_sub(self.total_load_length())
    }

    /// 로드 평균 길이 (프레임, 내림). 로드가 없으면 0.
    pub fn average_load_length(&self) -> Frame {
        if self.loads.is_empty() {
            return 0;
        }
        self.total_load_length()
            .div_euclid(self.loads.len() as Frame)
    }

    /// 로드 포함 경과 시간 (초)
    pub fn elapsed_with_loads(&self) -> Decimal {
        self.frames_to_seconds(self.length())
    }

    /// 로드 제외 경과 시간 (초)
    pub fn elapsed_without_loads(&self) -> Decimal {
        self.frames_to_seconds(self.length_excluding_loads())
    }

    /// 선택한 기준의 경과 시간
    pub fn elapsed(&self, without_loads: bool) -> Decimal {
        if without_loads {
            self.elapsed_without_loads()
        } else {
            self.elapsed_with_loads()
        }
    }

    /// 로드 하나의 길이 (초)
    pub fn load_seconds(&self, index: usize) -> Result<Decimal, CoreError> {
        let load = self.load(index)?;
        Ok(self.frames_to_seconds(load.length()))
    }

    /// 시작 프레임 위치 (초)
    pub fn start_seconds(&self) -> Decimal {
        self.frames_to_seconds(self.start_frame)
    }

    /// 종료 프레임 위치 (초)
    pub fn end_seconds(&self) -> Decimal {
        self.frames_to_seconds(self.end_frame)
    }

    /// 프레임 수를 초로 변환
    ///
    /// `precision` 자리로 은행가 반올림(half-even)하고 자릿수를 고정한다.
    /// 프레임레이트가 0이면 에러 없이 0을 반환한다.
    pub fn frames_to_seconds(&self, frames: Frame) -> Decimal {
        if self.framerate.is_zero() {
            return fixed_scale(Decimal::ZERO, self.precision);
        }

        match Decimal::from(frames).checked_div(self.framerate) {
            Some(seconds) => fixed_scale(seconds, self.precision),
            None => {
                warn!(
                    "시간 계산 범위 초과: {} 프레임 / {} FPS",
                    frames, self.framerate
                );
                fixed_scale(Decimal::ZERO, self.precision)
            }
        }
    }

    // ============================================================
    // 포맷
    // ============================================================

    /// 시/분/초/밀리초 분해
    pub fn time_components(&self, without_loads: bool) -> TimeComponents {
        TimeComponents::from_seconds(self.elapsed(without_loads))
    }

    /// 고정폭 포맷 (`HHh MMm SSs mmmms`)
    pub fn src_format(&self, without_loads: bool) -> String {
        self.time_components(without_loads).verbose()
    }

    /// 축약 포맷 (`H:MM:SS.mmm` / `M:SS.mmm` / `SS.mmm`)
    pub fn iso_format(&self, without_loads: bool) -> String {
        self.time_components(without_loads).compact()
    }

    /// 기본 모드 노트
    ///
    /// 로드 포함/제외 시간이 다를 때만 두 값을 모두 표기한다.
    pub fn mod_note(&self) -> String {
        let with_loads = self.src_format(false);
        if self.elapsed_with_loads() != self.elapsed_without_loads() {
            format!(
                "Mod Note: Retimed to {} without loads, and {} with loads at {} FPS using {}",
                self.src_format(true),
                with_loads,
                self.framerate,
                ATTRIBUTION
            )
        } else {
            format!(
                "Mod Note: Retimed to {} at {} FPS using {}",
                with_loads, self.framerate, ATTRIBUTION
            )
        }
    }
}

/// 프레임레이트는 음수일 수 없다 (0은 허용)
fn check_framerate(framerate: Decimal) -> Result<(), ValidationError> {
    if framerate.is_sign_negative() && !framerate.is_zero() {
        return Err(ValidationError::NegativeFramerate);
    }
    Ok(())
}

/// 새 로드 검사 (`remaining`: 현재 남은 로드 제외 길이)
fn check_new_load(load: &LoadInterval, remaining: Frame) -> Result<(), ValidationError> {
    if load.start_frame == 0 && load.end_frame == 0 {
        Err(ValidationError::NoLoadInput)
    } else if load.start_frame == load.end_frame {
        Err(ValidationError::ZeroLengthLoad)
    } else if load.start_frame > load.end_frame {
        Err(ValidationError::LoadEndsBeforeStart)
    } else if remaining.saturating_sub(load.length()) < 0 {
        Err(ValidationError::LoadExceedsTime)
    } else {
        Ok(())
    }
}

/// `precision` 자리 half-even 반올림 후 자릿수 고정 (`120` → `120.000`)
fn fixed_scale(value: Decimal, precision: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(precision);
    rounded
}
