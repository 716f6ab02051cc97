//! 경과 시간 포맷.
//!
//! 두 렌더러가 같은 분해 단계를 공유한다:
//! - 고정폭: `HHh MMm SSs mmmms`
//! - 축약: `H:MM:SS.mmm` / `M:SS.mmm` / `SS.mmm` (화면 표시, 클립보드 복사용)

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 시/분/초/밀리초 분해 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeComponents {
    pub hours: u64,
    /// 0-59
    pub minutes: u8,
    /// 0-59
    pub seconds: u8,
    /// 0-999
    pub millis: u16,
}

impl TimeComponents {
    /// 초 단위 값을 분해
    ///
    /// 음수는 0으로 취급한다. 밀리초는 값의 소수부 자릿수 그대로에서 앞 3자리를 취하고
    /// 모자라면 오른쪽을 0으로 채운다 (`1.5` → 500ms, `1.23456` → 234ms).
    pub fn from_seconds(value: Decimal) -> Self {
        let value = value.max(Decimal::ZERO);

        let whole = value.trunc().to_u64().unwrap_or(u64::MAX);
        let millis = millis_digits(&value.to_string());

        Self {
            hours: whole / 3_600,
            minutes: (whole / 60 % 60) as u8,
            seconds: (whole % 60) as u8,
            millis,
        }
    }

    /// 고정폭 포맷 (`01h 01m 01s 500ms`)
    pub fn verbose(&self) -> String {
        format!(
            "{:02}h {:02}m {:02}s {:03}ms",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }

    /// 축약 포맷 (앞쪽의 0인 단위 생략)
    pub fn compact(&self) -> String {
        if self.hours > 0 {
            format!(
                "{}:{:02}:{:02}.{:03}",
                self.hours, self.minutes, self.seconds, self.millis
            )
        } else if self.minutes > 0 {
            format!("{}:{:02}.{:03}", self.minutes, self.seconds, self.millis)
        } else {
            format!("{:02}.{:03}", self.seconds, self.millis)
        }
    }
}

/// 10진 문자열 표현의 소수부에서 밀리초 3자리 추출
fn millis_digits(text: &str) -> u16 {
    let fraction = text.split_once('.').map(|(_, f)| f).unwrap_or("");

    fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(3)
        .filter_map(|c| c.to_digit(10))
        .fold(0u16, |acc, d| acc * 10 + d as u16)
}
