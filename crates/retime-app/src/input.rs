//! 사용자 입력 정리.
//!
//! 프레임/프레임레이트 입력 칸에 붙여넣은 텍스트를 숫자로 바꾼다.
//! 입력이 `}`로 끝나면 동영상 플레이어의 디버그 정보(JSON)로 보고 `cmt`(초)를 프레임으로 환산한다.

use retime_core::error::ValidationError;
use retime_core::models::{Frame, LoadInterval};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::debug;

/// 입력에서 첫 번째 연속 숫자열을 프레임으로 해석
///
/// 숫자가 없거나 `i64` 범위를 넘으면 0.
pub fn clean_frame(input: &str) -> Frame {
    let digits: String = input
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse().unwrap_or(0)
}

/// 프레임레이트 입력 정리
///
/// 숫자와 첫 번째 `.`만 남긴다. 숫자가 하나도 없으면 0, `.`로 끝나면 `0`을 붙인다.
pub fn clean_framerate(input: &str) -> Decimal {
    let mut cleaned = String::with_capacity(input.len() + 2);
    let mut seen_point = false;

    for c in input.chars() {
        match c {
            '0'..='9' => cleaned.push(c),
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push(c);
            }
            _ => {}
        }
    }

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Decimal::ZERO;
    }
    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }
    if cleaned.ends_with('.') {
        cleaned.push('0');
    }

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// 디버그 정보를 프레임으로 변환
///
/// 첫 `{`부터 끝까지를 JSON 객체로 읽고 `cmt` 값(숫자 또는 숫자 문자열)에 프레임레이트를
/// 곱해 정수로 반올림(half-even)한다.
pub fn debug_info_to_frame(debug_info: &str, framerate: Decimal) -> Result<Frame, ValidationError> {
    let start = debug_info
        .find('{')
        .ok_or(ValidationError::InvalidDebugInfo)?;

    let parsed: serde_json::Value = serde_json::from_str(&debug_info[start..])
        .map_err(|_| ValidationError::InvalidDebugInfo)?;

    let cmt = match parsed.get("cmt") {
        Some(serde_json::Value::Number(n)) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Some(serde_json::Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
    .ok_or(ValidationError::InvalidDebugInfo)?;

    let frame = cmt
        .checked_mul(framerate)
        .map(|v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
        .and_then(|v| v.to_i64())
        .ok_or(ValidationError::InvalidDebugInfo)?;

    debug!("디버그 정보 변환: cmt {} @ {} FPS → {}", cmt, framerate, frame);
    Ok(frame)
}

/// 프레임 입력 칸 해석
///
/// `}`로 끝나면 디버그 정보, 아니면 [`clean_frame`].
pub fn parse_frame_input(input: &str, framerate: Decimal) -> Result<Frame, ValidationError> {
    if input.trim_end().ends_with('}') {
        debug_info_to_frame(input, framerate)
    } else {
        Ok(clean_frame(input))
    }
}

/// `START:END` 형식의 로드 인자 해석 (각 부분은 [`clean_frame`]으로 정리)
pub fn parse_load_arg(arg: &str) -> Result<LoadInterval, String> {
    let (start, end) = arg
        .split_once(':')
        .ok_or_else(|| format!("로드는 START:END 형식이어야 합니다: {arg}"))?;

    Ok(LoadInterval::new(clean_frame(start), clean_frame(end)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use retime_core::models::DEFAULT_FRAMERATE;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn clean_frame_takes_first_digit_run() {
        assert_eq!(clean_frame("1234"), 1234);
        assert_eq!(clean_frame("  frame 42 of 90"), 42);
        assert_eq!(clean_frame("abc"), 0);
        assert_eq!(clean_frame(""), 0);
        assert_eq!(clean_frame("   "), 0);
        assert_eq!(clean_frame("-15"), 15);
    }

    #[test]
    fn clean_frame_overflow_is_zero() {
        assert_eq!(clean_frame("99999999999999999999999"), 0);
    }

    #[test]
    fn clean_framerate_rules() {
        assert_eq!(clean_framerate("60"), dec("60"));
        assert_eq!(clean_framerate("59.94 fps"), dec("59.94"));
        assert_eq!(clean_framerate("29.9.7"), dec("29.97"));
        assert_eq!(clean_framerate("30."), dec("30.0"));
        assert_eq!(clean_framerate(".5"), dec("0.5"));
        assert_eq!(clean_framerate("fps"), Decimal::ZERO);
        assert_eq!(clean_framerate("."), Decimal::ZERO);
        assert_eq!(clean_framerate("-60"), dec("60"));
    }

    #[test]
    fn debug_info_numeric_cmt() {
        let info = r#"Video ID: abc {"cmt": "12.5", "ver": "1"}"#;
        assert_eq!(debug_info_to_frame(info, DEFAULT_FRAMERATE), Ok(750));

        let info = r#"{"cmt": 1.0}"#;
        assert_eq!(debug_info_to_frame(info, dec("29.97")), Ok(30));

        let info = r#"{"cmt": 2e1}"#;
        assert_eq!(debug_info_to_frame(info, DEFAULT_FRAMERATE), Ok(1200));
    }

    #[test]
    fn debug_info_rounds_half_even() {
        // 1.5, 2.49..., 2.5, 2.5
        assert_eq!(debug_info_to_frame(r#"{"cmt": 0.025}"#, dec("60")), Ok(2));
        assert_eq!(debug_info_to_frame(r#"{"cmt": 0.0416666}"#, dec("60")), Ok(2));
        assert_eq!(debug_info_to_frame(r#"{"cmt": "0.05"}"#, dec("50")), Ok(2));
        assert_eq!(debug_info_to_frame(r#"{"cmt": "0.5"}"#, dec("5")), Ok(2));
    }

    #[test]
    fn debug_info_invalid() {
        let invalid = [
            "no braces at all",
            "{not json}",
            r#"{"ver": "1"}"#,
            r#"{"cmt": null}"#,
            r#"{"cmt": "soon"}"#,
            r#"{"cmt": 1} trailing"#,
        ];
        for info in invalid {
            assert_eq!(
                debug_info_to_frame(info, DEFAULT_FRAMERATE),
                Err(ValidationError::InvalidDebugInfo),
                "{info}"
            );
        }
    }

    #[test]
    fn parse_frame_input_dispatch() {
        assert_eq!(parse_frame_input("120", DEFAULT_FRAMERATE), Ok(120));
        assert_eq!(
            parse_frame_input(r#"{"cmt": "2"}"#, DEFAULT_FRAMERATE),
            Ok(120)
        );
        assert_eq!(
            parse_frame_input("broken }", DEFAULT_FRAMERATE),
            Err(ValidationError::InvalidDebugInfo)
        );
    }

    #[test]
    fn load_arg() {
        assert_eq!(parse_load_arg("100:160"), Ok(LoadInterval::new(100, 160)));
        assert_eq!(parse_load_arg(" 5 : x"), Ok(LoadInterval::new(5, 0)));
        assert!(parse_load_arg("100-160").is_err());
    }
}
