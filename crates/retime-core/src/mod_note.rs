//! 사용자 정의 모드 노트 템플릿.
//!
//! 설정의 `mod_note.format` 문자열에서 `{placeholder}`를 구간 값으로 치환한다.
//! 알 수 없는 placeholder는 그대로 남기고, `{{` / `}}`는 중괄호 문자로 출력한다.

use crate::models::time_span::ATTRIBUTION;
use crate::models::TimeSpan;
use serde::{Deserialize, Serialize};

/// 기본 모드 노트 템플릿
pub const DEFAULT_MOD_NOTE_FORMAT: &str = "Mod Note: Retimed to {time_without_loads} without loads, and {time_with_loads} with loads at {fps} FPS using {plug}";

/// 모드 노트 템플릿
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModNoteTemplate(String);

impl Default for ModNoteTemplate {
    fn default() -> Self {
        Self(DEFAULT_MOD_NOTE_FORMAT.to_string())
    }
}

impl ModNoteTemplate {
    pub fn new(format: impl Into<String>) -> Self {
        Self(format.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 템플릿 렌더링
    pub fn render(&self, time: &TimeSpan) -> String {
        let mut out = String::with_capacity(self.0.len() + 64);
        let mut rest = self.0.as_str();

        while let Some(pos) = rest.find(&['{', '}'][..]) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if tail.starts_with("{{") || tail.starts_with("}}") {
                out.push_str(&tail[..1]);
                rest = &tail[2..];
                continue;
            }
            if tail.starts_with('}') {
                out.push('}');
                rest = &tail[1..];
                continue;
            }

            match tail.find('}') {
                Some(close) => {
                    let name = &tail[1..close];
                    match placeholder(time, name) {
                        Some(value) => out.push_str(&value),
                        None => out.push_str(&tail[..=close]),
                    }
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// placeholder 값 조회
fn placeholder(time: &TimeSpan, name: &str) -> Option<String> {
    let value = match name {
        "time_with_loads" => time.iso_format(false),
        "time_without_loads" => time.iso_format(true),
        "hours" => format!("{:02}", time.time_components(false).hours),
        "minutes" => format!("{:02}", time.time_components(false).minutes),
        "seconds" => format!("{:02}", time.time_components(false).seconds),
        "milliseconds" => format!("{:03}", time.time_components(false).millis),
        "start_frame" => time.start_frame().to_string(),
        "end_frame" => time.end_frame().to_string(),
        "start_time" => time.start_seconds().to_string(),
        "end_time" => time.end_seconds().to_string(),
        "total_frames" => time.length().to_string(),
        "fps" => time.framerate().to_string(),
        "plug" => ATTRIBUTION.to_string(),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_FRAMERATE;

    fn sample() -> TimeSpan {
        let mut time = TimeSpan::new(0, 7200, DEFAULT_FRAMERATE).unwrap();
        time.add_load(100, 160).unwrap();
        time
    }

    #[test]
    fn default_template() {
        let note = ModNoteTemplate::default().render(&sample());
        assert_eq!(
            note,
            format!("Mod Note: Retimed to 1:59.000 without loads, and 2:00.000 with loads at 60 FPS using {ATTRIBUTION}")
        );
    }

    #[test]
    fn all_placeholders() {
        let template = ModNoteTemplate::new(
            "{hours}:{minutes}:{seconds}.{milliseconds} {start_frame}-{end_frame} {start_time}-{end_time} {total_frames}f",
        );
        assert_eq!(
            template.render(&sample()),
            "00:02:00.000 0-7200 0.000-120.000 7200f"
        );
    }

    #[test]
    fn unknown_and_escaped_braces() {
        let template = ModNoteTemplate::new("{{fps}} = {fps}, {nope}, {unclosed");
        assert_eq!(template.render(&sample()), "{fps} = 60, {nope}, {unclosed");

        let template = ModNoteTemplate::new("a }} b } c");
        assert_eq!(template.render(&sample()), "a } b } c");
    }

    #[test]
    fn serde_as_plain_string() {
        let template = ModNoteTemplate::new("{fps} FPS");
        assert_eq!(serde_json::to_string(&template).unwrap(), "\"{fps} FPS\"");
    }
}
