//! # retime-core
//!
//! 스피드런 리타임 도메인 모델, 시간 계산/포맷, 에러 타입, 설정.
//! 저장소와 앱 crate가 공유하는 핵심 타입을 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 측정 구간([`TimeSpan`])과 로드 구간([`LoadInterval`])
//! - [`format`]: 경과 시간 분해와 문자열 포맷
//! - [`mod_note`]: 사용자 정의 모드 노트 템플릿
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod format;
pub mod mod_note;
pub mod models;

pub use error::{CoreError, ValidationError};
pub use models::{Frame, LoadInterval, TimeSpan};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::DEFAULT_FRAMERATE;

    #[test]
    fn config_template_drives_mod_note() {
        let mut config = AppConfig::default_config();
        config.mod_note.format = mod_note::ModNoteTemplate::new("{time_with_loads} @ {fps}");

        let time = TimeSpan::new(60, 420, DEFAULT_FRAMERATE).unwrap();
        assert_eq!(config.mod_note.format.render(&time), "06.000 @ 60");
    }

    #[test]
    fn config_precision_applies_to_span() {
        let config = AppConfig::default_config();
        let time = TimeSpan::new(0, 1, DEFAULT_FRAMERATE)
            .unwrap()
            .with_precision(config.retime.precision);

        assert_eq!(time.elapsed_with_loads().to_string(), "0.017");
    }
}
