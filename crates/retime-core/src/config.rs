//! 애플리케이션 설정 구조체.
//!
//! 일반(업데이트 확인, 테마, 언어), 모드 노트 템플릿, 리타임 기본값을 정의한다.
//! 모든 필드에 serde 기본값이 있어 이전 버전 설정 파일의 누락 키는 기본값으로 채워진다.

use crate::mod_note::ModNoteTemplate;
use crate::models::{DEFAULT_FRAMERATE, DEFAULT_PRECISION};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 모드 노트 설정
    #[serde(default)]
    pub mod_note: ModNoteConfig,
    /// 리타임 기본값
    #[serde(default)]
    pub retime: RetimeConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self::default()
    }
}

// ============================================================
// 일반 설정
// ============================================================

/// 테마
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    /// 시스템 설정 따름
    #[default]
    Automatic,
    Dark,
    Light,
}

/// 일반 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// 시작 시 업데이트 확인
    #[serde(default = "default_true")]
    pub enable_updates: bool,
    /// 테마
    #[serde(default)]
    pub theme: Theme,
    /// 언어 코드
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enable_updates: true,
            theme: Theme::Automatic,
            language: default_language(),
        }
    }
}

// ============================================================
// 모드 노트 설정
// ============================================================

/// 모드 노트 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModNoteConfig {
    /// 템플릿 (placeholder는 [`ModNoteTemplate`] 참고)
    #[serde(default)]
    pub format: ModNoteTemplate,
}

// ============================================================
// 리타임 기본값
// ============================================================

/// 리타임 기본값
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetimeConfig {
    /// 새 구간의 프레임레이트
    #[serde(default = "default_framerate")]
    pub default_framerate: Decimal,
    /// 표시 정밀도 (소수점 이하 자릿수)
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// 평균 로드 길이 대비 이 배수를 넘는 로드는 추가 전 확인
    #[serde(default = "default_long_load_factor")]
    pub long_load_factor: u32,
}

impl Default for RetimeConfig {
    fn default() -> Self {
        Self {
            default_framerate: default_framerate(),
            precision: default_precision(),
            long_load_factor: default_long_load_factor(),
        }
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}
fn default_language() -> String {
    "en".to_string()
}
fn default_framerate() -> Decimal {
    DEFAULT_FRAMERATE
}
fn default_precision() -> u32 {
    DEFAULT_PRECISION
}
fn default_long_load_factor() -> u32 {
    10
}
