//! 최근 세션 파일 이력.
//!
//! 가장 최근에 닫은 파일이 맨 앞에 온다. 같은 경로는 한 번만 유지된다.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 기본 최대 이력 수
pub const DEFAULT_HISTORY_SIZE: usize = 20;

/// 세션 파일 이력 (최근 순, 최대 크기 제한)
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: VecDeque<PathBuf>,
    max_size: usize,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl SessionHistory {
    /// 새 이력 생성
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    /// 경로를 맨 앞에 추가
    ///
    /// 이미 있는 경로는 앞으로 옮긴다. 가득 차면 가장 오래된 항목을 버린다.
    pub fn push(&mut self, path: PathBuf) {
        self.remove(&path);
        self.entries.push_front(path);
        self.entries.truncate(self.max_size);
        debug!("세션 이력 {}개", self.entries.len());
    }

    /// 인덱스로 조회 (0이 가장 최근)
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    /// 인덱스의 항목을 꺼냄
    pub fn take(&mut self, index: usize) -> Option<PathBuf> {
        self.entries.remove(index)
    }

    /// 경로 제거
    pub fn remove(&mut self, path: &Path) -> bool {
        match self.entries.iter().position(|p| p == path) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// 최근 순 순회
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
