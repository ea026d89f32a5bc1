//! 스트림 열기 유틸리티
//!
//! 각 단계가 공유하는 입력/출력 파일 열기 로직입니다. 입력을 먼저 열고
//! 출력을 나중에 열어, 입력이 없으면 출력 경로를 건드리지 않습니다.
//! 스트림은 스코프 종료 시 에러 경로를 포함해 항상 해제됩니다.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{Result, TPrepError};

/// 입력 파일을 버퍼 리더로 열기
///
/// 실패 시 `InputOpenFailed` (단계 코드 -1)를 반환합니다.
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| TPrepError::InputOpenFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(BufReader::new(file))
}

/// 출력 파일을 생성/덮어쓰기하여 버퍼 라이터로 열기
///
/// 실패 시 `OutputOpenFailed` (단계 코드 -2)를 반환합니다.
pub fn open_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| TPrepError::OutputOpenFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_input_missing() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no_such_file.txt");

        let err = open_input(&missing).unwrap_err();
        assert!(matches!(err, TPrepError::InputOpenFailed { .. }));
        assert_eq!(err.code(), -1);
    }

    #[test]
    fn test_open_output_in_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let bad = temp_dir.path().join("no_such_dir").join("out.txt");

        let err = open_output(&bad).unwrap_err();
        assert!(matches!(err, TPrepError::OutputOpenFailed { .. }));
        assert_eq!(err.code(), -2);
    }

    #[test]
    fn test_open_output_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        fs::write(&path, "stale contents").unwrap();

        let writer = open_output(&path).unwrap();
        drop(writer);

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
