//! 추출 단계 모듈
//!
//! 코퍼스 앞부분 N줄을 변형 없이 중간 파일로 복사합니다.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{Result, TPrepError};
use crate::stats::StageOutcome;
use crate::stream;

/// 입력 파일의 앞부분 `max_lines`줄을 출력 파일로 복사
///
/// 입력이 먼저 소진되면 min(N, L)줄에서 끝납니다. 라인 내용은
/// 바이트 단위로 그대로 유지됩니다.
///
/// # Arguments
/// * `input` - 입력 코퍼스 경로
/// * `output` - 추출 결과 경로 (생성/덮어쓰기)
/// * `max_lines` - 복사할 최대 라인 수
///
/// # Returns
/// 복사한 라인/바이트 수를 담은 `StageOutcome`
pub fn extract_lines(input: &Path, output: &Path, max_lines: u64) -> Result<StageOutcome> {
    let reader = stream::open_input(input)?;
    let mut writer = stream::open_output(output)?;

    let mut outcome = StageOutcome::default();
    let mut budget = max_lines;

    for line in reader.lines() {
        if budget == 0 {
            break;
        }
        let line = line.map_err(|e| TPrepError::ReadError {
            reason: e.to_string(),
        })?;

        writeln!(writer, "{}", line).map_err(|e| TPrepError::WriteError {
            reason: e.to_string(),
        })?;

        budget -= 1;
        outcome.lines_read += 1;
        outcome.lines_written += 1;
        outcome.bytes_read += line.len() as u64 + 1;
        outcome.bytes_written += line.len() as u64 + 1;
    }

    writer.flush().map_err(|e| TPrepError::WriteError {
        reason: e.to_string(),
    })?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, lines.join("\n") + "\n").unwrap();
        path
    }

    #[test]
    fn test_extract_truncates_to_budget() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_lines(temp_dir.path(), "in.txt", &["a", "b", "c", "d"]);
        let output = temp_dir.path().join("out.txt");

        let outcome = extract_lines(&input, &output, 2).unwrap();

        assert_eq!(outcome.lines_written, 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_extract_budget_exceeds_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_lines(temp_dir.path(), "in.txt", &["only", "two"]);
        let output = temp_dir.path().join("out.txt");

        let outcome = extract_lines(&input, &output, 100).unwrap();

        assert_eq!(outcome.lines_written, 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "only\ntwo\n");
    }

    #[test]
    fn test_extract_zero_budget_creates_empty_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_lines(temp_dir.path(), "in.txt", &["a"]);
        let output = temp_dir.path().join("out.txt");

        let outcome = extract_lines(&input, &output, 0).unwrap();

        assert_eq!(outcome.lines_written, 0);
        assert!(output.exists());
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_extract_missing_input_leaves_output_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("missing.txt");
        let output = temp_dir.path().join("out.txt");

        let err = extract_lines(&input, &output, 10).unwrap_err();

        assert_eq!(err.code(), -1);
        assert!(!output.exists());
    }

    #[test]
    fn test_extract_preserves_line_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let lines = [
            r#"{"CreationTime":1,"UserID":2,"ID":3}"#,
            r#"  whitespace kept  "#,
        ];
        let input = write_lines(temp_dir.path(), "in.txt", &lines);
        let output = temp_dir.path().join("out.txt");

        extract_lines(&input, &output, 10).unwrap();

        let copied = fs::read_to_string(&output).unwrap();
        let copied: Vec<&str> = copied.lines().collect();
        assert_eq!(copied, lines);
    }
}
