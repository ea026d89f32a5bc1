//! 필드 투영 단계 모듈
//!
//! 라인 단위 JSON 레코드에서 CreationTime/RetweetsNum/UserID/ID 네 필드를
//! 추출하여 `@,@` 구분자와 원본 줄로 재직렬화합니다.

use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::cli::{MalformedPolicy, Signedness};
use crate::error::{Result, TPrepError};
use crate::stats::StageOutcome;
use crate::stream;

/// 필드 구분자
pub const FIELD_MARKER: &str = "@,@";

/// 투영 옵션
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectOptions {
    /// 숫자 필드 부호 규약 (네 필드 모두 동일 적용)
    pub signedness: Signedness,
    /// 잘못된 레코드 처리 정책
    pub on_malformed: MalformedPolicy,
}

impl ProjectOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 부호 규약 설정
    pub fn with_signedness(mut self, signedness: Signedness) -> Self {
        self.signedness = signedness;
        self
    }

    /// 잘못된 레코드 정책 설정
    pub fn with_on_malformed(mut self, on_malformed: MalformedPolicy) -> Self {
        self.on_malformed = on_malformed;
        self
    }
}

/// 라인 단위 JSON 파일을 투영하여 재직렬화
///
/// 각 입력 줄에 대해 출력 줄 하나를 씁니다 (1:1, 순서 유지).
/// 출력 형식: `<CreationTime>@,@<RetweetsNum>@,@<UserID>@,@<ID>@,@<원본 줄>`.
/// `RetweetsNum`이 없거나 null이면 0으로 대체합니다.
///
/// Abort 정책에서는 첫 잘못된 레코드에서 해당 줄 번호와 함께 실패하고,
/// Skip 정책에서는 해당 줄을 건너뛰고 `malformed`에 집계합니다.
pub fn project_fields(
    input: &Path,
    output: &Path,
    options: &ProjectOptions,
) -> Result<StageOutcome> {
    let reader = stream::open_input(input)?;
    let mut writer = stream::open_output(output)?;

    let mut outcome = StageOutcome::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| TPrepError::ReadError {
            reason: e.to_string(),
        })?;

        outcome.lines_read += 1;
        outcome.bytes_read += line.len() as u64 + 1;

        match project_record(&line, options.signedness) {
            Ok(projected) => {
                writeln!(writer, "{}", projected).map_err(|e| TPrepError::WriteError {
                    reason: e.to_string(),
                })?;
                outcome.lines_written += 1;
                outcome.bytes_written += projected.len() as u64 + 1;
            }
            Err(reason) => match options.on_malformed {
                MalformedPolicy::Abort => {
                    return Err(TPrepError::MalformedRecord {
                        line: idx as u64 + 1,
                        reason,
                    });
                }
                MalformedPolicy::Skip => {
                    outcome.malformed += 1;
                }
            },
        }
    }

    writer.flush().map_err(|e| TPrepError::WriteError {
        reason: e.to_string(),
    })?;

    Ok(outcome)
}

/// 한 레코드를 투영한 출력 줄 생성
fn project_record(line: &str, signedness: Signedness) -> std::result::Result<String, String> {
    let doc: Value =
        serde_json::from_str(line).map_err(|e| format!("JSON 파싱 실패: {}", e))?;

    let creation_time = int_field(&doc, "CreationTime", signedness)?;
    let retweets = retweets_field(&doc, signedness)?;
    let user_id = int_field(&doc, "UserID", signedness)?;
    let id = int_field(&doc, "ID", signedness)?;

    Ok(format!(
        "{ct}{m}{rt}{m}{uid}{m}{id}{m}{line}",
        ct = creation_time,
        rt = retweets,
        uid = user_id,
        id = id,
        m = FIELD_MARKER,
        line = line
    ))
}

/// 필수 정수 필드를 부호 규약에 맞게 추출
fn int_field(
    doc: &Value,
    key: &str,
    signedness: Signedness,
) -> std::result::Result<String, String> {
    let value = doc
        .get(key)
        .ok_or_else(|| format!("필수 필드 누락: {}", key))?;

    coerce_int(value, signedness).ok_or_else(|| format!("정수 필드가 아닙니다: {}", key))
}

/// 선택 필드 RetweetsNum 추출 (없거나 null이면 0)
fn retweets_field(doc: &Value, signedness: Signedness) -> std::result::Result<String, String> {
    match doc.get("RetweetsNum") {
        None | Some(Value::Null) => Ok("0".to_string()),
        Some(value) => coerce_int(value, signedness)
            .ok_or_else(|| "정수 필드가 아닙니다: RetweetsNum".to_string()),
    }
}

/// JSON 값을 부호 규약에 맞는 64비트 정수 문자열로 변환
fn coerce_int(value: &Value, signedness: Signedness) -> Option<String> {
    match signedness {
        Signedness::Unsigned => value.as_u64().map(|v| v.to_string()),
        Signedness::Signed => value.as_i64().map(|v| v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_record_basic() {
        let line = r#"{"CreationTime":1234567890123,"RetweetsNum":7,"UserID":42,"ID":99}"#;
        let out = project_record(line, Signedness::Unsigned).unwrap();
        assert_eq!(
            out,
            format!("1234567890123@,@7@,@42@,@99@,@{}", line)
        );
    }

    #[test]
    fn test_project_record_null_retweets() {
        let line = r#"{"CreationTime":100,"RetweetsNum":null,"UserID":1,"ID":2}"#;
        let out = project_record(line, Signedness::Unsigned).unwrap();
        assert!(out.starts_with("100@,@0@,@1@,@2@,@"));
    }

    #[test]
    fn test_project_record_absent_retweets() {
        let line = r#"{"CreationTime":100,"UserID":1,"ID":2}"#;
        let out = project_record(line, Signedness::Unsigned).unwrap();
        assert!(out.starts_with("100@,@0@,@1@,@2@,@"));
    }

    #[test]
    fn test_project_record_zero_retweets_same_as_null() {
        let null_line = r#"{"CreationTime":100,"RetweetsNum":null,"UserID":1,"ID":2}"#;
        let zero_line = r#"{"CreationTime":100,"RetweetsNum":0,"UserID":1,"ID":2}"#;

        let from_null = project_record(null_line, Signedness::Unsigned).unwrap();
        let from_zero = project_record(zero_line, Signedness::Unsigned).unwrap();

        // 원본 줄 부분을 제외한 필드 구간은 동일
        assert_eq!(
            from_null.split(FIELD_MARKER).take(4).collect::<Vec<_>>(),
            from_zero.split(FIELD_MARKER).take(4).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_project_record_signed_negative() {
        let line = r#"{"CreationTime":-5,"RetweetsNum":3,"UserID":-10,"ID":7}"#;
        let out = project_record(line, Signedness::Signed).unwrap();
        assert!(out.starts_with("-5@,@3@,@-10@,@7@,@"));
    }

    #[test]
    fn test_project_record_unsigned_rejects_negative() {
        let line = r#"{"CreationTime":-5,"RetweetsNum":3,"UserID":10,"ID":7}"#;
        let err = project_record(line, Signedness::Unsigned).unwrap_err();
        assert!(err.contains("CreationTime"));
    }

    #[test]
    fn test_project_record_missing_required_field() {
        let line = r#"{"CreationTime":100,"RetweetsNum":1,"ID":2}"#;
        let err = project_record(line, Signedness::Unsigned).unwrap_err();
        assert!(err.contains("UserID"));
    }

    #[test]
    fn test_project_record_malformed_json() {
        let err = project_record(r#"{"broken"#, Signedness::Unsigned).unwrap_err();
        assert!(err.contains("JSON"));
    }

    #[test]
    fn test_project_record_trailing_segment_is_original_line() {
        let line = r#"{"CreationTime":1,"RetweetsNum":2,"UserID":3,"ID":4,"Text":"a@,@b"}"#;
        let out = project_record(line, Signedness::Unsigned).unwrap();

        // 네 번째 구분자 뒤의 나머지는 원본 줄과 바이트 단위로 동일
        let tail: String = out
            .splitn(5, FIELD_MARKER)
            .nth(4)
            .unwrap()
            .to_string();
        assert_eq!(tail, line);
    }

    #[test]
    fn test_options_builder() {
        let options = ProjectOptions::new()
            .with_signedness(Signedness::Signed)
            .with_on_malformed(MalformedPolicy::Skip);

        assert_eq!(options.signedness, Signedness::Signed);
        assert_eq!(options.on_malformed, MalformedPolicy::Skip);
    }
}
