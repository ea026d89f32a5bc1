//! 정렬 키 생성 단계 모듈
//!
//! 외부 정렬 단계(이 도구 밖)에서 원본 줄을 다시 파싱하지 않고 정렬할 수
//! 있도록, 각 줄 앞에 CreationTime과 ID를 부착합니다. 실제 정렬은 하지
//! 않습니다.

use serde::Deserialize;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::cli::MalformedPolicy;
use crate::error::{Result, TPrepError};
use crate::stats::StageOutcome;
use crate::stream;

/// 정렬 키로 쓰이는 두 필드만 역직렬화
#[derive(Debug, Deserialize)]
struct SortKeyRecord {
    #[serde(rename = "CreationTime")]
    creation_time: i64,
    #[serde(rename = "ID")]
    id: i64,
}

/// 정렬 키 생성 옵션
#[derive(Debug, Clone, Copy, Default)]
pub struct SortKeyOptions {
    /// 잘못된 레코드 처리 정책
    pub on_malformed: MalformedPolicy,
}

impl SortKeyOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 잘못된 레코드 정책 설정
    pub fn with_on_malformed(mut self, on_malformed: MalformedPolicy) -> Self {
        self.on_malformed = on_malformed;
        self
    }
}

/// 라인 단위 JSON 파일에 정렬 키 부착
///
/// 출력 형식: `<CreationTime> <ID> <원본 줄>`. 정렬 키는 부호 있는
/// 64비트 정수입니다.
pub fn generate_sort_keys(
    input: &Path,
    output: &Path,
    options: &SortKeyOptions,
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

        match keyed_record(&line) {
            Ok(keyed) => {
                writeln!(writer, "{}", keyed).map_err(|e| TPrepError::WriteError {
                    reason: e.to_string(),
                })?;
                outcome.lines_written += 1;
                outcome.bytes_written += keyed.len() as u64 + 1;
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

/// 한 레코드에 정렬 키를 부착한 출력 줄 생성
fn keyed_record(line: &str) -> std::result::Result<String, String> {
    let record: SortKeyRecord =
        serde_json::from_str(line).map_err(|e| format!("JSON 파싱 실패: {}", e))?;

    Ok(format!("{} {} {}", record.creation_time, record.id, line))
}
