//! tprep - TWEET JSONL PREPROCESSOR
//!
//! 대용량 트윗 JSONL 코퍼스를 스트리밍으로 전처리하는 CLI 도구입니다.
//! 세 단계를 단일 패스 파이프라인으로 제공합니다.
//!
//! # 주요 기능
//!
//! - ✂️ **추출 (extract)**: 코퍼스 앞부분 N줄을 중간 파일로 복사
//! - 🎯 **필드 투영 (project)**: 각 줄의 CreationTime/RetweetsNum/UserID/ID를
//!   `@,@` 구분자로 원본 줄과 함께 재직렬화
//! - 🔑 **정렬 키 생성 (sortkey)**: 외부 정렬용 `<CreationTime> <ID>` 키를
//!   원본 줄 앞에 부착
//! - 🧵 **스트리밍 처리**: 한 번에 한 줄만 메모리에 유지 (O(1) 메모리)
//! - 📊 **상세 통계**: 단계별 라인/바이트 수, 건너뛴 레코드 수 집계
//! - ⚖️ **부호 규약 선택**: u64/i64 필드 추출을 한 플래그로 전환
//! - 🚦 **명시적 에러 정책**: 잘못된 레코드를 중단 또는 건너뛰기로 처리
//!
//! # 예제
//!
//! ```bash
//! # 기본 파이프라인 (extract → project, 기본 경로)
//! tprep
//!
//! # 단계별 실행
//! tprep extract -i corpus.txt -o head.txt -n 1000
//! tprep project -i head.txt -o parsed.txt --on-malformed skip
//! tprep sortkey -i head.txt -o keyed.txt
//! ```

pub mod cli;
pub mod error;
pub mod extract;
pub mod project;
pub mod sortkey;
pub mod stats;
mod stream;

// Re-exports for convenient access
pub use cli::{Args, Command, MalformedPolicy, Signedness, Stage};
pub use error::{Result, TPrepError};
pub use extract::extract_lines;
pub use project::{project_fields, ProjectOptions, FIELD_MARKER};
pub use sortkey::{generate_sort_keys, SortKeyOptions};
pub use stats::{format_bytes, StageOutcome, Statistics};
