//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.
//! 원본 파이프라인의 하드코딩된 경로/라인 수는 그대로 기본값이 됩니다.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::error::{Result, TPrepError};

/// 기본 입력 코퍼스 경로
pub const DEFAULT_INPUT: &str = "input_file.txt";
/// 기본 추출 결과 경로
pub const DEFAULT_EXTRACT_OUTPUT: &str = "tweet_extract.txt";
/// 기본 투영 결과 경로
pub const DEFAULT_PROJECT_OUTPUT: &str = "parsed_tweets.txt";
/// 기본 정렬 키 결과 경로
pub const DEFAULT_SORTKEY_OUTPUT: &str = "keyed_tweets.txt";
/// 기본 추출 라인 수 (트윗 5백만 건)
pub const DEFAULT_LINE_BUDGET: u64 = 5_000_000;

/// 숫자 필드 부호 규약
///
/// 한 실행 내에서 네 필드 모두에 동일하게 적용됩니다.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Signedness {
    /// u64로 추출
    #[default]
    Unsigned,
    /// i64로 추출
    Signed,
}

impl std::fmt::Display for Signedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signedness::Unsigned => write!(f, "Unsigned"),
            Signedness::Signed => write!(f, "Signed"),
        }
    }
}

/// 잘못된 레코드 처리 정책
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// 첫 잘못된 레코드에서 전체 실행 중단
    #[default]
    Abort,
    /// 잘못된 레코드를 건너뛰고 개수만 집계
    Skip,
}

impl std::fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedPolicy::Abort => write!(f, "Abort"),
            MalformedPolicy::Skip => write!(f, "Skip"),
        }
    }
}

/// 파이프라인 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Project,
    SortKey,
}

impl Stage {
    /// 단계 이름 문자열을 파싱
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "extract" => Ok(Stage::Extract),
            "project" => Ok(Stage::Project),
            "sortkey" => Ok(Stage::SortKey),
            other => Err(TPrepError::InvalidStage {
                name: other.to_string(),
            }),
        }
    }
}

/// tprep CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "tprep",
    author = "YourName <your@email.com>",
    version,
    about = "TWEET JSONL PREPROCESSOR - 대용량 트윗 JSONL 코퍼스를 추출/투영/정렬 키 생성하는 스트리밍 CLI 도구",
    long_about = r#"
TWEET JSONL PREPROCESSOR
========================

라인 단위 JSON 트윗 코퍼스를 스트리밍으로 전처리합니다.

단계:
  • extract  코퍼스 앞부분 N줄을 중간 파일로 복사
  • project  각 줄의 CreationTime/RetweetsNum/UserID/ID 필드를
             @,@ 구분자로 원본 줄과 함께 재직렬화
  • sortkey  외부 정렬용 정렬 키(<CreationTime> <ID>)를 원본 줄 앞에 부착

서브커맨드 없이 실행하면 기본 파이프라인(extract → project)을
기본 경로로 수행합니다.

예제:
  tprep
  tprep extract -i corpus.txt -o head.txt -n 1000
  tprep project -i head.txt -o parsed.txt --on-malformed skip
  tprep sortkey -i head.txt -o keyed.txt
  tprep run --stages extract,project,sortkey --lines 500000
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 상세 출력 모드
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 헤더/통계 출력 생략
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// tprep 서브커맨드
#[derive(Subcommand, Debug)]
pub enum Command {
    /// 코퍼스 앞부분 N줄을 중간 파일로 복사
    Extract(ExtractArgs),
    /// 라인 단위 JSON에서 네 필드를 투영하여 재직렬화
    Project(ProjectArgs),
    /// 외부 정렬용 정렬 키를 부착
    #[command(name = "sortkey")]
    SortKey(SortKeyArgs),
    /// 여러 단계를 순서대로 실행 (기본 파이프라인)
    Run(RunArgs),
}

/// extract 단계 인자
#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    /// 입력 코퍼스 경로
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// 추출 결과 경로
    #[arg(short, long, default_value = DEFAULT_EXTRACT_OUTPUT)]
    pub output: PathBuf,

    /// 복사할 최대 라인 수
    #[arg(short = 'n', long, default_value_t = DEFAULT_LINE_BUDGET)]
    pub lines: u64,
}

/// project 단계 인자
#[derive(clap::Args, Debug)]
pub struct ProjectArgs {
    /// 입력 JSONL 경로
    #[arg(short, long, default_value = DEFAULT_EXTRACT_OUTPUT)]
    pub input: PathBuf,

    /// 투영 결과 경로
    #[arg(short, long, default_value = DEFAULT_PROJECT_OUTPUT)]
    pub output: PathBuf,

    /// 숫자 필드 부호 규약
    #[arg(short, long, value_enum, default_value_t = Signedness::Unsigned)]
    pub signedness: Signedness,

    /// 잘못된 레코드 처리 정책
    #[arg(long = "on-malformed", value_enum, default_value_t = MalformedPolicy::Abort)]
    pub on_malformed: MalformedPolicy,
}

/// sortkey 단계 인자
#[derive(clap::Args, Debug)]
pub struct SortKeyArgs {
    /// 입력 JSONL 경로
    #[arg(short, long, default_value = DEFAULT_EXTRACT_OUTPUT)]
    pub input: PathBuf,

    /// 정렬 키 결과 경로
    #[arg(short, long, default_value = DEFAULT_SORTKEY_OUTPUT)]
    pub output: PathBuf,

    /// 잘못된 레코드 처리 정책
    #[arg(long = "on-malformed", value_enum, default_value_t = MalformedPolicy::Abort)]
    pub on_malformed: MalformedPolicy,
}

/// run 파이프라인 인자
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// 입력 코퍼스 경로
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// 추출 결과(중간 파일) 경로
    #[arg(long, default_value = DEFAULT_EXTRACT_OUTPUT)]
    pub extract_output: PathBuf,

    /// 투영 결과 경로
    #[arg(long, default_value = DEFAULT_PROJECT_OUTPUT)]
    pub project_output: PathBuf,

    /// 정렬 키 결과 경로
    #[arg(long, default_value = DEFAULT_SORTKEY_OUTPUT)]
    pub sortkey_output: PathBuf,

    /// 복사할 최대 라인 수
    #[arg(short = 'n', long, default_value_t = DEFAULT_LINE_BUDGET)]
    pub lines: u64,

    /// 숫자 필드 부호 규약
    #[arg(short, long, value_enum, default_value_t = Signedness::Unsigned)]
    pub signedness: Signedness,

    /// 잘못된 레코드 처리 정책
    #[arg(long = "on-malformed", value_enum, default_value_t = MalformedPolicy::Abort)]
    pub on_malformed: MalformedPolicy,

    /// 실행할 단계 목록 (쉼표로 구분, 예: "extract,project,sortkey")
    #[arg(long, default_value = "extract,project")]
    pub stages: String,
}

impl RunArgs {
    /// 단계 목록 문자열을 파싱하여 벡터로 반환
    pub fn get_stages(&self) -> Result<Vec<Stage>> {
        self.stages
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Stage::parse)
            .collect()
    }
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            extract_output: PathBuf::from(DEFAULT_EXTRACT_OUTPUT),
            project_output: PathBuf::from(DEFAULT_PROJECT_OUTPUT),
            sortkey_output: PathBuf::from(DEFAULT_SORTKEY_OUTPUT),
            lines: DEFAULT_LINE_BUDGET,
            signedness: Signedness::Unsigned,
            on_malformed: MalformedPolicy::Abort,
            stages: "extract,project".to_string(),
        }
    }
}
