//! 에러 타입 정의 모듈
//!
//! tprep에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! 각 단계 함수는 실패 시 음수 단계 코드를 가진 에러를 반환하며,
//! 바이너리는 첫 실패의 코드 절댓값을 종료 코드로 사용합니다.

use std::path::PathBuf;
use thiserror::Error;

/// tprep에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum TPrepError {
    /// 입력 파일 열기 실패 (단계 코드 -1)
    #[error("입력 파일을 열 수 없습니다 ({path}): {reason}")]
    InputOpenFailed { path: PathBuf, reason: String },

    /// 출력 파일 열기 실패 (단계 코드 -2)
    #[error("출력 파일을 열 수 없습니다 ({path}): {reason}")]
    OutputOpenFailed { path: PathBuf, reason: String },

    /// JSON 파싱 실패 또는 필수 필드 누락 (단계 코드 -3)
    #[error("잘못된 레코드 ({line}번째 줄): {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// 스트림 읽기 실패 (열기 이후)
    #[error("파일 읽기 실패: {reason}")]
    ReadError { reason: String },

    /// 파일 쓰기 실패
    #[error("파일 쓰기 실패: {reason}")]
    WriteError { reason: String },

    /// 유효하지 않은 단계 이름
    #[error("유효하지 않은 단계 이름: {name}")]
    InvalidStage { name: String },
}

impl TPrepError {
    /// 단계 결과 코드 반환
    ///
    /// 입력 열기 실패는 -1, 출력 열기 실패는 -2, 잘못된 레코드는 -3,
    /// 그 외는 -4입니다. 프로세스 종료 코드는 이 값의 절댓값입니다.
    pub fn code(&self) -> i32 {
        match self {
            TPrepError::InputOpenFailed { .. } => -1,
            TPrepError::OutputOpenFailed { .. } => -2,
            TPrepError::MalformedRecord { .. } => -3,
            TPrepError::ReadError { .. }
            | TPrepError::WriteError { .. }
            | TPrepError::InvalidStage { .. } => -4,
        }
    }

    /// 프로세스 종료 코드 반환 (단계 코드의 절댓값)
    pub fn exit_code(&self) -> i32 {
        self.code().abs()
    }
}

/// tprep 결과 타입 별칭
pub type Result<T> = std::result::Result<T, TPrepError>;
