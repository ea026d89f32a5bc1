//! 통계 및 유틸리티 모듈
//!
//! 단계별 처리 결과 집계 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

/// 단일 단계의 처리 결과
///
/// 각 단계 함수가 성공 시 반환하는 카운터 묶음입니다.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageOutcome {
    /// 읽은 라인 수
    pub lines_read: u64,
    /// 쓴 라인 수
    pub lines_written: u64,
    /// 건너뛴 잘못된 레코드 수 (Skip 정책에서만 0이 아님)
    pub malformed: u64,
    /// 읽은 바이트 (라인 종결자 포함)
    pub bytes_read: u64,
    /// 쓴 바이트 (라인 종결자 포함)
    pub bytes_written: u64,
}

impl StageOutcome {
    /// 다른 단계의 결과를 누적
    pub fn absorb(&mut self, other: &StageOutcome) {
        self.lines_read += other.lines_read;
        self.lines_written += other.lines_written;
        self.malformed += other.malformed;
        self.bytes_read += other.bytes_read;
        self.bytes_written += other.bytes_written;
    }
}

/// 실행 전체의 처리 통계
#[derive(Debug)]
pub struct Statistics {
    /// 실행한 단계 수
    pub stages_run: usize,
    /// 누적 카운터
    pub totals: StageOutcome,
    /// 처리 시작 시간
    start_time: Instant,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new() -> Self {
        Self {
            stages_run: 0,
            totals: StageOutcome::default(),
            start_time: Instant::now(),
        }
    }

    /// 단계 결과를 기록
    pub fn record(&mut self, outcome: &StageOutcome) {
        self.stages_run += 1;
        self.totals.absorb(outcome);
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 처리 통계 요약 출력
    pub fn print_summary(&self) {
        let elapsed = self.elapsed();

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 처리 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 실행 단계:    {}",
            "⚙️".bright_cyan(),
            self.stages_run
        );
        println!(
            "  {} 읽은 라인:    {}",
            "📥".bright_yellow(),
            self.totals.lines_read
        );
        println!(
            "  {} 쓴 라인:      {}",
            "📤".bright_magenta(),
            self.totals.lines_written.to_string().green()
        );

        if self.totals.malformed > 0 {
            println!(
                "  {} 건너뛴 레코드: {}",
                "❌".bright_red(),
                self.totals.malformed.to_string().red()
            );
        }

        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(self.totals.bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.totals.bytes_written)
        );
        println!(
            "  {} 처리 시간:    {:.2}초",
            "⏱️".bright_cyan(),
            elapsed.as_secs_f64()
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Arguments
/// * `bytes` - 바이트 수
///
/// # Returns
/// 형식화된 문자열 (예: "1.25 MB")
///
/// # Examples
/// ```
/// use tprep::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }

    #[test]
    fn test_outcome_absorb() {
        let mut total = StageOutcome::default();
        total.absorb(&StageOutcome {
            lines_read: 10,
            lines_written: 8,
            malformed: 2,
            bytes_read: 100,
            bytes_written: 80,
        });
        total.absorb(&StageOutcome {
            lines_read: 5,
            lines_written: 5,
            malformed: 0,
            bytes_read: 50,
            bytes_written: 60,
        });

        assert_eq!(total.lines_read, 15);
        assert_eq!(total.lines_written, 13);
        assert_eq!(total.malformed, 2);
        assert_eq!(total.bytes_read, 150);
        assert_eq!(total.bytes_written, 140);
    }

    #[test]
    fn test_statistics_record() {
        let mut stats = Statistics::new();
        stats.record(&StageOutcome {
            lines_read: 3,
            lines_written: 3,
            ..Default::default()
        });
        stats.record(&StageOutcome {
            lines_read: 3,
            lines_written: 2,
            malformed: 1,
            ..Default::default()
        });

        assert_eq!(stats.stages_run, 2);
        assert_eq!(stats.totals.lines_read, 6);
        assert_eq!(stats.totals.lines_written, 5);
        assert_eq!(stats.totals.malformed, 1);
    }
}
