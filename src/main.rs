//! tprep - TWEET JSONL PREPROCESSOR
//!
//! 메인 엔트리포인트

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use tprep::{
    cli::{Args, Command, ExtractArgs, ProjectArgs, RunArgs, SortKeyArgs, Stage},
    error::TPrepError,
    extract::extract_lines,
    project::{project_fields, ProjectOptions},
    sortkey::{generate_sort_keys, SortKeyOptions},
    stats::{StageOutcome, Statistics},
};

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("\n{} {}", "❌".bright_red(), e.to_string().red());
        // 첫 실패의 단계 코드 절댓값을 프로세스 종료 코드로 전달
        let code = e
            .downcast_ref::<TPrepError>()
            .map(|e| e.exit_code())
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut stats = Statistics::new();

    // 서브커맨드가 없으면 기본 파이프라인 실행
    let default_run = RunArgs::default();
    let command = args.command.as_ref();

    match command {
        Some(Command::Extract(extract_args)) => run_extract(args, extract_args, &mut stats)?,
        Some(Command::Project(project_args)) => run_project(args, project_args, &mut stats)?,
        Some(Command::SortKey(sortkey_args)) => run_sortkey(args, sortkey_args, &mut stats)?,
        Some(Command::Run(run_args)) => run_pipeline(args, run_args, &mut stats)?,
        None => run_pipeline(args, &default_run, &mut stats)?,
    }

    if !args.quiet {
        stats.print_summary();
    }

    Ok(())
}

/// extract 단계 실행
fn run_extract(args: &Args, extract_args: &ExtractArgs, stats: &mut Statistics) -> anyhow::Result<()> {
    if !args.quiet {
        print_header("✂️ 추출", &extract_args.input, &extract_args.output);
        println!(
            "  {} 최대 라인 수: {}",
            "📏".bright_white(),
            extract_args.lines
        );
    }

    let outcome = with_spinner(args.quiet, "✂️ 추출 중...", || {
        extract_lines(&extract_args.input, &extract_args.output, extract_args.lines)
    })?;

    report_stage(args, "extract", &outcome, &extract_args.output);
    stats.record(&outcome);
    Ok(())
}

/// project 단계 실행
fn run_project(args: &Args, project_args: &ProjectArgs, stats: &mut Statistics) -> anyhow::Result<()> {
    if !args.quiet {
        print_header("🎯 필드 투영", &project_args.input, &project_args.output);
        println!(
            "  {} 부호 규약: {}",
            "⚖️".bright_yellow(),
            project_args.signedness
        );
        println!(
            "  {} 에러 정책: {}",
            "🚦".bright_magenta(),
            project_args.on_malformed
        );
    }

    let options = ProjectOptions::new()
        .with_signedness(project_args.signedness)
        .with_on_malformed(project_args.on_malformed);

    let outcome = with_spinner(args.quiet, "🎯 필드 투영 중...", || {
        project_fields(&project_args.input, &project_args.output, &options)
    })?;

    report_stage(args, "project", &outcome, &project_args.output);
    stats.record(&outcome);
    Ok(())
}

/// sortkey 단계 실행
fn run_sortkey(args: &Args, sortkey_args: &SortKeyArgs, stats: &mut Statistics) -> anyhow::Result<()> {
    if !args.quiet {
        print_header("🔑 정렬 키 생성", &sortkey_args.input, &sortkey_args.output);
        println!(
            "  {} 에러 정책: {}",
            "🚦".bright_magenta(),
            sortkey_args.on_malformed
        );
    }

    let options = SortKeyOptions::new().with_on_malformed(sortkey_args.on_malformed);

    let outcome = with_spinner(args.quiet, "🔑 정렬 키 생성 중...", || {
        generate_sort_keys(&sortkey_args.input, &sortkey_args.output, &options)
    })?;

    report_stage(args, "sortkey", &outcome, &sortkey_args.output);
    stats.record(&outcome);
    Ok(())
}

/// 파이프라인 실행 (단계 목록을 순서대로)
///
/// 단계 간 배선은 고정입니다: extract의 출력이 project와 sortkey의
/// 입력이 됩니다. extract가 목록에 없으면 두 단계 모두 입력 코퍼스를
/// 직접 읽습니다.
fn run_pipeline(args: &Args, run_args: &RunArgs, stats: &mut Statistics) -> anyhow::Result<()> {
    let stages = run_args.get_stages()?;

    if !args.quiet {
        print_pipeline_header(run_args, &stages);
    }

    let extract_enabled = stages.contains(&Stage::Extract);
    let parse_input = if extract_enabled {
        &run_args.extract_output
    } else {
        &run_args.input
    };

    for stage in &stages {
        match stage {
            Stage::Extract => {
                let outcome = with_spinner(args.quiet, "✂️ 추출 중...", || {
                    extract_lines(&run_args.input, &run_args.extract_output, run_args.lines)
                })?;
                report_stage(args, "extract", &outcome, &run_args.extract_output);
                stats.record(&outcome);
            }
            Stage::Project => {
                let options = ProjectOptions::new()
                    .with_signedness(run_args.signedness)
                    .with_on_malformed(run_args.on_malformed);
                let outcome = with_spinner(args.quiet, "🎯 필드 투영 중...", || {
                    project_fields(parse_input, &run_args.project_output, &options)
                })?;
                report_stage(args, "project", &outcome, &run_args.project_output);
                stats.record(&outcome);
            }
            Stage::SortKey => {
                let options = SortKeyOptions::new().with_on_malformed(run_args.on_malformed);
                let outcome = with_spinner(args.quiet, "🔑 정렬 키 생성 중...", || {
                    generate_sort_keys(parse_input, &run_args.sortkey_output, &options)
                })?;
                report_stage(args, "sortkey", &outcome, &run_args.sortkey_output);
                stats.record(&outcome);
            }
        }
    }

    Ok(())
}

/// 단일 단계 헤더 출력
fn print_header(title: &str, input: &std::path::Path, output: &std::path::Path) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        format!(" 🚀 TWEET JSONL PREPROCESSOR — {}", title)
            .bright_white()
            .bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 파일: {:?}", "📂".bright_cyan(), input);
    println!("  {} 출력 파일: {:?}", "📄".bright_green(), output);
}

/// 파이프라인 헤더 출력
fn print_pipeline_header(run_args: &RunArgs, stages: &[Stage]) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 TWEET JSONL PREPROCESSOR".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 코퍼스: {:?}", "📂".bright_cyan(), run_args.input);
    println!(
        "  {} 실행 단계: {}",
        "⚙️".bright_yellow(),
        run_args.stages
    );

    if stages.contains(&Stage::Extract) {
        println!(
            "  {} 추출: {:?} (최대 {}줄)",
            "✂️".bright_white(),
            run_args.extract_output,
            run_args.lines
        );
    }
    if stages.contains(&Stage::Project) {
        println!(
            "  {} 투영: {:?} (부호 규약 {})",
            "🎯".bright_green(),
            run_args.project_output,
            run_args.signedness
        );
    }
    if stages.contains(&Stage::SortKey) {
        println!(
            "  {} 정렬 키: {:?}",
            "🔑".bright_magenta(),
            run_args.sortkey_output
        );
    }

    println!(
        "  {} 에러 정책: {}",
        "🚦".bright_magenta(),
        run_args.on_malformed
    );
    println!("{}", "═".repeat(50).bright_blue());
}

/// 스피너를 돌리며 단계 함수 실행
///
/// 라인 수를 미리 알 수 없으므로 진행률 바 대신 스피너를 사용합니다.
fn with_spinner<F>(quiet: bool, message: &str, stage: F) -> Result<StageOutcome, TPrepError>
where
    F: FnOnce() -> Result<StageOutcome, TPrepError>,
{
    if quiet {
        return stage();
    }

    let pb = create_spinner(message);
    let result = stage();
    match &result {
        Ok(outcome) => pb.finish_with_message(format!("완료! ({}줄)", outcome.lines_written)),
        Err(_) => pb.finish_and_clear(),
    }
    result
}

/// 스피너 생성
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 단계 결과 한 줄 보고
fn report_stage(args: &Args, name: &str, outcome: &StageOutcome, output: &std::path::Path) {
    if args.quiet {
        return;
    }

    println!(
        "\n  {} {} 완료: {}줄 → {:?}",
        "✅".bright_green(),
        name,
        outcome.lines_written.to_string().green(),
        output
    );

    if outcome.malformed > 0 {
        println!(
            "  {} 건너뛴 잘못된 레코드: {}",
            "⚠️".bright_yellow(),
            outcome.malformed.to_string().red()
        );
    }

    if args.verbose {
        println!(
            "    읽은 라인 {}, 읽은 바이트 {}, 쓴 바이트 {}",
            outcome.lines_read, outcome.bytes_read, outcome.bytes_written
        );
    }
}
