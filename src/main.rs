//! jproject - NDJSON TO PIPE-DELIMITED CSV PROJECTOR
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use jproject::{
    cli::{Args, ErrorPolicy},
    converter::{convert, validate, ConvertOptions, LineEvent},
    schema::ColumnSchema,
    stats::Statistics,
};

fn main() -> Result<()> {
    let args = Args::parse();
    let options = args.to_options();

    if !args.quiet {
        print_header(&args);
    }

    // 스키마 로드
    let schema = options
        .load_schema()
        .with_context(|| format!("스키마 로드 실패: {:?}", options.schema))?;

    if !args.quiet {
        println!(
            "  {} 컬럼 수: {}",
            "📋".bright_white(),
            schema.len().to_string().bright_green()
        );
    }

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&schema);
        return Ok(());
    }

    let mut stats = Statistics::new(schema.len());

    // 유효성 검사 모드
    if args.validate_only {
        return run_validation_mode(&args, &options, &mut stats);
    }

    // 일반 변환 모드
    run_conversion_mode(&args, &options, &schema, &mut stats)
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 NDJSON TO PIPE-DELIMITED CSV".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 스키마 파일: {:?}", "🧱".bright_cyan(), args.schema);
    println!("  {} 입력 파일: {:?}", "📂".bright_cyan(), args.input);

    if !args.validate_only && !args.dry_run {
        println!("  {} 출력 파일: {:?}", "📄".bright_green(), args.output);
        println!("  {} 모드: {}", "⚙️".bright_yellow(), args.mode);
        println!("  {} 구분자: {:?}", "✂️".bright_magenta(), args.delimiter);
        println!("  {} 에러 정책: {}", "🛡️".bright_white(), args.on_error);
    }

    if !args.missing.is_empty() {
        println!("  {} 누락 값: {:?}", "🕳️".bright_white(), args.missing);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    if args.validate_only {
        println!("  {} {}", "🔍".bright_cyan(), "유효성 검사 모드".cyan());
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 드라이런 출력
fn print_dry_run(schema: &ColumnSchema) {
    println!("\n{}", "📋 출력 컬럼 순서:".bright_cyan());
    for (i, column) in schema.iter().enumerate() {
        println!("  {}. {}", i + 1, column);
    }
    println!(
        "\n{} 총 {} 개의 컬럼으로 행이 생성됩니다.",
        "ℹ️".bright_blue(),
        schema.len().to_string().bright_green()
    );
}

/// 유효성 검사 모드 실행
fn run_validation_mode(args: &Args, options: &ConvertOptions, stats: &mut Statistics) -> Result<()> {
    let pb = create_progress_bar(args.quiet)?;
    let mut errors: Vec<(usize, String)> = Vec::new();

    validate(options, stats, |event| {
        pb.inc(1);
        if let LineEvent::Skipped { error } = event {
            errors.push((error.line().unwrap_or_default(), error.to_string()));
        }
    })
    .with_context(|| format!("입력 파일 검사 실패: {:?}", options.input))?;

    pb.finish_and_clear();

    if !args.quiet {
        print_errors(&errors, args.verbose);
    }

    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &errors)?;
        if !args.quiet {
            println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);
        }
    }

    if !args.quiet {
        stats.print_validation_summary();

        if stats.lines_skipped == 0 {
            println!("\n{} 모든 행이 유효합니다!\n", "✅".bright_green());
        } else {
            println!(
                "\n{} {} 개의 행에 오류가 있습니다.\n",
                "⚠️".bright_yellow(),
                stats.lines_skipped.to_string().red()
            );
        }
    }

    Ok(())
}

/// 변환 모드 실행
fn run_conversion_mode(
    args: &Args,
    options: &ConvertOptions,
    schema: &ColumnSchema,
    stats: &mut Statistics,
) -> Result<()> {
    let pb = create_progress_bar(args.quiet)?;
    let mut errors: Vec<(usize, String)> = Vec::new();

    let result = convert(schema, options, stats, |event| match event {
        LineEvent::Skipped { error } => {
            pb.inc(1);
            if args.verbose && !args.quiet {
                pb.println(format!("  {} {}", "⚠".yellow(), error.to_string().dimmed()));
            }
            errors.push((error.line().unwrap_or_default(), error.to_string()));
        }
        _ => pb.inc(1),
    });

    pb.finish_and_clear();

    // 중단된 경우에도 실패 행을 로그에 남김
    if let Err(ref error) = result {
        if error.is_parse_error() {
            errors.push((error.line().unwrap_or_default(), error.to_string()));
        }
    }

    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &errors)?;
        if !args.quiet {
            println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);
        }
    }

    result.with_context(|| match options.on_error {
        ErrorPolicy::Abort => format!(
            "변환 중단: {:?} ({} 행 기록됨)",
            options.input, stats.rows_written
        ),
        ErrorPolicy::Skip => format!("변환 실패: {:?}", options.input),
    })?;

    if !args.quiet {
        print_errors(&errors, args.verbose);
        stats.print_summary();
        println!("\n{} 저장 완료: {:?}\n", "✅".bright_green(), options.output);
    }

    Ok(())
}

/// 진행률 스피너 생성 (전체 행 수를 미리 알 수 없음)
fn create_progress_bar(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} 행 처리 ({per_sec}) {msg}")
            .context("진행률 템플릿 오류")?,
    );
    Ok(pb)
}

/// 에러 목록 출력
fn print_errors(errors: &[(usize, String)], verbose: bool) {
    if errors.is_empty() {
        return;
    }

    println!("\n{}", "❌ 오류 발생 행:".bright_red());
    for (line, error) in errors {
        println!("  {} {}행", "•".red(), line);
        if verbose {
            println!("    {}", error.dimmed());
        }
    }
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &Path, errors: &[(usize, String)]) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("에러 로그 파일 생성 실패: {:?}", log_path))?;

    writeln!(log_file, "jproject 에러 로그")?;
    writeln!(log_file, "생성 시간: {}", unix_now())?;
    writeln!(log_file, "총 에러 수: {}", errors.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for (line, error) in errors {
        writeln!(log_file, "\n행: {}", line)?;
        writeln!(log_file, "에러: {}", error)?;
    }

    Ok(())
}

/// 현재 시간 문자열 반환
fn unix_now() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", duration.as_secs())
}
