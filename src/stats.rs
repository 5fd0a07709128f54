//! 통계 및 유틸리티 모듈
//!
//! 변환 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

/// 변환 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 스키마 컬럼 수
    pub columns: usize,
    /// 읽은 입력 행 수
    pub lines_read: u64,
    /// 기록한 출력 행 수
    pub rows_written: u64,
    /// 건너뛴(또는 무효) 행 수
    pub lines_skipped: u64,
    /// 읽은 총 바이트
    pub bytes_read: u64,
    /// 쓴 총 바이트
    pub bytes_written: u64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 입력 행 하나 읽음
    pub fn record_line(&mut self, bytes: u64) {
        self.lines_read += 1;
        self.bytes_read += bytes;
    }

    /// 출력 행 하나 기록함
    pub fn record_row(&mut self, bytes: u64) {
        self.rows_written += 1;
        self.bytes_written += bytes;
    }

    /// 건너뛴 행 카운트 증가
    pub fn record_skip(&mut self) {
        self.lines_skipped += 1;
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 변환 통계 요약 출력
    pub fn print_summary(&self) {
        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 변환 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!("  {} 컬럼 수:      {}", "🧱".bright_cyan(), self.columns);
        println!("  {} 입력 행:      {}", "📥".bright_cyan(), self.lines_read);
        println!(
            "  {} 출력 행:      {}",
            "✅".bright_green(),
            self.rows_written.to_string().green()
        );

        if self.lines_skipped > 0 {
            println!(
                "  {} 건너뜀:       {}",
                "⚠️".bright_yellow(),
                self.lines_skipped.to_string().yellow()
            );
        }

        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(self.bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }

    /// 유효성 검사 통계 요약 출력
    pub fn print_validation_summary(&self) {
        let valid = self.lines_read - self.lines_skipped;

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 🔍 유효성 검사 결과".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!("  {} 전체 행:      {}", "📁".bright_cyan(), self.lines_read);
        println!(
            "  {} 유효:         {}",
            "✅".bright_green(),
            valid.to_string().green()
        );

        if self.lines_skipped > 0 {
            println!(
                "  {} 무효:         {}",
                "❌".bright_red(),
                self.lines_skipped.to_string().red()
            );
        } else {
            println!("  {} 무효:         {}", "✅".bright_green(), "0".green());
        }

        if self.lines_read > 0 {
            let valid_rate = (valid as f64 / self.lines_read as f64) * 100.0;
            println!("  {} 유효율:       {:.1}%", "📈".bright_white(), valid_rate);
        }

        println!(
            "  {} 검사 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use jproject::stats::format_bytes;
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

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        format!("{}시간 {}분", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
