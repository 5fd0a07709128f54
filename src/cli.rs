//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::converter::ConvertOptions;

/// 출력 파일 모드
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// 기존 파일이 있으면 덮어쓰기
    #[default]
    Overwrite,
    /// 기존 파일에 추가
    Append,
    /// 기존 파일이 있으면 에러
    Error,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "Overwrite"),
            WriteMode::Append => write!(f, "Append"),
            WriteMode::Error => write!(f, "Error"),
        }
    }
}

/// JSON 파싱 실패 행 처리 정책
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// 첫 실패에서 전체 변환 중단
    #[default]
    Abort,
    /// 실패 행을 건너뛰고 경고 후 계속
    Skip,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "Abort"),
            ErrorPolicy::Skip => write!(f, "Skip"),
        }
    }
}

/// jproject CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "jproject",
    author = "YourName <your@email.com>",
    version,
    about = "NDJSON TO PIPE-DELIMITED CSV PROJECTOR - 스키마 컬럼 순서대로 JSON Lines를 파이프 구분 CSV로 변환",
    long_about = r#"
NDJSON TO PIPE-DELIMITED CSV PROJECTOR
======================================

정의 파일의 각 행 첫 번째 필드를 컬럼 순서로 사용하여
한 줄에 하나씩 있는 JSON 객체를 파이프(|) 구분 행으로 변환합니다.

특징:
  • 입력 한 줄당 출력 한 행, 입력 순서 유지
  • 없는 필드는 빈 값(또는 --missing 값)으로 채움
  • 잘못된 JSON 행 처리 정책 선택 (중단/건너뛰기)
  • 다양한 출력 모드 지원 (덮어쓰기/추가/에러)

예제:
  jproject -s betree_defs -i events.jsonl -o betree_events
  jproject -s defs -i events.jsonl -o out.psv --on-error skip --log errors.log
  jproject -s defs -i events.jsonl --dry-run
  jproject -s defs -i events.jsonl --validate-only
"#
)]
pub struct Args {
    /// 컬럼 정의 파일 경로 (각 행의 첫 번째 필드 = 컬럼 이름)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// NDJSON 입력 파일 경로
    #[arg(short, long)]
    pub input: PathBuf,

    /// 생성될 출력 파일 경로 (기본값: output.psv)
    #[arg(short, long, default_value = "output.psv")]
    pub output: PathBuf,

    /// 출력 파일 모드
    #[arg(short, long, value_enum, default_value_t = WriteMode::Overwrite)]
    pub mode: WriteMode,

    /// 출력 필드 구분자
    #[arg(short, long, default_value_t = '|')]
    pub delimiter: char,

    /// 정의 파일 필드 구분자
    #[arg(long, default_value_t = '|')]
    pub schema_delimiter: char,

    /// 없는 필드 / null 값 대체 문자열
    #[arg(long, default_value = "")]
    pub missing: String,

    /// 잘못된 JSON 행 처리 정책
    #[arg(long, value_enum, default_value_t = ErrorPolicy::Abort)]
    pub on_error: ErrorPolicy,

    /// 실제 변환 없이 로드된 컬럼 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// JSON 유효성 검사만 수행 (변환 없음)
    #[arg(long)]
    pub validate_only: bool,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 헤더, 진행률, 통계 출력 생략
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// 변환 설정으로 변환
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions::new(&self.schema, &self.input, &self.output)
            .with_delimiter(self.delimiter)
            .with_schema_delimiter(self.schema_delimiter)
            .with_missing(self.missing.clone())
            .with_error_policy(self.on_error)
            .with_mode(self.mode)
    }
}
