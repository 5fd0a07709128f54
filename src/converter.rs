//! 변환 파이프라인 모듈
//!
//! 스키마 로드 → 레코드 프로젝션 → 행 쓰기의 단일 선형 흐름을 담당합니다.
//! 경로와 구분자 등 모든 설정은 `ConvertOptions`로 전달됩니다.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cli::{ErrorPolicy, WriteMode};
use crate::error::{JProjectError, Result};
use crate::projector::{write_row, ProjectOptions};
use crate::records::RecordReader;
use crate::schema::{ColumnSchema, DEFAULT_SCHEMA_DELIMITER};
use crate::stats::Statistics;

/// 변환 설정
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// 스키마 정의 파일 경로
    pub schema: PathBuf,
    /// NDJSON 입력 파일 경로
    pub input: PathBuf,
    /// 출력 파일 경로
    pub output: PathBuf,
    /// 정의 파일 구분자
    pub schema_delimiter: char,
    /// 행 생성 옵션 (출력 구분자, 누락 값)
    pub project: ProjectOptions,
    /// 파싱 실패 행 처리 정책
    pub on_error: ErrorPolicy,
    /// 출력 파일 모드
    pub mode: WriteMode,
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new(
        schema: impl Into<PathBuf>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            schema: schema.into(),
            input: input.into(),
            output: output.into(),
            schema_delimiter: DEFAULT_SCHEMA_DELIMITER,
            project: ProjectOptions::new(),
            on_error: ErrorPolicy::default(),
            mode: WriteMode::default(),
        }
    }

    /// 출력 구분자 설정
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.project.delimiter = delimiter;
        self
    }

    /// 정의 파일 구분자 설정
    pub fn with_schema_delimiter(mut self, delimiter: char) -> Self {
        self.schema_delimiter = delimiter;
        self
    }

    /// 누락 값 대체 문자열 설정
    pub fn with_missing(mut self, missing: impl Into<String>) -> Self {
        self.project.missing = missing.into();
        self
    }

    /// 에러 정책 설정
    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    /// 출력 모드 설정
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// 설정된 경로에서 스키마 로드
    pub fn load_schema(&self) -> Result<ColumnSchema> {
        ColumnSchema::load(&self.schema, self.schema_delimiter)
    }
}

/// 행 단위 처리 이벤트
#[derive(Debug)]
pub enum LineEvent<'a> {
    /// 행이 출력에 기록됨
    Written { line: usize },
    /// 행이 유효함 (유효성 검사 모드)
    Valid { line: usize },
    /// 파싱 실패로 건너뜀
    Skipped { error: &'a JProjectError },
}

/// 스트림 변환
///
/// 입력 행마다 정확히 하나의 출력 행을 입력 순서대로 씁니다.
/// `ErrorPolicy::Abort`에서는 첫 파싱 실패에서 즉시 에러를 반환하며
/// 그 행에 대한 출력은 쓰지 않습니다. 읽기/쓰기 에러는 정책과 무관하게 중단합니다.
pub fn convert_stream<R, W, F>(
    schema: &ColumnSchema,
    options: &ConvertOptions,
    reader: R,
    writer: &mut W,
    stats: &mut Statistics,
    mut on_event: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(LineEvent<'_>),
{
    for item in RecordReader::new(reader) {
        let record = item?;
        stats.record_line(record.bytes);

        match record.fields {
            Ok(fields) => {
                let bytes = write_row(writer, &fields, schema, &options.project)?;
                stats.record_row(bytes);
                on_event(LineEvent::Written { line: record.line });
            }
            Err(error) if options.on_error == ErrorPolicy::Skip => {
                stats.record_skip();
                on_event(LineEvent::Skipped { error: &error });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(())
}

/// 파일 변환
///
/// 입력과 출력 파일을 열고 `convert_stream`을 실행합니다.
/// 중단되더라도 버퍼를 비워 실패 이전 행들은 출력 파일에 남깁니다.
pub fn convert<F>(
    schema: &ColumnSchema,
    options: &ConvertOptions,
    stats: &mut Statistics,
    on_event: F,
) -> Result<()>
where
    F: FnMut(LineEvent<'_>),
{
    options.project.validate()?;

    let input = open_input(&options.input)?;
    let output = open_output(&options.output, options.mode)?;
    let mut writer = BufWriter::new(output);

    let result = convert_stream(schema, options, input, &mut writer, stats, on_event);
    let flushed = writer.flush();

    result?;
    flushed?;
    Ok(())
}

/// 입력 행 유효성 검사
///
/// 모든 행이 JSON 객체로 파싱되는지만 확인하고 출력은 쓰지 않습니다.
/// 무효 행은 `Statistics::lines_skipped`에 집계됩니다.
pub fn validate<F>(options: &ConvertOptions, stats: &mut Statistics, mut on_event: F) -> Result<()>
where
    F: FnMut(LineEvent<'_>),
{
    let input = open_input(&options.input)?;

    for item in RecordReader::new(input) {
        let record = item?;
        stats.record_line(record.bytes);

        match record.fields {
            Ok(_) => on_event(LineEvent::Valid { line: record.line }),
            Err(error) => {
                stats.record_skip();
                on_event(LineEvent::Skipped { error: &error });
            }
        }
    }

    Ok(())
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| JProjectError::InputOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(BufReader::new(file))
}

/// 출력 모드에 맞게 출력 파일 열기
fn open_output(path: &Path, mode: WriteMode) -> Result<File> {
    let mut open = OpenOptions::new();
    match mode {
        WriteMode::Overwrite => open.write(true).create(true).truncate(true),
        WriteMode::Append => open.append(true).create(true),
        WriteMode::Error => open.write(true).create_new(true),
    };

    open.open(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => JProjectError::OutputExists {
            path: path.to_path_buf(),
        },
        _ => JProjectError::OutputOpen {
            path: path.to_path_buf(),
            source: e,
        },
    })
}
