//! jproject - NDJSON TO PIPE-DELIMITED CSV PROJECTOR
//!
//! 한 줄에 하나씩 있는 JSON 객체를 외부 정의 파일의 컬럼 순서대로 펼쳐
//! 파이프(`|`) 구분 CSV로 변환하는 CLI 도구입니다.
//!
//! # 처리 흐름
//!
//! 1. **스키마 로드**: 정의 파일 각 행의 첫 번째 필드를 컬럼 이름으로 읽음
//! 2. **레코드 프로젝션**: 입력 행마다 컬럼 순서대로 값을 조회하고 문자열로 변환
//! 3. **행 쓰기**: 구분자로 이어 붙이고 개행으로 끝나는 행을 입력 순서대로 기록
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법
//! jproject -s betree_defs -i events.jsonl -o betree_events
//!
//! # 잘못된 행은 건너뛰고 에러 로그 남기기
//! jproject -s defs -i events.jsonl --on-error skip --log errors.log
//! ```

pub mod cli;
pub mod converter;
pub mod error;
pub mod projector;
pub mod records;
pub mod schema;
pub mod stats;

// Re-exports for convenient access
pub use cli::{Args, ErrorPolicy, WriteMode};
pub use converter::{convert, convert_stream, validate, ConvertOptions, LineEvent};
pub use error::{JProjectError, Result};
pub use projector::{format_row, project_record, stringify_value, write_row, ProjectOptions};
pub use records::{Record, RecordReader};
pub use schema::ColumnSchema;
pub use stats::{format_bytes, format_duration, Statistics};
