//! 컬럼 스키마 로딩 모듈
//!
//! 구분자로 나뉜 정의 파일에서 각 행의 첫 번째 필드를 컬럼 이름으로 읽어
//! 출력 순서를 결정하는 컬럼 목록을 만듭니다.

use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{JProjectError, Result};

/// 정의 파일 기본 구분자
pub const DEFAULT_SCHEMA_DELIMITER: char = '|';

/// 출력 컬럼 순서를 정의하는 스키마
///
/// 파일의 행 순서가 곧 출력 필드 순서입니다. 중복 이름은 허용되며
/// 각각 독립적으로 조회됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    /// 컬럼 이름 목록으로 스키마 생성
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// 정의 파일에서 스키마 로드
    ///
    /// # Arguments
    /// * `path` - 정의 파일 경로
    /// * `delimiter` - 행 내부 필드 구분자
    ///
    /// # Returns
    /// 파일 행 순서대로 정렬된 컬럼 스키마
    pub fn load(path: &Path, delimiter: char) -> Result<Self> {
        let file = File::open(path).map_err(|e| JProjectError::SchemaOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_reader(file, delimiter)
    }

    /// 임의의 리더에서 스키마 읽기
    ///
    /// 행마다 첫 번째 필드만 사용하고 나머지 필드는 무시합니다.
    /// 따옴표로 감싼 필드는 CSV 규칙대로 해석하며, 빈 행은 건너뜁니다.
    /// 구분자는 개행이 아닌 ASCII 문자여야 합니다.
    pub fn from_reader<R: Read>(reader: R, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() || matches!(delimiter, '\n' | '\r') {
            return Err(JProjectError::InvalidDelimiter { delimiter });
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut columns = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| JProjectError::SchemaRead {
                line: e.position().map(|p| p.line()).unwrap_or_default(),
                source: e,
            })?;
            columns.push(record.get(0).unwrap_or_default().to_string());
        }

        Ok(Self { columns })
    }

    /// 컬럼 이름 슬라이스
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 컬럼 수
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a ColumnSchema {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_first_field_only() {
        let defs = "name|string|0|100\nage|integer|0|150\n";
        let schema = ColumnSchema::from_reader(Cursor::new(defs), '|').unwrap();

        assert_eq!(schema.columns(), &["name".to_string(), "age".to_string()]);
    }

    #[test]
    fn test_line_without_delimiter() {
        let schema = ColumnSchema::from_reader(Cursor::new("country\n"), '|').unwrap();
        assert_eq!(schema.columns(), &["country".to_string()]);
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let defs = "b|x\na|y\nb|z\n";
        let schema = ColumnSchema::from_reader(Cursor::new(defs), '|').unwrap();

        assert_eq!(schema.len(), 3);
        let names: Vec<&str> = schema.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_crlf_and_empty_lines() {
        let defs = "id|int\r\n\r\nname|str\r\n";
        let schema = ColumnSchema::from_reader(Cursor::new(defs), '|').unwrap();

        let names: Vec<&str> = schema.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn test_quoted_first_field() {
        let defs = "\"a|b\"|x\n\"name\"|str\n\"say \"\"hi\"\"\"|y\n";
        let schema = ColumnSchema::from_reader(Cursor::new(defs), '|').unwrap();

        let names: Vec<&str> = schema.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["a|b", "name", "say \"hi\""]);
    }

    #[test]
    fn test_empty_first_field() {
        let schema = ColumnSchema::from_reader(Cursor::new("|x\nid|y\n"), '|').unwrap();
        let names: Vec<&str> = schema.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["", "id"]);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let result = ColumnSchema::from_reader(Cursor::new("a¦b\n"), '¦');
        assert!(matches!(
            result,
            Err(JProjectError::InvalidDelimiter { delimiter: '¦' })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let defs: &[u8] = b"id|int\n\xff|str\n";
        let result = ColumnSchema::from_reader(defs, '|');
        assert!(matches!(result, Err(JProjectError::SchemaRead { .. })));
    }

    #[test]
    fn test_custom_delimiter() {
        let schema = ColumnSchema::from_reader(Cursor::new("a,1\nb,2"), ',').unwrap();
        assert_eq!(schema.columns(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_empty_file() {
        let schema = ColumnSchema::from_reader(Cursor::new(""), '|').unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ColumnSchema::load(Path::new("/nonexistent/defs"), '|');
        assert!(matches!(result, Err(JProjectError::SchemaOpen { .. })));
    }
}
