//! 레코드 프로젝션 모듈
//!
//! 디코딩된 JSON 객체를 스키마 컬럼 순서에 맞춰 문자열 필드로 펼치고
//! 구분자로 이어 붙인 한 행을 만듭니다.

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::io::Write;

use crate::error::{JProjectError, Result};
use crate::schema::ColumnSchema;

/// 출력 기본 구분자
pub const DEFAULT_DELIMITER: char = '|';

/// 행 생성 옵션
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// 필드 구분자
    pub delimiter: char,
    /// 없는 필드 / null 값 대체 문자열
    pub missing: String,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            missing: String::new(),
        }
    }
}

impl ProjectOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 구분자 설정
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 누락 값 대체 문자열 설정
    pub fn with_missing(mut self, missing: impl Into<String>) -> Self {
        self.missing = missing.into();
        self
    }

    /// 구분자 유효성 검사
    ///
    /// 개행 문자는 행 경계와 겹치므로 구분자로 쓸 수 없습니다.
    pub fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(JProjectError::InvalidDelimiter {
                delimiter: self.delimiter,
            });
        }
        Ok(())
    }
}

/// JSON 값을 출력용 문자열로 변환
///
/// 문자열은 따옴표 없이 그대로, 숫자와 불리언은 JSON 표기 그대로,
/// null은 `missing`, 배열과 객체는 압축된 JSON 텍스트로 변환합니다.
pub fn stringify_value<'a>(value: &'a Value, missing: &'a str) -> Cow<'a, str> {
    match value {
        Value::Null => Cow::Borrowed(missing),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        // Value의 Display는 압축 JSON
        compound => Cow::Owned(compound.to_string()),
    }
}

/// 스키마 순서대로 레코드 필드 추출
///
/// 최상위 키만 대소문자를 구분해 정확히 일치하는 경우 조회합니다.
/// 결과 길이는 항상 스키마 컬럼 수와 같습니다.
pub fn project_record<'a>(
    record: &'a Map<String, Value>,
    schema: &ColumnSchema,
    missing: &'a str,
) -> Vec<Cow<'a, str>> {
    schema
        .iter()
        .map(|column| match record.get(column) {
            Some(value) => stringify_value(value, missing),
            None => Cow::Borrowed(missing),
        })
        .collect()
}

/// 레코드를 개행 없는 한 행 문자열로 변환
pub fn format_row(
    record: &Map<String, Value>,
    schema: &ColumnSchema,
    options: &ProjectOptions,
) -> String {
    let fields = project_record(record, schema, &options.missing);

    let mut row = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i != 0 {
            row.push(options.delimiter);
        }
        row.push_str(field);
    }
    row
}

/// 레코드를 한 행으로 변환해 개행과 함께 쓰기
///
/// # Returns
/// 기록한 바이트 수 (개행 포함)
pub fn write_row<W: Write>(
    writer: &mut W,
    record: &Map<String, Value>,
    schema: &ColumnSchema,
    options: &ProjectOptions,
) -> Result<u64> {
    let row = format_row(record, schema, options);
    writeln!(writer, "{}", row)?;
    Ok(row.len() as u64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(names: &[&str]) -> ColumnSchema {
        ColumnSchema::new(names.iter().map(|s| s.to_string()).collect())
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify_value(&json!("Alice"), ""), "Alice");
        assert_eq!(stringify_value(&json!(30), ""), "30");
        assert_eq!(stringify_value(&json!(-2.5), ""), "-2.5");
        assert_eq!(stringify_value(&json!(true), ""), "true");
        assert_eq!(stringify_value(&json!(false), ""), "false");
        assert_eq!(stringify_value(&Value::Null, "NA"), "NA");
    }

    #[test]
    fn test_stringify_string_not_requoted() {
        assert_eq!(stringify_value(&json!("say \"hi\""), ""), "say \"hi\"");
    }

    #[test]
    fn test_stringify_compound() {
        assert_eq!(stringify_value(&json!([1, 2, 3]), ""), "[1,2,3]");
        assert_eq!(
            stringify_value(&json!({"z": 1, "a": "b"}), ""),
            r#"{"z":1,"a":"b"}"#
        );
    }

    #[test]
    fn test_format_row_full_record() {
        let record = object(json!({"name": "Alice", "age": 30}));
        let row = format_row(&record, &schema(&["name", "age"]), &ProjectOptions::new());
        assert_eq!(row, "Alice|30");
    }

    #[test]
    fn test_format_row_missing_field() {
        let record = object(json!({"name": "Bob"}));
        let row = format_row(&record, &schema(&["name", "age"]), &ProjectOptions::new());
        assert_eq!(row, "Bob|");
    }

    #[test]
    fn test_missing_value_does_not_carry_over() {
        let options = ProjectOptions::new();
        let s = schema(&["a", "b", "c"]);
        let record = object(json!({"a": 1, "c": 3}));

        assert_eq!(format_row(&record, &s, &options), "1||3");
    }

    #[test]
    fn test_lookup_is_case_sensitive_and_flat() {
        let record = object(json!({"Name": "x", "user": {"name": "y"}}));
        let row = format_row(
            &record,
            &schema(&["name", "user.name"]),
            &ProjectOptions::new(),
        );
        assert_eq!(row, "|");
    }

    #[test]
    fn test_single_column_has_no_delimiter() {
        let record = object(json!({"id": 7, "other": 1}));
        let row = format_row(&record, &schema(&["id"]), &ProjectOptions::new());
        assert_eq!(row, "7");
    }

    #[test]
    fn test_field_count_matches_schema() {
        let s = schema(&["a", "b", "c", "d"]);
        let record = object(json!({"b": 2, "x": 9, "y": 10, "z": 11, "w": 12}));
        let fields = project_record(&record, &s, "");
        assert_eq!(fields.len(), s.len());
    }

    #[test]
    fn test_custom_options() {
        let options = ProjectOptions::new().with_delimiter('\t').with_missing("\\N");
        let record = object(json!({"a": null, "b": "x"}));
        let row = format_row(&record, &schema(&["a", "b", "c"]), &options);
        assert_eq!(row, "\\N\tx\t\\N");
    }

    #[test]
    fn test_write_row_appends_newline() {
        let mut out = Vec::new();
        let record = object(json!({"a": "hi"}));
        let written = write_row(&mut out, &record, &schema(&["a", "b"]), &ProjectOptions::new())
            .unwrap();

        assert_eq!(out, b"hi|\n");
        assert_eq!(written, 4);
    }

    #[test]
    fn test_embedded_delimiter_passes_through_unescaped() {
        let s = schema(&["a", "b"]);
        let record = object(json!({"a": "x|y", "b": "line1\nline2"}));
        let row = format_row(&record, &s, &ProjectOptions::new());

        // 값은 이스케이프하지 않으므로 구분자/개행이 든 값은 행 모양을 바꿈
        assert_eq!(row, "x|y|line1\nline2");
        assert_eq!(row.split('|').count(), s.len() + 1);
        assert_eq!(row.lines().count(), 2);
    }

    #[test]
    fn test_newline_delimiter_rejected() {
        assert!(ProjectOptions::new().with_delimiter('\n').validate().is_err());
        assert!(ProjectOptions::new().with_delimiter(',').validate().is_ok());
    }
}
