//! NDJSON 레코드 읽기 모듈
//!
//! 입력을 한 줄씩 읽어 JSON 객체로 디코딩하는 지연 반복자를 제공합니다.
//! 전체 파일을 메모리에 올리지 않고 한 번에 하나의 레코드만 유지합니다.

use serde_json::{Map, Value};
use std::io::BufRead;

use crate::error::{JProjectError, Result};

/// 디코딩된 한 줄
#[derive(Debug)]
pub struct Record {
    /// 입력 행 번호 (1부터 시작)
    pub line: usize,
    /// 원본 행 바이트 수 (개행 포함)
    pub bytes: u64,
    /// 디코딩 결과
    pub fields: Result<Map<String, Value>>,
}

/// 줄 단위 JSON 객체 리더
///
/// 읽기 에러는 `Some(Err(..))`로 한 번 반환한 뒤 반복을 끝냅니다.
/// 파싱 에러는 `Record::fields`에 담기므로 호출자가 계속 읽을지 결정합니다.
pub struct RecordReader<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    /// 마지막으로 읽은 행 번호
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        let bytes = match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                return None;
            }
            Ok(n) => n as u64,
            Err(e) => {
                self.done = true;
                return Some(Err(JProjectError::InputRead {
                    line: self.line + 1,
                    source: e,
                }));
            }
        };
        self.line += 1;

        let end = self
            .buf
            .iter()
            .rposition(|b| !matches!(b, b'\n' | b'\r'))
            .map_or(0, |i| i + 1);
        Some(Ok(Record {
            line: self.line,
            bytes,
            fields: parse_object(&self.buf[..end], self.line),
        }))
    }
}

/// 한 줄을 JSON 객체로 파싱
///
/// UTF-8이 아닌 바이트도 읽기 에러가 아닌 파싱 에러로 취급합니다.
pub fn parse_object(bytes: &[u8], line: usize) -> Result<Map<String, Value>> {
    let text = std::str::from_utf8(bytes).map_err(|e| JProjectError::Parse {
        line,
        reason: format!("UTF-8이 아닌 입력: {}", e),
    })?;

    let value: Value = serde_json::from_str(text).map_err(|e| JProjectError::Parse {
        line,
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(JProjectError::NotAnObject {
            line,
            kind: value_kind(&other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
