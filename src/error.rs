//! 에러 타입 정의 모듈
//!
//! jproject에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// jproject에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum JProjectError {
    /// 스키마 정의 파일 열기 실패
    #[error("스키마 파일을 열 수 없습니다 ({path}): {source}")]
    SchemaOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 스키마 정의 파일 읽기 실패
    #[error("스키마 파일 읽기 실패 ({line}행): {source}")]
    SchemaRead {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// 입력 파일 열기 실패
    #[error("입력 파일을 열 수 없습니다 ({path}): {source}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 입력 파일 읽기 실패
    #[error("입력 파일 읽기 실패 ({line}행): {source}")]
    InputRead {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// 출력 파일 열기 실패
    #[error("출력 파일을 열 수 없습니다 ({path}): {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 출력 파일이 이미 존재 (Error 모드에서)
    #[error("출력 파일이 이미 존재합니다: {path}")]
    OutputExists { path: PathBuf },

    /// 행 쓰기 실패
    #[error("파일 쓰기 실패: {source}")]
    Write {
        #[from]
        source: io::Error,
    },

    /// JSON 파싱 실패
    #[error("JSON 파싱 실패 ({line}행): {reason}")]
    Parse { line: usize, reason: String },

    /// JSON 객체가 아닌 레코드
    #[error("JSON 객체가 아닙니다 ({line}행): {kind}")]
    NotAnObject { line: usize, kind: &'static str },

    /// 사용할 수 없는 구분자
    #[error("사용할 수 없는 구분자입니다: {delimiter:?}")]
    InvalidDelimiter { delimiter: char },
}

impl JProjectError {
    /// 레코드 단위 파싱 에러인지 확인 (Skip 정책 적용 대상)
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::NotAnObject { .. })
    }

    /// 에러가 발생한 입력 행 번호 (1부터 시작)
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. }
            | Self::NotAnObject { line, .. }
            | Self::InputRead { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// jproject 결과 타입 별칭
pub type Result<T> = std::result::Result<T, JProjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_kind() {
        let parse = JProjectError::Parse {
            line: 3,
            reason: "expected value".to_string(),
        };
        let not_object = JProjectError::NotAnObject {
            line: 4,
            kind: "array",
        };
        let io = JProjectError::OutputExists {
            path: PathBuf::from("out.psv"),
        };

        assert!(parse.is_parse_error());
        assert!(not_object.is_parse_error());
        assert!(!io.is_parse_error());
        assert_eq!(parse.line(), Some(3));
        assert_eq!(io.line(), None);
    }
}
