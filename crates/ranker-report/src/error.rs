//! 리포트 에러 타입.

use thiserror::Error;

/// 리포트 렌더링/발송 에러.
#[derive(Debug, Error)]
pub enum ReportError {
    /// 파일 입출력 에러
    #[error("파일 입출력 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 이메일 구성 에러
    #[error("이메일 구성 에러: {0}")]
    EmailBuild(String),

    /// 이메일 발송 에러
    #[error("이메일 발송 에러: {0}")]
    EmailSend(String),

    /// 발송 설정 누락
    #[error("이메일 환경 변수 누락: {0}")]
    MissingCredential(String),
}

/// 리포트 Result 타입 별칭.
pub type ReportResult<T> = Result<T, ReportError>;
