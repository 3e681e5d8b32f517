//! 스코어링 파이프라인의 에러 타입.
//!
//! 수집/분석/리포트 계층은 각자 전용 에러(`DataError`, `AnalyticsError`,
//! `ReportError`)를 쓰고, 이 모듈은 도메인 타입 생성 시의 에러만
//! 정의합니다.

use thiserror::Error;

/// 도메인 타입 생성 에러.
#[derive(Debug, Error)]
pub enum RankerError {
    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 도메인 연산을 위한 Result 타입.
pub type RankerResult<T> = Result<T, RankerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = RankerError::InvalidInput("빈 종목 코드".to_string());
        assert_eq!(err.to_string(), "잘못된 입력: 빈 종목 코드");
    }
}
