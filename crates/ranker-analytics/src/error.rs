//! 분석 계층 에러.

use thiserror::Error;

/// 지표/통계 계산 오류.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 오류
    #[error("계산 오류: {0}")]
    CalculationError(String),
}

/// 분석 계산 결과 타입.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
