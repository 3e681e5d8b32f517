//! 데이터 수집 계층 에러.

use thiserror::Error;

/// 데이터 수집 에러.
///
/// 빈 응답은 에러가 아니라 빈 시계열로 표현합니다. 전송/파싱 실패만
/// 에러로 구분하여 호출자가 "데이터 없음"과 "수집 실패"를 구별할 수
/// 있게 합니다.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    #[error("응답 파싱 실패: {0}")]
    Parse(String),

    #[error("업스트림 오류 응답: HTTP {status}")]
    Status { status: u16 },

    #[error("Rate limit 초과")]
    RateLimited,

    #[error("잘못된 데이터: {0}")]
    Invalid(String),
}

/// 데이터 수집 작업을 위한 Result 타입.
pub type DataResult<T> = Result<T, DataError>;
