//! # Ranker Data
//!
//! 스코어링 파이프라인의 데이터 수집 계층입니다.
//!
//! - 네이버 금융 차트 API를 통한 일봉 OHLCV 수집
//! - FRED API를 통한 매크로 지표 수집
//! - 네이버 금융 뉴스 헤드라인 수집
//! - 종목 코드 → 표시 이름 조회

pub mod error;
pub mod names;
pub mod provider;

pub use error::*;
pub use names::*;
pub use provider::*;
