//! 기술적 지표 모듈.
//!
//! 파생 컬럼 계산기들을 제공합니다. 모든 컬럼은 입력과 같은 길이이며,
//! 계산에 필요한 선행 구간은 None으로 채웁니다.
//!
//! - **수익률**: 일간 %-수익률, 누적 복리 %-수익률
//! - **SMA**: 단순 이동평균 (기간보다 짧은 입력은 전부 None 컬럼)
//! - **EMA**: 지수 이동평균 (첫 값 시드, 전 구간 정의)
//! - **MACD**: 단기 EMA - 장기 EMA, 시그널, 히스토그램
//! - **RSI**: 상승/하락폭 단순 이동평균 비율

pub mod momentum;
pub mod returns;
pub mod trend;

pub use momentum::*;
pub use returns::*;
pub use trend::*;
