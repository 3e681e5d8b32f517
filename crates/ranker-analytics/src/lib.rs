//! # Ranker Analytics
//!
//! 스코어링 파이프라인의 분석/선정 계층입니다.
//!
//! - 수익률, 이동평균, RSI, MACD 파생 컬럼 계산
//! - 기간 통계 요약
//! - 최근 시점 기술적 신호 분류
//! - AI 정성 평가 (구조화된 JSON 출력)
//! - 점수 합성 및 순위 산출

pub mod error;
pub mod features;
pub mod indicators;
pub mod qualitative;
pub mod scoring;
pub mod signals;
pub mod statistics;

pub use error::*;
pub use features::*;
pub use indicators::*;
pub use qualitative::*;
pub use scoring::*;
pub use signals::*;
pub use statistics::*;
