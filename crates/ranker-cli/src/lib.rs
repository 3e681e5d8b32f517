//! # Ranker CLI
//!
//! 수집 → 분석 → 스코어링 → 리포트를 잇는 순차 배치 파이프라인입니다.

pub mod pipeline;
pub mod stats;

pub use pipeline::*;
pub use stats::*;
