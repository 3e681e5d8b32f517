//! 도메인 모델.

pub mod ohlcv;
pub mod sourced;

pub use ohlcv::*;
pub use sourced::*;
