//! # Ranker Core
//!
//! 종목 스코어링 파이프라인의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일봉 OHLCV 시계열 구조체
//! - 종목 코드 및 표시 이름
//! - 정상/강등(degraded) 데이터 구분 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
