//! # Ranker Report
//!
//! 순위표를 HTML 리포트와 CSV로 렌더링하고, 설정 시 이메일로
//! 발송합니다. 한국어 표시 문자열은 이 크레이트에서만 사용합니다.

pub mod email;
pub mod error;
pub mod export;
pub mod render;

pub use email::*;
pub use error::*;
pub use export::*;
pub use render::*;
