//! 외부 데이터 제공자 클라이언트.

pub mod fred;
pub mod naver_chart;
pub mod news;

pub use fred::*;
pub use naver_chart::*;
pub use news::*;
