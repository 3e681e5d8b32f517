//! 일봉 시계열 타입 및 구조체.
//!
//! 이 모듈은 수집/분석 단계에서 사용되는 시계열 타입을 정의합니다:
//! - `StockCode` - 종목 코드
//! - `DailyBar` - 일봉 OHLCV 데이터
//! - `OhlcvSeries` - 날짜 오름차순 일봉 시계열

use crate::error::{RankerError, RankerResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 종목 코드 (KRX 6자리 숫자 코드 등).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockCode(String);

impl StockCode {
    /// 새 종목 코드를 생성합니다. 빈 문자열은 허용하지 않습니다.
    pub fn new(code: impl Into<String>) -> RankerResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(RankerError::InvalidInput("빈 종목 코드".to_string()));
        }
        Ok(Self(code))
    }

    /// 코드 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 일봉 OHLCV 데이터.
///
/// 고가/저가가 시가/종가를 감싸는지는 검증하지 않습니다. 업스트림 데이터를
/// 그대로 보존하며, 품질 판단은 소비자 몫입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: u64,
}

impl DailyBar {
    /// 새 일봉을 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}

/// 날짜 오름차순 일봉 시계열.
///
/// 불변식: 날짜는 순증가하며 중복이 없습니다. 생성 시점에 정렬과 중복
/// 검사를 수행합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcvSeries {
    bars: Vec<DailyBar>,
}

impl OhlcvSeries {
    /// 빈 시계열을 생성합니다.
    pub fn empty() -> Self {
        Self { bars: Vec::new() }
    }

    /// 일봉 목록에서 시계열을 생성합니다.
    ///
    /// 날짜 오름차순으로 정렬하며, 같은 날짜가 두 번 나타나면 에러를
    /// 반환합니다.
    pub fn from_bars(mut bars: Vec<DailyBar>) -> RankerResult<Self> {
        bars.sort_by_key(|bar| bar.date);
        for window in bars.windows(2) {
            if window[0].date == window[1].date {
                return Err(RankerError::InvalidInput(format!(
                    "중복 거래일: {}",
                    window[0].date
                )));
            }
        }
        Ok(Self { bars })
    }

    /// 일봉 개수를 반환합니다.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 전체 일봉 슬라이스를 반환합니다.
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// 마지막 일봉을 반환합니다.
    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// 종가 컬럼을 반환합니다.
    pub fn closes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// 날짜 컬럼을 반환합니다.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }
}
