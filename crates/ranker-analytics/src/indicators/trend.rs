//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average, 첫 값 시드)
//! - MACD (Moving Average Convergence Divergence)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD 한 행의 결과.
///
/// EMA가 첫 값에서 시드되므로 모든 행에서 정의됩니다.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdPoint {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: Decimal,
    /// 시그널 라인 (MACD 라인의 EMA).
    pub signal: Decimal,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Decimal,
}

/// 단순 이동평균 (SMA) 계산.
///
/// `SMA[i] = (P[i-n+1] + ... + P[i]) / n`
///
/// 처음 `period - 1`개 행은 None입니다. 입력이 기간보다 짧으면 에러가
/// 아니라 전부 None인 컬럼을 반환합니다.
pub fn sma(prices: &[Decimal], period: usize) -> AnalyticsResult<Vec<Option<Decimal>>> {
    if period == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }

    let period_decimal = Decimal::from(period);
    let mut result = Vec::with_capacity(prices.len());

    for i in 0..prices.len() {
        if i + 1 < period {
            result.push(None);
        } else {
            let sum: Decimal = prices[i + 1 - period..=i].iter().sum();
            result.push(Some(sum / period_decimal));
        }
    }

    Ok(result)
}

/// 지수 이동평균 (EMA) 계산.
///
/// `EMA[0] = P[0]`, `EMA[i] = P[i] * k + EMA[i-1] * (1 - k)`, `k = 2 / (span + 1)`
///
/// 첫 값에서 시드되므로 선행 None 구간 없이 전 구간 정의됩니다.
pub fn ema(prices: &[Decimal], span: usize) -> AnalyticsResult<Vec<Decimal>> {
    if span == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }

    let multiplier = dec!(2) / Decimal::from(span + 1);
    let mut result = Vec::with_capacity(prices.len());
    let mut prev: Option<Decimal> = None;

    for price in prices {
        let value = match prev {
            None => *price,
            Some(p) => *price * multiplier + p * (Decimal::ONE - multiplier),
        };
        result.push(value);
        prev = Some(value);
    }

    Ok(result)
}

/// MACD 계산.
///
/// MACD 라인 = 단기 EMA - 장기 EMA,
/// 시그널 라인 = MACD 라인의 EMA,
/// 히스토그램 = MACD 라인 - 시그널 라인.
pub fn macd(prices: &[Decimal], params: MacdParams) -> AnalyticsResult<Vec<MacdPoint>> {
    let fast_ema = ema(prices, params.fast_period)?;
    let slow_ema = ema(prices, params.slow_period)?;

    let macd_line: Vec<Decimal> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(fast, slow)| fast - slow)
        .collect();

    let signal_line = ema(&macd_line, params.signal_period)?;

    Ok(macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| MacdPoint {
            macd: *m,
            signal: *s,
            histogram: m - s,
        })
        .collect())
}
