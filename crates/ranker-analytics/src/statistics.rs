//! 기간 통계 요약.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ranker_core::OhlcvSeries;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::indicators::daily_returns_pct;

/// 연환산에 사용하는 연간 거래일 수.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// 조회 기간 전체에 대한 통계 요약.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    /// 기간 시작 종가
    pub start_price: Decimal,
    /// 기간 종료 종가
    pub end_price: Decimal,
    /// 기간 최고가 (고가 기준)
    pub high_price: Decimal,
    /// 기간 최저가 (저가 기준)
    pub low_price: Decimal,
    /// 종가 평균
    pub mean_price: f64,
    /// 종가 표준편차 (표본, ddof=1)
    pub std_dev_price: f64,
    /// 기간 단순 수익률 (%)
    pub total_return_pct: f64,
    /// 일간 수익률 평균 (%)
    pub mean_daily_return_pct: f64,
    /// 일간 수익률 표준편차 (%, 변동성)
    pub volatility_pct: f64,
    /// 연환산 샤프 비율 (무위험 수익률 0 가정)
    pub sharpe_ratio: f64,
}

/// 시계열의 통계 요약을 계산합니다.
///
/// 빈 시계열은 에러입니다. 일봉이 하나뿐이면 수익률 기반 항목은 0으로
/// 채웁니다. 변동성이 0이면 샤프 비율도 0입니다.
pub fn compute_statistics(series: &OhlcvSeries) -> AnalyticsResult<StatsSummary> {
    if series.is_empty() {
        return Err(AnalyticsError::InsufficientData {
            required: 1,
            provided: 0,
        });
    }

    let closes = series.closes();
    let start_price = closes[0];
    let end_price = *closes.last().unwrap();
    let bars = series.bars();
    let high_price = bars.iter().map(|b| b.high).max().unwrap();
    let low_price = bars.iter().map(|b| b.low).min().unwrap();

    let close_values: Vec<f64> = closes
        .iter()
        .map(|c| c.to_f64().unwrap_or_default())
        .collect();
    let mean_price = mean(&close_values);
    let std_dev_price = sample_std_dev(&close_values, mean_price);

    let total_return_pct = if start_price.is_zero() {
        0.0
    } else {
        ((end_price - start_price) / start_price * Decimal::from(100))
            .to_f64()
            .unwrap_or_default()
    };

    let daily: Vec<f64> = daily_returns_pct(&closes)
        .iter()
        .filter_map(|r| r.and_then(|v| v.to_f64()))
        .collect();
    let (mean_daily_return_pct, volatility_pct) = if daily.is_empty() {
        (0.0, 0.0)
    } else {
        let m = mean(&daily);
        (m, sample_std_dev(&daily, m))
    };

    let sharpe_ratio = if volatility_pct == 0.0 {
        0.0
    } else {
        mean_daily_return_pct / volatility_pct * TRADING_DAYS_PER_YEAR.sqrt()
    };

    Ok(StatsSummary {
        start_price,
        end_price,
        high_price,
        low_price,
        mean_price,
        std_dev_price,
        total_return_pct,
        mean_daily_return_pct,
        volatility_pct,
        sharpe_ratio,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}
