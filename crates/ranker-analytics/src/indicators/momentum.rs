//! 모멘텀 지표 (Momentum Indicators).
//!
//! - RSI (Relative Strength Index)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{AnalyticsError, AnalyticsResult};

/// RSI (상대강도지수) 계산.
///
/// 전일 대비 상승폭/하락폭을 `period` 구간 단순 이동평균으로 평활한 뒤
/// `RSI = 100 - 100 / (1 + 평균상승폭 / 평균하락폭)`을 계산합니다.
/// 첫 행의 변화량은 0으로 취급하므로 `period - 1`번째 행부터 정의됩니다.
///
/// 평균 하락폭이 0이면(순수 상승 구간) 비율이 무한대로 발산하므로 RSI는
/// 정확히 100으로 포화됩니다.
pub fn rsi(prices: &[Decimal], period: usize) -> AnalyticsResult<Vec<Option<Decimal>>> {
    if period == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }

    let mut gains = Vec::with_capacity(prices.len());
    let mut losses = Vec::with_capacity(prices.len());

    for i in 0..prices.len() {
        if i == 0 {
            gains.push(Decimal::ZERO);
            losses.push(Decimal::ZERO);
            continue;
        }
        let delta = prices[i] - prices[i - 1];
        if delta > Decimal::ZERO {
            gains.push(delta);
            losses.push(Decimal::ZERO);
        } else {
            gains.push(Decimal::ZERO);
            losses.push(-delta);
        }
    }

    let period_decimal = Decimal::from(period);
    let mut result = Vec::with_capacity(prices.len());

    for i in 0..prices.len() {
        if i + 1 < period {
            result.push(None);
            continue;
        }

        let avg_gain: Decimal =
            gains[i + 1 - period..=i].iter().sum::<Decimal>() / period_decimal;
        let avg_loss: Decimal =
            losses[i + 1 - period..=i].iter().sum::<Decimal>() / period_decimal;

        if avg_loss.is_zero() {
            result.push(Some(dec!(100)));
        } else {
            let rs = avg_gain / avg_loss;
            result.push(Some(dec!(100) - dec!(100) / (Decimal::ONE + rs)));
        }
    }

    Ok(result)
}
