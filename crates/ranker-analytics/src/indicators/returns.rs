//! 수익률 컬럼 계산.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 일간 %-수익률을 계산합니다.
///
/// `수익률[i] = (종가[i] - 종가[i-1]) / 종가[i-1] * 100`
///
/// 첫 행은 비교 대상이 없어 None입니다.
pub fn daily_returns_pct(closes: &[Decimal]) -> Vec<Option<Decimal>> {
    let mut result = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        if i == 0 {
            result.push(None);
            continue;
        }
        let prev = closes[i - 1];
        if prev.is_zero() {
            result.push(None);
            continue;
        }
        result.push(Some((closes[i] - prev) / prev * dec!(100)));
    }

    result
}

/// 누적 복리 %-수익률을 계산합니다.
///
/// `누적[i] = ((1 + r[1]/100) * ... * (1 + r[i]/100) - 1) * 100`
///
/// 일간 수익률이 None인 행(첫 행)은 누적값도 None입니다.
pub fn cumulative_returns_pct(daily_returns: &[Option<Decimal>]) -> Vec<Option<Decimal>> {
    let mut result = Vec::with_capacity(daily_returns.len());
    let mut factor = Decimal::ONE;

    for daily in daily_returns {
        match daily {
            Some(r) => {
                factor *= Decimal::ONE + *r / dec!(100);
                result.push(Some((factor - Decimal::ONE) * dec!(100)));
            }
            None => result.push(None),
        }
    }

    result
}
