//! 기술적 신호 요약.
//!
//! 파생 컬럼 테이블의 마지막 행을 보고 이동평균 교차, RSI 구간,
//! MACD 방향을 판정합니다. 한국어 표시 문자열은 리포트 경계에서만
//! 사용하며 여기서는 열거형으로만 다룹니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::features::FeatureTable;

/// 이동평균 교차 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaCross {
    /// 골든크로스: 단기선이 장기선을 상향 돌파
    Golden,
    /// 데드크로스: 단기선이 장기선을 하향 돌파
    Dead,
    /// 돌파 없음
    Neutral,
}

/// RSI 구간 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    /// 70 초과
    Overbought,
    /// 30 미만
    Oversold,
    /// 그 외
    Neutral,
}

/// MACD 방향 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdStance {
    /// MACD 라인이 시그널 라인 위
    Buy,
    /// MACD 라인이 시그널 라인 이하
    Sell,
}

/// 마지막 행 기준 신호 요약.
///
/// 해당 지표가 정의되지 않은 경우 `None`으로 남습니다 (판정을
/// 지어내지 않음).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignalSummary {
    /// 이동평균 교차 (두 최단 기간 기준)
    pub ma_cross: Option<MaCross>,
    /// RSI 구간 (마지막으로 정의된 RSI 기준)
    pub rsi_zone: Option<RsiZone>,
    /// 마지막 RSI 값
    pub rsi_value: Option<Decimal>,
    /// MACD 방향
    pub macd_stance: Option<MacdStance>,
}

/// 파생 컬럼 테이블에서 신호 요약을 계산합니다.
pub fn signal_summary(table: &FeatureTable) -> SignalSummary {
    SignalSummary {
        ma_cross: detect_ma_cross(table),
        rsi_zone: table.last_rsi().map(classify_rsi),
        rsi_value: table.last_rsi(),
        macd_stance: detect_macd_stance(table),
    }
}

/// 두 최단 이동평균의 마지막 두 행으로 교차를 판정합니다.
///
/// 네 값이 모두 정의돼 있어야 판정하며, 하나라도 비어 있으면 `None`을
/// 반환합니다.
fn detect_ma_cross(table: &FeatureTable) -> Option<MaCross> {
    let mut windows = table.moving_averages.keys();
    let short = *windows.next()?;
    let long = *windows.next()?;

    let len = table.len();
    if len < 2 {
        return None;
    }

    let short_col = &table.moving_averages[&short];
    let long_col = &table.moving_averages[&long];

    let prev_short = short_col[len - 2]?;
    let prev_long = long_col[len - 2]?;
    let curr_short = short_col[len - 1]?;
    let curr_long = long_col[len - 1]?;

    if prev_short <= prev_long && curr_short > curr_long {
        Some(MaCross::Golden)
    } else if prev_short >= prev_long && curr_short < curr_long {
        Some(MaCross::Dead)
    } else {
        Some(MaCross::Neutral)
    }
}

fn classify_rsi(value: Decimal) -> RsiZone {
    if value > dec!(70) {
        RsiZone::Overbought
    } else if value < dec!(30) {
        RsiZone::Oversold
    } else {
        RsiZone::Neutral
    }
}

fn detect_macd_stance(table: &FeatureTable) -> Option<MacdStance> {
    let last = table.macd.last()?;
    if last.macd > last.signal {
        Some(MacdStance::Buy)
    } else {
        Some(MacdStance::Sell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::AnalyzerParams;
    use crate::indicators::MacdParams;
    use ranker_core::{DailyBar, OhlcvSeries};

    fn series_of(closes: &[i64]) -> OhlcvSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, close)| {
                let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap();
                let close = Decimal::from(*close);
                DailyBar::new(date, close, close, close, close, 1000)
            })
            .collect();
        OhlcvSeries::from_bars(bars).unwrap()
    }

    fn short_params() -> AnalyzerParams {
        AnalyzerParams {
            ma_windows: vec![3, 6],
            rsi_period: 14,
            macd: MacdParams {
                fast_period: 3,
                slow_period: 6,
                signal_period: 2,
            },
        }
    }

    #[test]
    fn test_golden_cross_detected() {
        // 하락 후 급반등 - 마지막 행에서 MA3이 MA6을 상향 돌파한다
        let series = series_of(&[100, 99, 98, 97, 96, 95, 94, 93, 92, 91, 95, 101]);
        let table = FeatureTable::build(&series, &short_params()).unwrap();
        let summary = signal_summary(&table);

        assert_eq!(summary.ma_cross, Some(MaCross::Golden));
        assert_eq!(summary.macd_stance, Some(MacdStance::Buy));
    }

    #[test]
    fn test_dead_cross_detected() {
        let series = series_of(&[100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 105, 99]);
        let table = FeatureTable::build(&series, &short_params()).unwrap();
        let summary = signal_summary(&table);

        assert_eq!(summary.ma_cross, Some(MaCross::Dead));
        assert_eq!(summary.macd_stance, Some(MacdStance::Sell));
    }

    #[test]
    fn test_flat_series_is_neutral_cross() {
        let series = series_of(&[100; 12]);
        let table = FeatureTable::build(&series, &short_params()).unwrap();
        let summary = signal_summary(&table);

        assert_eq!(summary.ma_cross, Some(MaCross::Neutral));
    }

    #[test]
    fn test_undefined_columns_yield_none() {
        // 장기 이동평균이 정의되기 전 구간에서는 교차를 판정하지 않는다
        let series = series_of(&[100, 101, 102, 103]);
        let table = FeatureTable::build(&series, &short_params()).unwrap();
        let summary = signal_summary(&table);

        assert_eq!(summary.ma_cross, None);
        assert_eq!(summary.rsi_zone, None);
    }

    #[test]
    fn test_rsi_zone_classification() {
        assert_eq!(classify_rsi(dec!(75)), RsiZone::Overbought);
        assert_eq!(classify_rsi(dec!(25)), RsiZone::Oversold);
        assert_eq!(classify_rsi(dec!(70)), RsiZone::Neutral);
        assert_eq!(classify_rsi(dec!(30)), RsiZone::Neutral);
        assert_eq!(classify_rsi(dec!(50)), RsiZone::Neutral);
    }
}
