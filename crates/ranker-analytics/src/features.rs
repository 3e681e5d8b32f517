//! 파생 컬럼 테이블.
//!
//! 원본 시계열의 복사본 위에 수익률/이동평균/RSI/MACD 컬럼을 얹습니다.
//! 원본 시계열은 절대 변경하지 않습니다.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use ranker_core::{AnalysisConfig, OhlcvSeries};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::indicators::{
    cumulative_returns_pct, daily_returns_pct, macd, rsi, sma, MacdParams, MacdPoint,
};

/// 파생 컬럼 계산 파라미터.
#[derive(Debug, Clone)]
pub struct AnalyzerParams {
    /// 이동평균 기간 목록 (짧은 순)
    pub ma_windows: Vec<usize>,
    /// RSI 기간
    pub rsi_period: usize,
    /// MACD 파라미터
    pub macd: MacdParams,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            ma_windows: vec![5, 20, 60],
            rsi_period: 14,
            macd: MacdParams::default(),
        }
    }
}

impl From<&AnalysisConfig> for AnalyzerParams {
    fn from(config: &AnalysisConfig) -> Self {
        let mut ma_windows = config.ma_windows.clone();
        ma_windows.sort_unstable();
        Self {
            ma_windows,
            rsi_period: config.rsi_period,
            macd: MacdParams {
                fast_period: config.macd_fast,
                slow_period: config.macd_slow,
                signal_period: config.macd_signal,
            },
        }
    }
}

/// 파생 컬럼이 추가된 테이블.
///
/// 모든 컬럼은 시계열과 길이가 같습니다. 빈 시계열에서는 모든 컬럼이
/// 빈 벡터입니다 (에러 아님).
#[derive(Debug, Clone)]
pub struct FeatureTable {
    /// 원본 시계열의 복사본
    pub series: OhlcvSeries,
    /// 일간 %-수익률 (첫 행 None)
    pub daily_return_pct: Vec<Option<Decimal>>,
    /// 누적 복리 %-수익률 (첫 행 None)
    pub cumulative_return_pct: Vec<Option<Decimal>>,
    /// 기간별 이동평균 (키: 기간)
    pub moving_averages: BTreeMap<usize, Vec<Option<Decimal>>>,
    /// RSI
    pub rsi: Vec<Option<Decimal>>,
    /// MACD (전 행 정의)
    pub macd: Vec<MacdPoint>,
    /// 계산에 사용한 파라미터
    pub params: AnalyzerParams,
}

impl FeatureTable {
    /// 시계열에서 파생 컬럼 테이블을 생성합니다.
    pub fn build(series: &OhlcvSeries, params: &AnalyzerParams) -> AnalyticsResult<Self> {
        if params.ma_windows.is_empty() {
            return Err(AnalyticsError::InvalidParameter(
                "이동평균 기간 목록이 비어 있습니다".to_string(),
            ));
        }

        let closes = series.closes();

        let daily_return_pct = daily_returns_pct(&closes);
        let cumulative_return_pct = cumulative_returns_pct(&daily_return_pct);

        let mut moving_averages = BTreeMap::new();
        for window in &params.ma_windows {
            moving_averages.insert(*window, sma(&closes, *window)?);
        }

        let rsi = rsi(&closes, params.rsi_period)?;
        let macd = macd(&closes, params.macd)?;

        Ok(Self {
            series: series.clone(),
            daily_return_pct,
            cumulative_return_pct,
            moving_averages,
            rsi,
            macd,
            params: params.clone(),
        })
    }

    /// 행 개수를 반환합니다.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// 마지막으로 정의된 RSI 값을 반환합니다.
    pub fn last_rsi(&self) -> Option<Decimal> {
        self.rsi.iter().rev().find_map(|v| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranker_core::DailyBar;
    use rust_decimal_macros::dec;

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

    #[test]
    fn test_build_column_lengths_match() {
        let series = series_of(&[100, 102, 101, 103, 105, 104, 106, 108]);
        let table = FeatureTable::build(&series, &AnalyzerParams::default()).unwrap();

        assert_eq!(table.len(), 8);
        assert_eq!(table.daily_return_pct.len(), 8);
        assert_eq!(table.cumulative_return_pct.len(), 8);
        assert_eq!(table.rsi.len(), 8);
        assert_eq!(table.macd.len(), 8);
        for column in table.moving_averages.values() {
            assert_eq!(column.len(), 8);
        }
    }

    #[test]
    fn test_build_empty_series() {
        let series = OhlcvSeries::empty();
        let table = FeatureTable::build(&series, &AnalyzerParams::default()).unwrap();

        assert!(table.is_empty());
        assert!(table.daily_return_pct.is_empty());
        assert!(table.macd.is_empty());
        assert!(table.last_rsi().is_none());
    }

    #[test]
    fn test_build_does_not_mutate_source() {
        let series = series_of(&[100, 102, 101]);
        let before = series.closes();
        let _ = FeatureTable::build(&series, &AnalyzerParams::default()).unwrap();
        assert_eq!(series.closes(), before);
    }

    #[test]
    fn test_short_series_has_all_none_long_ma() {
        let series = series_of(&[100, 102, 101, 103]);
        let table = FeatureTable::build(&series, &AnalyzerParams::default()).unwrap();

        let ma60 = &table.moving_averages[&60];
        assert!(ma60.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_last_rsi_skips_trailing_none() {
        let series = series_of(&[100, 101, 102, 103, 104]);
        let params = AnalyzerParams {
            rsi_period: 3,
            ..Default::default()
        };
        let table = FeatureTable::build(&series, &params).unwrap();

        assert_eq!(table.last_rsi(), Some(dec!(100)));
    }
}
