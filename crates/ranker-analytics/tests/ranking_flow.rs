//! 지표 계산부터 순위 결정까지의 통합 흐름 테스트.
//!
//! 손으로 검증한 12일 시계열 세 개로 전체 분석 경로를 확인합니다.

use ranker_analytics::{
    compute_statistics, signal_summary, AnalyzerParams, FeatureTable, InstrumentAnalysis,
    MacdParams, MacdStance, MaCross, QualAssessment, ScoreWeights, StockScorer,
};
use ranker_core::{DailyBar, OhlcvSeries, Sourced, StockCode};
use rust_decimal::Decimal;

fn series_of(closes: &[i64]) -> OhlcvSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .checked_add_days(chrono::Days::new(i as u64))
                .unwrap();
            let close = Decimal::from(*close);
            DailyBar::new(date, close, close, close, close, 10_000)
        })
        .collect();
    OhlcvSeries::from_bars(bars).unwrap()
}

fn params() -> AnalyzerParams {
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

fn analyze(code: &str, name: &str, series: &OhlcvSeries) -> InstrumentAnalysis {
    let table = FeatureTable::build(series, &params()).unwrap();
    InstrumentAnalysis {
        code: StockCode::new(code).unwrap(),
        name: name.to_string(),
        stats: compute_statistics(series).unwrap(),
        signals: signal_summary(&table),
        qualitative: Sourced::Fresh(QualAssessment::neutral()),
    }
}

#[test]
fn test_full_ranking_orders_reversal_over_flat_over_breakdown() {
    // (a) 하락 후 급반등 - 마지막 행에서 골든크로스 + MACD 매수
    let reversal = series_of(&[100, 99, 98, 97, 96, 95, 94, 93, 92, 91, 95, 101]);
    // (b) 횡보 - 교차 없음, 변동성 0
    let flat = series_of(&[100; 12]);
    // (c) 상승 후 붕괴 - 마지막 행에서 데드크로스 + MACD 매도
    let breakdown = series_of(&[100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 105, 99]);

    let analyses = vec![
        analyze("000001", "반등주", &reversal),
        analyze("000002", "횡보주", &flat),
        analyze("000003", "붕괴주", &breakdown),
    ];

    // 신호 판정 확인
    assert_eq!(analyses[0].signals.ma_cross, Some(MaCross::Golden));
    assert_eq!(analyses[0].signals.macd_stance, Some(MacdStance::Buy));
    assert_eq!(analyses[1].signals.ma_cross, Some(MaCross::Neutral));
    assert_eq!(analyses[2].signals.ma_cross, Some(MaCross::Dead));
    assert_eq!(analyses[2].signals.macd_stance, Some(MacdStance::Sell));
    // 12행으로는 RSI(14)가 정의되지 않는다
    assert_eq!(analyses[0].signals.rsi_zone, None);

    let scorer = StockScorer::new(ScoreWeights::default());
    let rows = scorer.rank(analyses);

    // 반등주 > 횡보주 > 붕괴주
    let codes: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["000001", "000002", "000003"]);
    assert_eq!(
        rows.iter().map(|r| r.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    // 점수 검산: 기술 80/40/20, 통계 50/60/35, 정성 50 고정
    assert_eq!(rows[0].technical_score, 80.0);
    assert_eq!(rows[0].statistical_score, 50.0);
    assert_eq!(rows[0].composite_score, 62.0);

    assert_eq!(rows[1].technical_score, 40.0);
    assert_eq!(rows[1].statistical_score, 60.0);
    assert_eq!(rows[1].composite_score, 49.0);

    assert_eq!(rows[2].technical_score, 20.0);
    assert_eq!(rows[2].statistical_score, 35.0);
    assert_eq!(rows[2].composite_score, 33.5);
}

#[test]
fn test_degraded_qualitative_still_ranks() {
    let series = series_of(&[100, 99, 98, 97, 96, 95, 94, 93, 92, 91, 95, 101]);
    let table = FeatureTable::build(&series, &params()).unwrap();
    let analysis = InstrumentAnalysis {
        code: StockCode::new("005930").unwrap(),
        name: "삼성전자".to_string(),
        stats: compute_statistics(&series).unwrap(),
        signals: signal_summary(&table),
        qualitative: Sourced::degraded(QualAssessment::neutral(), "응답 파싱 실패"),
    };

    let rows = StockScorer::default().rank(vec![analysis]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].qualitative_score, 50.0);
    assert_eq!(rows[0].degraded_reason.as_deref(), Some("응답 파싱 실패"));
}
