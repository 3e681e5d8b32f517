//! CSV 산출물 작성.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ranker_analytics::RankingRow;
use ranker_core::OhlcvSeries;
use tracing::info;

use crate::error::ReportResult;

/// 전체 순위표를 CSV 파일로 저장합니다.
///
/// HTML 리포트와 달리 상위 N개로 자르지 않고 전 종목을 기록합니다.
pub fn write_ranking_csv<P: AsRef<Path>>(rows: &[RankingRow], path: P) -> ReportResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "rank,code,name,composite_score,technical_score,statistical_score,\
         qualitative_score,total_return_pct,volatility_pct,sharpe_ratio,degraded_reason"
    )?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{:.2},{:.1},{:.1},{:.1},{:.4},{:.4},{:.4},{}",
            row.rank,
            row.code,
            escape_csv(&row.name),
            row.composite_score,
            row.technical_score,
            row.statistical_score,
            row.qualitative_score,
            row.stats.total_return_pct,
            row.stats.volatility_pct,
            row.stats.sharpe_ratio,
            escape_csv(row.degraded_reason.as_deref().unwrap_or("")),
        )?;
    }
    writer.flush()?;

    info!("순위표 {}행을 {}에 저장", rows.len(), path.display());
    Ok(())
}

/// 일봉 시계열을 CSV 파일로 저장합니다.
pub fn write_ohlcv_csv<P: AsRef<Path>>(series: &OhlcvSeries, path: P) -> ReportResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "date,open,high,low,close,volume")?;
    for bar in series.bars() {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        )?;
    }
    writer.flush()?;

    info!("일봉 {}행을 {}에 저장", series.len(), path.display());
    Ok(())
}

/// 쉼표/따옴표가 들어간 필드를 감쌉니다.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranker_analytics::{
        MacdStance, MaCross, RsiZone, SignalSummary, StatsSummary,
    };
    use ranker_core::{DailyBar, StockCode};
    use rust_decimal_macros::dec;

    fn sample_row(rank: usize) -> RankingRow {
        RankingRow {
            rank,
            code: StockCode::new("005930").unwrap(),
            name: "삼성전자".to_string(),
            technical_score: 80.0,
            statistical_score: 50.0,
            qualitative_score: 50.0,
            composite_score: 62.0,
            degraded_reason: None,
            signals: SignalSummary {
                ma_cross: Some(MaCross::Golden),
                rsi_zone: Some(RsiZone::Neutral),
                rsi_value: Some(dec!(55)),
                macd_stance: Some(MacdStance::Buy),
            },
            stats: StatsSummary {
                start_price: dec!(100),
                end_price: dec!(110),
                high_price: dec!(112),
                low_price: dec!(98),
                mean_price: 105.0,
                std_dev_price: 4.0,
                total_return_pct: 10.0,
                mean_daily_return_pct: 0.05,
                volatility_pct: 1.2,
                sharpe_ratio: 0.7,
            },
        }
    }

    #[test]
    fn test_write_ranking_csv_includes_all_rows() {
        let dir = std::env::temp_dir().join("ranker-export-test");
        let path = dir.join("ranking.csv");
        let rows = vec![sample_row(1), sample_row(2), sample_row(3)];

        write_ranking_csv(&rows, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("rank,code,name"));
        assert!(lines[1].starts_with("1,005930,삼성전자,62.00"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_ohlcv_csv() {
        let dir = std::env::temp_dir().join("ranker-ohlcv-test");
        let path = dir.join("005930.csv");
        let bar = DailyBar::new(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            dec!(100),
            dec!(105),
            dec!(99),
            dec!(104),
            123_456,
        );
        let series = OhlcvSeries::from_bars(vec![bar]).unwrap();

        write_ohlcv_csv(&series, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("date,open,high,low,close,volume\n"));
        assert!(content.contains("2024-03-15,100,105,99,104,123456"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_escape_csv_quotes_commas() {
        assert_eq!(escape_csv("평범"), "평범");
        assert_eq!(escape_csv("쉼표, 포함"), "\"쉼표, 포함\"");
        assert_eq!(escape_csv("따옴표 \"포함\""), "\"따옴표 \"\"포함\"\"\"");
    }
}
