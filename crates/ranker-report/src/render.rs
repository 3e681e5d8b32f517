//! HTML 리포트 렌더링.
//!
//! 순위표 전체를 입력으로 받되, 표에는 상위 N개만 표시합니다. 신호
//! 열거형의 한국어 라벨("골든크로스", "과매수" 등)은 이 경계에서만
//! 문자열로 바뀝니다.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use ranker_analytics::{MacdStance, MaCross, RankingRow, RsiZone, SignalSummary};

/// 리포트 머리말에 넣을 매크로 지표 한 건.
#[derive(Debug, Clone)]
pub struct MacroIndicator {
    /// FRED 시리즈 ID (예: DGS10)
    pub series_id: String,
    /// 관측일
    pub date: NaiveDate,
    /// 관측값
    pub value: Decimal,
}

/// 순위표를 HTML 문서로 렌더링합니다.
///
/// `top_n`이 순위표보다 크면 전체를 표시합니다. 매크로 지표가 비어 있으면
/// 해당 섹션을 생략합니다. `chart_path`는 호출자가 미리 생성해 둔 차트
/// 이미지 경로로, 파이프라인은 차트를 만들지 않으므로 `None`을 넘기며
/// 이때 차트 섹션은 렌더링되지 않습니다.
pub fn render_report(
    rows: &[RankingRow],
    top_n: usize,
    macro_indicators: &[MacroIndicator],
    chart_path: Option<&str>,
) -> String {
    let generated_at = Local::now().format("%Y-%m-%d %H:%M");
    let mut html = String::with_capacity(4096);

    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>종목 스코어링 리포트</title>\n<style>\n\
         body { font-family: 'Malgun Gothic', sans-serif; margin: 24px; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border: 1px solid #ccc; padding: 6px 10px; text-align: center; }\n\
         th { background: #f0f2f5; }\n\
         .degraded { color: #888; font-size: 0.85em; }\n\
         </style>\n</head>\n<body>\n",
    );
    html.push_str(&format!(
        "<h1>종목 스코어링 리포트</h1>\n<p>생성 시각: {generated_at}</p>\n"
    ));

    if !macro_indicators.is_empty() {
        html.push_str("<h2>매크로 지표</h2>\n<ul>\n");
        for indicator in macro_indicators {
            html.push_str(&format!(
                "<li>{}: {} ({})</li>\n",
                escape_html(&indicator.series_id),
                indicator.value,
                indicator.date
            ));
        }
        html.push_str("</ul>\n");
    }

    let shown = rows.len().min(top_n);
    html.push_str(&format!(
        "<h2>종합 순위 (상위 {shown} / 전체 {})</h2>\n",
        rows.len()
    ));
    html.push_str(
        "<table>\n<tr><th>순위</th><th>종목명</th><th>종목코드</th>\
         <th>종합점수</th><th>기술</th><th>통계</th><th>정성</th>\
         <th>이동평균</th><th>RSI</th><th>MACD</th><th>비고</th></tr>\n",
    );
    for row in rows.iter().take(top_n) {
        let note = match &row.degraded_reason {
            Some(reason) => format!(
                "<span class=\"degraded\">정성 평가 대체 ({})</span>",
                escape_html(reason)
            ),
            None => String::new(),
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td><b>{:.2}</b></td>\
             <td>{:.0}</td><td>{:.0}</td><td>{:.0}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.rank,
            escape_html(&row.name),
            row.code,
            row.composite_score,
            row.technical_score,
            row.statistical_score,
            row.qualitative_score,
            ma_cross_label(row.signals.ma_cross),
            rsi_label(&row.signals),
            macd_label(row.signals.macd_stance),
            note,
        ));
    }
    html.push_str("</table>\n");

    if let Some(path) = chart_path {
        html.push_str(&format!(
            "<h2>가격 차트</h2>\n<img src=\"{}\" alt=\"가격 차트\" style=\"max-width: 100%\">\n",
            escape_html(path)
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// 이메일 본문용 상위 N개 텍스트 요약을 만듭니다.
pub fn text_summary(rows: &[RankingRow], top_n: usize) -> String {
    let mut body = String::from("종목 스코어링 결과\n\n");
    for row in rows.iter().take(top_n) {
        body.push_str(&format!(
            "{}위 {} ({}) - 종합 {:.2}점\n",
            row.rank, row.name, row.code, row.composite_score
        ));
    }
    if rows.len() > top_n {
        body.push_str(&format!("\n(전체 {}종목 중 상위 {top_n}개)\n", rows.len()));
    }
    body
}

fn ma_cross_label(cross: Option<MaCross>) -> &'static str {
    match cross {
        Some(MaCross::Golden) => "골든크로스",
        Some(MaCross::Dead) => "데드크로스",
        Some(MaCross::Neutral) => "중립",
        None => "-",
    }
}

fn rsi_label(signals: &SignalSummary) -> String {
    let zone = match signals.rsi_zone {
        Some(RsiZone::Overbought) => "과매수",
        Some(RsiZone::Oversold) => "과매도",
        Some(RsiZone::Neutral) => "중립",
        None => return "-".to_string(),
    };
    match signals.rsi_value {
        Some(value) => format!("{zone} ({value:.1})"),
        None => zone.to_string(),
    }
}

fn macd_label(stance: Option<MacdStance>) -> &'static str {
    match stance {
        Some(MacdStance::Buy) => "매수",
        Some(MacdStance::Sell) => "매도",
        None => "-",
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranker_analytics::StatsSummary;
    use ranker_core::StockCode;
    use rust_decimal_macros::dec;

    fn sample_row(rank: usize, code: &str, name: &str, composite: f64) -> RankingRow {
        RankingRow {
            rank,
            code: StockCode::new(code).unwrap(),
            name: name.to_string(),
            technical_score: 80.0,
            statistical_score: 50.0,
            qualitative_score: 50.0,
            composite_score: composite,
            degraded_reason: None,
            signals: SignalSummary {
                ma_cross: Some(MaCross::Golden),
                rsi_zone: Some(RsiZone::Neutral),
                rsi_value: Some(dec!(55.2)),
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
    fn test_render_truncates_to_top_n() {
        let rows: Vec<RankingRow> = (1..=15)
            .map(|i| sample_row(i, &format!("{i:06}"), &format!("종목{i}"), 100.0 - i as f64))
            .collect();
        let html = render_report(&rows, 10, &[], None);

        assert!(html.contains("종목10"));
        assert!(!html.contains("종목11"));
        assert!(html.contains("상위 10 / 전체 15"));
    }

    #[test]
    fn test_render_korean_signal_labels() {
        let rows = vec![sample_row(1, "005930", "삼성전자", 62.0)];
        let html = render_report(&rows, 10, &[], None);

        assert!(html.contains("골든크로스"));
        assert!(html.contains("중립 (55.2)"));
        assert!(html.contains("매수"));
        assert!(html.contains("<th>순위</th>"));
    }

    #[test]
    fn test_render_macro_section_and_chart() {
        let rows = vec![sample_row(1, "005930", "삼성전자", 62.0)];
        let indicators = vec![MacroIndicator {
            series_id: "DGS10".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            value: dec!(4.31),
        }];
        let html = render_report(&rows, 10, &indicators, Some("chart.png"));

        assert!(html.contains("매크로 지표"));
        assert!(html.contains("DGS10: 4.31"));
        assert!(html.contains("src=\"chart.png\""));
    }

    #[test]
    fn test_render_omits_empty_sections() {
        let rows = vec![sample_row(1, "005930", "삼성전자", 62.0)];
        let html = render_report(&rows, 10, &[], None);

        assert!(!html.contains("매크로 지표"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_render_escapes_html_in_names() {
        let rows = vec![sample_row(1, "005930", "<script>악성</script>", 50.0)];
        let html = render_report(&rows, 10, &[], None);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_marks_degraded_rows() {
        let mut row = sample_row(1, "005930", "삼성전자", 62.0);
        row.degraded_reason = Some("API 키 미설정".to_string());
        let html = render_report(&[row], 10, &[], None);

        assert!(html.contains("정성 평가 대체 (API 키 미설정)"));
    }

    #[test]
    fn test_text_summary_top_n() {
        let rows: Vec<RankingRow> = (1..=7)
            .map(|i| sample_row(i, &format!("{i:06}"), &format!("종목{i}"), 90.0 - i as f64))
            .collect();
        let body = text_summary(&rows, 5);

        assert!(body.contains("1위 종목1"));
        assert!(body.contains("5위 종목5"));
        assert!(!body.contains("종목6"));
        assert!(body.contains("전체 7종목 중 상위 5개"));
    }
}
