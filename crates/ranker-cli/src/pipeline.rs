//! 순차 배치 파이프라인.
//!
//! 종목별로 수집 → 지표 → 통계 → 신호 → 정성 평가를 수행한 뒤 전체를
//! 스코어링하여 리포트를 만듭니다. 종목 단위 실패는 경고 후 건너뛰고,
//! 정성 평가 실패는 중립 점수로 강등하여 실행을 끝까지 진행합니다.

use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use ranker_analytics::{
    compute_statistics, signal_summary, AiAnalyst, AnalyzerParams, FeatureTable,
    InstrumentAnalysis, RankingRow, ScoreWeights, StockScorer,
};
use ranker_core::{RankerConfig, StockCode};
use ranker_data::{lookup_display_name, FredClient, NaverChartClient, NewsCrawler};
use ranker_report::{
    render_report, text_summary, write_ohlcv_csv, write_ranking_csv, EmailSender, MacroIndicator,
};

use crate::stats::PipelineStats;

/// 파이프라인이 사용하는 외부 서비스 클라이언트 묶음.
///
/// 실제 실행에서는 [`PipelineClients::from_env`]로 만들고, 테스트에서는
/// 목 서버를 가리키는 클라이언트를 주입합니다.
pub struct PipelineClients {
    /// 일봉 수집 클라이언트
    pub chart: NaverChartClient,
    /// 뉴스 헤드라인 크롤러
    pub news: NewsCrawler,
    /// AI 정성 평가 클라이언트
    pub analyst: AiAnalyst,
    /// 매크로 지표 클라이언트 (키 미설정 시 None)
    pub fred: Option<FredClient>,
}

impl PipelineClients {
    /// 운영 엔드포인트와 환경 변수 기반으로 생성합니다.
    pub fn from_env(config: &RankerConfig) -> Self {
        let delay = Duration::from_millis(config.collect.request_delay_ms);
        Self {
            chart: NaverChartClient::new(),
            news: NewsCrawler::with_delay(delay),
            analyst: AiAnalyst::from_env(),
            fred: FredClient::from_env(),
        }
    }
}

/// 전체 파이프라인을 실행합니다.
///
/// `symbols`가 있으면 설정의 종목 목록을 대체합니다. `force_email`은
/// 설정과 무관하게 발송을 시도합니다.
pub async fn run_pipeline(
    config: &RankerConfig,
    symbols: Option<Vec<String>>,
    force_email: bool,
) -> Result<PipelineStats> {
    let clients = PipelineClients::from_env(config);
    run_pipeline_with(config, &clients, symbols, force_email).await
}

/// 주입된 클라이언트로 파이프라인을 실행합니다.
pub async fn run_pipeline_with(
    config: &RankerConfig,
    clients: &PipelineClients,
    symbols: Option<Vec<String>>,
    force_email: bool,
) -> Result<PipelineStats> {
    let started = Instant::now();
    let mut stats = PipelineStats::new();

    let codes = symbols.unwrap_or_else(|| config.collect.instruments.clone());
    let end = Local::now().date_naive();
    let start = end - ChronoDuration::days(config.collect.lookback_days);
    let delay = Duration::from_millis(config.collect.request_delay_ms);

    info!(
        instruments = codes.len(),
        start = %start,
        end = %end,
        "파이프라인 시작"
    );

    let params = AnalyzerParams::from(&config.analysis);

    let macro_indicators =
        fetch_macro_indicators(clients.fred.as_ref(), config, start, end).await;

    let mut analyses: Vec<InstrumentAnalysis> = Vec::with_capacity(codes.len());
    stats.requested = codes.len();

    for (index, raw_code) in codes.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(delay).await;
        }

        let code = match StockCode::new(raw_code.as_str()) {
            Ok(code) => code,
            Err(e) => {
                warn!(code = %raw_code, error = %e, "잘못된 종목 코드, 건너뜀");
                stats.skipped += 1;
                continue;
            }
        };
        let name = lookup_display_name(&code);

        let series = match clients.chart.fetch_daily_candles(&code, start, end).await {
            Ok(series) => series,
            Err(e) => {
                warn!(code = %code, error = %e, "일봉 수집 실패, 건너뜀");
                stats.skipped += 1;
                continue;
            }
        };
        if series.is_empty() {
            warn!(code = %code, "조회된 일봉 없음, 건너뜀");
            stats.skipped += 1;
            continue;
        }

        let table = match FeatureTable::build(&series, &params) {
            Ok(table) => table,
            Err(e) => {
                warn!(code = %code, error = %e, "지표 계산 실패, 건너뜀");
                stats.skipped += 1;
                continue;
            }
        };
        let instrument_stats = match compute_statistics(&series) {
            Ok(instrument_stats) => instrument_stats,
            Err(e) => {
                warn!(code = %code, error = %e, "통계 계산 실패, 건너뜀");
                stats.skipped += 1;
                continue;
            }
        };
        let signals = signal_summary(&table);

        let headlines = match clients
            .news
            .fetch_headlines(&code, config.collect.news_max_pages)
            .await
        {
            Ok(headlines) => headlines,
            Err(e) => {
                warn!(code = %code, error = %e, "뉴스 수집 실패, 헤드라인 없이 진행");
                Vec::new()
            }
        };

        let qualitative = clients
            .analyst
            .assess(&code, &name, &instrument_stats, &signals, &headlines)
            .await;
        if qualitative.is_degraded() {
            stats.degraded += 1;
        }

        info!(code = %code, name = %name, bars = series.len(), "종목 분석 완료");
        analyses.push(InstrumentAnalysis {
            code,
            name,
            stats: instrument_stats,
            signals,
            qualitative,
        });
        stats.analyzed += 1;
    }

    let scorer = StockScorer::new(ScoreWeights::from(&config.scoring));
    let ranking = scorer.rank(analyses);
    for row in ranking.iter().take(3) {
        info!(
            rank = row.rank,
            code = %row.code,
            composite = row.composite_score,
            "상위 종목"
        );
    }

    let (report_path, csv_path) =
        write_outputs(config, &ranking, &macro_indicators).context("산출물 저장 실패")?;

    if config.email.enabled || force_email {
        send_report_email(config, &ranking, &report_path, &csv_path);
    }

    stats.elapsed = started.elapsed();
    Ok(stats)
}

/// FRED 매크로 지표를 조회합니다.
///
/// API 키가 없거나 조회가 실패하면 빈 목록으로 강등합니다.
async fn fetch_macro_indicators(
    fred: Option<&FredClient>,
    config: &RankerConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<MacroIndicator> {
    let Some(client) = fred else {
        info!("FRED_API_KEY 미설정, 매크로 섹션 생략");
        return Vec::new();
    };

    let mut indicators = Vec::new();
    for series_id in &config.collect.fred_series {
        match client.fetch_indicator_series(series_id, start, end).await {
            Ok(series) => match series.last() {
                Some(point) => indicators.push(MacroIndicator {
                    series_id: series_id.clone(),
                    date: point.date,
                    value: point.value,
                }),
                None => warn!(series_id = %series_id, "FRED 시리즈에 관측값 없음"),
            },
            Err(e) => warn!(series_id = %series_id, error = %e, "FRED 조회 실패, 지표 생략"),
        }
    }
    indicators
}

fn write_outputs(
    config: &RankerConfig,
    ranking: &[RankingRow],
    macro_indicators: &[MacroIndicator],
) -> Result<(PathBuf, PathBuf)> {
    let output_dir = Path::new(&config.report.output_dir);
    std::fs::create_dir_all(output_dir)?;

    let date_tag = Local::now().format("%Y%m%d");
    let report_path = output_dir.join(format!("report_{date_tag}.html"));
    let csv_path = output_dir.join(format!("ranking_{date_tag}.csv"));

    let html = render_report(ranking, config.report.top_n, macro_indicators, None);
    std::fs::write(&report_path, html)?;
    write_ranking_csv(ranking, &csv_path)?;

    info!(report = %report_path.display(), csv = %csv_path.display(), "리포트 저장 완료");
    Ok((report_path, csv_path))
}

/// 리포트 이메일 발송을 시도합니다. 실패해도 실행은 계속됩니다.
fn send_report_email(
    config: &RankerConfig,
    ranking: &[RankingRow],
    report_path: &Path,
    csv_path: &Path,
) {
    let sender = match EmailSender::from_env(&config.email) {
        Ok(sender) => sender,
        Err(e) => {
            warn!(error = %e, "이메일 설정 불완전, 발송 생략");
            return;
        }
    };

    let subject = format!("종목 스코어링 리포트 {}", Local::now().format("%Y-%m-%d"));
    let body = text_summary(ranking, 5);
    if let Err(e) = sender.send_report(&subject, &body, &[report_path, csv_path]) {
        warn!(error = %e, "이메일 발송 실패");
    }
}

/// 단일 종목의 일봉을 CSV로 저장합니다.
pub async fn fetch_to_csv(
    code: &str,
    start: NaiveDate,
    end: NaiveDate,
    output: &Path,
) -> Result<usize> {
    let code = StockCode::new(code)?;
    let client = NaverChartClient::new();
    let series = client
        .fetch_daily_candles(&code, start, end)
        .await
        .with_context(|| format!("일봉 수집 실패: {code}"))?;

    write_ohlcv_csv(&series, output)?;
    Ok(series.len())
}

/// 단일 종목을 분석하여 통계/신호를 표준 출력으로 보여줍니다.
pub async fn analyze_instrument(config: &RankerConfig, code: &str, days: i64) -> Result<()> {
    let code = StockCode::new(code)?;
    let name = lookup_display_name(&code);
    let end = Local::now().date_naive();
    let start = end - ChronoDuration::days(days);

    let client = NaverChartClient::new();
    let series = client
        .fetch_daily_candles(&code, start, end)
        .await
        .with_context(|| format!("일봉 수집 실패: {code}"))?;
    if series.is_empty() {
        anyhow::bail!("조회된 일봉 없음: {code}");
    }

    let params = AnalyzerParams::from(&config.analysis);
    let table = FeatureTable::build(&series, &params)?;
    let instrument_stats = compute_statistics(&series)?;
    let signals = signal_summary(&table);

    println!("{name} ({code}) - {start} ~ {end}, 일봉 {}건", series.len());
    println!("{:-<52}", "");
    println!("시작가:       {}", instrument_stats.start_price);
    println!("종료가:       {}", instrument_stats.end_price);
    println!("최고가:       {}", instrument_stats.high_price);
    println!("최저가:       {}", instrument_stats.low_price);
    println!("기간 수익률:  {:.2}%", instrument_stats.total_return_pct);
    println!("변동성(일간): {:.2}%", instrument_stats.volatility_pct);
    println!("샤프 비율:    {:.2}", instrument_stats.sharpe_ratio);
    println!("이동평균:     {:?}", signals.ma_cross);
    println!("RSI:          {:?} ({:?})", signals.rsi_zone, signals.rsi_value);
    println!("MACD:         {:?}", signals.macd_stance);

    Ok(())
}
