//! 종목 스코어링 파이프라인 CLI.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ranker_cli::{analyze_instrument, fetch_to_csv, run_pipeline};
use ranker_core::{init_logging, LogConfig, LogFormat, RankerConfig};

#[derive(Parser)]
#[command(name = "ranker")]
#[command(about = "Korean stock batch scoring pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 경로
    #[arg(long, default_value = "config/default.toml")]
    config: PathBuf,

    /// 로그 레벨 (설정값 대체, 예: debug)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 전체 파이프라인 실행 (수집 → 분석 → 스코어링 → 리포트)
    Run {
        /// 특정 종목만 분석 (쉼표로 구분, 예: "005930,000660")
        #[arg(long)]
        symbols: Option<String>,

        /// 조회 기간 (일, 설정값 대체)
        #[arg(long)]
        days: Option<i64>,

        /// 설정과 무관하게 이메일 발송 시도
        #[arg(long)]
        email: bool,
    },

    /// 단일 종목 일봉을 CSV로 저장
    Fetch {
        /// 종목 코드
        #[arg(short, long)]
        symbol: String,

        /// 시작일 (YYYY-MM-DD)
        #[arg(short, long)]
        from: NaiveDate,

        /// 종료일 (YYYY-MM-DD)
        #[arg(short, long)]
        to: NaiveDate,

        /// 출력 파일 경로
        #[arg(short, long, default_value = "./output/ohlcv.csv")]
        output: PathBuf,
    },

    /// 단일 종목 통계/신호 출력
    Analyze {
        /// 종목 코드
        #[arg(short, long)]
        symbol: String,

        /// 조회 기간 (일)
        #[arg(long, default_value_t = 180)]
        days: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = RankerConfig::load(&cli.config)?;

    // 로깅 초기화 (CLI 플래그가 설정 파일보다 우선)
    let level = cli.log_level.unwrap_or_else(|| config.logging.level.clone());
    let format = config
        .logging
        .format
        .parse::<LogFormat>()
        .unwrap_or_default();
    init_logging(LogConfig::new(level).with_format(format))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {e}"))?;

    tracing::info!("Ranker 시작");

    match cli.command {
        Commands::Run {
            symbols,
            days,
            email,
        } => {
            if let Some(days) = days {
                config.collect.lookback_days = days;
            }
            let symbols = symbols
                .map(|s| s.split(',').map(|c| c.trim().to_string()).collect());
            let stats = run_pipeline(&config, symbols, email).await?;
            stats.log_summary("스코어링 파이프라인");
        }
        Commands::Fetch {
            symbol,
            from,
            to,
            output,
        } => {
            let count = fetch_to_csv(&symbol, from, to, &output).await?;
            tracing::info!(symbol = %symbol, count = count, output = %output.display(), "일봉 저장 완료");
        }
        Commands::Analyze { symbol, days } => {
            analyze_instrument(&config, &symbol, days).await?;
        }
    }

    tracing::info!("Ranker 종료");
    Ok(())
}
