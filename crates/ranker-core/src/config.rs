//! 설정 관리.
//!
//! 이 모듈은 파이프라인 설정을 정의하고 관리합니다. 파일과 `RANKER__`
//! 접두사 환경 변수를 겹쳐서 로드하며, 모든 항목에 기본값이 있습니다.
//! API 키 등 자격증명은 설정 파일이 아니라 환경 변수로만 전달됩니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 파이프라인 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RankerConfig {
    /// 데이터 수집 설정
    #[serde(default)]
    pub collect: CollectConfig,
    /// 지표 계산 설정
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// 스코어링 가중치 설정
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// 리포트 설정
    #[serde(default)]
    pub report: ReportConfig,
    /// 이메일 발송 설정
    #[serde(default)]
    pub email: EmailConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 데이터 수집 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectConfig {
    /// 분석 대상 종목 코드
    #[serde(default = "default_instruments")]
    pub instruments: Vec<String>,
    /// 조회 기간 (일)
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
    /// 업스트림 호출 사이의 지연 (밀리초)
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// 뉴스 헤드라인 수집 페이지 수
    #[serde(default = "default_news_max_pages")]
    pub news_max_pages: usize,
    /// 매크로 지표로 조회할 FRED 시리즈 ID (비워두면 생략)
    #[serde(default = "default_fred_series")]
    pub fred_series: Vec<String>,
}

fn default_instruments() -> Vec<String> {
    vec![
        "005930".to_string(),
        "000660".to_string(),
        "035420".to_string(),
    ]
}
fn default_lookback_days() -> i64 {
    180
}
fn default_request_delay_ms() -> u64 {
    300
}
fn default_news_max_pages() -> usize {
    2
}
fn default_fred_series() -> Vec<String> {
    vec!["DGS10".to_string(), "DEXKOUS".to_string()]
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            instruments: default_instruments(),
            lookback_days: default_lookback_days(),
            request_delay_ms: default_request_delay_ms(),
            news_max_pages: default_news_max_pages(),
            fred_series: default_fred_series(),
        }
    }
}

/// 지표 계산 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// 이동평균 기간 목록 (짧은 순)
    #[serde(default = "default_ma_windows")]
    pub ma_windows: Vec<usize>,
    /// RSI 기간
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    /// MACD 단기 EMA 기간
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,
    /// MACD 장기 EMA 기간
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,
    /// MACD 시그널 EMA 기간
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
}

fn default_ma_windows() -> Vec<usize> {
    vec![5, 20, 60]
}
fn default_rsi_period() -> usize {
    14
}
fn default_macd_fast() -> usize {
    12
}
fn default_macd_slow() -> usize {
    26
}
fn default_macd_signal() -> usize {
    9
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ma_windows: default_ma_windows(),
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
        }
    }
}

/// 스코어링 가중치 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// 기술적 점수 가중치
    #[serde(default = "default_technical_weight")]
    pub technical_weight: f64,
    /// 통계 점수 가중치
    #[serde(default = "default_statistical_weight")]
    pub statistical_weight: f64,
    /// AI 정성 평가 가중치
    #[serde(default = "default_qualitative_weight")]
    pub qualitative_weight: f64,
}

fn default_technical_weight() -> f64 {
    0.4
}
fn default_statistical_weight() -> f64 {
    0.3
}
fn default_qualitative_weight() -> f64 {
    0.3
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            technical_weight: default_technical_weight(),
            statistical_weight: default_statistical_weight(),
            qualitative_weight: default_qualitative_weight(),
        }
    }
}

/// 리포트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// 리포트 표에 표시할 상위 종목 수
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// 산출물 디렉토리
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_top_n() -> usize {
    10
}
fn default_output_dir() -> String {
    "./output".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            output_dir: default_output_dir(),
        }
    }
}

/// 이메일 발송 설정.
///
/// 계정/비밀번호/수신자는 환경 변수(`GMAIL_ADDRESS`, `GMAIL_APP_PASSWORD`,
/// `RECIPIENT_EMAIL`)로 전달합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// 발송 활성화 여부
    #[serde(default)]
    pub enabled: bool,
    /// SMTP 호스트
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP 포트 (STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_smtp_port() -> u16 {
    587
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl RankerConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값을 사용하고, 환경 변수(`RANKER__섹션__키`)가
    /// 항상 우선합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("RANKER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}
