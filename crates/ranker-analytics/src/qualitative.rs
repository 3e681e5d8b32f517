//! AI 정성 평가.
//!
//! 통계 요약/신호/뉴스 헤드라인을 LLM에 전달하여 정성 점수와 코멘트를
//! 받습니다. 호출 실패, 파싱 실패, 키 미설정 등 어떤 이유로든 평가를
//! 얻지 못하면 중립 평가(50점)로 강등하며 실행을 중단하지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use ranker_core::{Sourced, StockCode};

use crate::signals::{MacdStance, MaCross, RsiZone, SignalSummary};
use crate::statistics::StatsSummary;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_PROMPT_HEADLINES: usize = 5;

/// 정성 평가 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualAssessment {
    /// 정성 점수 (0-100)
    pub score: u8,
    /// 한 줄 요약
    pub summary: String,
    /// 투자 관점 코멘트
    pub insight: String,
}

impl QualAssessment {
    /// 중립 평가를 반환합니다.
    pub fn neutral() -> Self {
        Self {
            score: 50,
            summary: "정성 평가를 수행하지 못했습니다".to_string(),
            insight: "중립 점수를 적용합니다".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// 모델이 반환하는 JSON 본문.
#[derive(Debug, Deserialize)]
struct AssessmentPayload {
    score: i64,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    insight: String,
}

/// OpenAI Chat Completions 기반 정성 평가 클라이언트.
pub struct AiAnalyst {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl AiAnalyst {
    /// `OPENAI_API_KEY` 환경 변수에서 클라이언트를 생성합니다.
    ///
    /// 키가 없어도 생성은 성공하며, 이후 평가가 중립으로 강등됩니다.
    pub fn from_env() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// 테스트용: base URL과 키를 지정하여 생성합니다.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: Some(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.into(),
        }
    }

    /// 종목에 대한 정성 평가를 요청합니다.
    ///
    /// 어떤 실패든 중립 평가로 강등하여 반환합니다 (에러를 전파하지
    /// 않음).
    pub async fn assess(
        &self,
        code: &StockCode,
        name: &str,
        stats: &StatsSummary,
        signals: &SignalSummary,
        headlines: &[String],
    ) -> Sourced<QualAssessment> {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                tracing::warn!(code = %code, "OPENAI_API_KEY 미설정, 중립 평가 적용");
                return Sourced::degraded(QualAssessment::neutral(), "API 키 미설정");
            }
        };

        let prompt = build_prompt(code, name, stats, signals, headlines);
        match self.request(&api_key, &prompt).await {
            Ok(assessment) => Sourced::Fresh(assessment),
            Err(reason) => {
                tracing::warn!(code = %code, %reason, "정성 평가 실패, 중립 평가 적용");
                Sourced::degraded(QualAssessment::neutral(), reason)
            }
        }
    }

    async fn request(&self, api_key: &str, prompt: &str) -> Result<QualAssessment, String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            temperature: 0.3,
        };

        tracing::debug!(model = %self.model, "정성 평가 요청");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("요청 실패: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status().as_u16()));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("응답 파싱 실패: {e}"))?;

        let content = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| "응답에 choices가 없습니다".to_string())?;

        let payload: AssessmentPayload = serde_json::from_str(content)
            .map_err(|e| format!("평가 JSON 파싱 실패: {e}"))?;

        Ok(QualAssessment {
            score: payload.score.clamp(0, 100) as u8,
            summary: payload.summary,
            insight: payload.insight,
        })
    }
}

/// 평가 프롬프트를 작성합니다.
///
/// 헤드라인은 최대 5건까지만 포함합니다.
fn build_prompt(
    code: &StockCode,
    name: &str,
    stats: &StatsSummary,
    signals: &SignalSummary,
    headlines: &[String],
) -> String {
    let mut prompt = format!(
        "다음 한국 주식의 투자 매력도를 평가해 주세요.\n\n\
         종목: {name} ({code})\n\
         기간 수익률: {:.2}%\n\
         변동성(일간): {:.2}%\n\
         샤프 비율: {:.2}\n\
         이동평균 교차: {}\n\
         RSI 구간: {}\n\
         MACD: {}\n",
        stats.total_return_pct,
        stats.volatility_pct,
        stats.sharpe_ratio,
        ma_cross_label(signals.ma_cross),
        rsi_zone_label(signals.rsi_zone, signals.rsi_value),
        macd_stance_label(signals.macd_stance),
    );

    if !headlines.is_empty() {
        prompt.push_str("\n최근 뉴스 헤드라인:\n");
        for headline in headlines.iter().take(MAX_PROMPT_HEADLINES) {
            prompt.push_str("- ");
            prompt.push_str(headline);
            prompt.push('\n');
        }
    }

    prompt.push_str(
        "\n다음 JSON 형식으로만 답하세요: \
         {\"score\": 0-100 정수, \"summary\": \"한 줄 요약\", \
         \"insight\": \"투자 관점 코멘트\"}",
    );
    prompt
}

fn ma_cross_label(cross: Option<MaCross>) -> &'static str {
    match cross {
        Some(MaCross::Golden) => "골든크로스",
        Some(MaCross::Dead) => "데드크로스",
        Some(MaCross::Neutral) => "중립",
        None => "판정 불가",
    }
}

fn rsi_zone_label(zone: Option<RsiZone>, value: Option<Decimal>) -> String {
    let label = match zone {
        Some(RsiZone::Overbought) => "과매수",
        Some(RsiZone::Oversold) => "과매도",
        Some(RsiZone::Neutral) => "중립",
        None => return "판정 불가".to_string(),
    };
    match value {
        Some(v) => format!("{label} ({v:.1})"),
        None => label.to_string(),
    }
}

fn macd_stance_label(stance: Option<MacdStance>) -> &'static str {
    match stance {
        Some(MacdStance::Buy) => "매수 우위",
        Some(MacdStance::Sell) => "매도 우위",
        None => "판정 불가",
    }
}
