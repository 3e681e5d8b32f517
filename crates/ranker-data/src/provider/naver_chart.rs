//! 네이버 금융 차트 API 클라이언트.
//!
//! `siseJson.naver` 엔드포인트에서 일봉 OHLCV를 수집합니다. 응답은 JSON과
//! 유사하지만 작은따옴표를 사용하는 유사 JSON이므로 정규화 후 파싱합니다.
//!
//! ## 사용 예시
//! ```rust,ignore
//! let client = NaverChartClient::new();
//! let series = client.fetch_daily_candles(&code, start, end).await?;
//! ```

use crate::error::{DataError, DataResult};
use chrono::NaiveDate;
use ranker_core::{DailyBar, OhlcvSeries, StockCode};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.finance.naver.com";

/// 네이버 금융 차트 API 클라이언트.
#[derive(Clone)]
pub struct NaverChartClient {
    client: reqwest::Client,
    base_url: String,
}

impl NaverChartClient {
    /// 기본 설정으로 생성합니다.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// 커스텀 base URL로 생성합니다 (테스트용).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .expect("HTTP 클라이언트 생성 실패");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// 일봉 OHLCV를 조회합니다.
    ///
    /// 거래일이 없는 기간은 빈 시계열로 반환합니다. 전송/파싱 실패만
    /// 에러입니다.
    pub async fn fetch_daily_candles(
        &self,
        code: &StockCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DataResult<OhlcvSeries> {
        let url = format!("{}/siseJson.naver", self.base_url);

        tracing::debug!(
            code = %code,
            start = %start,
            end = %end,
            "일봉 시세 요청"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", code.as_str()),
                ("requestType", "1"),
                ("startTime", &start.format("%Y%m%d").to_string()),
                ("endTime", &end.format("%Y%m%d").to_string()),
                ("timeframe", "day"),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(DataError::Status {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let bars = parse_chart_payload(&body)?;
        let series = OhlcvSeries::from_bars(bars)
            .map_err(|e| DataError::Invalid(e.to_string()))?;

        tracing::debug!(code = %code, count = series.len(), "일봉 시세 조회 완료");
        Ok(series)
    }
}

impl Default for NaverChartClient {
    fn default() -> Self {
        Self::new()
    }
}

/// 유사 JSON 차트 응답을 일봉 목록으로 파싱합니다.
///
/// 응답 형식: `[['날짜','시가',...], ["20240102", 7810, 7940, ...], ...]`
/// 첫 행은 헤더이며, 숫자가 빠진 행(휴장일 등)은 건너뜁니다.
fn parse_chart_payload(body: &str) -> DataResult<Vec<DailyBar>> {
    let normalized = body.trim().replace('\'', "\"");
    if normalized.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(&normalized)
        .map_err(|e| DataError::Parse(format!("차트 응답 파싱 실패: {}", e)))?;

    let rows = value
        .as_array()
        .ok_or_else(|| DataError::Parse("차트 응답이 배열이 아님".to_string()))?;

    let bars = rows
        .iter()
        .filter_map(|row| {
            let cells = row.as_array()?;
            if cells.len() < 6 {
                return None;
            }
            let date =
                NaiveDate::parse_from_str(cells[0].as_str()?, "%Y%m%d").ok()?;
            Some(DailyBar::new(
                date,
                number_to_decimal(&cells[1])?,
                number_to_decimal(&cells[2])?,
                number_to_decimal(&cells[3])?,
                number_to_decimal(&cells[4])?,
                cells[5].as_u64()?,
            ))
        })
        .collect();

    Ok(bars)
}

/// JSON 숫자를 Decimal로 변환합니다.
fn number_to_decimal(value: &Value) -> Option<Decimal> {
    if let Some(i) = value.as_i64() {
        return Some(Decimal::from(i));
    }
    value.as_f64().and_then(Decimal::from_f64)
}
