//! FRED(세인트루이스 연방준비은행) API 클라이언트.
//!
//! 매크로 지표(금리, 환율 등) 시계열을 수집하여 리포트 헤더에 사용합니다.
//! API 키는 환경 변수 `FRED_API_KEY`로 전달합니다.

use crate::error::{DataError, DataResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org";

/// FRED API 클라이언트.
#[derive(Clone)]
pub struct FredClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// 매크로 지표 시계열의 한 관측점.
#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    /// 관측일
    pub date: NaiveDate,
    /// 관측값
    pub value: Decimal,
}

/// 매크로 지표 시계열.
#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    /// FRED 시리즈 ID (예: "DGS10")
    pub series_id: String,
    /// 날짜 오름차순 관측점
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// 마지막 관측점을 반환합니다.
    pub fn last(&self) -> Option<&IndicatorPoint> {
        self.points.last()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// API 응답 래퍼.
#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

impl FredClient {
    /// 새 클라이언트를 생성합니다.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// 커스텀 base URL로 생성합니다 (테스트용).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("HTTP 클라이언트 생성 실패"),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// 환경 변수 `FRED_API_KEY`에서 키를 읽어 생성합니다.
    pub fn from_env() -> Option<Self> {
        std::env::var("FRED_API_KEY").ok().map(Self::new)
    }

    /// 지표 시계열을 조회합니다.
    ///
    /// 값이 "."인 관측점(휴장일 등 결측)은 건너뜁니다.
    pub async fn fetch_indicator_series(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DataResult<IndicatorSeries> {
        let url = format!("{}/fred/series/observations", self.base_url);

        tracing::debug!(series_id = series_id, "FRED 지표 요청");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", &self.api_key),
                ("file_type", "json"),
                ("observation_start", &start.to_string()),
                ("observation_end", &end.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Status {
                status: response.status().as_u16(),
            });
        }

        let data: ObservationsResponse = response
            .json()
            .await
            .map_err(|e| DataError::Parse(format!("FRED 응답 파싱 실패: {}", e)))?;

        let points: Vec<IndicatorPoint> = data
            .observations
            .into_iter()
            .filter_map(|obs| {
                if obs.value == "." {
                    return None;
                }
                Some(IndicatorPoint {
                    date: obs.date.parse().ok()?,
                    value: obs.value.parse().ok()?,
                })
            })
            .collect();

        tracing::debug!(
            series_id = series_id,
            count = points.len(),
            "FRED 지표 조회 완료"
        );

        Ok(IndicatorSeries {
            series_id: series_id.to_string(),
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_fetch_skips_missing_observations() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{
            "observations": [
                {"date": "2024-01-01", "value": "."},
                {"date": "2024-01-02", "value": "3.95"},
                {"date": "2024-01-03", "value": "4.01"}
            ]
        }"#;
        server
            .mock("GET", "/fred/series/observations")
            .match_query(mockito::Matcher::UrlEncoded(
                "series_id".into(),
                "DGS10".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = FredClient::with_base_url("test-key", server.url());
        let series = client
            .fetch_indicator_series(
                "DGS10",
                "2024-01-01".parse().unwrap(),
                "2024-01-31".parse().unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(series.points.len(), 2);
        assert_eq!(series.last().unwrap().value, dec!(4.01));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/fred/series/observations")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .create_async()
            .await;

        let client = FredClient::with_base_url("bad-key", server.url());
        let result = client
            .fetch_indicator_series(
                "DGS10",
                "2024-01-01".parse().unwrap(),
                "2024-01-31".parse().unwrap(),
            )
            .await;

        assert!(matches!(result, Err(DataError::Status { status: 400 })));
    }
}
