//! 네이버 금융 뉴스 헤드라인 크롤러.
//!
//! 종목별 뉴스 페이지에서 최근 헤드라인을 수집하여 AI 정성 평가 프롬프트에
//! 사용합니다. 최선 노력(best effort) 수집이며 결과가 없어도 파이프라인은
//! 계속 진행합니다.

use crate::error::{DataError, DataResult};
use ranker_core::StockCode;
use scraper::{Html, Selector};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://finance.naver.com";

/// 페이지당/전체 헤드라인 수집 상한.
const MAX_HEADLINES: usize = 10;

/// 네이버 금융 뉴스 크롤러.
pub struct NewsCrawler {
    client: reqwest::Client,
    base_url: String,
    /// 페이지 요청 간 딜레이 (기본: 300ms)
    request_delay: Duration,
}

impl NewsCrawler {
    /// 기본 설정으로 생성합니다.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(300))
    }

    /// 커스텀 딜레이로 생성합니다.
    pub fn with_delay(request_delay: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
                .build()
                .expect("HTTP 클라이언트 생성 실패"),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay,
        }
    }

    /// 커스텀 base URL로 생성합니다 (테스트용).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut crawler = Self::new();
        crawler.base_url = base_url.into();
        crawler
    }

    /// 종목의 최근 뉴스 헤드라인을 수집합니다.
    ///
    /// 최대 `max_pages` 페이지를 순회하며, 전체 상한은 10건입니다.
    pub async fn fetch_headlines(
        &self,
        code: &StockCode,
        max_pages: usize,
    ) -> DataResult<Vec<String>> {
        let mut headlines = Vec::new();

        for page in 1..=max_pages {
            let url = format!("{}/item/news.naver", self.base_url);

            tracing::debug!(code = %code, page = page, "뉴스 페이지 요청");

            let response = self
                .client
                .get(&url)
                .query(&[("code", code.as_str()), ("page", &page.to_string())])
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

            let html = response.text().await?;
            let titles = extract_titles(&html);
            if titles.is_empty() {
                break;
            }

            for title in titles {
                if headlines.len() >= MAX_HEADLINES {
                    break;
                }
                headlines.push(title);
            }

            if headlines.len() >= MAX_HEADLINES {
                break;
            }
            if page < max_pages {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        tracing::debug!(code = %code, count = headlines.len(), "뉴스 헤드라인 수집 완료");
        Ok(headlines)
    }
}

impl Default for NewsCrawler {
    fn default() -> Self {
        Self::new()
    }
}

/// 뉴스 목록 HTML에서 제목을 추출합니다.
fn extract_titles(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("td.title a, a.title") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"
        <html><body><table>
            <tr><td class="title"><a href="/news/1">삼성전자, 신규 파운드리 수주</a></td></tr>
            <tr><td class="title"><a href="/news/2">  반도체 업황 회복 기대감  </a></td></tr>
            <tr><td class="date">2024.01.02</td></tr>
        </table></body></html>
    "#;

    #[test]
    fn test_extract_titles() {
        let titles = extract_titles(SAMPLE_PAGE);
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0], "삼성전자, 신규 파운드리 수주");
        assert_eq!(titles[1], "반도체 업황 회복 기대감");
    }

    #[test]
    fn test_extract_titles_empty_page() {
        assert!(extract_titles("<html><body></body></html>").is_empty());
    }

    #[tokio::test]
    async fn test_fetch_headlines_stops_on_empty_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/item/news.naver")
            .match_query(mockito::Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(SAMPLE_PAGE)
            .create_async()
            .await;
        server
            .mock("GET", "/item/news.naver")
            .match_query(mockito::Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body("<html><body></body></html>")
            .create_async()
            .await;

        let crawler = NewsCrawler::with_base_url(server.url());
        let code = StockCode::new("005930").unwrap();
        let headlines = crawler.fetch_headlines(&code, 3).await.unwrap();

        assert_eq!(headlines.len(), 2);
    }
}
