//! 파이프라인 실행 통계.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 한 번의 파이프라인 실행에 대한 통계.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineStats {
    /// 요청된 종목 수
    pub requested: usize,
    /// 분석까지 완료된 종목 수
    pub analyzed: usize,
    /// 수집 실패/빈 데이터로 건너뛴 종목 수
    pub skipped: usize,
    /// 정성 평가가 중립으로 강등된 종목 수
    pub degraded: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl PipelineStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 분석 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.requested == 0 {
            0.0
        } else {
            (self.analyzed as f64 / self.requested as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            requested = self.requested,
            analyzed = self.analyzed,
            skipped = self.skipped,
            degraded = self.degraded,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "실행 완료"
        );
    }
}
