//! 점수 산출 및 순위 결정.
//!
//! 기술적/통계/정성 점수는 모두 기준점 50에서 가감점으로 산출하고
//! [0, 100] 범위로 제한합니다. 종합 점수는 가중 평균을 소수점 둘째
//! 자리로 반올림한 값입니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use ranker_core::{ScoringConfig, Sourced, StockCode};

use crate::qualitative::QualAssessment;
use crate::signals::{MacdStance, MaCross, RsiZone, SignalSummary};
use crate::statistics::StatsSummary;

const BASE_SCORE: f64 = 50.0;

/// 종합 점수 가중치.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// 기술적 점수 가중치
    pub technical: f64,
    /// 통계 점수 가중치
    pub statistical: f64,
    /// 정성 점수 가중치
    pub qualitative: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            technical: 0.4,
            statistical: 0.3,
            qualitative: 0.3,
        }
    }
}

impl From<&ScoringConfig> for ScoreWeights {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            technical: config.technical_weight,
            statistical: config.statistical_weight,
            qualitative: config.qualitative_weight,
        }
    }
}

/// 한 종목의 분석 결과 묶음.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentAnalysis {
    /// 종목 코드
    pub code: StockCode,
    /// 표시 이름
    pub name: String,
    /// 통계 요약
    pub stats: StatsSummary,
    /// 신호 요약
    pub signals: SignalSummary,
    /// AI 정성 평가 (실패 시 중립으로 강등)
    pub qualitative: Sourced<QualAssessment>,
}

/// 순위표 한 행.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingRow {
    /// 1부터 시작하는 순위
    pub rank: usize,
    /// 종목 코드
    pub code: StockCode,
    /// 표시 이름
    pub name: String,
    /// 기술적 점수
    pub technical_score: f64,
    /// 통계 점수
    pub statistical_score: f64,
    /// 정성 점수
    pub qualitative_score: f64,
    /// 종합 점수 (소수점 둘째 자리)
    pub composite_score: f64,
    /// 정성 평가 강등 사유 (정상이면 None)
    pub degraded_reason: Option<String>,
    /// 신호 요약
    pub signals: SignalSummary,
    /// 통계 요약
    pub stats: StatsSummary,
}

/// 가중치 기반 스코어러.
#[derive(Debug, Clone, Default)]
pub struct StockScorer {
    weights: ScoreWeights,
}

impl StockScorer {
    /// 가중치를 지정하여 스코어러를 생성합니다.
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// 신호 요약에서 기술적 점수를 산출합니다.
    ///
    /// 판정 불가(`None`) 신호는 가감점에 기여하지 않습니다.
    pub fn technical_score(&self, signals: &SignalSummary) -> f64 {
        let mut score = BASE_SCORE;

        match signals.ma_cross {
            Some(MaCross::Golden) => score += 20.0,
            Some(MaCross::Dead) => score -= 20.0,
            Some(MaCross::Neutral) | None => {}
        }

        if let Some(rsi) = signals.rsi_value {
            if rsi > dec!(70) {
                score -= 15.0;
            } else if rsi < dec!(30) {
                score += 15.0;
            } else if rsi >= dec!(40) && rsi <= dec!(60) {
                score += 5.0;
            }
        }

        match signals.macd_stance {
            Some(MacdStance::Buy) => score += 10.0,
            Some(MacdStance::Sell) => score -= 10.0,
            None => {}
        }

        clamp_score(score)
    }

    /// 통계 요약에서 통계 점수를 산출합니다.
    pub fn statistical_score(&self, stats: &StatsSummary) -> f64 {
        let mut score = BASE_SCORE;

        if stats.total_return_pct > 20.0 {
            score += 20.0;
        } else if stats.total_return_pct > 10.0 {
            score += 10.0;
        } else if stats.total_return_pct < -20.0 {
            score -= 20.0;
        } else if stats.total_return_pct < -10.0 {
            score -= 10.0;
        }

        if stats.sharpe_ratio > 1.5 {
            score += 15.0;
        } else if stats.sharpe_ratio > 1.0 {
            score += 10.0;
        } else if stats.sharpe_ratio < 0.0 {
            score -= 15.0;
        }

        if stats.volatility_pct < 1.0 {
            score += 10.0;
        } else if stats.volatility_pct > 3.0 {
            score -= 10.0;
        }

        clamp_score(score)
    }

    /// 세 점수를 가중 평균하여 종합 점수를 산출합니다.
    ///
    /// 결과는 소수점 둘째 자리로 반올림합니다.
    pub fn composite(&self, technical: f64, statistical: f64, qualitative: f64) -> f64 {
        let weighted = technical * self.weights.technical
            + statistical * self.weights.statistical
            + qualitative * self.weights.qualitative;
        (weighted * 100.0).round() / 100.0
    }

    /// 분석 결과 목록을 점수화하고 종합 점수 내림차순으로 순위를
    /// 매깁니다.
    ///
    /// 동점이면 입력 순서를 유지합니다 (안정 정렬). 순위는 1부터
    /// 시작합니다.
    pub fn rank(&self, analyses: Vec<InstrumentAnalysis>) -> Vec<RankingRow> {
        let mut rows: Vec<RankingRow> = analyses
            .into_iter()
            .map(|analysis| {
                let technical = self.technical_score(&analysis.signals);
                let statistical = self.statistical_score(&analysis.stats);
                let qualitative = f64::from(analysis.qualitative.value().score);
                let composite = self.composite(technical, statistical, qualitative);

                RankingRow {
                    rank: 0,
                    code: analysis.code,
                    name: analysis.name,
                    technical_score: technical,
                    statistical_score: statistical,
                    qualitative_score: qualitative,
                    composite_score: composite,
                    degraded_reason: analysis
                        .qualitative
                        .degraded_reason()
                        .map(|r| r.to_string()),
                    signals: analysis.signals,
                    stats: analysis.stats,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.composite_score
                .partial_cmp(&a.composite_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (index, row) in rows.iter_mut().enumerate() {
            row.rank = index + 1;
        }
        rows
    }
}

/// 점수를 [0, 100] 범위로 제한합니다.
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}
