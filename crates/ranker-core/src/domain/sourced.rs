//! 정상/강등(degraded) 데이터 구분 타입.

use serde::{Deserialize, Serialize};

/// 외부 서비스에서 얻은 값 또는 서비스 실패 시의 대체 기본값.
///
/// 외부 의존성(AI 평가 등)이 실패해도 파이프라인은 중단되지 않고 중립
/// 기본값으로 계속 진행합니다. 이때 소비자가 실제 데이터와 기본값을
/// 구분할 수 있도록 출처를 함께 기록합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Sourced<T> {
    /// 외부 서비스가 정상적으로 반환한 값
    Fresh(T),
    /// 서비스 실패로 대체된 기본값과 그 사유
    Degraded { value: T, reason: String },
}

impl<T> Sourced<T> {
    /// 강등 사유와 함께 기본값을 감쌉니다.
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Self::Degraded {
            value,
            reason: reason.into(),
        }
    }

    /// 내부 값에 대한 참조를 반환합니다.
    pub fn value(&self) -> &T {
        match self {
            Self::Fresh(value) => value,
            Self::Degraded { value, .. } => value,
        }
    }

    /// 내부 값을 꺼냅니다.
    pub fn into_value(self) -> T {
        match self {
            Self::Fresh(value) => value,
            Self::Degraded { value, .. } => value,
        }
    }

    /// 기본값으로 강등된 데이터인지 확인합니다.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// 강등 사유를 반환합니다.
    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            Self::Fresh(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}
