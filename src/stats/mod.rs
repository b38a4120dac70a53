//! 연습문제 구성별 시도 횟수/등급 통계.
//!
//! 저장소는 문자열 키-값 기능(`KeyValueStore`)으로 주입받는다. 저장된 값이 없거나
//! 해석할 수 없으면 0 으로 채운 기록으로 간주한다.

pub mod fingerprint;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::grading::Tier;

pub use fingerprint::{ExerciseFingerprint, STATS_KEY_PREFIX};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

pub type StatsResult<T> = Result<T, StatsError>;

/// 통계 저장/직렬화 오류.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("통계 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("통계 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// 구성 하나에 대한 누적 시도 통계. `green + yellow + red == attempts` 를 유지한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttemptStats {
    pub attempts: u32,
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
}

impl AttemptStats {
    pub fn count(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Green => self.green,
            Tier::Yellow => self.yellow,
            Tier::Red => self.red,
        }
    }

    /// 시도 1회를 기록한다. 카운터가 가득 찬 경우에는 불변식을 지키기 위해 무시한다.
    pub fn record(&mut self, tier: Tier) {
        if self.attempts == u32::MAX {
            return;
        }
        self.attempts += 1;
        match tier {
            Tier::Green => self.green += 1,
            Tier::Yellow => self.yellow += 1,
            Tier::Red => self.red += 1,
        }
    }

    pub fn is_consistent(&self) -> bool {
        u64::from(self.green) + u64::from(self.yellow) + u64::from(self.red)
            == u64::from(self.attempts)
    }

    /// 가장 많이 나온 등급. 동률이면 초록 > 노랑 > 빨강 순. 시도가 없으면 `None`.
    pub fn dominant_tier(&self) -> Option<Tier> {
        if self.attempts == 0 {
            return None;
        }
        let mut best = Tier::Green;
        for tier in Tier::ALL {
            if self.count(tier) > self.count(best) {
                best = tier;
            }
        }
        Some(best)
    }
}

/// 지문별 통계를 읽고 갱신한다.
#[derive(Debug)]
pub struct AttemptTracker<S> {
    store: S,
}

impl<S: KeyValueStore> AttemptTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// 현재 통계를 읽는다. 실패하지 않으며 기록이 없으면 0 을 반환한다.
    pub fn summary(&self, fingerprint: &ExerciseFingerprint) -> AttemptStats {
        let key = fingerprint.storage_key();
        let Some(raw) = self.store.get(&key) else {
            return AttemptStats::default();
        };
        match serde_json::from_str::<AttemptStats>(&raw) {
            Ok(stats) if stats.is_consistent() => stats,
            Ok(stats) => {
                warn!(?stats, "stored attempt stats are inconsistent; treating as empty");
                AttemptStats::default()
            }
            Err(err) => {
                warn!(%err, "stored attempt stats are unreadable; treating as empty");
                AttemptStats::default()
            }
        }
    }

    /// 시도 1회를 기록하고 갱신된 통계를 반환한다.
    pub fn record_attempt(
        &mut self,
        fingerprint: &ExerciseFingerprint,
        tier: Tier,
    ) -> StatsResult<AttemptStats> {
        let mut stats = self.summary(fingerprint);
        stats.record(tier);
        let value = serde_json::to_string(&stats)?;
        self.store.set(&fingerprint.storage_key(), value)?;
        info!(%tier, attempts = stats.attempts, "attempt recorded");
        Ok(stats)
    }
}
