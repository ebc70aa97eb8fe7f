//! Site priority scoring.
//!
//! A site's score is its capacity-tier weight plus the weighted backlog of
//! its pending jobs. Unrecognised tiers and task classes contribute nothing;
//! they are never errors.
//!
//! This module lives in `core` (zero internal deps) so the same arithmetic
//! backs the HTTP ranking endpoint and any offline tooling.

use serde::{Deserialize, Serialize};

use crate::ranking::{Site, SiteJobStore};

// ---------------------------------------------------------------------------
// Capacity tiers
// ---------------------------------------------------------------------------

/// Recording capacity of a site, as stored in `sites.record_capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityTier {
    High,
    Medium,
    Low,
}

impl CapacityTier {
    /// Parse a stored capacity string. Returns `None` for anything unknown.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

// ---------------------------------------------------------------------------
// Task priority classes
// ---------------------------------------------------------------------------

/// Priority class of a job. `Task1` is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Task1,
    Task2,
    Task3,
    Task4,
    Task5,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 5] = [
        Self::Task1,
        Self::Task2,
        Self::Task3,
        Self::Task4,
        Self::Task5,
    ];

    /// Parse a stored task string. Returns `None` for anything unknown.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "task1" => Some(Self::Task1),
            "task2" => Some(Self::Task2),
            "task3" => Some(Self::Task3),
            "task4" => Some(Self::Task4),
            "task5" => Some(Self::Task5),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Task1 => "task1",
            Self::Task2 => "task2",
            Self::Task3 => "task3",
            Self::Task4 => "task4",
            Self::Task5 => "task5",
        }
    }
}

/// Job status value that counts toward a site's backlog.
pub const JOB_STATUS_PENDING: &str = "pending";

/// Number of pending jobs in one priority class for a site.
///
/// `task` is the raw stored value, so unknown classes survive until scoring
/// and are weighted as zero there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCount {
    pub task: String,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Immutable weight tables used by [`PriorityScorer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityWeights {
    pub high: i64,
    pub medium: i64,
    pub low: i64,
    /// Weights for `task1..=task5`, in that order.
    pub tasks: [i64; 5],
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            high: 3,
            medium: 2,
            low: 1,
            tasks: [5, 4, 3, 2, 1],
        }
    }
}

impl PriorityWeights {
    pub fn capacity_weight(&self, tier: CapacityTier) -> i64 {
        match tier {
            CapacityTier::High => self.high,
            CapacityTier::Medium => self.medium,
            CapacityTier::Low => self.low,
        }
    }

    pub fn task_weight(&self, priority: TaskPriority) -> i64 {
        match priority {
            TaskPriority::Task1 => self.tasks[0],
            TaskPriority::Task2 => self.tasks[1],
            TaskPriority::Task3 => self.tasks[2],
            TaskPriority::Task4 => self.tasks[3],
            TaskPriority::Task5 => self.tasks[4],
        }
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Computes a non-negative priority score for a single site.
#[derive(Debug, Clone, Default)]
pub struct PriorityScorer {
    weights: PriorityWeights,
}

impl PriorityScorer {
    pub fn new(weights: PriorityWeights) -> Self {
        Self { weights }
    }

    /// Weight of a stored capacity string; unknown tiers score 0.
    pub fn capacity_score(&self, record_capacity: &str) -> i64 {
        CapacityTier::from_name(record_capacity)
            .map(|tier| self.weights.capacity_weight(tier))
            .unwrap_or(0)
    }

    /// Weighted sum of pending-job counts. Unknown classes and negative
    /// counts contribute 0.
    pub fn backlog_score(&self, counts: &[PriorityCount]) -> i64 {
        counts
            .iter()
            .map(|c| {
                let weight = TaskPriority::from_name(&c.task)
                    .map(|p| self.weights.task_weight(p))
                    .unwrap_or(0);
                weight.saturating_mul(c.count.max(0))
            })
            .fold(0i64, i64::saturating_add)
    }

    /// Total score for `site`, loading its backlog from `store`.
    ///
    /// A store failure scores the whole site as 0 and is only logged, so one
    /// unreachable backlog never aborts a ranking.
    pub async fn score<S>(&self, store: &S, site: &Site) -> i64
    where
        S: SiteJobStore + ?Sized,
    {
        match store.count_pending_jobs_by_priority(site.id).await {
            Ok(counts) => self
                .capacity_score(&site.record_capacity)
                .saturating_add(self.backlog_score(&counts)),
            Err(e) => {
                tracing::warn!(site_id = site.id, error = %e, "Backlog lookup failed, scoring site as 0");
                0
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
