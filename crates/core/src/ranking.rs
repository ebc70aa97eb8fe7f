//! Site ranking: score every site, order highest first, optionally cap.
//!
//! Ordering is a stable descending sort on score, so sites with equal scores
//! keep the order in which the store listed them. Stores are expected to list
//! sites in a deterministic order (the Postgres store uses `ORDER BY id`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::priority::{PriorityCount, PriorityScorer};
use crate::types::DbId;

/// A site as seen by the ranking engine. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: DbId,
    pub name: String,
    pub record_capacity: String,
}

/// A site paired with the score it was ranked by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedSite {
    #[serde(flatten)]
    pub site: Site,
    pub score: i64,
}

/// Read-only access to sites and their pending-job backlog.
#[async_trait]
pub trait SiteJobStore: Send + Sync {
    /// All sites, in a deterministic order.
    async fn list_sites(&self) -> Result<Vec<Site>, CoreError>;

    /// Pending jobs for `site_id`, grouped by raw priority class.
    async fn count_pending_jobs_by_priority(
        &self,
        site_id: DbId,
    ) -> Result<Vec<PriorityCount>, CoreError>;
}

/// Orders sites by [`PriorityScorer`] score.
#[derive(Debug, Clone, Default)]
pub struct SiteRanker {
    scorer: PriorityScorer,
}

impl SiteRanker {
    pub fn new(scorer: PriorityScorer) -> Self {
        Self { scorer }
    }

    /// Rank all sites, highest score first.
    ///
    /// `limit` of `None` or `<= 0` returns every site. Per-site scoring
    /// failures degrade that site to 0; only a failure to list sites is
    /// returned as an error.
    pub async fn rank<S>(&self, store: &S, limit: Option<i64>) -> Result<Vec<RankedSite>, CoreError>
    where
        S: SiteJobStore + ?Sized,
    {
        let sites = store.list_sites().await?;

        let mut ranked = Vec::with_capacity(sites.len());
        for site in sites {
            let score = self.scorer.score(store, &site).await;
            ranked.push(RankedSite { site, score });
        }

        // `sort_by` is stable: equal scores keep load order.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        if let Some(limit) = limit.filter(|l| *l > 0) {
            ranked.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        tracing::debug!(count = ranked.len(), ?limit, "Sites ranked");

        Ok(ranked)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use assert_matches::assert_matches;

    use super::*;

    /// In-memory store. Sites listed in insertion order; sites in `broken`
    /// fail their backlog lookup.
    #[derive(Default)]
    struct MemoryStore {
        sites: Vec<Site>,
        backlog: HashMap<DbId, Vec<PriorityCount>>,
        broken: HashSet<DbId>,
        list_fails: bool,
    }

    impl MemoryStore {
        fn site(mut self, id: DbId, capacity: &str, backlog: &[(&str, i64)]) -> Self {
            self.sites.push(Site {
                id,
                name: format!("site-{id}"),
                record_capacity: capacity.to_string(),
            });
            self.backlog.insert(
                id,
                backlog
                    .iter()
                    .map(|(task, count)| PriorityCount {
                        task: task.to_string(),
                        count: *count,
                    })
                    .collect(),
            );
            self
        }

        fn broken(mut self, id: DbId) -> Self {
            self.broken.insert(id);
            self
        }
    }

    #[async_trait]
    impl SiteJobStore for MemoryStore {
        async fn list_sites(&self) -> Result<Vec<Site>, CoreError> {
            if self.list_fails {
                return Err(CoreError::Internal("store offline".into()));
            }
            Ok(self.sites.clone())
        }

        async fn count_pending_jobs_by_priority(
            &self,
            site_id: DbId,
        ) -> Result<Vec<PriorityCount>, CoreError> {
            if self.broken.contains(&site_id) {
                return Err(CoreError::Internal("backlog unavailable".into()));
            }
            Ok(self.backlog.get(&site_id).cloned().unwrap_or_default())
        }
    }

    fn ids(ranked: &[RankedSite]) -> Vec<DbId> {
        ranked.iter().map(|r| r.site.id).collect()
    }

    #[tokio::test]
    async fn worked_example_scores_and_limit() {
        let store = MemoryStore::default()
            .site(2, "low", &[])
            .site(1, "high", &[("task1", 2), ("task2", 1)]);
        let ranker = SiteRanker::default();

        let all = ranker.rank(&store, None).await.unwrap();
        assert_eq!(ids(&all), vec![1, 2]);
        assert_eq!(all[0].score, 17);
        assert_eq!(all[1].score, 1);

        let top = ranker.rank(&store, Some(1)).await.unwrap();
        assert_eq!(ids(&top), vec![1]);
    }

    #[tokio::test]
    async fn unknown_tier_without_backlog_scores_zero() {
        let store = MemoryStore::default().site(1, "gigantic", &[]);
        let ranked = SiteRanker::default().rank(&store, None).await.unwrap();
        assert_eq!(ranked[0].score, 0);
    }

    #[tokio::test]
    async fn limit_returns_min_of_limit_and_total() {
        let store = MemoryStore::default()
            .site(1, "low", &[])
            .site(2, "medium", &[])
            .site(3, "high", &[]);
        let ranker = SiteRanker::default();

        assert_eq!(ranker.rank(&store, Some(2)).await.unwrap().len(), 2);
        assert_eq!(ranker.rank(&store, Some(10)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn non_positive_limit_means_no_truncation() {
        let store = MemoryStore::default()
            .site(1, "low", &[])
            .site(2, "medium", &[]);
        let ranker = SiteRanker::default();

        assert_eq!(ranker.rank(&store, Some(0)).await.unwrap().len(), 2);
        assert_eq!(ranker.rank(&store, Some(-3)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ties_keep_load_order_across_calls() {
        let store = MemoryStore::default()
            .site(7, "medium", &[])
            .site(3, "low", &[("task5", 1)])
            .site(5, "medium", &[])
            .site(1, "high", &[]);
        let ranker = SiteRanker::default();

        let first = ids(&ranker.rank(&store, None).await.unwrap());
        assert_eq!(first, vec![1, 7, 3, 5]);

        for _ in 0..5 {
            assert_eq!(ids(&ranker.rank(&store, None).await.unwrap()), first);
        }
    }

    #[tokio::test]
    async fn failing_site_scores_zero_and_others_still_rank() {
        let store = MemoryStore::default()
            .site(1, "high", &[("task1", 10)])
            .site(2, "low", &[("task3", 1)])
            .site(3, "medium", &[])
            .broken(1);

        let ranked = SiteRanker::default().rank(&store, None).await.unwrap();
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
        assert_eq!(ranked[0].score, 4);
        assert_eq!(ranked[1].score, 2);
        assert_eq!(ranked[2].score, 0);
    }

    #[tokio::test]
    async fn listing_failure_is_propagated() {
        let store = MemoryStore {
            list_fails: true,
            ..Default::default()
        };
        let result = SiteRanker::default().rank(&store, None).await;
        assert_matches!(result, Err(CoreError::Internal(_)));
    }

    #[tokio::test]
    async fn empty_store_ranks_nothing() {
        let ranked = SiteRanker::default()
            .rank(&MemoryStore::default(), Some(5))
            .await
            .unwrap();
        assert!(ranked.is_empty());
    }
}
