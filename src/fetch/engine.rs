use std::sync::Arc;

use tracing::{debug, info, warn};

use super::assembler::assemble;
use super::catalog::{resolve, Entity};
use super::compiler::compile_scoped;
use super::error::FetchError;
use super::executor::{execute, JoinQuery, JoinStore};
use super::selector::select;
use super::types::{FetchRequest, FetchResult, Grouped};
use crate::config::{DirectionConfig, FetchConfig};
use crate::database::models::{AdGroup, Campaign};

/// Runs dynamic fetches in both directions over one join store.
///
/// The engine holds no per-request state; clones share the store.
pub struct FetchEngine<S: JoinStore + ?Sized = dyn JoinStore> {
    store: Arc<S>,
    config: FetchConfig,
}

impl<S: JoinStore + ?Sized> Clone for FetchEngine<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), config: self.config.clone() }
    }
}

impl<S: JoinStore + ?Sized> FetchEngine<S> {
    pub fn new(store: Arc<S>, config: FetchConfig) -> Self {
        Self { store, config }
    }

    /// Campaigns with their ad groups. Campaigns without ad groups are kept.
    pub async fn fetch_campaigns(&self, request: &FetchRequest) -> Result<Vec<FetchResult>, FetchError> {
        let groups = self.fetch::<Campaign, AdGroup>(request, self.config.campaign).await?;
        Ok(groups.into_iter().map(FetchResult::from).collect())
    }

    /// Ad groups, each embedding the campaign it belongs to.
    /// Ad groups whose campaign is missing are not returned.
    pub async fn fetch_ad_groups(&self, request: &FetchRequest) -> Result<Vec<AdGroup>, FetchError> {
        let groups = self.fetch::<AdGroup, Campaign>(request, self.config.ad_group).await?;
        Ok(groups
            .into_iter()
            .map(|Grouped { primary, related }| AdGroup {
                campaign: related.into_iter().next().map(Box::new),
                ..primary
            })
            .collect())
    }

    async fn fetch<P: Entity, R: Entity>(
        &self,
        request: &FetchRequest,
        direction: DirectionConfig,
    ) -> Result<Vec<Grouped<P, R>>, FetchError> {
        let limit = self.effective_limit(request.limit)?;
        info!(
            "Fetching {:?} with {:?}: fields={:?} filters={} limit={}",
            P::KIND,
            R::KIND,
            request.fields,
            request.filters.len(),
            limit
        );

        let selected = select(request, P::KIND, R::KIND, direction.default_to_all_fields_when_empty);
        let (primary_condition, related_condition) = compile_scoped(&request.filters, P::KIND)?;

        let primary_fields = resolve::<P>(&selected.primary);
        let related_fields = resolve::<R>(&selected.related);

        let query = JoinQuery::new(
            P::KIND,
            primary_fields.iter().map(|f| f.column).collect(),
            related_fields.iter().map(|f| f.column).collect(),
            primary_condition,
            related_condition,
        );

        if self.config.debug_logging {
            let sql = query.to_sql();
            debug!("Fetch SQL: {} params={:?}", sql.query, sql.params);
        }

        let rows = execute(self.store.as_ref(), &query, limit).await?;

        let groups = assemble(
            &rows,
            &primary_fields,
            &related_fields,
            usize::try_from(limit).unwrap_or(usize::MAX),
            direction.keep_rows_without_related,
        );
        info!("Fetched {} {:?} groups from {} rows", groups.len(), P::KIND, rows.len());
        Ok(groups)
    }

    fn effective_limit(&self, limit: i64) -> Result<i64, FetchError> {
        if limit < 1 {
            return Err(FetchError::InvalidLimit(format!("Limit must be positive, got {}", limit)));
        }
        match self.config.max_limit {
            Some(max) if limit > max => {
                warn!("Requested limit {} exceeds maximum {}, capping", limit, max);
                Ok(max)
            }
            _ => Ok(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::types::{FilterOperator, QueryFilter};
    use crate::testing::{ad_group, campaign, FailingJoinStore, MemoryJoinStore};
    use crate::types::Status;

    fn fetch_config() -> FetchConfig {
        FetchConfig {
            max_limit: Some(50),
            debug_logging: true,
            campaign: DirectionConfig::CAMPAIGN_DEFAULT,
            ad_group: DirectionConfig::AD_GROUP_DEFAULT,
        }
    }

    fn engine(store: MemoryJoinStore) -> FetchEngine<MemoryJoinStore> {
        FetchEngine::new(Arc::new(store), fetch_config())
    }

    fn request(fields: &[&str], filters: Vec<QueryFilter>, limit: i64) -> FetchRequest {
        FetchRequest::new(fields.iter().map(|f| f.to_string()).collect(), filters, limit).unwrap()
    }

    fn sample_store() -> MemoryJoinStore {
        MemoryJoinStore::new(
            vec![
                campaign(1, "camp-1", "ks-a", Status::Active),
                campaign(2, "camp-2", "ks-a", Status::Paused),
                campaign(3, "camp-3", "ks-b", Status::Active),
            ],
            vec![
                ad_group(10, 1, "ag-10", Status::Active),
                ad_group(11, 1, "ag-11", Status::Paused),
                ad_group(12, 1, "ag-12", Status::Active),
                ad_group(20, 2, "ag-20", Status::Active),
                ad_group(99, 404, "orphan", Status::Active),
            ],
        )
    }

    #[tokio::test]
    async fn camp_1_with_related_status() {
        let engine = engine(sample_store());
        let filters = vec![QueryFilter::new("name", FilterOperator::Equals, vec!["camp-1"])];

        let results = engine
            .fetch_campaigns(&request(&["name", "adGroup.status"], filters, 10))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.campaign.id, Some(1));
        assert_eq!(result.campaign.name.as_deref(), Some("camp-1"));
        assert_eq!(result.campaign.ks_name, None);
        assert_eq!(result.ad_groups.len(), 3);
        for ad_group in &result.ad_groups {
            assert!(ad_group.id.is_some());
            assert!(ad_group.status.is_some());
            assert_eq!(ad_group.name, None);
        }
    }

    #[tokio::test]
    async fn camp_1_with_two_ad_groups_populates_only_requested_fields() {
        let store = MemoryJoinStore::new(
            vec![campaign(1, "camp-1", "ks-a", Status::Active)],
            vec![ad_group(10, 1, "ag-10", Status::Active), ad_group(11, 1, "ag-11", Status::Paused)],
        );
        let engine = engine(store);
        let filters = vec![QueryFilter::new("name", FilterOperator::Equals, vec!["camp-1"])];

        let results = engine
            .fetch_campaigns(&request(&["id", "name", "adGroup.id", "adGroup.status"], filters, 10))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].campaign.name.as_deref(), Some("camp-1"));
        let ad_groups = &results[0].ad_groups;
        assert_eq!(ad_groups.len(), 2);
        assert_eq!(ad_groups[0].status, Some(Status::Active));
        assert_eq!(ad_groups[1].status, Some(Status::Paused));
        for ad_group in ad_groups {
            assert!(ad_group.id.is_some());
            assert_eq!(ad_group.campaign_id, None);
            assert_eq!(ad_group.campaign, None);
            assert_eq!(ad_group.name, None);
            assert_eq!(ad_group.create_date, None);
            assert_eq!(ad_group.last_updated, None);
        }
    }

    #[tokio::test]
    async fn campaign_direction_can_keep_rows_without_ad_groups() {
        let mut config = fetch_config();
        config.campaign.keep_rows_without_related = true;
        let engine = FetchEngine::new(Arc::new(sample_store()), config);
        let filters = vec![QueryFilter::new("name", FilterOperator::Equals, vec!["camp-3"])];

        let results = engine.fetch_campaigns(&request(&[], filters, 10)).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].campaign.id, Some(3));
        assert_eq!(results[0].ad_groups, vec![AdGroup::default()]);
    }

    #[tokio::test]
    async fn filters_without_values_match_nothing() {
        let engine = engine(sample_store());

        for operator in [FilterOperator::Equals, FilterOperator::In] {
            let filters = vec![QueryFilter::new("name", operator, vec![])];
            let results = engine.fetch_campaigns(&request(&[], filters, 10)).await.unwrap();
            assert!(results.is_empty());
        }
    }

    #[tokio::test]
    async fn limit_counts_groups_not_rows() {
        let engine = engine(sample_store());

        let results = engine.fetch_campaigns(&request(&["name"], vec![], 2)).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].campaign.id, Some(1));
        assert_eq!(results[0].ad_groups.len(), 3);
        assert_eq!(results[1].campaign.id, Some(2));
    }

    #[tokio::test]
    async fn childless_campaign_survives_left_join() {
        let engine = engine(sample_store());
        let filters = vec![QueryFilter::new("name", FilterOperator::Equals, vec!["CAMP-3"])];

        let results = engine.fetch_campaigns(&request(&[], filters, 10)).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].campaign.id, Some(3));
        assert!(results[0].ad_groups.is_empty());
    }

    #[tokio::test]
    async fn related_filters_narrow_the_join() {
        let engine = engine(sample_store());
        let filters = vec![QueryFilter::new("adGroup.status", FilterOperator::In, vec!["PAUSED"])];

        let results = engine.fetch_campaigns(&request(&["adGroup.name"], filters, 10)).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ad_groups.len(), 1);
        assert_eq!(results[0].ad_groups[0].name.as_deref(), Some("ag-11"));
    }

    #[tokio::test]
    async fn ad_groups_embed_their_campaign_with_all_fields_by_default() {
        let engine = engine(sample_store());
        let filters = vec![QueryFilter::new("campaign.ksName", FilterOperator::Equals, vec!["ks-a"])];

        let ad_groups = engine.fetch_ad_groups(&request(&["name"], filters, 10)).await.unwrap();

        assert_eq!(ad_groups.iter().map(|a| a.id).collect::<Vec<_>>(), vec![Some(10), Some(11), Some(12), Some(20)]);
        let campaign = ad_groups[0].campaign.as_ref().unwrap();
        assert_eq!(campaign.id, Some(1));
        assert_eq!(campaign.ks_name.as_deref(), Some("ks-a"));
        assert_eq!(campaign.status, Some(Status::Active));
        assert_eq!(ad_groups[0].status, None);
    }

    #[tokio::test]
    async fn orphan_ad_groups_are_dropped_by_inner_join() {
        let engine = engine(sample_store());

        let ad_groups = engine.fetch_ad_groups(&request(&[], vec![], 50)).await.unwrap();

        assert_eq!(ad_groups.len(), 4);
        assert!(ad_groups.iter().all(|a| a.campaign.is_some()));
    }

    #[tokio::test]
    async fn unsupported_operator_returns_no_partial_results() {
        let store = Arc::new(sample_store());
        let engine = FetchEngine::new(Arc::clone(&store), fetch_config());
        let filters = vec![
            QueryFilter::new("name", FilterOperator::Equals, vec!["camp-1"]),
            QueryFilter::new("adGroup.id", FilterOperator::Unsupported("GREATER_THAN".into()), vec!["3"]),
        ];

        let err = engine.fetch_campaigns(&request(&[], filters, 10)).await.unwrap_err();

        assert!(matches!(err, FetchError::UnsupportedOperator(_)));
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn limit_is_capped_at_configured_maximum() {
        let store = MemoryJoinStore::new(
            (1..=60).map(|id| campaign(id, &format!("c-{}", id), "ks", Status::Active)).collect(),
            vec![],
        );
        let engine = engine(store);

        let results = engine.fetch_campaigns(&request(&[], vec![], 500)).await.unwrap();
        assert_eq!(results.len(), 50);
    }

    #[tokio::test]
    async fn store_failure_is_an_execution_error() {
        let engine = FetchEngine::new(Arc::new(FailingJoinStore), fetch_config());

        let err = engine.fetch_campaigns(&request(&[], vec![], 10)).await.unwrap_err();
        assert!(matches!(err, FetchError::Execution(_)));
    }

    #[tokio::test]
    async fn unknown_fields_are_ignored() {
        let engine = engine(sample_store());
        let filters = vec![QueryFilter::new("budget", FilterOperator::Equals, vec!["1"])];

        let results = engine.fetch_campaigns(&request(&["budget", "adGroup.bid"], filters, 10)).await.unwrap();
        assert_eq!(results.len(), 3);
    }
}
