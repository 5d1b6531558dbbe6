use crate::adapters::{fake_store::FakeStoreSource, platzi::PlatziSource};
use crate::config::sources::{AggregatorConfig, SourceKind};
use crate::core::normalize::{normalize_record, Rejection};
use crate::domain::model::{CatalogSnapshot, FetchReport, Product, SourceRecord, SourceReport};
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::Utc;
use futures::future::join_all;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

/// What one source produced in a single fetch cycle.
#[derive(Debug)]
pub enum SourceOutcome {
    Fetched { records: Vec<SourceRecord> },
    Failed { reason: String },
}

/// Queries one source, turning any error into a `Failed` outcome with a warning logged.
pub async fn fetch_source(source: &dyn CatalogSource) -> SourceOutcome {
    match source.fetch_records().await {
        Ok(records) => {
            tracing::debug!(
                source = source.name(),
                records = records.len(),
                "catalog source responded"
            );
            SourceOutcome::Fetched { records }
        }
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "catalog source failed");
            SourceOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Merges several catalog sources into one product list.
///
/// Sources are queried concurrently, but the output always lists the first
/// source's products first, in the order that source returned them. A failing
/// source contributes nothing; it never fails the call.
pub struct CatalogAggregator {
    sources: Vec<Box<dyn CatalogSource>>,
}

impl CatalogAggregator {
    pub fn new(sources: Vec<Box<dyn CatalogSource>>) -> Self {
        Self { sources }
    }

    /// Builds the configured sources over one shared HTTP client.
    pub fn from_config(config: &AggregatorConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let sources = config
            .sources
            .iter()
            .map(|source| -> Box<dyn CatalogSource> {
                match source.kind {
                    SourceKind::Platzi => Box::new(PlatziSource::new(
                        client.clone(),
                        source.endpoint.clone(),
                        source.id_offset,
                    )),
                    SourceKind::FakeStore => Box::new(FakeStoreSource::new(
                        client.clone(),
                        source.endpoint.clone(),
                        source.id_offset,
                    )),
                }
            })
            .collect();

        Ok(Self::new(sources))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn fetch_products(&self) -> Vec<Product> {
        self.fetch_with_report().await.products
    }

    /// One fetch cycle: every source is queried, normalized and merged in
    /// configuration order. Products whose offset id was already taken are dropped
    /// and counted in `id_collisions`.
    pub async fn fetch_with_report(&self) -> CatalogSnapshot {
        tracing::info!(sources = self.sources.len(), "fetching catalog");

        let outcomes = join_all(self.sources.iter().map(|s| fetch_source(s.as_ref()))).await;

        let mut report = FetchReport::new(Utc::now());
        let mut products = Vec::new();
        let mut seen_ids = HashSet::new();

        for (source, outcome) in self.sources.iter().zip(outcomes) {
            let records = match outcome {
                SourceOutcome::Fetched { records } => records,
                SourceOutcome::Failed { reason } => {
                    report.sources.push(SourceReport::failed(source.name(), reason));
                    continue;
                }
            };

            let mut entry = SourceReport::succeeded(source.name(), records.len());
            for record in records {
                match normalize_record(record, source.name(), source.id_offset()) {
                    Ok(product) => {
                        if seen_ids.insert(product.id) {
                            products.push(product);
                            entry.kept += 1;
                        } else {
                            tracing::warn!(
                                source = source.name(),
                                id = product.id,
                                "dropping product with colliding id"
                            );
                            report.id_collisions += 1;
                        }
                    }
                    Err(Rejection::NotClothing) => entry.not_clothing += 1,
                    Err(Rejection::MissingImage | Rejection::InvalidRecord) => entry.invalid += 1,
                }
            }

            tracing::debug!(
                source = %entry.source,
                fetched = entry.fetched,
                kept = entry.kept,
                not_clothing = entry.not_clothing,
                invalid = entry.invalid,
                "normalized source"
            );
            report.sources.push(entry);
        }

        tracing::info!(
            products = products.len(),
            failed = ?report.failed_sources(),
            "catalog fetch complete"
        );

        CatalogSnapshot { products, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ProductCategory, SourceStatus};
    use crate::utils::error::CatalogError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockSource {
        name: &'static str,
        id_offset: u64,
        records: Option<Vec<SourceRecord>>,
        delay_ms: u64,
        calls: Arc<AtomicUsize>,
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    impl MockSource {
        fn ok(name: &'static str, id_offset: u64, records: Vec<SourceRecord>) -> Self {
            Self {
                name,
                id_offset,
                records: Some(records),
                delay_ms: 0,
                calls: Arc::new(AtomicUsize::new(0)),
                in_flight: Arc::new(AtomicUsize::new(0)),
                peak: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(name: &'static str, id_offset: u64) -> Self {
            Self {
                records: None,
                ..Self::ok(name, id_offset, vec![])
            }
        }

        fn delayed(mut self, delay_ms: u64) -> Self {
            self.delay_ms = delay_ms;
            self
        }

        // Sources sharing these counters record how many fetches overlapped.
        fn tracked(mut self, in_flight: &Arc<AtomicUsize>, peak: &Arc<AtomicUsize>) -> Self {
            self.in_flight = in_flight.clone();
            self.peak = peak.clone();
            self
        }
    }

    #[async_trait]
    impl CatalogSource for MockSource {
        fn name(&self) -> &str {
            self.name
        }

        fn id_offset(&self) -> u64 {
            self.id_offset
        }

        async fn fetch_records(&self) -> Result<Vec<SourceRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(running, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.records
                .clone()
                .ok_or_else(|| CatalogError::UpstreamStatusError {
                    source_name: self.name.to_string(),
                    status: 503,
                })
        }
    }

    fn record(native_id: u64, title: &str) -> SourceRecord {
        SourceRecord {
            native_id: Some(native_id),
            title: title.to_string(),
            price: Some(25.0),
            image_url: Some(format!("https://cdn.example.com/{}.jpg", native_id)),
            clothing: true,
        }
    }

    #[tokio::test]
    async fn test_ids_are_offset_per_source() {
        let aggregator = CatalogAggregator::new(vec![
            Box::new(MockSource::ok(
                "A",
                0,
                vec![record(1, "Basic Tee"), record(2, "Denim Jeans")],
            )),
            Box::new(MockSource::ok("B", 1000, vec![record(1, "Bomber Jacket")])),
        ]);

        let products = aggregator.fetch_products().await;

        let ids: Vec<u64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 1001]);
        assert_eq!(products[1].category, ProductCategory::Bottoms);
        assert_eq!(products[2].category, ProductCategory::Outerwear);
        assert_eq!(products[2].source, "B");
    }

    #[tokio::test]
    async fn test_merge_order_ignores_completion_order() {
        let aggregator = CatalogAggregator::new(vec![
            Box::new(MockSource::ok("slow", 0, vec![record(5, "Slow Shirt")]).delayed(50)),
            Box::new(MockSource::ok("fast", 1000, vec![record(9, "Fast Shirt")])),
        ]);

        let names: Vec<String> = aggregator
            .fetch_products()
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Slow Shirt", "Fast Shirt"]);
    }

    #[tokio::test]
    async fn test_sources_are_fetched_concurrently() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let aggregator = CatalogAggregator::new(vec![
            Box::new(
                MockSource::ok("A", 0, vec![record(1, "Tee")])
                    .delayed(20)
                    .tracked(&in_flight, &peak),
            ),
            Box::new(
                MockSource::ok("B", 1000, vec![record(1, "Tee")])
                    .delayed(20)
                    .tracked(&in_flight, &peak),
            ),
        ]);

        let products = aggregator.fetch_products().await;
        assert_eq!(products.len(), 2);
        assert_eq!(peak.load(Ordering::SeqCst), 2);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_source_contributes_nothing() {
        let aggregator = CatalogAggregator::new(vec![
            Box::new(MockSource::failing("A", 0)),
            Box::new(MockSource::ok(
                "B",
                1000,
                vec![record(3, "Hoodie"), record(1, "Skirt"), record(2, "Vest")],
            )),
        ]);

        let snapshot = aggregator.fetch_with_report().await;

        let ids: Vec<u64> = snapshot.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1003, 1001, 1002]);
        assert_eq!(snapshot.report.failed_sources(), vec!["A"]);
        assert!(matches!(
            snapshot.report.sources[0].status,
            SourceStatus::Failed { .. }
        ));
        assert_eq!(snapshot.report.sources[1].kept, 3);
    }

    #[tokio::test]
    async fn test_all_sources_failing_yields_empty_list() {
        let aggregator = CatalogAggregator::new(vec![
            Box::new(MockSource::failing("A", 0)),
            Box::new(MockSource::failing("B", 1000)),
        ]);

        let snapshot = aggregator.fetch_with_report().await;
        assert!(snapshot.products.is_empty());
        assert!(snapshot.report.all_failed());
    }

    #[tokio::test]
    async fn test_no_sources_yields_empty_list() {
        let aggregator = CatalogAggregator::new(vec![]);
        assert!(aggregator.fetch_products().await.is_empty());
    }

    #[tokio::test]
    async fn test_rejections_are_counted() {
        let mut laptop = record(1, "Gaming Laptop");
        laptop.clothing = false;
        let mut no_image = record(2, "Tee");
        no_image.image_url = Some(String::new());

        let aggregator = CatalogAggregator::new(vec![Box::new(MockSource::ok(
            "A",
            0,
            vec![laptop, no_image, record(3, "Polo Shirt")],
        ))]);

        let snapshot = aggregator.fetch_with_report().await;
        assert_eq!(snapshot.products.len(), 1);

        let entry = &snapshot.report.sources[0];
        assert_eq!(entry.fetched, 3);
        assert_eq!(entry.not_clothing, 1);
        assert_eq!(entry.invalid, 1);
        assert_eq!(entry.kept, 1);
    }

    #[tokio::test]
    async fn test_colliding_ids_are_dropped() {
        let aggregator = CatalogAggregator::new(vec![
            Box::new(MockSource::ok("A", 0, vec![record(1001, "Oversized Tee")])),
            Box::new(MockSource::ok("B", 1000, vec![record(1, "Tee")])),
        ]);

        let snapshot = aggregator.fetch_with_report().await;
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.products[0].source, "A");
        assert_eq!(snapshot.report.id_collisions, 1);
    }

    #[tokio::test]
    async fn test_repeated_fetches_are_identical() {
        let source = MockSource::ok("A", 0, vec![record(1, "Tee"), record(2, "Coat")]);
        let calls = source.calls.clone();
        let aggregator = CatalogAggregator::new(vec![Box::new(source)]);

        let first = aggregator.fetch_products().await;
        let second = aggregator.fetch_products().await;
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_from_config_uses_configured_sources() {
        let aggregator = CatalogAggregator::from_config(&AggregatorConfig::default()).unwrap();
        assert_eq!(aggregator.source_names(), vec!["Platzi", "FakeStore"]);
    }
}
