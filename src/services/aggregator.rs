use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    error::{FetchError, FetchErrorKind},
    models::park::{Category, ParkDetail},
    services::nps::ParkDataSource,
};

/// Fans a park lookup out to every configured category and merges the
/// settled results. One failing category never affects the others.
#[derive(Clone)]
pub struct Aggregator {
    source: Arc<dyn ParkDataSource>,
    categories: Arc<[Category]>,
}

impl Aggregator {
    /// Duplicates in `categories` are fetched once.
    pub fn new(source: Arc<dyn ParkDataSource>, categories: &[Category]) -> Self {
        let mut categories = categories.to_vec();
        categories.sort_unstable();
        categories.dedup();
        Self {
            source,
            categories: categories.into(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[tracing::instrument(skip(self))]
    pub async fn aggregate(&self, park_code: &str) -> ParkDetail {
        let tasks = self.categories.iter().map(|&category| {
            let source = Arc::clone(&self.source);
            let park_code = park_code.to_string();
            let handle =
                tokio::spawn(async move { source.fetch_category(category, &park_code).await });
            async move { (category, handle.await) }
        });

        let mut detail = ParkDetail::default();
        for (category, joined) in join_all(tasks).await {
            let result = joined.unwrap_or_else(|err| {
                Err(FetchError::new(
                    category.path(),
                    FetchErrorKind::Aborted(err.to_string()),
                ))
            });
            if let Err(err) = &result {
                warn!(%category, park_code, reason = %err.kind, "category unavailable");
            }
            detail.insert(category, result);
        }

        debug!(
            available = detail.len() - detail.unavailable().count(),
            total = detail.len(),
            "park detail merged"
        );
        detail
    }
}
