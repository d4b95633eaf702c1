use crate::dao::LinkStore;
use crate::error::RegistryError;
use crate::model::{LinkRecord, Links, Listing, SortOrder};
use crate::utils::now_millis;
use std::sync::Arc;

pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Link operations over a [`LinkStore`]. Each operation loads the full
/// snapshot, applies one change and writes it back.
#[derive(Clone)]
pub struct LinkRegistry {
    store: LinkStore,
    clock: Clock,
}

impl LinkRegistry {
    pub fn new(store: LinkStore) -> Self {
        Self::with_clock(store, Arc::new(now_millis))
    }

    pub fn with_clock(store: LinkStore, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &LinkStore {
        &self.store
    }

    pub async fn create(&self, slug: &str, url: &str) -> Result<LinkRecord, RegistryError> {
        let mut links = self.store.load().await?;
        if links.contains_key(slug) {
            tracing::warn!("Refusing to create existing slug {}", slug);
            return Err(RegistryError::AlreadyExists(slug.to_string()));
        }
        let record = LinkRecord::new(url.to_string(), (self.clock)());
        links.insert(slug.to_string(), record.clone());
        self.store.save(&links).await?;
        tracing::info!("Created {} -> {}", slug, url);
        Ok(record)
    }

    pub async fn update(&self, slug: &str, url: &str) -> Result<LinkRecord, RegistryError> {
        let mut links = self.store.load().await?;
        let now = (self.clock)();
        let record = links
            .get_mut(slug)
            .ok_or_else(|| RegistryError::NotFound(slug.to_string()))?;
        record.url = url.to_string();
        record.updated_at = now.max(record.created_at);
        let record = record.clone();
        self.store.save(&links).await?;
        tracing::info!("Updated {} -> {}", slug, url);
        Ok(record)
    }

    pub async fn delete(&self, slug: &str) -> Result<(), RegistryError> {
        let mut links = self.store.load().await?;
        if links.remove(slug).is_none() {
            return Err(RegistryError::NotFound(slug.to_string()));
        }
        self.store.save(&links).await?;
        tracing::info!("Deleted {}", slug);
        Ok(())
    }

    /// Counts one visit and returns the destination to redirect to.
    pub async fn record_hit(&self, slug: &str) -> Result<String, RegistryError> {
        let mut links = self.store.load().await?;
        let now = (self.clock)();
        let record = links
            .get_mut(slug)
            .ok_or_else(|| RegistryError::NotFound(slug.to_string()))?;
        record.hits += 1;
        record.last_access = Some(now.max(record.created_at));
        let (url, hits) = (record.url.clone(), record.hits);
        self.store.save(&links).await?;
        tracing::debug!("Hit #{} on {} -> {}", hits, slug, url);
        Ok(url)
    }

    pub async fn list(&self, order: SortOrder) -> Result<Listing, RegistryError> {
        Ok(order_links(self.store.load().await?, order))
    }
}

/// Ties on hits or last access are broken by slug ascending. Links that were
/// never visited sort after every visited one.
pub fn order_links(links: Links, order: SortOrder) -> Listing {
    let total_hits = links.values().map(|record| record.hits).sum();
    let mut entries: Vec<(String, LinkRecord)> = links.into_iter().collect();
    match order {
        SortOrder::Slug => entries.sort_by(|(a, _), (b, _)| a.cmp(b)),
        SortOrder::Hits => entries.sort_by(|(slug_a, a), (slug_b, b)| {
            b.hits.cmp(&a.hits).then_with(|| slug_a.cmp(slug_b))
        }),
        SortOrder::LastAccess => entries.sort_by(|(slug_a, a), (slug_b, b)| {
            b.last_access
                .cmp(&a.last_access)
                .then_with(|| slug_a.cmp(slug_b))
        }),
    }
    Listing {
        entries,
        total_hits,
    }
}
