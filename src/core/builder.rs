//! Graph builder - enriches seed artists from the catalog
//!
//! Every seed is resolved on its own. A failed lookup leaves that artist's
//! attributes unset and is reported; the remaining artists are still processed.
//! Rejected credentials are the exception: they fail every lookup, so the run
//! stops before anything is written.
//! Related artists are intersected with the seed names so the graph stays
//! closed over the input dataset.

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::catalog::CatalogClient;
use crate::config::UserConfig;
use crate::errors::{CatalogError, GraphError, GraphResult};
use crate::models::{CatalogArtist, SeedSet};
use crate::utils::progress::Progress;

/// Outcome of an enrichment run
#[derive(Debug, Default)]
pub struct EnrichmentReport {
    /// Artists whose catalog entity was found
    pub resolved: usize,
    /// One `ArtistResolution` error per failed lookup
    pub failures: Vec<GraphError>,
}

impl EnrichmentReport {
    pub fn failed_artists(&self) -> Vec<&str> {
        self.failures.iter().filter_map(|f| f.artist_name()).collect()
    }
}

/// Catalog results for one seed, applied to the seed set afterwards
struct ArtistLookup {
    name: String,
    entity: Option<CatalogArtist>,
    related: Option<Vec<CatalogArtist>>,
    errors: Vec<CatalogError>,
}

/// Annotates seed artists with genres, followers and related seed artists
pub struct GraphBuilder<'a> {
    catalog: &'a dyn CatalogClient,
    concurrency: usize,
    show_progress: bool,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(catalog: &'a dyn CatalogClient) -> Self {
        Self {
            catalog,
            concurrency: 1,
            show_progress: false,
        }
    }

    pub fn from_config(catalog: &'a dyn CatalogClient, config: &UserConfig) -> Self {
        Self::new(catalog)
            .with_concurrency(config.effective_concurrency())
            .with_progress(config.show_progress)
    }

    /// Number of artists looked up at the same time
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// set whether to show progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Enrich every seed in place and report which lookups failed.
    /// Fails with `CatalogAccess` as soon as the catalog rejects the credentials.
    pub async fn enrich(&self, seeds: &mut SeedSet) -> GraphResult<EnrichmentReport> {
        // read-only for the whole run, shared by all in-flight lookups
        let seed_names = seeds.names();
        let order: Vec<String> = seeds.sorted_names().into_iter().map(String::from).collect();

        info!(
            "Enriching {} artists ({} at a time)",
            order.len(),
            self.concurrency
        );
        let progress = Progress::new(order.len(), self.show_progress);
        let mut report = EnrichmentReport::default();

        let mut lookups = stream::iter(order)
            .map(|name| self.lookup(name))
            .buffer_unordered(self.concurrency);

        while let Some(lookup) = lookups.next().await {
            progress.tick(&lookup.name);

            if let Some(source) = lookup.errors.iter().find(|e| e.is_fatal()) {
                progress.finish(format!("aborted at {}", lookup.name));
                return Err(GraphError::CatalogAccess {
                    name: lookup.name.clone(),
                    source: source.clone(),
                });
            }

            if let Some(record) = seeds.get_mut(&lookup.name) {
                if let Some(entity) = &lookup.entity {
                    record.apply_attributes(entity);
                    report.resolved += 1;
                }
                if let Some(related) = &lookup.related {
                    record.set_related(related.iter().map(|a| a.name.as_str()), &seed_names);
                    debug!(
                        "{}: {} related, {} within the dataset",
                        lookup.name,
                        related.len(),
                        record.related_artists.len()
                    );
                }
            }

            for source in lookup.errors {
                let failure = GraphError::ArtistResolution {
                    name: lookup.name.clone(),
                    source,
                };
                warn!("{}", failure);
                report.failures.push(failure);
            }
        }

        progress.finish(format!(
            "enriched {} of {} artists",
            report.resolved,
            seeds.len()
        ));
        info!(
            "Enrichment finished: {} resolved, {} failed lookups",
            report.resolved,
            report.failures.len()
        );

        Ok(report)
    }

    /// Query the catalog for one artist. Never fails; errors are collected.
    async fn lookup(&self, name: String) -> ArtistLookup {
        let mut lookup = ArtistLookup {
            name,
            entity: None,
            related: None,
            errors: Vec::new(),
        };

        let entity = match self.catalog.search_artist(&lookup.name).await {
            Ok(entity) => entity,
            Err(e) => {
                lookup.errors.push(e);
                return lookup;
            }
        };

        match self.catalog.related_artists(&entity.id).await {
            Ok(related) => lookup.related = Some(related),
            Err(e) => lookup.errors.push(e),
        }
        lookup.entity = Some(entity);

        lookup
    }
}
