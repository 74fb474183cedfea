//! Runs every configured source in turn and merges their listings.

use carprice_core::Listing;

use crate::adapter::{ListingSource, SourceStats};
use crate::client::Fetch;
use crate::isolation::{contain, Boundary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Completed {
        stats: SourceStats,
        /// Listings kept after dropping those without a horse-power value.
        kept: usize,
        dropped: usize,
    },
    /// The source could not be crawled; the cause has been logged.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,
    pub outcome: SourceOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harvest {
    pub listings: Vec<Listing>,
    pub reports: Vec<SourceReport>,
}

impl Harvest {
    #[must_use]
    pub fn failed_sources(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome == SourceOutcome::Failed)
            .count()
    }
}

/// Crawls `sources` one after another with a shared fetcher.
///
/// A source that fails contributes nothing and does not stop the run.
/// Listings whose horse power could not be read (`0`) are dropped.
pub async fn run_sources<S, F>(sources: &[S], fetcher: &F) -> Harvest
where
    S: ListingSource,
    F: Fetch,
{
    let mut harvest = Harvest::default();

    for source in sources {
        let name = source.name();
        tracing::info!(source = name, "crawling source");

        let outcome = match contain(Boundary::Source, name, source.gather(fetcher)).await {
            Some(gathered) => {
                let before = gathered.listings.len();
                let kept: Vec<Listing> = gathered
                    .listings
                    .into_iter()
                    .filter(Listing::has_horse_power)
                    .collect();
                let outcome = SourceOutcome::Completed {
                    stats: gathered.stats,
                    kept: kept.len(),
                    dropped: before - kept.len(),
                };
                harvest.listings.extend(kept);
                outcome
            }
            None => SourceOutcome::Failed,
        };

        harvest.reports.push(SourceReport {
            source: name.to_owned(),
            outcome,
        });
    }

    harvest
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
