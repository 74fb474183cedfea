use std::future::Future;

use carprice_core::Listing;

use super::*;
use crate::adapter::SourceHarvest;
use crate::error::ScraperError;

struct NoNetwork;

impl Fetch for NoNetwork {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send {
        let url = url.to_owned();
        async move { Err(ScraperError::NotFound { url }) }
    }
}

/// A source that yields listings with the given horse-power values, or
/// fails outright when `horse_powers` is `None`.
struct StubSource {
    name: &'static str,
    horse_powers: Option<Vec<u32>>,
}

impl ListingSource for StubSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn gather<F: Fetch>(&self, _fetcher: &F) -> Result<SourceHarvest, ScraperError> {
        let Some(horse_powers) = &self.horse_powers else {
            return Err(ScraperError::UnexpectedStatus {
                status: 503,
                url: format!("https://{}/", self.name),
            });
        };
        let listings: Vec<Listing> = horse_powers.iter().map(|hp| listing(self.name, *hp)).collect();
        Ok(SourceHarvest {
            stats: SourceStats {
                pages_visited: 1,
                listings_seen: u32::try_from(listings.len()).unwrap(),
                ..SourceStats::default()
            },
            listings,
        })
    }
}

fn listing(make: &str, horse_power: u32) -> Listing {
    Listing {
        make: make.to_owned(),
        model: String::new(),
        fuel_type: "Бензинов".to_owned(),
        gear_type: "Ръчна".to_owned(),
        horse_power,
        range: 100_000,
        year: "2004".to_owned(),
        price: 5_000,
    }
}

#[tokio::test]
async fn drops_listings_without_horse_power() {
    let sources = [StubSource {
        name: "a",
        horse_powers: Some(vec![0, 5, 15]),
    }];
    let harvest = run_sources(&sources, &NoNetwork).await;

    let kept: Vec<u32> = harvest.listings.iter().map(|l| l.horse_power).collect();
    assert_eq!(kept, vec![5, 15]);
    assert!(matches!(
        harvest.reports[0].outcome,
        SourceOutcome::Completed {
            kept: 2,
            dropped: 1,
            ..
        }
    ));
}

#[tokio::test]
async fn failing_source_does_not_stop_the_next() {
    let sources = [
        StubSource {
            name: "down",
            horse_powers: None,
        },
        StubSource {
            name: "up",
            horse_powers: Some(vec![90]),
        },
    ];
    let harvest = run_sources(&sources, &NoNetwork).await;

    assert_eq!(harvest.listings.len(), 1);
    assert_eq!(harvest.listings[0].make, "up");
    assert_eq!(harvest.reports.len(), 2);
    assert_eq!(harvest.reports[0].source, "down");
    assert_eq!(harvest.reports[0].outcome, SourceOutcome::Failed);
    assert_eq!(harvest.failed_sources(), 1);
}

#[tokio::test]
async fn listings_keep_source_order() {
    let sources = [
        StubSource {
            name: "first",
            horse_powers: Some(vec![100, 110]),
        },
        StubSource {
            name: "second",
            horse_powers: Some(vec![120]),
        },
    ];
    let harvest = run_sources(&sources, &NoNetwork).await;

    let makes: Vec<&str> = harvest.listings.iter().map(|l| l.make.as_str()).collect();
    assert_eq!(makes, vec!["first", "first", "second"]);
    assert_eq!(harvest.failed_sources(), 0);
}

#[tokio::test]
async fn no_sources_no_listings() {
    let harvest = run_sources::<StubSource, _>(&[], &NoNetwork).await;
    assert_eq!(harvest, Harvest::default());
}
