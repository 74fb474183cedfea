//! Failure containment.
//!
//! A failed listing, page or source turns into a logged skip so the rest of
//! the run continues. End of data is not routed through here.

use std::fmt;
use std::future::Future;

/// Granularity at which a failure is contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Listing,
    Page,
    Source,
}

impl Boundary {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Page => "page",
            Self::Source => "source",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Awaits `work`; an error is logged at `warn` with the boundary and
/// `label`, and becomes `None`.
pub async fn contain<T, E, Fut>(boundary: Boundary, label: &str, work: Fut) -> Option<T>
where
    E: fmt::Display,
    Fut: Future<Output = Result<T, E>>,
{
    match work.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                boundary = %boundary,
                subject = label,
                error = %e,
                "skipping {boundary} after failure"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScraperError;

    #[tokio::test]
    async fn ok_passes_through() {
        let value = contain(Boundary::Listing, "https://a/1", async {
            Ok::<_, ScraperError>(3)
        })
        .await;
        assert_eq!(value, Some(3));
    }

    #[tokio::test]
    async fn error_becomes_none() {
        let value: Option<u32> = contain(Boundary::Page, "page 4", async {
            Err(ScraperError::NotFound {
                url: "https://a/4".to_owned(),
            })
        })
        .await;
        assert!(value.is_none());
    }

    #[test]
    fn boundary_display() {
        assert_eq!(Boundary::Listing.to_string(), "listing");
        assert_eq!(Boundary::Page.to_string(), "page");
        assert_eq!(Boundary::Source.to_string(), "source");
    }
}
