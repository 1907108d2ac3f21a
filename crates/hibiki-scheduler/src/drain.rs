//! Paged schedule drain.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{Airing, EventSource, SchedulerError};

/// Result of draining one horizon.
#[derive(Debug, Default)]
pub struct DrainOutcome {
    /// Airings accumulated before any failure, in fetch order.
    pub airings: Vec<Airing>,
    /// Pages successfully fetched.
    pub pages: u32,
    /// The failure that stopped the drain early, if any.
    pub error: Option<SchedulerError>,
}

/// Drains every page of upcoming airings for one horizon.
pub struct PageDrainer<S> {
    source: Arc<S>,
}

impl<S: EventSource> PageDrainer<S> {
    /// Create a drainer over the given source.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetch pages until the source reports no further page or fails.
    ///
    /// Starts at page 1 and continues from the source's reported
    /// `current_page + 1`; the source owns pagination. A failure aborts the
    /// drain but keeps every page already accumulated; the error is logged
    /// here and carried in the outcome rather than propagated.
    pub async fn drain(&self, airing_before: i64) -> DrainOutcome {
        let mut outcome = DrainOutcome::default();
        let mut page = 1;

        loop {
            let fetched = match self.source.fetch_page(page, airing_before).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!(
                        page,
                        pages_drained = outcome.pages,
                        error = %e,
                        "schedule fetch failed, keeping pages drained so far"
                    );
                    outcome.error = Some(e.into());
                    return outcome;
                }
            };

            outcome.pages += 1;
            debug!(
                page = fetched.page_info.current_page,
                entries = fetched.airing_schedules.len(),
                "drained schedule page"
            );
            outcome
                .airings
                .extend(fetched.airing_schedules.into_iter().map(Airing::from));

            if !fetched.page_info.has_next_page {
                return outcome;
            }
            page = fetched.page_info.current_page + 1;
        }
    }
}
