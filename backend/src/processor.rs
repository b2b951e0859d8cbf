use shared::models::{TallySnapshot, VoteRequest};
use shared::{tally, validate_vote_request};
use tracing::warn;

use crate::broadcast::Hub;
use crate::error::ApiError;
use crate::routes::{AppState, SharedCatalog};
use crate::store::Ledger;
use crate::utils::{now_ms, read_catalog};

pub struct VoteProcessor;

impl VoteProcessor {
    /// Validates and records a vote, then pushes fresh results to live
    /// viewers from a detached task. The voter's response never waits on the
    /// broadcast and never fails because of it.
    pub async fn submit_vote(state: &AppState, request: &VoteRequest) -> Result<(), ApiError> {
        {
            let catalog = read_catalog(&state.catalog);
            validate_vote_request(request, &catalog)?;
        }

        state
            .ledger
            .upsert(&request.voter_token, &request.photo_id, now_ms())
            .await?;

        Self::broadcast_in_background(
            state.ledger.clone(),
            state.catalog.clone(),
            state.hub.clone(),
        );

        Ok(())
    }

    pub async fn current_snapshot(state: &AppState) -> Result<TallySnapshot, ApiError> {
        Ok(Self::snapshot(&state.ledger, &state.catalog).await?)
    }

    async fn snapshot(
        ledger: &Ledger,
        catalog: &SharedCatalog,
    ) -> Result<TallySnapshot, sqlx::Error> {
        let counts = ledger.counts_by_photo().await?;
        let total = ledger.total_count().await?;

        let catalog = read_catalog(catalog);
        Ok(tally::compute(&catalog, &counts, total, now_ms()))
    }

    fn broadcast_in_background(ledger: Ledger, catalog: SharedCatalog, hub: Hub) {
        tokio::spawn(async move {
            match Self::snapshot(&ledger, &catalog).await {
                Ok(snapshot) => hub.publish(&snapshot),
                Err(e) => warn!("Skipping results broadcast, tally failed: {e}"),
            }
        });
    }
}
