use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::models::{PhotoTally, TallySnapshot};

/// Builds a snapshot from grouped ledger counts. Runs in time proportional
/// to the catalog size plus the number of distinct voted photos.
///
/// `total_votes` is the full ledger row count. After a catalog reload it may
/// exceed the sum of the per-photo counts: votes referencing ids that left
/// the catalog stay in the total but appear under no photo.
pub fn compute(
    catalog: &Catalog,
    counts: &HashMap<String, i64>,
    total_votes: i64,
    updated_at: i64,
) -> TallySnapshot {
    let photos = catalog
        .photos()
        .iter()
        .map(|photo| PhotoTally {
            photo: photo.clone(),
            votes: counts.get(&photo.id).copied().unwrap_or(0),
        })
        .collect();

    TallySnapshot {
        total_votes,
        photos,
        updated_at,
    }
}
