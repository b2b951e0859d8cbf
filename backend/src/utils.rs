use std::sync::{PoisonError, RwLockReadGuard};

use shared::Catalog;
use time::OffsetDateTime;

use crate::routes::SharedCatalog;

/// Milliseconds since the Unix epoch, the timestamp unit used on the wire
/// and in the ledger.
pub fn now_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Read access to the live catalog. A poisoned lock still yields the
/// catalog: it is only ever replaced wholesale, never left half-written.
pub fn read_catalog(catalog: &SharedCatalog) -> RwLockReadGuard<'_, Catalog> {
    catalog.read().unwrap_or_else(PoisonError::into_inner)
}
