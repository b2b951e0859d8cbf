use serde::{Deserialize, Serialize};

/// A gallery entry as supplied by the catalog file. `title` and `alt` are
/// cosmetic and may be absent; `id` and `src` are required and checked at
/// catalog construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// A vote submission. Absent fields deserialize as empty strings so they
/// reach admission validation and come back as a rejection, not a
/// framework-level parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub photo_id: String,
    #[serde(default)]
    pub voter_token: String,
}

/// One catalog photo with its current vote count attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoTally {
    #[serde(flatten)]
    pub photo: Photo,
    pub votes: i64,
}

/// Point-in-time aggregate derived from the ledger and the catalog.
/// Never persisted; recomputed on every read and after every vote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TallySnapshot {
    pub total_votes: i64,
    pub photos: Vec<PhotoTally>,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoList {
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteAccepted {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReloadOutcome {
    pub ok: bool,
    pub photos: usize,
}
