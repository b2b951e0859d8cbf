use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::Photo;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog file is not a valid photo list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Photo at index {0} is missing a non-empty `{1}`")]
    MissingField(usize, &'static str),
    #[error("Duplicate photo id: {0}")]
    DuplicateId(String),
}

/// The validated, immutable photo gallery. Every id is unique and non-empty,
/// so it can serve as a stable key for votes.
#[derive(Debug, Clone)]
pub struct Catalog {
    photos: Vec<Photo>,
    ids: HashSet<String>,
}

impl Catalog {
    pub fn from_photos(photos: Vec<Photo>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::with_capacity(photos.len());

        for (index, photo) in photos.iter().enumerate() {
            if photo.id.is_empty() {
                return Err(CatalogError::MissingField(index, "id"));
            }
            if photo.src.is_empty() {
                return Err(CatalogError::MissingField(index, "src"));
            }
            if !ids.insert(photo.id.clone()) {
                return Err(CatalogError::DuplicateId(photo.id.clone()));
            }
        }

        Ok(Self { photos, ids })
    }

    /// Reads and validates a JSON array of photos. Any violation leaves the
    /// caller's current catalog untouched.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        let photos: Vec<Photo> = serde_json::from_str(&raw)?;
        Self::from_photos(photos)
    }

    pub fn contains(&self, photo_id: &str) -> bool {
        self.ids.contains(photo_id)
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}
