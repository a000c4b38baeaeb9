use std::{fs, io::ErrorKind, path::Path};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::AggregatorError;
use crate::types::{EmotionTagEntry, SocialTagEntry, SongTags};

/// Reads a whole source file and decodes it as a JSON array of `T`
fn read_records<T>(path: &Path) -> Result<Vec<T>, AggregatorError>
where
    T: DeserializeOwned
{
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AggregatorError::not_found(path, "no such file"),
        _ => AggregatorError::not_found(path, e)
    })?;

    let records: Vec<T> = serde_json::from_slice(&bytes)
        .map_err(|e| AggregatorError::malformed(path, e))?;

    debug!(path = %path.display(), bytes = bytes.len(), records = records.len(),
        "source.read");
    Ok(records)
}

pub fn load_emotion_tags(path: &Path) -> Result<Vec<SongTags>, AggregatorError> {
    let records: Vec<EmotionTagEntry> = read_records(path)?;
    Ok(records.into_iter().map(SongTags::from).collect())
}

pub fn load_social_tags(path: &Path) -> Result<Vec<SongTags>, AggregatorError> {
    let records: Vec<SocialTagEntry> = read_records(path)?;
    Ok(records.into_iter().map(SongTags::from).collect())
}
