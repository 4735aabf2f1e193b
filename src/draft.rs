//! JSON draft files
//!
//! A draft mirrors the [`Itinerary`] field for field. Loading is
//! all-or-nothing: a draft that fails to parse never touches the model it
//! was meant to replace.

use std::fs;
use std::path::Path;
use tracing::debug;
use crate::error::{Error, Result};
use crate::model::Itinerary;

/// Serialize an itinerary as pretty-printed JSON
pub fn to_json(itinerary: &Itinerary) -> Result<String> {
    Ok(serde_json::to_string_pretty(itinerary)?)
}

/// Parse a draft and normalize its sequence numbers
pub fn from_json(json: &str) -> Result<Itinerary> {
    let mut itinerary: Itinerary = serde_json::from_str(json)?;
    itinerary.normalize();
    Ok(itinerary)
}

/// Write a draft file
pub fn save_draft(itinerary: &Itinerary, path: &Path) -> Result<()> {
    let json = to_json(itinerary)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "draft saved");
    Ok(())
}

/// Read a draft file
pub fn load_draft(path: &Path) -> Result<Itinerary> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    let itinerary = from_json(&json)?;
    debug!(path = %path.display(), days = itinerary.days.len(), "draft loaded");
    Ok(itinerary)
}

/// Replace `target` with the draft at `path`, leaving it untouched on error
pub fn load_draft_into(target: &mut Itinerary, path: &Path) -> Result<()> {
    *target = load_draft(path)?;
    Ok(())
}
