//! JSON serialization of roadmaps.

use std::path::Path;

use log::debug;

use super::models::Roadmap;
use crate::error_handling::RoadmapError;

/// Serializes a roadmap as indented JSON.
pub fn to_json(roadmap: &Roadmap) -> Result<String, RoadmapError> {
    Ok(serde_json::to_string_pretty(roadmap)?)
}

pub fn from_json(json: &str) -> Result<Roadmap, RoadmapError> {
    Ok(serde_json::from_str(json)?)
}

pub async fn save_to_file(roadmap: &Roadmap, path: &Path) -> Result<(), RoadmapError> {
    let json = to_json(roadmap)?;
    tokio::fs::write(path, json).await?;
    debug!("Wrote roadmap JSON to {}", path.display());
    Ok(())
}

pub async fn load_from_file(path: &Path) -> Result<Roadmap, RoadmapError> {
    let json = tokio::fs::read_to_string(path).await?;
    from_json(&json)
}
