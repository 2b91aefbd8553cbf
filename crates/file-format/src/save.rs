use std::path::Path;

use tracing::info;

use floor_engine::Building;

use crate::errors::SaveError;
use crate::records::FloorRecord;

/// Serialize every floor of a building to a pretty-printed JSON list.
pub fn save_project(building: &Building) -> Result<String, SaveError> {
    let records: Vec<FloorRecord> = building.floors.iter().map(FloorRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(|e| SaveError::Serialize(e.to_string()))
}

/// Save a building to `path`, replacing any existing file.
pub fn save_project_file(building: &Building, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let json = save_project(building)?;
    std::fs::write(path, json).map_err(|e| SaveError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), floors = building.floors.len(), "project saved");
    Ok(())
}
