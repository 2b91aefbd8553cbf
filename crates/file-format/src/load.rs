use std::path::Path;

use tracing::{info, instrument, warn};

use floor_engine::Floor;
use plan_types::PlanConfig;

use crate::errors::LoadError;
use crate::records::FloorRecord;

/// Deserialize a project from a JSON string.
///
/// All-or-nothing: either every floor parses and the full list is returned,
/// or an error is. Rejects empty projects and projects holding more than
/// one plenum. Plenum areas and missing opening thicknesses follow `config`.
#[instrument(skip(json, config), fields(bytes = json.len()))]
pub fn load_project(json: &str, config: &PlanConfig) -> Result<Vec<Floor>, LoadError> {
    let records: Vec<FloorRecord> =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if records.is_empty() {
        return Err(LoadError::EmptyProject);
    }

    let plenums: usize = records.iter().map(|r| r.plenums.len()).sum();
    if plenums > 1 {
        warn!(plenums, "project refused: more than one plenum");
        return Err(LoadError::MultiplePlenums { count: plenums });
    }

    let floors: Vec<Floor> = records.into_iter().map(|r| r.into_floor(config)).collect();
    info!(floors = floors.len(), "project parsed");
    Ok(floors)
}

/// Read and parse a project file.
pub fn load_project_file(
    path: impl AsRef<Path>,
    config: &PlanConfig,
) -> Result<Vec<Floor>, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    load_project(&json, config)
}
