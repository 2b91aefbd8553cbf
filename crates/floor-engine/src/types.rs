use serde::{Deserialize, Serialize};
use uuid::Uuid;

use plan_types::{Entity, Opening, Plenum, Vent, Wall};

/// Height given to floors that were never edited, in meters.
pub const DEFAULT_FLOOR_HEIGHT: f64 = 2.5;

/// One storey of the building and everything drawn on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub name: String,
    /// Storey height in meters.
    pub height: f64,
    pub walls: Vec<Wall>,
    pub windows: Vec<Opening>,
    pub doors: Vec<Opening>,
    pub vents: Vec<Vent>,
    pub plenum: Option<Plenum>,
}

impl Floor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            height: DEFAULT_FLOOR_HEIGHT,
            walls: Vec::new(),
            windows: Vec::new(),
            doors: Vec::new(),
            vents: Vec::new(),
            plenum: None,
        }
    }

    /// All entities, ordered walls, windows, doors, vents, then the plenum.
    pub fn entities(&self) -> Vec<Entity> {
        self.walls
            .iter()
            .cloned()
            .map(Entity::Wall)
            .chain(self.windows.iter().cloned().map(Entity::Window))
            .chain(self.doors.iter().cloned().map(Entity::Door))
            .chain(self.vents.iter().cloned().map(Entity::Vent))
            .chain(self.plenum.iter().cloned().map(Entity::Plenum))
            .collect()
    }

    pub fn entity_count(&self) -> usize {
        self.walls.len()
            + self.windows.len()
            + self.doors.len()
            + self.vents.len()
            + usize::from(self.plenum.is_some())
    }

    /// Append an entity to the matching list. A plenum replaces any existing one.
    pub fn push(&mut self, entity: Entity) {
        match entity {
            Entity::Wall(w) => self.walls.push(w),
            Entity::Window(o) => self.windows.push(o),
            Entity::Door(o) => self.doors.push(o),
            Entity::Vent(v) => self.vents.push(v),
            Entity::Plenum(p) => self.plenum = Some(p),
        }
    }
}

/// The whole plan: an ordered stack of floors and the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Floors from the bottom (index 0) up.
    pub floors: Vec<Floor>,
    /// Always a valid index into `floors` when set.
    pub selected_floor_index: Option<usize>,
    /// Provisional plenum lock held while a plenum is being drawn.
    #[serde(skip)]
    pub plenum_reservation: Option<Uuid>,
}

/// Errors from plan editing.
///
/// The `Display` text doubles as the alert message shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("Vous devez créer un étage avant d'utiliser les outils.")]
    NoFloorSelected,

    #[error("floor index {index} out of range (building has {count} floors)")]
    FloorNotFound { index: usize, count: usize },

    #[error("Vous ne pouvez pas supprimer le dernier étage.")]
    LastFloor,

    #[error("L'étage doit avoir un nom")]
    EmptyFloorName,

    #[error("Un plénum existe déjà dans le bâtiment.")]
    PlenumAlreadyExists,

    #[error("Veuillez d'abord choisir un type de ventilation.")]
    VentFunctionNotChosen,

    #[error("{field}: {reason}")]
    InvalidAttribute { field: &'static str, reason: String },

    #[error("no pending placement with id {id}")]
    NoPendingPlacement { id: Uuid },

    #[error("the project contains no floor")]
    EmptyProject,
}

impl PlanError {
    /// Short title for the user-facing alert.
    pub fn title(&self) -> &'static str {
        match self {
            PlanError::NoFloorSelected => "Aucun étage disponible",
            PlanError::FloorNotFound { .. } => "Étage introuvable",
            PlanError::LastFloor => "Impossible de supprimer l'étage",
            PlanError::EmptyFloorName => "Nom d'étage vide",
            PlanError::PlenumAlreadyExists => "Plénum déjà présent",
            PlanError::VentFunctionNotChosen => "Type de ventilation non sélectionné",
            PlanError::InvalidAttribute { .. } => "Entrée invalide",
            PlanError::NoPendingPlacement { .. } => "Placement introuvable",
            PlanError::EmptyProject => "Projet vide",
        }
    }
}
