pub mod building;
pub mod onion;
pub mod placement;
pub mod splice;
pub mod types;
pub mod ventilation;

use tracing::info;

use plan_types::{EntityKind, PlanConfig, Point};

pub use onion::{onion_skin, onion_skin_for, OnionItem, OnionSkin};
pub use placement::{
    AttributeRequest, PendingEntity, Placement, PlacementState, PlenumAttributes, PointerOutcome,
    Preview, Tool, VentAttributes,
};
pub use splice::{splice_opening, SpliceResult};
pub use types::{Building, Floor, PlanError, DEFAULT_FLOOR_HEIGHT};
pub use ventilation::{ventilation_summary, Pressure, VentilationSummary};

/// The floor-plan editing engine.
///
/// Owns the building, the placement state machine and the numeric policy.
/// Every structural floor change drops any drawing in progress, so a
/// pending entity never outlives the floor it was started on.
pub struct Engine {
    pub building: Building,
    pub placement: Placement,
    pub config: PlanConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(PlanConfig::default())
    }

    pub fn with_config(config: PlanConfig) -> Self {
        Self {
            building: Building::new(),
            placement: Placement::new(),
            config,
        }
    }

    /// Select a floor.
    pub fn select_floor(&mut self, index: usize) -> Result<&Floor, PlanError> {
        self.building.floor(index)?;
        self.cancel_placement();
        self.building.select_floor(index)
    }

    /// Add a floor above the selection. Returns its index.
    pub fn new_floor(&mut self) -> usize {
        self.cancel_placement();
        self.building.new_floor()
    }

    /// Copy a floor right above itself. Returns the copy's index.
    pub fn duplicate_floor(&mut self, source: usize) -> Result<usize, PlanError> {
        self.building.floor(source)?;
        self.cancel_placement();
        self.building.duplicate_floor(source)
    }

    /// Delete a floor. Refused for the last remaining floor.
    pub fn delete_floor(&mut self, index: usize) -> Result<Floor, PlanError> {
        self.building.floor(index)?;
        if self.building.floors.len() <= 1 {
            return Err(PlanError::LastFloor);
        }
        self.cancel_placement();
        self.building.delete_floor(index)
    }

    pub fn rename_floor(&mut self, index: usize, new_name: &str) -> Result<(), PlanError> {
        self.building.rename_floor(index, new_name)
    }

    pub fn set_floor_height(&mut self, index: usize, height: f64) -> Result<(), PlanError> {
        self.building.set_floor_height(index, height)
    }

    /// Eraser on the selected floor. Returns the floor index and how many
    /// entities went away.
    pub fn delete_entity(
        &mut self,
        kind: EntityKind,
        start: Point,
        end: Point,
    ) -> Result<(usize, usize), PlanError> {
        let floor_index = self.building.require_selection()?;
        let removed = self.building.delete_entity(
            floor_index,
            kind,
            start,
            end,
            self.config.vent_pick_radius,
        )?;
        Ok((floor_index, removed))
    }

    /// Swap in an imported floor list in one step.
    pub fn replace_floors(&mut self, floors: Vec<Floor>) -> Result<(), PlanError> {
        let building = Building::from_floors(floors)?;
        self.cancel_placement();
        self.placement = Placement {
            vent_function: self.placement.vent_function,
            ..Placement::new()
        };
        self.building = building;
        info!(floors = self.building.floors.len(), "project loaded");
        Ok(())
    }

    /// Back to a single empty floor with no tool engaged.
    pub fn reset(&mut self) {
        self.placement = Placement::new();
        self.building.reset();
    }

    /// Onion skin for the current selection.
    pub fn onion_skin(&self) -> OnionSkin {
        onion_skin(&self.building, self.config.onion_opacity)
    }

    /// Onion skin drawn under `floor_index`.
    pub fn onion_skin_for(&self, floor_index: usize) -> OnionSkin {
        onion_skin_for(&self.building, floor_index, self.config.onion_opacity)
    }

    pub fn ventilation_summary(&self) -> VentilationSummary {
        ventilation_summary(&self.building)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
