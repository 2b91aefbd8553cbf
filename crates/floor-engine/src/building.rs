use tracing::{debug, info};
use uuid::Uuid;

use plan_types::{EntityKind, Point};

use crate::types::{Building, Floor, PlanError};

impl Building {
    /// A building with the single default floor "Étage 0", selected.
    pub fn new() -> Self {
        Self {
            floors: vec![Floor::new(default_floor_name(0))],
            selected_floor_index: Some(0),
            plenum_reservation: None,
        }
    }

    /// Build from an imported floor list. The bottom floor becomes the selection.
    pub fn from_floors(floors: Vec<Floor>) -> Result<Self, PlanError> {
        if floors.is_empty() {
            return Err(PlanError::EmptyProject);
        }
        Ok(Self {
            floors,
            selected_floor_index: Some(0),
            plenum_reservation: None,
        })
    }

    /// Discard everything and go back to a single default floor.
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("building reset");
    }

    pub fn floor(&self, index: usize) -> Result<&Floor, PlanError> {
        let count = self.floors.len();
        self.floors
            .get(index)
            .ok_or(PlanError::FloorNotFound { index, count })
    }

    pub fn floor_mut(&mut self, index: usize) -> Result<&mut Floor, PlanError> {
        let count = self.floors.len();
        self.floors
            .get_mut(index)
            .ok_or(PlanError::FloorNotFound { index, count })
    }

    /// Index of the selected floor, or `NoFloorSelected`.
    pub fn require_selection(&self) -> Result<usize, PlanError> {
        self.selected_floor_index
            .filter(|&i| i < self.floors.len())
            .ok_or(PlanError::NoFloorSelected)
    }

    pub fn floor_names(&self) -> Vec<String> {
        self.floors.iter().map(|f| f.name.clone()).collect()
    }

    /// Make `index` the selected floor.
    pub fn select_floor(&mut self, index: usize) -> Result<&Floor, PlanError> {
        let count = self.floors.len();
        if index >= count {
            return Err(PlanError::FloorNotFound { index, count });
        }
        self.selected_floor_index = Some(index);
        debug!(index, "floor selected");
        Ok(&self.floors[index])
    }

    /// Insert a fresh floor just above the selection (or at the bottom when
    /// nothing is selected) and select it. Returns its index.
    pub fn new_floor(&mut self) -> usize {
        let name = default_floor_name(self.floors.len());
        let index = match self.selected_floor_index {
            Some(sel) => (sel + 1).min(self.floors.len()),
            None => 0,
        };
        info!(%name, index, "new floor");
        self.floors.insert(index, Floor::new(name));
        self.selected_floor_index = Some(index);
        index
    }

    /// Copy a floor's contents into a new floor named "<source> (copie)",
    /// inserted right above the source and selected. The plenum is not copied.
    pub fn duplicate_floor(&mut self, source: usize) -> Result<usize, PlanError> {
        let original = self.floor(source)?;
        let mut copy = original.clone();
        copy.name = format!("{} (copie)", original.name);
        copy.plenum = None;

        let index = source + 1;
        info!(source, index, name = %copy.name, "floor duplicated");
        self.floors.insert(index, copy);
        self.selected_floor_index = Some(index);
        Ok(index)
    }

    /// Remove a floor and keep the selection pointing at a valid floor.
    pub fn delete_floor(&mut self, index: usize) -> Result<Floor, PlanError> {
        self.floor(index)?;
        if self.floors.len() <= 1 {
            return Err(PlanError::LastFloor);
        }

        let removed = self.floors.remove(index);
        if let Some(sel) = self.selected_floor_index {
            let renormalized = if sel == index {
                index.min(self.floors.len() - 1)
            } else if sel > index {
                sel - 1
            } else {
                sel
            };
            self.selected_floor_index = Some(renormalized);
        }
        info!(
            index,
            name = %removed.name,
            selected = ?self.selected_floor_index,
            "floor deleted"
        );
        Ok(removed)
    }

    /// Rename a floor. Empty or whitespace-only names are refused.
    pub fn rename_floor(&mut self, index: usize, new_name: &str) -> Result<(), PlanError> {
        if new_name.trim().is_empty() {
            return Err(PlanError::EmptyFloorName);
        }
        let floor = self.floor_mut(index)?;
        floor.name = new_name.to_string();
        Ok(())
    }

    /// Set a floor's height. Any value is accepted.
    pub fn set_floor_height(&mut self, index: usize, height: f64) -> Result<(), PlanError> {
        self.floor_mut(index)?.height = height;
        Ok(())
    }

    /// Index of the floor that holds the plenum, if any.
    pub fn plenum_floor(&self) -> Option<usize> {
        self.floors.iter().position(|f| f.plenum.is_some())
    }

    /// Whether a plenum exists or is currently being drawn.
    pub fn has_plenum(&self) -> bool {
        self.plenum_reservation.is_some() || self.plenum_floor().is_some()
    }

    /// Take the plenum lock for a drawing session.
    pub fn reserve_plenum(&mut self, id: Uuid) -> Result<(), PlanError> {
        if self.has_plenum() {
            return Err(PlanError::PlenumAlreadyExists);
        }
        self.plenum_reservation = Some(id);
        Ok(())
    }

    /// Drop the plenum lock if `id` holds it. Returns whether it did.
    pub fn release_plenum_reservation(&mut self, id: Uuid) -> bool {
        if self.plenum_reservation == Some(id) {
            self.plenum_reservation = None;
            true
        } else {
            false
        }
    }

    /// Erase entities of `kind` on a floor. Returns how many were removed.
    ///
    /// Walls, windows and doors match on their endpoint set. Vents match when
    /// their start point lies within `vent_radius` of `start`. The plenum
    /// matches on its corners.
    pub fn delete_entity(
        &mut self,
        floor_index: usize,
        kind: EntityKind,
        start: Point,
        end: Point,
        vent_radius: f64,
    ) -> Result<usize, PlanError> {
        let floor = self.floor_mut(floor_index)?;
        let removed = match kind {
            EntityKind::Wall => {
                let before = floor.walls.len();
                floor.walls.retain(|w| !w.segment.same_endpoints(start, end));
                before - floor.walls.len()
            }
            EntityKind::Window => {
                let before = floor.windows.len();
                floor.windows.retain(|o| !o.segment.same_endpoints(start, end));
                before - floor.windows.len()
            }
            EntityKind::Door => {
                let before = floor.doors.len();
                floor.doors.retain(|o| !o.segment.same_endpoints(start, end));
                before - floor.doors.len()
            }
            EntityKind::Vent => {
                let before = floor.vents.len();
                floor
                    .vents
                    .retain(|v| v.segment.start().distance_to(&start) > vent_radius);
                before - floor.vents.len()
            }
            EntityKind::Plenum => match &floor.plenum {
                Some(p) if p.rect.same_corners(start, end) => {
                    floor.plenum = None;
                    1
                }
                _ => 0,
            },
        };
        debug!(floor_index, %kind, removed, "entity erase");
        Ok(removed)
    }
}

impl Default for Building {
    fn default() -> Self {
        Self::new()
    }
}

fn default_floor_name(n: usize) -> String {
    format!("Étage {n}")
}
