use serde::{Deserialize, Serialize};

use plan_types::{Entity, EntityKind};

use crate::types::Building;

/// One faded item from the floor below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnionItem {
    pub kind: EntityKind,
    pub entity: Entity,
    /// Rendering hint: draw at this opacity.
    pub opacity: f64,
}

/// Read-only copy of the floor below the one being viewed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnionSkin {
    /// The floor this snapshot is drawn under.
    pub floor_index: Option<usize>,
    /// Index of the floor the items come from.
    pub below_index: Option<usize>,
    pub below_name: Option<String>,
    pub items: Vec<OnionItem>,
}

impl OnionSkin {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Onion skin for the selected floor.
pub fn onion_skin(building: &Building, opacity: f64) -> OnionSkin {
    match building.selected_floor_index {
        Some(index) => onion_skin_for(building, index, opacity),
        None => OnionSkin::default(),
    }
}

/// Onion skin shown under `floor_index`: the contents of `floor_index - 1`.
///
/// Empty for the bottom floor and for indices past the top.
pub fn onion_skin_for(building: &Building, floor_index: usize, opacity: f64) -> OnionSkin {
    if floor_index == 0 || floor_index >= building.floors.len() {
        return OnionSkin {
            floor_index: Some(floor_index),
            ..OnionSkin::default()
        };
    }
    let below_index = floor_index - 1;
    let below = &building.floors[below_index];
    let items = below
        .entities()
        .into_iter()
        .map(|entity| OnionItem {
            kind: entity.kind(),
            entity,
            opacity,
        })
        .collect();

    OnionSkin {
        floor_index: Some(floor_index),
        below_index: Some(below_index),
        below_name: Some(below.name.clone()),
        items,
    }
}
