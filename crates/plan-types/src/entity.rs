use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{Point, Rect, Segment};
use crate::vent::{Quantity, VentFunction};

/// A wall: nothing more than an axis-aligned segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub segment: Segment,
}

impl Wall {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            segment: Segment::new(start, end),
        }
    }
}

/// A window or a door. Both are openings cut into walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub segment: Segment,
    pub thickness: u32,
}

impl Opening {
    pub fn new(start: Point, end: Point, thickness: u32) -> Self {
        Self {
            segment: Segment::new(start, end),
            thickness,
        }
    }
}

/// A ventilation outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vent {
    pub segment: Segment,
    pub name: String,
    pub diameter: Quantity,
    pub flow_rate: Quantity,
    pub function: VentFunction,
    pub color: String,
}

/// The building's single ventilation plenum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plenum {
    pub rect: Rect,
    pub max_flow: u32,
    /// Free-form tag such as "Simple" or "Double".
    pub kind: Option<String>,
    /// Floor area in square meters, derived from `rect`.
    pub area: f64,
}

impl Plenum {
    pub fn new(rect: Rect, max_flow: u32, kind: Option<String>, meters_per_pixel: f64) -> Self {
        Self {
            rect,
            max_flow,
            kind,
            area: rect.area_m2(meters_per_pixel),
        }
    }
}

/// Type tag for drawable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Wall,
    Window,
    Door,
    Vent,
    Plenum,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Wall => "wall",
            EntityKind::Window => "window",
            EntityKind::Door => "door",
            EntityKind::Vent => "vent",
            EntityKind::Plenum => "plenum",
        };
        f.write_str(s)
    }
}

/// Any drawable entity on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entity {
    Wall(Wall),
    Window(Opening),
    Door(Opening),
    Vent(Vent),
    Plenum(Plenum),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Wall(_) => EntityKind::Wall,
            Entity::Window(_) => EntityKind::Window,
            Entity::Door(_) => EntityKind::Door,
            Entity::Vent(_) => EntityKind::Vent,
            Entity::Plenum(_) => EntityKind::Plenum,
        }
    }

    /// The two defining points: segment endpoints, or rectangle corners.
    pub fn endpoints(&self) -> (Point, Point) {
        match self {
            Entity::Wall(Wall { segment })
            | Entity::Window(Opening { segment, .. })
            | Entity::Door(Opening { segment, .. })
            | Entity::Vent(Vent { segment, .. }) => (segment.start(), segment.end()),
            Entity::Plenum(p) => (p.rect.start, p.rect.end),
        }
    }
}
