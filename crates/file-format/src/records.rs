//! On-disk shape of a project: a JSON list of floor records.

use serde::{Deserialize, Serialize};

use floor_engine::{Floor, DEFAULT_FLOOR_HEIGHT};
use plan_types::{
    Opening, PlanConfig, Plenum, Point, Quantity, Rect, Segment, Vent, VentFunction, Wall,
};

const DEFAULT_PLENUM_MAX_FLOW: u32 = 1000;

/// One floor as stored in a project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorRecord {
    pub name: String,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub walls: Vec<WallRecord>,
    #[serde(default)]
    pub windows: Vec<OpeningRecord>,
    #[serde(default)]
    pub doors: Vec<OpeningRecord>,
    #[serde(default)]
    pub vents: Vec<VentRecord>,
    #[serde(default)]
    pub plenums: Vec<PlenumRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningRecord {
    pub start: Point,
    pub end: Point,
    /// Missing in some files; the configured opening thickness applies then.
    #[serde(default)]
    pub thickness: Option<u32>,
}

/// Older files may lack `function` and `color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentRecord {
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub diameter: Quantity,
    #[serde(default)]
    pub flow_rate: Quantity,
    #[serde(default)]
    pub function: VentFunction,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlenumRecord {
    pub start: Point,
    pub end: Point,
    #[serde(default = "default_max_flow")]
    pub max_flow: u32,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Written for readers of the file; recomputed from the corners on load.
    #[serde(default)]
    pub area: f64,
}

fn default_height() -> f64 {
    DEFAULT_FLOOR_HEIGHT
}

fn default_max_flow() -> u32 {
    DEFAULT_PLENUM_MAX_FLOW
}

impl From<&Wall> for WallRecord {
    fn from(w: &Wall) -> Self {
        Self {
            start: w.segment.start(),
            end: w.segment.end(),
        }
    }
}

impl From<&Opening> for OpeningRecord {
    fn from(o: &Opening) -> Self {
        Self {
            start: o.segment.start(),
            end: o.segment.end(),
            thickness: Some(o.thickness),
        }
    }
}

impl From<&Vent> for VentRecord {
    fn from(v: &Vent) -> Self {
        Self {
            start: v.segment.start(),
            end: v.segment.end(),
            name: v.name.clone(),
            diameter: v.diameter.clone(),
            flow_rate: v.flow_rate.clone(),
            function: v.function,
            color: Some(v.color.clone()),
        }
    }
}

impl From<&Plenum> for PlenumRecord {
    fn from(p: &Plenum) -> Self {
        Self {
            start: p.rect.start,
            end: p.rect.end,
            max_flow: p.max_flow,
            kind: p.kind.clone(),
            area: p.area,
        }
    }
}

impl From<&Floor> for FloorRecord {
    fn from(floor: &Floor) -> Self {
        Self {
            name: floor.name.clone(),
            height: floor.height,
            walls: floor.walls.iter().map(WallRecord::from).collect(),
            windows: floor.windows.iter().map(OpeningRecord::from).collect(),
            doors: floor.doors.iter().map(OpeningRecord::from).collect(),
            vents: floor.vents.iter().map(VentRecord::from).collect(),
            plenums: floor.plenum.iter().map(PlenumRecord::from).collect(),
        }
    }
}

impl VentRecord {
    fn into_vent(self) -> Vent {
        let color = self
            .color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.function.color().to_string());
        Vent {
            segment: Segment::new(self.start, self.end),
            name: self.name,
            diameter: self.diameter,
            flow_rate: self.flow_rate,
            function: self.function,
            color,
        }
    }
}

impl FloorRecord {
    /// Convert to an engine floor. Segments are re-snapped, plenum areas
    /// recomputed at the configured scale, and only the first plenum record
    /// is kept.
    pub fn into_floor(self, config: &PlanConfig) -> Floor {
        let opening = |o: OpeningRecord| {
            Opening::new(o.start, o.end, o.thickness.unwrap_or(config.opening_thickness))
        };
        let plenum = self.plenums.into_iter().next().map(|p| {
            Plenum::new(
                Rect::new(p.start, p.end),
                p.max_flow,
                p.kind,
                config.meters_per_pixel,
            )
        });
        Floor {
            name: self.name,
            height: self.height,
            walls: self
                .walls
                .into_iter()
                .map(|w| Wall::new(w.start, w.end))
                .collect(),
            windows: self.windows.into_iter().map(opening).collect(),
            doors: self.doors.into_iter().map(opening).collect(),
            vents: self.vents.into_iter().map(VentRecord::into_vent).collect(),
            plenum,
        }
    }
}
