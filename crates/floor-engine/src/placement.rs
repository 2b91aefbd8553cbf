//! Interactive placement: the click/drag protocol shared by every drawing tool.
//!
//! Walls, windows, doors and vents take two clicks. The plenum is drawn with
//! press-drag-release. Vents and plenums then wait in
//! [`PlacementState::AwaitingAttributes`] until the UI submits or cancels
//! their attributes; nothing is added to the floor before that.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use plan_types::{
    Entity, EntityKind, Opening, Plenum, Point, Quantity, Rect, Segment, Vent,
    VentFunction, Wall,
};

use crate::splice::splice_opening;
use crate::types::PlanError;
use crate::Engine;

/// Toolbar tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Select,
    Eraser,
    Wall,
    Window,
    Door,
    Vent,
    Plenum,
}

impl Tool {
    /// Whether this tool draws entities.
    pub fn is_placement(self) -> bool {
        !matches!(self, Tool::Select | Tool::Eraser)
    }

    fn entity_kind(self) -> Option<EntityKind> {
        match self {
            Tool::Wall => Some(EntityKind::Wall),
            Tool::Window => Some(EntityKind::Window),
            Tool::Door => Some(EntityKind::Door),
            Tool::Vent => Some(EntityKind::Vent),
            Tool::Plenum => Some(EntityKind::Plenum),
            Tool::Select | Tool::Eraser => None,
        }
    }
}

/// Where the active tool is in its protocol.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlacementState {
    #[default]
    Idle,
    /// First click recorded.
    AwaitingSecondPoint {
        start: Point,
        function: Option<VentFunction>,
    },
    /// Plenum button held down. `reservation` holds the plenum lock.
    Dragging { start: Point, reservation: Uuid },
    /// Geometry fixed, waiting for the UI to supply attributes.
    AwaitingAttributes(PendingEntity),
}

/// Geometry held while its attributes are collected.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingEntity {
    Vent {
        id: Uuid,
        floor_index: usize,
        segment: Segment,
        function: VentFunction,
    },
    Plenum {
        id: Uuid,
        floor_index: usize,
        rect: Rect,
    },
}

impl PendingEntity {
    pub fn id(&self) -> Uuid {
        match self {
            PendingEntity::Vent { id, .. } | PendingEntity::Plenum { id, .. } => *id,
        }
    }

    pub fn floor_index(&self) -> usize {
        match self {
            PendingEntity::Vent { floor_index, .. } | PendingEntity::Plenum { floor_index, .. } => {
                *floor_index
            }
        }
    }

    /// The prompt to send to the UI for this entity.
    pub fn request(&self, meters_per_pixel: f64) -> AttributeRequest {
        match self {
            PendingEntity::Vent {
                id,
                segment,
                function,
                ..
            } => AttributeRequest::Vent {
                pending_id: *id,
                segment: *segment,
                function: *function,
                color: function.color().to_string(),
            },
            PendingEntity::Plenum { id, rect, .. } => AttributeRequest::Plenum {
                pending_id: *id,
                rect: *rect,
                area_m2: rect.area_m2(meters_per_pixel),
            },
        }
    }
}

/// The tool, its state and the chosen vent function.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub tool: Tool,
    /// Chosen from the vent-type menu; applies to every vent drawn after.
    pub vent_function: Option<VentFunction>,
    pub state: PlacementState,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingEntity> {
        match &self.state {
            PlacementState::AwaitingAttributes(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == PlacementState::Idle
    }
}

/// Axis-constrained feedback while the user is drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Preview {
    Segment {
        kind: EntityKind,
        segment: Segment,
        thickness: Option<u32>,
    },
    Rect {
        rect: Rect,
        area_m2: f64,
    },
}

/// Attributes the UI must collect before a pending entity is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeRequest {
    /// Needs name, diameter and flow rate.
    Vent {
        pending_id: Uuid,
        segment: Segment,
        function: VentFunction,
        color: String,
    },
    /// Needs max flow and an optional type tag.
    Plenum {
        pending_id: Uuid,
        rect: Rect,
        area_m2: f64,
    },
}

/// Raw vent attributes as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VentAttributes {
    pub name: String,
    pub diameter: String,
    pub flow_rate: String,
}

/// Raw plenum attributes as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlenumAttributes {
    pub max_flow: String,
    #[serde(default)]
    pub plenum_type: Option<String>,
}

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// Nothing to do for the current tool and state.
    Ignored,
    /// First point recorded.
    Started,
    /// An entity was added to a floor.
    Placed {
        floor_index: usize,
        entity: Entity,
        /// The floor's walls were split to make room for an opening.
        walls_changed: bool,
    },
    /// Geometry is fixed; attributes must be submitted.
    AttributesRequested(AttributeRequest),
}

impl Engine {
    /// Switch tools. Any drawing in progress is dropped.
    ///
    /// Refused without a selected floor. Picking the plenum tool while a
    /// plenum exists falls back to `Select` and reports the conflict.
    pub fn select_tool(&mut self, tool: Tool) -> Result<(), PlanError> {
        self.building.require_selection()?;
        self.cancel_placement();
        if tool == Tool::Plenum && self.building.has_plenum() {
            self.placement.tool = Tool::Select;
            warn!("plenum tool refused, a plenum already exists");
            return Err(PlanError::PlenumAlreadyExists);
        }
        self.placement.tool = tool;
        debug!(?tool, "tool selected");
        Ok(())
    }

    /// Pick the function (and thus colour) for the next vents.
    pub fn choose_vent_function(&mut self, function: VentFunction) {
        self.placement.vent_function = Some(function);
    }

    /// Button press / click on the canvas.
    pub fn pointer_down(&mut self, at: Point) -> Result<PointerOutcome, PlanError> {
        let tool = self.placement.tool;
        if !tool.is_placement() {
            return Ok(PointerOutcome::Ignored);
        }
        let floor_index = self.building.require_selection()?;

        match (tool, self.placement.state.clone()) {
            (Tool::Plenum, PlacementState::Idle) => {
                let reservation = Uuid::new_v4();
                if let Err(e) = self.building.reserve_plenum(reservation) {
                    self.placement.tool = Tool::Select;
                    warn!("plenum drag refused, a plenum already exists");
                    return Err(e);
                }
                self.placement.state = PlacementState::Dragging {
                    start: at,
                    reservation,
                };
                debug!(?at, "plenum drag started");
                Ok(PointerOutcome::Started)
            }
            (Tool::Plenum, _) => Ok(PointerOutcome::Ignored),
            (_, PlacementState::Idle) => {
                let function = if tool == Tool::Vent {
                    Some(
                        self.placement
                            .vent_function
                            .ok_or(PlanError::VentFunctionNotChosen)?,
                    )
                } else {
                    None
                };
                self.placement.state = PlacementState::AwaitingSecondPoint { start: at, function };
                debug!(?tool, ?at, "first point recorded");
                Ok(PointerOutcome::Started)
            }
            (_, PlacementState::AwaitingSecondPoint { start, function }) => {
                self.commit_segment(tool, floor_index, start, at, function)
            }
            _ => Ok(PointerOutcome::Ignored),
        }
    }

    /// Cursor motion: the preview for the current state, if any.
    pub fn pointer_move(&self, at: Point) -> Option<Preview> {
        match &self.placement.state {
            PlacementState::AwaitingSecondPoint { start, .. } => {
                let kind = self.placement.tool.entity_kind()?;
                let thickness = matches!(kind, EntityKind::Window | EntityKind::Door)
                    .then_some(self.config.opening_thickness);
                Some(Preview::Segment {
                    kind,
                    segment: Segment::new(*start, at),
                    thickness,
                })
            }
            PlacementState::Dragging { start, .. } => {
                let rect = Rect::new(*start, at);
                Some(Preview::Rect {
                    rect,
                    area_m2: rect.area_m2(self.config.meters_per_pixel),
                })
            }
            _ => None,
        }
    }

    /// Button release. Ends a plenum drag.
    pub fn pointer_up(&mut self, at: Point) -> Result<PointerOutcome, PlanError> {
        let PlacementState::Dragging { start, reservation } = self.placement.state else {
            return Ok(PointerOutcome::Ignored);
        };
        let floor_index = self.building.require_selection()?;
        let pending = PendingEntity::Plenum {
            id: reservation,
            floor_index,
            rect: Rect::new(start, at),
        };
        let request = pending.request(self.config.meters_per_pixel);
        self.placement.state = PlacementState::AwaitingAttributes(pending);
        debug!(?start, ?at, "plenum drag finished");
        Ok(PointerOutcome::AttributesRequested(request))
    }

    /// Escape / right click / tool switch. Returns whether anything was dropped.
    ///
    /// Releases the plenum lock when a plenum was in progress.
    pub fn cancel_placement(&mut self) -> bool {
        let previous = std::mem::take(&mut self.placement.state);
        match &previous {
            PlacementState::Idle => return false,
            PlacementState::Dragging { reservation, .. } => {
                self.building.release_plenum_reservation(*reservation);
            }
            PlacementState::AwaitingAttributes(PendingEntity::Plenum { id, .. }) => {
                self.building.release_plenum_reservation(*id);
            }
            PlacementState::AwaitingSecondPoint { .. }
            | PlacementState::AwaitingAttributes(PendingEntity::Vent { .. }) => {}
        }
        debug!(?previous, "placement cancelled");
        true
    }

    /// Finish a pending vent. Invalid input leaves the pending vent in place
    /// so the UI can prompt again.
    pub fn submit_vent_attributes(
        &mut self,
        pending_id: Uuid,
        attributes: &VentAttributes,
    ) -> Result<(usize, Vent), PlanError> {
        let Some(PendingEntity::Vent {
            id,
            floor_index,
            segment,
            function,
        }) = self.placement.pending().cloned()
        else {
            return Err(PlanError::NoPendingPlacement { id: pending_id });
        };
        if id != pending_id {
            return Err(PlanError::NoPendingPlacement { id: pending_id });
        }

        let name = parse_name(&attributes.name)?;
        let diameter = parse_count("Diamètre", &attributes.diameter, false)?;
        let flow_rate = parse_count("Débit d'air", &attributes.flow_rate, false)?;

        let vent = Vent {
            segment,
            name,
            diameter: Quantity::from(diameter),
            flow_rate: Quantity::from(flow_rate),
            function,
            color: function.color().to_string(),
        };
        self.building.floor_mut(floor_index)?.vents.push(vent.clone());
        self.placement.state = PlacementState::Idle;
        info!(floor_index, name = %vent.name, %function, flow_rate, "vent placed");
        Ok((floor_index, vent))
    }

    /// Finish a pending plenum. Invalid input leaves it pending.
    pub fn submit_plenum_attributes(
        &mut self,
        pending_id: Uuid,
        attributes: &PlenumAttributes,
    ) -> Result<(usize, Plenum), PlanError> {
        let Some(PendingEntity::Plenum {
            id,
            floor_index,
            rect,
        }) = self.placement.pending().cloned()
        else {
            return Err(PlanError::NoPendingPlacement { id: pending_id });
        };
        if id != pending_id {
            return Err(PlanError::NoPendingPlacement { id: pending_id });
        }

        let max_flow = parse_count("Débit maximal", &attributes.max_flow, true)?;
        let kind = attributes
            .plenum_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let plenum = Plenum::new(rect, max_flow, kind, self.config.meters_per_pixel);
        self.building.floor_mut(floor_index)?.plenum = Some(plenum.clone());
        self.building.release_plenum_reservation(id);
        self.placement.state = PlacementState::Idle;
        info!(floor_index, max_flow, area = plenum.area, "plenum placed");
        Ok((floor_index, plenum))
    }

    /// Abandon the pending entity with this id.
    pub fn cancel_attributes(&mut self, pending_id: Uuid) -> Result<(), PlanError> {
        match self.placement.pending() {
            Some(p) if p.id() == pending_id => {
                self.cancel_placement();
                Ok(())
            }
            _ => Err(PlanError::NoPendingPlacement { id: pending_id }),
        }
    }

    fn commit_segment(
        &mut self,
        tool: Tool,
        floor_index: usize,
        start: Point,
        end: Point,
        function: Option<VentFunction>,
    ) -> Result<PointerOutcome, PlanError> {
        let segment = Segment::new(start, end);

        if tool == Tool::Vent {
            let function = function.ok_or(PlanError::VentFunctionNotChosen)?;
            let pending = PendingEntity::Vent {
                id: Uuid::new_v4(),
                floor_index,
                segment,
                function,
            };
            let request = pending.request(self.config.meters_per_pixel);
            self.placement.state = PlacementState::AwaitingAttributes(pending);
            debug!(?segment, %function, "vent geometry fixed");
            return Ok(PointerOutcome::AttributesRequested(request));
        }

        let thickness = self.config.opening_thickness;
        let (align, min_overlap) = (self.config.align_tolerance, self.config.min_overlap);
        let floor = self.building.floor_mut(floor_index)?;
        let (entity, walls_changed) = match tool {
            Tool::Window | Tool::Door => {
                let spliced = splice_opening(&mut floor.walls, segment, align, min_overlap);
                let opening = Opening {
                    segment: spliced.segment(),
                    thickness,
                };
                let entity = if tool == Tool::Window {
                    Entity::Window(opening)
                } else {
                    Entity::Door(opening)
                };
                (entity, spliced.modified)
            }
            _ => (Entity::Wall(Wall { segment }), false),
        };
        floor.push(entity.clone());
        self.placement.state = PlacementState::Idle;
        info!(floor_index, kind = %entity.kind(), ?segment, walls_changed, "entity placed");

        Ok(PointerOutcome::Placed {
            floor_index,
            entity,
            walls_changed,
        })
    }
}

fn parse_name(raw: &str) -> Result<String, PlanError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(PlanError::InvalidAttribute {
            field: "Nom",
            reason: "Le nom de la ventilation ne peut pas être vide.".to_string(),
        });
    }
    Ok(name.to_string())
}

/// Parse a whole number typed by the user. Signs, decimals and spaces inside
/// the digits are refused.
fn parse_count(field: &'static str, raw: &str, allow_zero: bool) -> Result<u32, PlanError> {
    let text = raw.trim();
    let invalid = |reason: &str| PlanError::InvalidAttribute {
        field,
        reason: reason.to_string(),
    };
    if text.is_empty() {
        return Err(invalid("la valeur ne peut pas être vide"));
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("la valeur doit être un nombre entier positif"));
    }
    let value: u32 = text
        .parse()
        .map_err(|_| invalid("la valeur est trop grande"))?;
    if value == 0 && !allow_zero {
        return Err(invalid("la valeur doit être strictement positive"));
    }
    Ok(value)
}
