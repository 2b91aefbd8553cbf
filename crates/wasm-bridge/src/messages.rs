use serde::{Deserialize, Serialize};
use uuid::Uuid;

use floor_engine::{
    AttributeRequest, OnionSkin, PlenumAttributes, Preview, Tool, VentAttributes,
    VentilationSummary,
};
use plan_types::{Entity, EntityKind, Point, VentFunction};

/// Intents from the UI (JavaScript main thread) to the engine (WASM Worker).
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToEngine {
    // -- Tools and placement --
    SelectTool {
        tool: Tool,
    },
    /// Pick the function for the vents drawn next.
    ChooseVentFunction {
        function: VentFunction,
    },
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    /// Escape or right click.
    CancelPlacement,
    SubmitVentAttributes {
        pending_id: Uuid,
        attributes: VentAttributes,
    },
    SubmitPlenumAttributes {
        pending_id: Uuid,
        attributes: PlenumAttributes,
    },
    CancelAttributes {
        pending_id: Uuid,
    },

    // -- Floors --
    SelectFloor {
        index: usize,
    },
    NewFloor,
    DuplicateFloor {
        index: usize,
    },
    DeleteFloor {
        index: usize,
    },
    RenameFloor {
        index: usize,
        name: String,
    },
    /// Height as typed by the user.
    SetFloorHeight {
        index: usize,
        height: String,
    },

    // -- Eraser --
    DeleteEntity {
        kind: EntityKind,
        start: Point,
        end: Point,
    },

    // -- Views --
    /// Onion skin under `floor_index`, or under the selected floor.
    RequestOnionSkin {
        #[serde(default)]
        floor_index: Option<usize>,
    },
    RequestVentilationSummary,

    // -- Project --
    Reset,
    SaveProject,
    LoadProject {
        data: String,
    },
}

/// Updates from the engine (WASM Worker) to the UI (JavaScript main thread).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToUi {
    /// A new entity to draw on a floor.
    EntityDrawn { floor_index: usize, entity: Entity },

    /// Rubber-band shape for the placement in progress.
    Preview { preview: Preview },

    /// Drop any rubber-band shape.
    PreviewCleared,

    /// Geometry is fixed; collect these attributes and submit them.
    AttributesRequested { request: AttributeRequest },

    ToolSelected { tool: Tool },

    /// The vent type picked from the menu, with its colour and menu label.
    VentFunctionChosen {
        function: VentFunction,
        color: String,
        label: String,
    },

    FloorListChanged {
        names: Vec<String>,
        selected_floor_index: Option<usize>,
    },

    /// The selected floor and everything drawn on it.
    FloorSelected {
        floor_index: usize,
        floor_name: String,
        height: f64,
        entities: Vec<Entity>,
    },

    /// The floor's contents changed beyond a single addition.
    FloorRedrawn {
        floor_index: usize,
        entities: Vec<Entity>,
    },

    HeightChanged { floor_index: usize, height: f64 },

    EntityRemoved {
        floor_index: usize,
        kind: EntityKind,
        start: Point,
        end: Point,
        removed: usize,
    },

    OnionSkin { skin: OnionSkin },

    /// Building-wide air balance. `pressure_label` names the sign of the balance.
    VentilationSummary {
        summary: VentilationSummary,
        pressure_label: String,
    },

    /// A rejected intent, shown to the user.
    Alert { title: String, message: String },

    /// Save project is ready.
    SaveReady { json_data: String },
}
