use tracing::{instrument, warn};

use floor_engine::PointerOutcome;
use plan_types::{Entity, EntityKind, Point};

use crate::engine_state::{parse_height, BridgeError, EngineState};
use crate::messages::{EngineToUi, UiToEngine};

/// Dispatch a UI intent to the engine and return every update it produced.
///
/// A rejected intent yields exactly one `Alert`. A failed attribute
/// submission is followed by a fresh prompt for the same pending entity,
/// and a refused tool or press is followed by the tool now in effect.
#[instrument(skip_all)]
pub fn dispatch(state: &mut EngineState, msg: UiToEngine) -> Vec<EngineToUi> {
    let reprompt = matches!(
        msg,
        UiToEngine::SubmitVentAttributes { .. } | UiToEngine::SubmitPlenumAttributes { .. }
    );
    let tool_feedback = matches!(
        msg,
        UiToEngine::SelectTool { .. } | UiToEngine::PointerDown { .. }
    );

    let mut out = Vec::new();
    if let Err(e) = handle_message(state, msg, &mut out) {
        warn!(error = %e, "intent rejected");
        out.push(alert(&e));
        if reprompt {
            if let Some(pending) = state.engine.placement.pending() {
                out.push(EngineToUi::AttributesRequested {
                    request: pending.request(state.engine.config.meters_per_pixel),
                });
            }
        }
        if tool_feedback {
            out.push(EngineToUi::ToolSelected {
                tool: state.engine.placement.tool,
            });
        }
    }
    out
}

/// The alert shown for a rejected intent.
pub fn alert(e: &BridgeError) -> EngineToUi {
    EngineToUi::Alert {
        title: e.title().to_string(),
        message: e.to_string(),
    }
}

fn handle_message(
    state: &mut EngineState,
    msg: UiToEngine,
    out: &mut Vec<EngineToUi>,
) -> Result<(), BridgeError> {
    match msg {
        // -- Tools and placement --
        UiToEngine::SelectTool { tool } => {
            let was_busy = !state.engine.placement.is_idle();
            state.engine.select_tool(tool)?;
            if was_busy {
                out.push(EngineToUi::PreviewCleared);
            }
            out.push(EngineToUi::ToolSelected { tool });
        }

        UiToEngine::ChooseVentFunction { function } => {
            state.engine.choose_vent_function(function);
            out.push(EngineToUi::VentFunctionChosen {
                function,
                color: function.color().to_string(),
                label: function.label().to_string(),
            });
        }

        UiToEngine::PointerDown { x, y } => {
            let outcome = state.engine.pointer_down(Point::new(x, y))?;
            pointer_outcome(state, outcome, out)?;
        }

        UiToEngine::PointerMove { x, y } => {
            if let Some(preview) = state.engine.pointer_move(Point::new(x, y)) {
                out.push(EngineToUi::Preview { preview });
            }
        }

        UiToEngine::PointerUp { x, y } => {
            let outcome = state.engine.pointer_up(Point::new(x, y))?;
            pointer_outcome(state, outcome, out)?;
        }

        UiToEngine::CancelPlacement => {
            if state.engine.cancel_placement() {
                out.push(EngineToUi::PreviewCleared);
            }
        }

        UiToEngine::SubmitVentAttributes {
            pending_id,
            attributes,
        } => {
            let (floor_index, vent) = state
                .engine
                .submit_vent_attributes(pending_id, &attributes)?;
            out.push(EngineToUi::EntityDrawn {
                floor_index,
                entity: Entity::Vent(vent),
            });
            push_floor_above(state, floor_index, out);
            push_summary(state, out);
        }

        UiToEngine::SubmitPlenumAttributes {
            pending_id,
            attributes,
        } => {
            let (floor_index, plenum) = state
                .engine
                .submit_plenum_attributes(pending_id, &attributes)?;
            out.push(EngineToUi::EntityDrawn {
                floor_index,
                entity: Entity::Plenum(plenum),
            });
            push_floor_above(state, floor_index, out);
            push_summary(state, out);
        }

        UiToEngine::CancelAttributes { pending_id } => {
            state.engine.cancel_attributes(pending_id)?;
            out.push(EngineToUi::PreviewCleared);
        }

        // -- Floors --
        UiToEngine::SelectFloor { index } => {
            state.engine.select_floor(index)?;
            out.push(EngineToUi::PreviewCleared);
            push_floor_views(state, out)?;
        }

        UiToEngine::NewFloor => {
            state.engine.new_floor();
            out.push(EngineToUi::PreviewCleared);
            push_floor_views(state, out)?;
        }

        UiToEngine::DuplicateFloor { index } => {
            state.engine.duplicate_floor(index)?;
            out.push(EngineToUi::PreviewCleared);
            push_floor_views(state, out)?;
            push_summary(state, out);
        }

        UiToEngine::DeleteFloor { index } => {
            state.engine.delete_floor(index)?;
            out.push(EngineToUi::PreviewCleared);
            push_floor_views(state, out)?;
            push_summary(state, out);
        }

        UiToEngine::RenameFloor { index, name } => {
            state.engine.rename_floor(index, &name)?;
            push_floor_list(state, out);
            push_summary(state, out);
        }

        UiToEngine::SetFloorHeight { index, height } => {
            let height = parse_height(&height)?;
            state.engine.set_floor_height(index, height)?;
            out.push(EngineToUi::HeightChanged {
                floor_index: index,
                height,
            });
        }

        // -- Eraser --
        UiToEngine::DeleteEntity { kind, start, end } => {
            let (floor_index, removed) = state.engine.delete_entity(kind, start, end)?;
            out.push(EngineToUi::EntityRemoved {
                floor_index,
                kind,
                start,
                end,
                removed,
            });
            if removed > 0 {
                push_floor_above(state, floor_index, out);
                if matches!(kind, EntityKind::Vent | EntityKind::Plenum) {
                    push_summary(state, out);
                }
            }
        }

        // -- Views --
        UiToEngine::RequestOnionSkin { floor_index } => {
            let skin = match floor_index {
                Some(index) => state.engine.onion_skin_for(index),
                None => state.engine.onion_skin(),
            };
            out.push(EngineToUi::OnionSkin { skin });
        }

        UiToEngine::RequestVentilationSummary => push_summary(state, out),

        // -- Project --
        UiToEngine::Reset => {
            state.engine.reset();
            push_project_views(state, out)?;
        }

        UiToEngine::SaveProject => {
            let json_data = file_format::save_project(&state.engine.building)?;
            out.push(EngineToUi::SaveReady { json_data });
        }

        UiToEngine::LoadProject { data } => {
            let floors = file_format::load_project(&data, &state.engine.config)?;
            state.engine.replace_floors(floors)?;
            push_project_views(state, out)?;
        }
    }
    Ok(())
}

fn pointer_outcome(
    state: &EngineState,
    outcome: PointerOutcome,
    out: &mut Vec<EngineToUi>,
) -> Result<(), BridgeError> {
    match outcome {
        PointerOutcome::Ignored | PointerOutcome::Started => {}
        PointerOutcome::Placed {
            floor_index,
            entity,
            walls_changed,
        } => {
            out.push(EngineToUi::PreviewCleared);
            if walls_changed {
                let floor = state.engine.building.floor(floor_index)?;
                out.push(EngineToUi::FloorRedrawn {
                    floor_index,
                    entities: floor.entities(),
                });
            } else {
                out.push(EngineToUi::EntityDrawn {
                    floor_index,
                    entity,
                });
            }
            push_floor_above(state, floor_index, out);
        }
        PointerOutcome::AttributesRequested(request) => {
            out.push(EngineToUi::PreviewCleared);
            out.push(EngineToUi::AttributesRequested { request });
        }
    }
    Ok(())
}

fn push_floor_list(state: &EngineState, out: &mut Vec<EngineToUi>) {
    out.push(EngineToUi::FloorListChanged {
        names: state.engine.building.floor_names(),
        selected_floor_index: state.engine.building.selected_floor_index,
    });
}

/// Floor list, the selected floor's contents and its onion skin.
fn push_floor_views(state: &EngineState, out: &mut Vec<EngineToUi>) -> Result<(), BridgeError> {
    push_floor_list(state, out);
    let floor_index = state.engine.building.require_selection()?;
    let floor = state.engine.building.floor(floor_index)?;
    out.push(EngineToUi::FloorSelected {
        floor_index,
        floor_name: floor.name.clone(),
        height: floor.height,
        entities: floor.entities(),
    });
    out.push(EngineToUi::OnionSkin {
        skin: state.engine.onion_skin(),
    });
    Ok(())
}

/// Everything the UI shows, after the whole building was replaced.
fn push_project_views(state: &EngineState, out: &mut Vec<EngineToUi>) -> Result<(), BridgeError> {
    out.push(EngineToUi::PreviewCleared);
    out.push(EngineToUi::ToolSelected {
        tool: state.engine.placement.tool,
    });
    push_floor_views(state, out)?;
    push_summary(state, out);
    Ok(())
}

/// The onion skin of the floor above `floor_index` shows its contents.
fn push_floor_above(state: &EngineState, floor_index: usize, out: &mut Vec<EngineToUi>) {
    let above = floor_index + 1;
    if above < state.engine.building.floors.len() {
        out.push(EngineToUi::OnionSkin {
            skin: state.engine.onion_skin_for(above),
        });
    }
}

fn push_summary(state: &EngineState, out: &mut Vec<EngineToUi>) {
    let summary = state.engine.ventilation_summary();
    out.push(EngineToUi::VentilationSummary {
        pressure_label: summary.pressure.label().to_string(),
        summary,
    });
}
