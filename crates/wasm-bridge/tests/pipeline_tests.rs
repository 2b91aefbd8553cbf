//! End-to-end tests for the wasm-bridge dispatch layer.
//!
//! These drive the engine through the same `dispatch()` function that WASM
//! calls, one intent at a time, and check the full list of updates each
//! intent produces.

use approx::assert_relative_eq;
use uuid::Uuid;

use floor_engine::{AttributeRequest, PlenumAttributes, Preview, Tool, VentAttributes};
use plan_types::{Entity, EntityKind, Point, VentFunction};
use wasm_bridge::messages::*;
use wasm_bridge::*;

// ── Helper functions ──────────────────────────────────────────────────────

fn send(state: &mut EngineState, msg: UiToEngine) -> Vec<EngineToUi> {
    wasm_bridge::dispatch(state, msg)
}

fn click(state: &mut EngineState, x: f64, y: f64) -> Vec<EngineToUi> {
    send(state, UiToEngine::PointerDown { x, y })
}

fn select_tool(state: &mut EngineState, tool: Tool) {
    let out = send(state, UiToEngine::SelectTool { tool });
    assert!(
        matches!(out.last(), Some(EngineToUi::ToolSelected { tool: t }) if *t == tool),
        "tool {tool:?} refused: {out:?}"
    );
}

fn draw(state: &mut EngineState, tool: Tool, from: (f64, f64), to: (f64, f64)) -> Vec<EngineToUi> {
    select_tool(state, tool);
    assert!(click(state, from.0, from.1).is_empty());
    click(state, to.0, to.1)
}

fn alerts(out: &[EngineToUi]) -> Vec<&str> {
    out.iter()
        .filter_map(|u| match u {
            EngineToUi::Alert { title, .. } => Some(title.as_str()),
            _ => None,
        })
        .collect()
}

fn attribute_request(out: &[EngineToUi]) -> AttributeRequest {
    out.iter()
        .find_map(|u| match u {
            EngineToUi::AttributesRequested { request } => Some(request.clone()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no attribute request in {out:?}"))
}

fn pending_id(request: &AttributeRequest) -> Uuid {
    match request {
        AttributeRequest::Vent { pending_id, .. } | AttributeRequest::Plenum { pending_id, .. } => {
            *pending_id
        }
    }
}

fn summary(out: &[EngineToUi]) -> &floor_engine::VentilationSummary {
    out.iter()
        .find_map(|u| match u {
            EngineToUi::VentilationSummary { summary, .. } => Some(summary),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no summary in {out:?}"))
}

fn place_vent(
    state: &mut EngineState,
    function: VentFunction,
    y: f64,
    flow: &str,
) -> Vec<EngineToUi> {
    send(state, UiToEngine::ChooseVentFunction { function });
    let out = draw(state, Tool::Vent, (0.0, y), (20.0, y));
    let id = pending_id(&attribute_request(&out));
    send(
        state,
        UiToEngine::SubmitVentAttributes {
            pending_id: id,
            attributes: VentAttributes {
                name: format!("Bouche {y}"),
                diameter: "125".into(),
                flow_rate: flow.into(),
            },
        },
    )
}

fn place_plenum(state: &mut EngineState) -> Vec<EngineToUi> {
    select_tool(state, Tool::Plenum);
    assert!(click(state, 0.0, 0.0).is_empty());
    let out = send(state, UiToEngine::PointerUp { x: 40.0, y: 80.0 });
    let id = pending_id(&attribute_request(&out));
    send(
        state,
        UiToEngine::SubmitPlenumAttributes {
            pending_id: id,
            attributes: PlenumAttributes {
                max_flow: "1000".into(),
                plenum_type: Some("Double".into()),
            },
        },
    )
}

// ── Drawing ───────────────────────────────────────────────────────────────

#[test]
fn wall_is_drawn_on_second_click() {
    let mut state = EngineState::new();
    select_tool(&mut state, Tool::Wall);
    assert!(click(&mut state, 0.0, 0.0).is_empty());

    let out = send(&mut state, UiToEngine::PointerMove { x: 100.0, y: 3.0 });
    match out.as_slice() {
        [EngineToUi::Preview {
            preview: Preview::Segment { kind, segment, thickness },
        }] => {
            assert_eq!(*kind, EntityKind::Wall);
            assert_eq!(segment.end(), Point::new(100.0, 0.0));
            assert_eq!(*thickness, None);
        }
        other => panic!("unexpected {other:?}"),
    }

    let out = click(&mut state, 100.0, 3.0);
    assert!(matches!(out[0], EngineToUi::PreviewCleared));
    match &out[1] {
        EngineToUi::EntityDrawn {
            floor_index: 0,
            entity: Entity::Wall(wall),
        } => assert_eq!(wall.segment.end(), Point::new(100.0, 0.0)),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(out.len(), 2);
    assert_eq!(state.engine.building.floors[0].walls.len(), 1);
}

#[test]
fn door_in_a_wall_redraws_the_floor() {
    let mut state = EngineState::new();
    draw(&mut state, Tool::Wall, (0.0, 0.0), (100.0, 0.0));
    let out = draw(&mut state, Tool::Door, (40.0, 4.0), (60.0, 4.0));

    let entities = out
        .iter()
        .find_map(|u| match u {
            EngineToUi::FloorRedrawn { entities, .. } => Some(entities.clone()),
            _ => None,
        })
        .unwrap();
    let kinds: Vec<_> = entities.iter().map(Entity::kind).collect();
    assert_eq!(kinds, vec![EntityKind::Wall, EntityKind::Wall, EntityKind::Door]);

    let door = &state.engine.building.floors[0].doors[0];
    assert_eq!(door.segment.start(), Point::new(40.0, 0.0));
    assert_eq!(door.segment.end(), Point::new(60.0, 0.0));
    assert_eq!(door.thickness, 5);
}

#[test]
fn cancel_clears_the_preview_once() {
    let mut state = EngineState::new();
    select_tool(&mut state, Tool::Window);
    click(&mut state, 0.0, 0.0);

    let out = send(&mut state, UiToEngine::CancelPlacement);
    assert!(matches!(out.as_slice(), [EngineToUi::PreviewCleared]));
    assert!(send(&mut state, UiToEngine::CancelPlacement).is_empty());
    assert!(send(&mut state, UiToEngine::PointerMove { x: 5.0, y: 5.0 }).is_empty());
}

#[test]
fn drawing_below_refreshes_the_onion_skin_above() {
    let mut state = EngineState::new();
    send(&mut state, UiToEngine::NewFloor);
    send(&mut state, UiToEngine::SelectFloor { index: 0 });

    let out = draw(&mut state, Tool::Wall, (0.0, 0.0), (0.0, 50.0));
    let skin = out
        .iter()
        .find_map(|u| match u {
            EngineToUi::OnionSkin { skin } => Some(skin),
            _ => None,
        })
        .unwrap();
    assert_eq!(skin.floor_index, Some(1));
    assert_eq!(skin.below_index, Some(0));
    assert_eq!(skin.items.len(), 1);
}

// ── Vents ─────────────────────────────────────────────────────────────────

#[test]
fn vent_needs_a_function_first() {
    let mut state = EngineState::new();
    select_tool(&mut state, Tool::Vent);
    let out = click(&mut state, 0.0, 0.0);
    assert_eq!(alerts(&out), vec!["Type de ventilation non sélectionné"]);
    assert!(matches!(
        out.last(),
        Some(EngineToUi::ToolSelected { tool: Tool::Vent })
    ));
}

#[test]
fn vent_flow_with_reprompt() {
    let mut state = EngineState::new();
    let out = send(
        &mut state,
        UiToEngine::ChooseVentFunction {
            function: VentFunction::InsufflationInterne,
        },
    );
    assert!(matches!(
        &out[0],
        EngineToUi::VentFunctionChosen { color, label, .. }
            if color == "#ff9900" && label == "En orange, insufflation de l'air neuf"
    ));

    let out = draw(&mut state, Tool::Vent, (0.0, 0.0), (30.0, 2.0));
    let request = attribute_request(&out);
    let id = pending_id(&request);
    assert!(state.engine.building.floors[0].vents.is_empty());

    let out = send(
        &mut state,
        UiToEngine::SubmitVentAttributes {
            pending_id: id,
            attributes: VentAttributes {
                name: "Chambre".into(),
                diameter: "douze".into(),
                flow_rate: "60".into(),
            },
        },
    );
    assert_eq!(alerts(&out), vec!["Entrée invalide"]);
    assert_eq!(attribute_request(&out), request);

    let out = send(
        &mut state,
        UiToEngine::SubmitVentAttributes {
            pending_id: id,
            attributes: VentAttributes {
                name: "Chambre".into(),
                diameter: "125".into(),
                flow_rate: "60".into(),
            },
        },
    );
    assert!(alerts(&out).is_empty());
    assert!(matches!(
        &out[0],
        EngineToUi::EntityDrawn { entity: Entity::Vent(v), .. } if v.name == "Chambre"
    ));
    assert_eq!(summary(&out).total_inflow, 60.0);
}

#[test]
fn cancelled_vent_leaves_nothing() {
    let mut state = EngineState::new();
    send(
        &mut state,
        UiToEngine::ChooseVentFunction {
            function: VentFunction::ExtractionInterne,
        },
    );
    let out = draw(&mut state, Tool::Vent, (0.0, 0.0), (20.0, 0.0));
    let id = pending_id(&attribute_request(&out));

    let out = send(&mut state, UiToEngine::CancelAttributes { pending_id: id });
    assert!(matches!(out.as_slice(), [EngineToUi::PreviewCleared]));
    assert!(state.engine.building.floors[0].vents.is_empty());

    let out = send(&mut state, UiToEngine::CancelAttributes { pending_id: id });
    assert_eq!(alerts(&out), vec!["Placement introuvable"]);
}

#[test]
fn ventilation_balance_across_floors() {
    let mut state = EngineState::new();
    place_vent(&mut state, VentFunction::InsufflationInterne, 0.0, "200");
    send(&mut state, UiToEngine::NewFloor);
    let out = place_vent(&mut state, VentFunction::ExtractionInterne, 10.0, "150");

    let s = summary(&out);
    assert_eq!(s.vents.len(), 2);
    assert_relative_eq!(s.balance, 50.0);
    assert_eq!(s.pressure, floor_engine::Pressure::Surpressure);
    assert!(out.iter().any(|u| matches!(
        u,
        EngineToUi::VentilationSummary { pressure_label, .. } if pressure_label == "surpression"
    )));
    assert_eq!(s.count(VentFunction::AdmissionExterne), 0);
}

// ── Plenum ────────────────────────────────────────────────────────────────

#[test]
fn plenum_drag_and_singleton() {
    let mut state = EngineState::new();
    select_tool(&mut state, Tool::Plenum);
    click(&mut state, 0.0, 0.0);

    let out = send(&mut state, UiToEngine::PointerMove { x: 40.0, y: 80.0 });
    match out.as_slice() {
        [EngineToUi::Preview {
            preview: Preview::Rect { area_m2, .. },
        }] => assert_relative_eq!(*area_m2, 8.0, epsilon = 1e-9),
        other => panic!("unexpected {other:?}"),
    }
    send(&mut state, UiToEngine::CancelPlacement);

    let out = place_plenum(&mut state);
    assert!(matches!(
        &out[0],
        EngineToUi::EntityDrawn { entity: Entity::Plenum(p), .. } if p.max_flow == 1000
    ));
    assert_eq!(summary(&out).plenums.len(), 1);

    send(&mut state, UiToEngine::NewFloor);
    let out = send(&mut state, UiToEngine::SelectTool { tool: Tool::Plenum });
    assert_eq!(alerts(&out), vec!["Plénum déjà présent"]);
    assert!(matches!(
        out.last(),
        Some(EngineToUi::ToolSelected { tool: Tool::Select })
    ));
}

#[test]
fn invalid_max_flow_keeps_the_plenum_pending() {
    let mut state = EngineState::new();
    select_tool(&mut state, Tool::Plenum);
    click(&mut state, 0.0, 0.0);
    let out = send(&mut state, UiToEngine::PointerUp { x: 20.0, y: 20.0 });
    let id = pending_id(&attribute_request(&out));

    let out = send(
        &mut state,
        UiToEngine::SubmitPlenumAttributes {
            pending_id: id,
            attributes: PlenumAttributes {
                max_flow: "-3".into(),
                plenum_type: None,
            },
        },
    );
    assert_eq!(alerts(&out), vec!["Entrée invalide"]);
    assert_eq!(pending_id(&attribute_request(&out)), id);
    assert!(state.engine.building.floors[0].plenum.is_none());
}

// ── Floors ────────────────────────────────────────────────────────────────

#[test]
fn new_floor_selects_it_and_shows_the_floor_below() {
    let mut state = EngineState::new();
    draw(&mut state, Tool::Wall, (0.0, 0.0), (100.0, 0.0));

    let out = send(&mut state, UiToEngine::NewFloor);
    assert!(out.iter().any(|u| matches!(
        u,
        EngineToUi::FloorListChanged { names, selected_floor_index: Some(1) }
            if names == &["Étage 0".to_string(), "Étage 1".to_string()]
    )));
    assert!(out.iter().any(|u| matches!(
        u,
        EngineToUi::FloorSelected { floor_index: 1, entities, .. } if entities.is_empty()
    )));
    assert!(out.iter().any(|u| matches!(
        u,
        EngineToUi::OnionSkin { skin } if skin.items.len() == 1
    )));
}

#[test]
fn last_floor_cannot_be_deleted() {
    let mut state = EngineState::new();
    let out = send(&mut state, UiToEngine::DeleteFloor { index: 0 });
    assert_eq!(alerts(&out), vec!["Impossible de supprimer l'étage"]);
    assert_eq!(out.len(), 1);
    assert_eq!(state.engine.building.floors.len(), 1);
}

#[test]
fn rename_and_height_validation() {
    let mut state = EngineState::new();
    let out = send(
        &mut state,
        UiToEngine::RenameFloor {
            index: 0,
            name: "   ".into(),
        },
    );
    assert_eq!(alerts(&out), vec!["Nom d'étage vide"]);

    let out = send(
        &mut state,
        UiToEngine::SetFloorHeight {
            index: 0,
            height: "haut".into(),
        },
    );
    assert_eq!(alerts(&out), vec!["Hauteur invalide"]);
    assert_eq!(state.engine.building.floors[0].height, 2.5);

    let out = send(
        &mut state,
        UiToEngine::SetFloorHeight {
            index: 0,
            height: "3.1".into(),
        },
    );
    assert!(matches!(
        out.as_slice(),
        [EngineToUi::HeightChanged { floor_index: 0, height }] if *height == 3.1
    ));
}

#[test]
fn duplicate_floor_copies_everything_but_the_plenum() {
    let mut state = EngineState::new();
    draw(&mut state, Tool::Wall, (0.0, 0.0), (100.0, 0.0));
    place_plenum(&mut state);

    let out = send(&mut state, UiToEngine::DuplicateFloor { index: 0 });
    assert!(out.iter().any(|u| matches!(
        u,
        EngineToUi::FloorSelected { floor_index: 1, floor_name, entities, .. }
            if floor_name == "Étage 0 (copie)" && entities.len() == 1
    )));
    assert_eq!(summary(&out).plenums.len(), 1);
}

// ── Eraser ────────────────────────────────────────────────────────────────

#[test]
fn eraser_removes_a_vent_and_updates_the_summary() {
    let mut state = EngineState::new();
    place_vent(&mut state, VentFunction::ExtractionExterne, 0.0, "80");

    let out = send(
        &mut state,
        UiToEngine::DeleteEntity {
            kind: EntityKind::Vent,
            start: Point::new(3.0, 4.0),
            end: Point::new(0.0, 0.0),
        },
    );
    assert!(matches!(&out[0], EngineToUi::EntityRemoved { removed: 1, .. }));
    assert_eq!(summary(&out).total_outflow, 0.0);
}

#[test]
fn eraser_miss_reports_zero() {
    let mut state = EngineState::new();
    draw(&mut state, Tool::Wall, (0.0, 0.0), (100.0, 0.0));
    let out = send(
        &mut state,
        UiToEngine::DeleteEntity {
            kind: EntityKind::Wall,
            start: Point::new(0.0, 0.0),
            end: Point::new(90.0, 0.0),
        },
    );
    assert!(matches!(out.as_slice(), [EngineToUi::EntityRemoved { removed: 0, .. }]));
    assert_eq!(state.engine.building.floors[0].walls.len(), 1);
}

// ── Project ───────────────────────────────────────────────────────────────

#[test]
fn save_then_load_restores_the_building() {
    let mut state = EngineState::new();
    draw(&mut state, Tool::Wall, (0.0, 0.0), (100.0, 0.0));
    place_vent(&mut state, VentFunction::AdmissionExterne, 30.0, "45");
    send(&mut state, UiToEngine::NewFloor);
    place_plenum(&mut state);

    let out = send(&mut state, UiToEngine::SaveProject);
    let json_data = match out.as_slice() {
        [EngineToUi::SaveReady { json_data }] => json_data.clone(),
        other => panic!("unexpected {other:?}"),
    };

    let mut restored = EngineState::new();
    let out = send(&mut restored, UiToEngine::LoadProject { data: json_data });
    assert!(alerts(&out).is_empty());
    assert_eq!(restored.engine.building.floors, state.engine.building.floors);
    assert_eq!(summary(&out).total_inflow, 45.0);
    assert!(out.iter().any(
        |u| matches!(u, EngineToUi::FloorListChanged { names, .. } if names.len() == 2)
    ));
}

#[test]
fn failed_load_leaves_the_building_alone() {
    let mut state = EngineState::new();
    draw(&mut state, Tool::Wall, (0.0, 0.0), (100.0, 0.0));
    let before = state.engine.building.clone();

    for data in ["not json", "[]"] {
        let out = send(&mut state, UiToEngine::LoadProject { data: data.into() });
        assert_eq!(alerts(&out).len(), 1);
        assert_eq!(out.len(), 1);
    }
    assert_eq!(state.engine.building, before);
}

#[test]
fn reset_returns_to_one_empty_floor() {
    let mut state = EngineState::new();
    draw(&mut state, Tool::Wall, (0.0, 0.0), (100.0, 0.0));
    send(&mut state, UiToEngine::NewFloor);

    let out = send(&mut state, UiToEngine::Reset);
    assert!(out.iter().any(|u| matches!(u, EngineToUi::ToolSelected { tool: Tool::Select })));
    assert!(out.iter().any(|u| matches!(
        u,
        EngineToUi::FloorSelected { floor_index: 0, entities, .. } if entities.is_empty()
    )));
    assert_eq!(summary(&out).vents.len(), 0);
    assert_eq!(state.engine.building.floors.len(), 1);
}
