//! WASM entry points for the web worker.
//!
//! This module is only compiled for the `wasm32` target. It provides the
//! `#[wasm_bindgen]` functions that JavaScript calls from the web worker.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use plan_types::PlanConfig;

use crate::dispatch::{alert, dispatch};
use crate::engine_state::{BridgeError, EngineState};
use crate::messages::{EngineToUi, UiToEngine};

// Global engine state, single-threaded in the web worker.
thread_local! {
    static ENGINE_STATE: RefCell<Option<EngineState>> = const { RefCell::new(None) };
}

/// Initialize the engine with default settings. Call once before anything else.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    install(EngineState::new());
}

/// Initialize the engine with a partial JSON `PlanConfig`.
///
/// Returns an empty string on success, or the JSON alert list on failure.
#[wasm_bindgen]
pub fn init_with_config(config_json: &str) -> String {
    console_error_panic_hook::set_once();
    match PlanConfig::from_json(config_json) {
        Ok(config) => {
            install(EngineState::with_config(config));
            String::new()
        }
        Err(e) => to_json(&[alert(&BridgeError::Serialization {
            reason: e.to_string(),
        })]),
    }
}

/// Process a JSON `UiToEngine` intent and return the JSON list of
/// `EngineToUi` updates it produced.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    let updates = ENGINE_STATE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(state) = slot.as_mut() else {
            return vec![not_initialized()];
        };
        match serde_json::from_str::<UiToEngine>(json_input) {
            Ok(msg) => dispatch(state, msg),
            Err(e) => vec![alert(&BridgeError::Serialization {
                reason: e.to_string(),
            })],
        }
    });
    to_json(&updates)
}

/// The whole building as JSON, or `null` before `init`.
#[wasm_bindgen]
pub fn get_building_json() -> String {
    ENGINE_STATE.with(|cell| match cell.borrow().as_ref() {
        Some(state) => serde_json::to_string(&state.engine.building).unwrap_or_default(),
        None => "null".to_string(),
    })
}

/// The current ventilation summary as JSON, or `null` before `init`.
#[wasm_bindgen]
pub fn get_ventilation_summary_json() -> String {
    ENGINE_STATE.with(|cell| match cell.borrow().as_ref() {
        Some(state) => {
            serde_json::to_string(&state.engine.ventilation_summary()).unwrap_or_default()
        }
        None => "null".to_string(),
    })
}

fn install(state: EngineState) {
    ENGINE_STATE.with(|cell| *cell.borrow_mut() = Some(state));
}

fn not_initialized() -> EngineToUi {
    EngineToUi::Alert {
        title: "Moteur non initialisé".to_string(),
        message: "Call init() first.".to_string(),
    }
}

fn to_json(updates: &[EngineToUi]) -> String {
    serde_json::to_string(updates).unwrap_or_else(|e| {
        format!(
            r#"[{{"type":"Alert","title":"Erreur interne","message":"Serialization failed: {}"}}]"#,
            e
        )
    })
}
