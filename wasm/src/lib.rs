//! Fitware WASM Module
//!
//! Browser bindings for the translation helpers in `fitware-shared`, so the
//! UI formats and normalizes exactly like the console does. JSON crosses the
//! boundary as strings.

use fitware_shared::filter::{filter_clients, filter_exercises};
use fitware_shared::{code_to_label, label_to_status, normalize_clients, ClientRecord, Exercise};
use wasm_bindgen::prelude::*;

/// Status label picked in a form to the code the API expects
#[wasm_bindgen]
pub fn session_status_to_code(label: Option<String>) -> Option<String> {
    label_to_status(label.as_deref()).map(|status| status.code().to_string())
}

/// Status code from the API to the label to display
#[wasm_bindgen]
pub fn session_status_to_label(code: Option<String>) -> Option<String> {
    code_to_label(code.as_deref())
}

/// Server timestamp to a `datetime-local` input value
#[wasm_bindgen]
pub fn iso_to_local_input(iso: Option<String>) -> Option<String> {
    fitware_shared::datetime::iso_to_local_input(iso.as_deref())
}

/// Normalize one client record, nested or legacy flattened
#[wasm_bindgen]
pub fn normalize_client_json(json: &str) -> Result<String, JsValue> {
    normalize_one(json).map_err(to_js_error)
}

/// Normalize a client list and keep the entries matching `term`
#[wasm_bindgen]
pub fn filter_clients_json(json: &str, term: &str) -> Result<String, JsValue> {
    clients_matching(json, term).map_err(to_js_error)
}

/// Keep the exercises whose name or type matches `term`
#[wasm_bindgen]
pub fn filter_exercises_json(json: &str, term: &str) -> Result<String, JsValue> {
    exercises_matching(json, term).map_err(to_js_error)
}

fn to_js_error(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn normalize_one(json: &str) -> serde_json::Result<String> {
    let record: ClientRecord = serde_json::from_str(json)?;
    serde_json::to_string(&fitware_shared::normalize_client(record))
}

fn clients_matching(json: &str, term: &str) -> serde_json::Result<String> {
    let records: Vec<ClientRecord> = serde_json::from_str(json)?;
    let clients = normalize_clients(records);
    serde_json::to_string(&filter_clients(&clients, term))
}

fn exercises_matching(json: &str, term: &str) -> serde_json::Result<String> {
    let exercises: Vec<Exercise> = serde_json::from_str(json)?;
    serde_json::to_string(&filter_exercises(&exercises, term))
}
