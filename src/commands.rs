//! Tauri Command Wrappers
//!
//! Frontend bindings to the host's resource commands.

use resource_tree::{MoveRequest, ResourceRecord};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

// ========================
// Resource Commands
// ========================

pub async fn list_resources() -> Result<Vec<ResourceRecord>, String> {
    let result = invoke("list_resources", JsValue::NULL).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// `MoveRequest` already serializes to the camelCase argument names the host expects
pub async fn move_resource(request: &MoveRequest) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(request).map_err(|e| e.to_string())?;
    invoke("move_resource", js_args).await.map_err(js_error)?;
    Ok(())
}

// ========================
// Permission Commands
// ========================

pub async fn list_permissions() -> Result<Vec<String>, String> {
    let result = invoke("list_permissions", JsValue::NULL).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
