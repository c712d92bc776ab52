//! Production [`CommandHost`]: the web-view shell's global `invoke`.

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::bridge::{CommandArgs, CommandHost, HostFailure};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"], js_name = invoke)]
    async fn shell_invoke(command: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Host reached through `window.__TAURI__.core.invoke`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TauriHost;

impl CommandHost for TauriHost {
    async fn invoke(&self, command: &str, args: Option<&CommandArgs>) -> Result<Value, HostFailure> {
        let js_args = match args {
            Some(map) => map
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(|e| HostFailure::from_message(format!("cannot encode arguments: {}", e)))?,
            None => JsValue::UNDEFINED,
        };

        match shell_invoke(command, js_args).await {
            Ok(value) => Ok(js_to_json(value)),
            Err(rejection) => Err(failure_from_js(rejection)),
        }
    }
}

fn js_to_json(value: JsValue) -> Value {
    if value.is_undefined() || value.is_null() {
        return Value::Null;
    }
    serde_wasm_bindgen::from_value(value.clone()).unwrap_or_else(|_| {
        value
            .as_string()
            .map(Value::String)
            .unwrap_or(Value::Null)
    })
}

fn failure_from_js(rejection: JsValue) -> HostFailure {
    if let Some(message) = rejection.as_string() {
        return HostFailure::from_message(message);
    }
    if let Some(error) = rejection.dyn_ref::<js_sys::Error>() {
        return HostFailure::from_message(String::from(error.message()));
    }
    match serde_wasm_bindgen::from_value::<Value>(rejection.clone()) {
        Ok(payload) => HostFailure::new(payload),
        Err(_) => HostFailure::from_message(format!("{:?}", rejection)),
    }
}
