use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

#[macro_use]
mod macros;

pub mod constants;
pub mod diagram;
pub mod layout;
pub mod models;
pub mod network;
pub mod store;

mod command_executors;
mod components;
mod dom_utils;
mod messages; // Message / Command enums
mod reducers;
mod settings;
mod state;
mod storage;
mod toast;
mod update; // Root reducer
mod utils;
mod views;

use crate::layout::SidebarId;
use crate::messages::Message;
use crate::models::{Project, ProxyConfig};
use crate::network::{host_bridge, CommandArgs, CommandError};
use crate::state::dispatch_global_message;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let store = storage::active_store();
    let store = store.as_ref();

    // Persisted session first so the title bar never starts empty
    dispatch_global_message(Message::RestoreSession {
        current: storage::load_current_project(store),
        recent: storage::load_recent_projects(store),
    });
    for sidebar in SidebarId::ALL {
        if let Some(saved) = storage::load_sidebar(store, sidebar) {
            dispatch_global_message(Message::RestoreSidebar { sidebar, saved });
        }
    }

    views::install(&state::current_session());

    for cmd in settings::initialize(store) {
        command_executors::execute(cmd);
    }

    // Reopens the restored project, or asks the host for one
    dispatch_global_message(Message::LoadProject);
    Ok(())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn report(err: CommandError) -> JsValue {
    toast::command_failed(&err);
    err.into()
}

fn sidebar_id(name: &str) -> Result<SidebarId, JsValue> {
    SidebarId::from_name(name).ok_or_else(|| JsValue::from_str(&format!("unknown sidebar '{}'", name)))
}

// ---------------- Diagram ----------------

/// Wire the SVG diagram rendered inside `#container_id`.
#[wasm_bindgen]
pub fn mount_diagram(container_id: &str) -> Result<(), JsValue> {
    diagram::events::mount(container_id)
}

#[wasm_bindgen]
pub fn unmount_diagram() {
    diagram::events::unmount();
}

/// Show breaker `element_id` as open (`true`) or closed (`false`).  Returns
/// false when no such element is rendered.
#[wasm_bindgen]
pub fn set_breaker_state(container_id: &str, element_id: &str, open: bool) -> bool {
    diagram::DomScope::by_container_id(container_id)
        .and_then(|scope| diagram::set_switch_state(&scope, element_id, open))
        .is_some()
}

#[wasm_bindgen]
pub fn set_selection_title(title: String) {
    dispatch_global_message(Message::SetSelectionTitle(title));
}

// ---------------- Projects ----------------

#[wasm_bindgen]
pub fn reload_project() {
    dispatch_global_message(Message::LoadProject);
}

#[wasm_bindgen]
pub fn switch_project(name: String, path: String, config_path: Option<String>) {
    dispatch_global_message(Message::SwitchProject(Project::new(name, path, config_path)));
}

#[wasm_bindgen]
pub fn close_project() {
    dispatch_global_message(Message::CloseProject);
}

#[wasm_bindgen]
pub fn remove_recent_project(path: String) {
    dispatch_global_message(Message::RemoveRecentProject { path });
}

#[wasm_bindgen]
pub fn clear_recent_projects() {
    dispatch_global_message(Message::ClearRecentProjects);
}

// ---------------- Layout ----------------

#[wasm_bindgen]
pub fn open_sidebar(sidebar: &str) -> Result<(), JsValue> {
    dispatch_global_message(Message::OpenSidebar(sidebar_id(sidebar)?));
    Ok(())
}

#[wasm_bindgen]
pub fn close_sidebar(sidebar: &str) -> Result<(), JsValue> {
    dispatch_global_message(Message::CloseSidebar(sidebar_id(sidebar)?));
    Ok(())
}

#[wasm_bindgen]
pub fn set_active_panel(sidebar: &str, panel: String) -> Result<(), JsValue> {
    dispatch_global_message(Message::SetActivePanel {
        sidebar: sidebar_id(sidebar)?,
        panel,
    });
    Ok(())
}

#[wasm_bindgen]
pub fn resize_sidebar(sidebar: &str, size: f64) -> Result<(), JsValue> {
    dispatch_global_message(Message::ResizeSidebar {
        sidebar: sidebar_id(sidebar)?,
        size,
    });
    Ok(())
}

// ---------------- Settings ----------------

#[wasm_bindgen]
pub fn get_setting(key: &str) -> Result<JsValue, JsValue> {
    match settings::read_setting(storage::active_store().as_ref(), key) {
        Some(value) => to_js(&value),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Persist a setting and run its handler.
#[wasm_bindgen]
pub fn update_setting(key: &str, value: JsValue) -> Result<(), JsValue> {
    let value: Value = serde_wasm_bindgen::from_value(value)?;
    let commands = settings::write_setting(storage::active_store().as_ref(), key, &value)
        .map_err(|e| JsValue::from_str(&e))?;
    for cmd in commands {
        command_executors::execute(cmd);
    }
    Ok(())
}

// ---------------- Host commands ----------------

/// Untyped access to any host command.  Failures are shown as a toast and
/// rejected with an `Error`.
#[wasm_bindgen]
pub async fn invoke_command(command: String, args: JsValue) -> Result<JsValue, JsValue> {
    let args: Option<CommandArgs> = if args.is_undefined() || args.is_null() {
        None
    } else {
        Some(serde_wasm_bindgen::from_value(args)?)
    };
    let value = host_bridge().invoke_raw(&command, args).await.map_err(report)?;
    to_js(&value)
}

#[wasm_bindgen]
pub async fn load_network_file(path: String) -> Result<JsValue, JsValue> {
    let status = host_bridge().load_network_file(&path).await.map_err(report)?;
    to_js(&status)
}

#[wasm_bindgen]
pub async fn upload_network_file(file_name: String, content: String) -> Result<JsValue, JsValue> {
    let status = host_bridge()
        .upload_network_file(&file_name, &content)
        .await
        .map_err(report)?;
    to_js(&status)
}

#[wasm_bindgen]
pub async fn get_substations() -> Result<JsValue, JsValue> {
    let substations = host_bridge().get_substations().await.map_err(report)?;
    to_js(&substations)
}

#[wasm_bindgen]
pub async fn get_single_line_diagram(element_id: String) -> Result<JsValue, JsValue> {
    let diagram = host_bridge().get_single_line_diagram(&element_id).await.map_err(report)?;
    to_js(&diagram)
}

#[wasm_bindgen]
pub async fn init_database_project(db_path: Option<String>) -> Result<JsValue, JsValue> {
    let path = host_bridge()
        .init_database_project(db_path.as_deref())
        .await
        .map_err(report)?;
    Ok(JsValue::from_str(&path))
}

#[wasm_bindgen]
pub async fn query_project(query: String) -> Result<JsValue, JsValue> {
    let resp = host_bridge().query_project(&query).await.map_err(report)?;
    to_js(&resp)
}

#[wasm_bindgen]
pub async fn load_outputs() -> Result<JsValue, JsValue> {
    let status = host_bridge().load_outputs().await.map_err(report)?;
    to_js(&status)
}

#[wasm_bindgen]
pub async fn get_server_url() -> Result<JsValue, JsValue> {
    let resp = host_bridge().get_server_url().await.map_err(report)?;
    to_js(&resp)
}

#[wasm_bindgen]
pub async fn set_server_url(url: String) -> Result<JsValue, JsValue> {
    let resp = host_bridge().set_server_url(&url).await.map_err(report)?;
    to_js(&resp)
}

#[wasm_bindgen]
pub async fn clear_server_url() -> Result<JsValue, JsValue> {
    let resp = host_bridge().clear_server_url().await.map_err(report)?;
    to_js(&resp)
}

/// `proxy` is `{ url, no_proxy, username?, password? }`.
#[wasm_bindgen]
pub async fn load_client(proxy: JsValue) -> Result<JsValue, JsValue> {
    let proxy: ProxyConfig = serde_wasm_bindgen::from_value(proxy)?;
    let resp = host_bridge().load_client(&proxy).await.map_err(report)?;
    to_js(&resp)
}

#[wasm_bindgen]
pub async fn clear_proxy() -> Result<JsValue, JsValue> {
    let resp = host_bridge().clear_proxy().await.map_err(report)?;
    to_js(&resp)
}

#[wasm_bindgen]
pub async fn get_zmq_url() -> Result<JsValue, JsValue> {
    let resp = host_bridge().get_zmq_url().await.map_err(report)?;
    to_js(&resp)
}

#[wasm_bindgen]
pub async fn create_new_project(name: String, path: String, config_path: Option<String>) -> Result<(), JsValue> {
    let params = models::CreateProjectParams { name, path, config_path };
    let project = host_bridge().create_new_project(&params).await.map_err(report)?;
    toast::success(&format!("Project {} created", project.name));
    dispatch_global_message(Message::SwitchProject(project));
    Ok(())
}
