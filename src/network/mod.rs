// Host command bridge and its production transport
pub mod bridge;
pub mod commands;
pub mod tauri_host;

// Re-export commonly used items
pub use bridge::{to_args, CommandArgs, CommandBridge, CommandError, CommandHost, HostFailure};
pub use tauri_host::TauriHost;

/// Bridge wired to the web-view shell.
pub fn host_bridge() -> CommandBridge<TauriHost> {
    CommandBridge::new(TauriHost)
}
