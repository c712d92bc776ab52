//! Runs the side effects requested by the reducers.
//!
//! Host calls are spawned on the browser's micro-task queue and report back
//! through `dispatch_global_message`; nothing here touches `APP_STATE`
//! directly.

use wasm_bindgen_futures::spawn_local;

use crate::messages::{Command, Message};
use crate::models::Project;
use crate::network::{host_bridge, CommandBridge, CommandError, CommandHost};
use crate::state::dispatch_global_message;
use crate::storage::{active_store, save_projects, save_sidebar};

pub fn execute(cmd: Command) {
    match cmd {
        Command::LoadProject => {
            spawn_local(async move {
                let msg = match host_bridge().load_project().await {
                    Ok(project) => Message::ProjectLoaded(project),
                    Err(e) => load_failed(e),
                };
                dispatch_global_message(msg);
            });
        }
        Command::ActivateProject(project) => {
            spawn_local(async move {
                dispatch_global_message(activate_project(&host_bridge(), project).await);
            });
        }
        Command::PersistProjects { current, recent } => {
            if let Err(e) = save_projects(active_store().as_ref(), current.as_ref(), &recent) {
                log_warn!("[storage] failed to save projects: {}", e);
            }
        }
        Command::PersistSidebar { sidebar, saved } => {
            if let Err(e) = save_sidebar(active_store().as_ref(), sidebar, &saved) {
                log_warn!("[storage] failed to save {:?}: {}", sidebar, e);
            }
        }
        Command::SetZmqUrl(url) => {
            spawn_local(async move {
                if let Err(e) = host_bridge().set_zmq_url(&url).await {
                    dispatch_global_message(command_failed(e));
                }
            });
        }
        Command::SetZmqSubscription(subscription) => {
            spawn_local(async move {
                if let Err(e) = host_bridge().set_zmq_subscription(&subscription).await {
                    dispatch_global_message(command_failed(e));
                }
            });
        }
        Command::RenderContextMenu { container_id, menu } => {
            if let Err(e) = crate::components::context_menu::render(&container_id, &menu) {
                log_error!("Failed to render context menu: {:?}", e);
            }
        }
        Command::NotifyError(message) => crate::toast::error(&message),
    }
}

/// Point the host at `project` by loading its substations.  The host reads
/// the project configuration itself.
async fn activate_project<H: CommandHost>(bridge: &CommandBridge<H>, project: Project) -> Message {
    match bridge.load_substations().await {
        Ok(_) => Message::ProjectLoaded(project),
        Err(e) => load_failed(e),
    }
}

// Host text when the host rejected, full description otherwise.
fn cause_text(err: &CommandError) -> String {
    match err.host_failure() {
        Some(failure) => failure.message(),
        None => err.message(),
    }
}

fn load_failed(err: CommandError) -> Message {
    Message::ProjectLoadFailed {
        command: err.command().to_string(),
        error: cause_text(&err),
    }
}

fn command_failed(err: CommandError) -> Message {
    Message::CommandFailed {
        command: err.command().to_string(),
        error: cause_text(&err),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::network::bridge::test_host::ScriptedHost;

    #[test]
    fn configured_project_only_loads_substations() {
        let host = ScriptedHost::default().answer("load_substations", json!({"status": "ok"}));
        let bridge = CommandBridge::new(host);
        let project = Project::new("North", "/data/north", Some("/data/north/cfg.toml".into()));

        let msg = block_on(activate_project(&bridge, project));

        assert!(matches!(msg, Message::ProjectLoaded(p) if p.name == "North"));
        let calls: Vec<String> = bridge.host().calls.borrow().iter().map(|(c, _)| c.clone()).collect();
        assert_eq!(calls, vec!["load_substations"]);
    }

    #[test]
    fn failed_substations_fail_the_switch() {
        let host = ScriptedHost::default().reject("load_substations", json!("no network loaded"));
        let bridge = CommandBridge::new(host);
        let project = Project::new("North", "/data/north", Some("/x.toml".into()));

        let msg = block_on(activate_project(&bridge, project));

        assert!(matches!(
            msg,
            Message::ProjectLoadFailed { command, error }
                if command == "load_substations" && error == "no network loaded"
        ));
        assert_eq!(bridge.host().calls.borrow().len(), 1);
    }

    #[test]
    fn project_without_config_only_loads_substations() {
        let host = ScriptedHost::default().answer("load_substations", json!({"status": "ok"}));
        let bridge = CommandBridge::new(host);

        let msg = block_on(activate_project(&bridge, Project::new("S", "/s", None)));

        assert!(matches!(msg, Message::ProjectLoaded(_)));
    }
}
