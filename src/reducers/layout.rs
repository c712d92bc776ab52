//! Layout domain reducer: sidebars and tool panels.

use crate::layout::SidebarId;
use crate::messages::{Command, Message};
use crate::state::AppState;

fn persist(state: &AppState, sidebar: SidebarId, commands: &mut Vec<Command>) {
    commands.push(Command::PersistSidebar {
        sidebar,
        saved: state.layout.sidebar(sidebar).to_persisted(),
    });
}

/// Handles layout messages. Returns true if the message was handled.
pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    match msg {
        Message::OpenSidebar(id) => {
            state.layout.sidebar_mut(*id).open();
            persist(state, *id, commands);
            true
        }
        Message::CloseSidebar(id) => {
            state.layout.sidebar_mut(*id).close();
            persist(state, *id, commands);
            true
        }
        Message::SetActivePanel { sidebar, panel } => {
            match state.layout.sidebar_mut(*sidebar).set_active_item(panel) {
                Ok(()) => persist(state, *sidebar, commands),
                Err(e) => {
                    log_warn!("[layout] {}", e);
                    commands.push(Command::NotifyError(e.to_string()));
                }
            }
            true
        }
        Message::ResizeSidebar { sidebar, size } => {
            state.layout.sidebar_mut(*sidebar).set_size(*size);
            persist(state, *sidebar, commands);
            true
        }
        Message::RestoreSidebar { sidebar, saved } => {
            state.layout.sidebar_mut(*sidebar).restore(saved);
            true
        }
        _ => false,
    }
}
