//! Diagram domain reducer: mounted container and context menu.

use crate::messages::{Command, Message};
use crate::models::ContextMenuState;
use crate::state::AppState;

fn render(state: &AppState, commands: &mut Vec<Command>) {
    if let Some(container_id) = &state.diagram_container {
        commands.push(Command::RenderContextMenu {
            container_id: container_id.clone(),
            menu: state.context_menu.clone(),
        });
    }
}

/// Handles diagram-related messages. Returns true if the message was handled.
pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    match msg {
        Message::DiagramMounted { container_id } => {
            state.diagram_container = Some(container_id.clone());
            state.context_menu = ContextMenuState::default();
            true
        }
        Message::DiagramUnmounted => {
            render_hidden_then_forget(state, commands);
            true
        }
        Message::OpenContextMenu(menu) => {
            if !menu.visible || menu.target.is_none() {
                // Nothing identifiable under the cursor.
                if state.context_menu.visible {
                    state.context_menu = ContextMenuState::default();
                    render(state, commands);
                }
                return true;
            }
            state.context_menu = menu.clone();
            render(state, commands);
            true
        }
        Message::CloseContextMenu => {
            if state.context_menu.visible {
                state.context_menu = ContextMenuState::default();
                render(state, commands);
            }
            true
        }
        _ => false,
    }
}

fn render_hidden_then_forget(state: &mut AppState, commands: &mut Vec<Command>) {
    if state.context_menu.visible {
        state.context_menu = ContextMenuState::default();
        render(state, commands);
    }
    state.diagram_container = None;
}
