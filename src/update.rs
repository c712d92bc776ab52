// src/update.rs
//
use crate::messages::{Command, Message};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new(); // Collect commands to return

    // ---------------------------------------------------------------
    // Delegate to domain-specific reducers first.  When one of them
    // consumes the message we can bail out early.
    // ---------------------------------------------------------------

    if crate::reducers::project::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::diagram::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::layout::update(state, &msg, &mut commands) {
        return commands;
    }

    match msg {
        Message::SetSelectionTitle(title) => {
            state.session.selection_title = title;
        }
        Message::CommandFailed { command, error } => {
            log_error!("[host] {} failed: {}", command, error);
            state.last_error = Some(error.clone());
            commands.push(Command::NotifyError(format!("{}: {}", command, error)));
        }
        other => {
            log_warn!("Unhandled message: {:?}", other);
        }
    }

    commands
}
