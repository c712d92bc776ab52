//! Project domain reducer: lifecycle of the current project and the list of
//! recently opened ones.

use crate::constants::MAX_RECENT_PROJECTS;
use crate::messages::{Command, Message};
use crate::models::Project;
use crate::state::{AppState, ProjectStatus};

/// Put `project` at the head of `recent`, replacing any entry with the same
/// path.  The list stays sorted by last access and capped.
pub fn remember(recent: &mut Vec<Project>, project: &Project) {
    recent.retain(|p| p.path != project.path);
    recent.insert(0, project.clone());
    normalize(recent);
}

/// Dedupe by path (first occurrence wins), sort most recent first, cap.
pub fn normalize(recent: &mut Vec<Project>) {
    let mut seen = std::collections::HashSet::new();
    recent.retain(|p| seen.insert(p.path.clone()));
    recent.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed));
    recent.truncate(MAX_RECENT_PROJECTS);
}

fn persist(state: &AppState, commands: &mut Vec<Command>) {
    commands.push(Command::PersistProjects {
        current: state.session.current_project().cloned(),
        recent: state.session.recent_projects.clone(),
    });
}

/// Handles project-related messages. Returns true if the message was handled.
pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    match msg {
        Message::LoadProject => {
            if state.session.project.is_loading() {
                log_warn!("[project] load already in progress, ignoring reload");
                return true;
            }
            state.session.project = ProjectStatus::Loading;
            match state.restored_project.take() {
                Some(project) => {
                    log_info!("[project] reopening {}", project.path);
                    commands.push(Command::ActivateProject(project));
                }
                None => commands.push(Command::LoadProject),
            }
            true
        }
        Message::SwitchProject(project) => {
            if state.session.project.is_loading() {
                log_warn!("[project] cannot switch to {} while loading", project.path);
                return true;
            }
            state.restored_project = None;
            state.session.project = ProjectStatus::Loading;
            commands.push(Command::ActivateProject(project.clone()));
            true
        }
        Message::ProjectLoaded(project) => {
            if !state.session.project.is_loading() {
                // Result of a load that was superseded (closed meanwhile).
                log_warn!(
                    "[project] ignoring {} in state {}",
                    project.path,
                    state.session.project.label()
                );
                return true;
            }
            let project = project.touched();
            log_info!("[project] loaded {} ({})", project.name, project.path);
            remember(&mut state.session.recent_projects, &project);
            state.session.project = ProjectStatus::Loaded(project);
            state.last_error = None;
            persist(state, commands);
            true
        }
        Message::ProjectLoadFailed { command, error } => {
            if !state.session.project.is_loading() {
                log_warn!("[project] stray failure of {}: {}", command, error);
                return true;
            }
            log_error!("[project] {} failed: {}", command, error);
            state.session.project = ProjectStatus::Unloaded;
            state.last_error = Some(error.clone());
            commands.push(Command::NotifyError(format!("Failed to load project: {}", error)));
            persist(state, commands);
            true
        }
        Message::CloseProject => {
            state.restored_project = None;
            if state.session.project == ProjectStatus::Unloaded {
                log_warn!("[project] nothing to close");
                return true;
            }
            state.session.project = ProjectStatus::Unloaded;
            persist(state, commands);
            true
        }
        Message::RestoreSession { current, recent } => {
            if state.session.project != ProjectStatus::Unloaded {
                log_warn!("[project] session already started, not restoring");
                return true;
            }
            let mut recent = recent.clone();
            normalize(&mut recent);
            state.session.recent_projects = recent;
            // Only a load may make it current.
            state.restored_project = current.clone();
            true
        }
        Message::RemoveRecentProject { path } => {
            state.session.recent_projects.retain(|p| &p.path != path);
            persist(state, commands);
            true
        }
        Message::ClearRecentProjects => {
            state.session.recent_projects.clear();
            persist(state, commands);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use proptest::prelude::*;

    fn project(name: &str) -> Project {
        Project::new(name, format!("/data/{}", name), None)
    }

    fn loaded_state(p: &Project) -> AppState {
        let mut state = AppState::new();
        update(&mut state, &Message::LoadProject, &mut Vec::new());
        update(&mut state, &Message::ProjectLoaded(p.clone()), &mut Vec::new());
        state
    }

    #[test]
    fn load_goes_through_loading_to_loaded() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();

        update(&mut state, &Message::LoadProject, &mut cmds);
        assert_eq!(state.session.project, ProjectStatus::Loading);
        assert!(matches!(cmds.as_slice(), [Command::LoadProject]));

        cmds.clear();
        update(&mut state, &Message::ProjectLoaded(project("north")), &mut cmds);
        assert_eq!(state.session.current_project().map(|p| p.name.as_str()), Some("north"));
        assert_eq!(state.session.recent_projects.len(), 1);
        assert!(matches!(cmds.as_slice(), [Command::PersistProjects { current: Some(_), .. }]));
    }

    #[test]
    fn failure_returns_to_unloaded_with_notification() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        update(&mut state, &Message::LoadProject, &mut cmds);
        cmds.clear();

        update(
            &mut state,
            &Message::ProjectLoadFailed {
                command: "load_project".into(),
                error: "file not found".into(),
            },
            &mut cmds,
        );

        assert_eq!(state.session.project, ProjectStatus::Unloaded);
        assert_eq!(state.last_error.as_deref(), Some("file not found"));
        assert!(cmds.iter().any(|c| matches!(c, Command::NotifyError(m) if m.contains("file not found"))));
    }

    #[test]
    fn loaded_project_can_be_reloaded() {
        let p = project("north");
        let mut state = loaded_state(&p);
        let mut cmds = Vec::new();

        update(&mut state, &Message::LoadProject, &mut cmds);

        assert!(state.session.project.is_loading());
        assert!(matches!(cmds.as_slice(), [Command::LoadProject]));
    }

    #[test]
    fn result_outside_loading_is_ignored() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();

        update(&mut state, &Message::ProjectLoaded(project("late")), &mut cmds);
        update(
            &mut state,
            &Message::ProjectLoadFailed {
                command: "load_project".into(),
                error: "late".into(),
            },
            &mut cmds,
        );

        assert_eq!(state.session.project, ProjectStatus::Unloaded);
        assert!(state.session.recent_projects.is_empty());
        assert!(cmds.is_empty());
    }

    #[test]
    fn close_during_load_discards_the_result() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        update(&mut state, &Message::LoadProject, &mut cmds);
        update(&mut state, &Message::CloseProject, &mut cmds);
        update(&mut state, &Message::ProjectLoaded(project("north")), &mut cmds);

        assert_eq!(state.session.project, ProjectStatus::Unloaded);
    }

    #[test]
    fn second_load_while_loading_is_ignored() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        update(&mut state, &Message::LoadProject, &mut cmds);
        update(&mut state, &Message::SwitchProject(project("south")), &mut cmds);

        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn switch_activates_the_requested_project() {
        let mut state = loaded_state(&project("north"));
        let mut cmds = Vec::new();

        update(&mut state, &Message::SwitchProject(project("south")), &mut cmds);

        assert!(state.session.project.is_loading());
        assert!(matches!(cmds.as_slice(), [Command::ActivateProject(p)] if p.name == "south"));
    }

    #[test]
    fn remember_moves_existing_path_to_front() {
        let now = Utc::now();
        let mut old = project("a");
        old.last_accessed = now - Duration::hours(2);
        let mut other = project("b");
        other.last_accessed = now - Duration::hours(1);
        let mut recent = vec![other, old.clone()];

        remember(&mut recent, &old.touched());

        let names: Vec<_> = recent.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn restore_keeps_the_session_unloaded() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        let dup = project("a");
        update(
            &mut state,
            &Message::RestoreSession {
                current: Some(dup.clone()),
                recent: vec![dup.clone(), dup, project("b")],
            },
            &mut cmds,
        );

        assert_eq!(state.session.recent_projects.len(), 2);
        assert_eq!(state.session.project, ProjectStatus::Unloaded);
        assert!(cmds.is_empty());
    }

    #[test]
    fn first_load_reopens_the_restored_project() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::RestoreSession { current: Some(project("a")), recent: Vec::new() },
            &mut cmds,
        );

        update(&mut state, &Message::LoadProject, &mut cmds);
        assert!(state.session.project.is_loading());
        assert!(matches!(cmds.as_slice(), [Command::ActivateProject(p)] if p.name == "a"));

        update(&mut state, &Message::ProjectLoaded(project("a")), &mut cmds);
        assert_eq!(state.session.current_project().map(|p| p.name.as_str()), Some("a"));

        // The hint is spent: a reload asks the host again.
        cmds.clear();
        update(&mut state, &Message::LoadProject, &mut cmds);
        assert!(matches!(cmds.as_slice(), [Command::LoadProject]));
    }

    #[test]
    fn close_drops_the_restored_project() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::RestoreSession { current: Some(project("a")), recent: Vec::new() },
            &mut cmds,
        );
        update(&mut state, &Message::CloseProject, &mut cmds);
        update(&mut state, &Message::LoadProject, &mut cmds);

        assert!(matches!(cmds.as_slice(), [Command::LoadProject]));
    }

    #[test]
    fn remove_and_clear_recent_persist() {
        let mut state = loaded_state(&project("north"));
        let mut cmds = Vec::new();

        update(&mut state, &Message::RemoveRecentProject { path: "/data/north".into() }, &mut cmds);
        assert!(state.session.recent_projects.is_empty());
        update(&mut state, &Message::ClearRecentProjects, &mut cmds);

        assert_eq!(cmds.len(), 2);
        assert!(state.session.current_project().is_some());
    }

    proptest! {
        #[test]
        fn recent_list_is_unique_sorted_and_capped(
            picks in proptest::collection::vec((0usize..15, 0i64..10_000), 0..40)
        ) {
            let base = Utc::now();
            let mut recent = Vec::new();
            for (n, secs) in picks {
                let mut p = project(&format!("p{}", n));
                p.last_accessed = base + Duration::seconds(secs);
                remember(&mut recent, &p);
            }

            prop_assert!(recent.len() <= MAX_RECENT_PROJECTS);
            let mut paths: Vec<_> = recent.iter().map(|p| p.path.clone()).collect();
            paths.sort();
            paths.dedup();
            prop_assert_eq!(paths.len(), recent.len());
            prop_assert!(recent.windows(2).all(|w| w[0].last_accessed >= w[1].last_accessed));
        }
    }
}
