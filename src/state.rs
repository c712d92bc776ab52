use std::cell::RefCell;

use crate::layout::Layout;
use crate::messages::{Command, Message};
use crate::models::{ContextMenuState, Project};
use crate::store::Observable;
use crate::update::update;

/// Where the project lifecycle currently stands.
///
/// `Unloaded -> Loading -> Loaded`, `Loaded -> Loading` on reload or switch,
/// `Loading -> Unloaded` when the host fails.  Closing goes back to
/// `Unloaded` from `Loading` or `Loaded`; closing an unloaded session is
/// ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ProjectStatus {
    #[default]
    Unloaded,
    Loading,
    Loaded(Project),
}

impl ProjectStatus {
    pub fn project(&self) -> Option<&Project> {
        match self {
            ProjectStatus::Loaded(project) => Some(project),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ProjectStatus::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Unloaded => "unloaded",
            ProjectStatus::Loading => "loading",
            ProjectStatus::Loaded(_) => "loaded",
        }
    }
}

/// The part of the state views observe.  Always replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub project: ProjectStatus,
    pub selection_title: String,
    // Most recently accessed first, unique by path
    pub recent_projects: Vec<Project>,
}

impl Session {
    pub fn current_project(&self) -> Option<&Project> {
        self.project.project()
    }
}

// Store global application state
#[derive(Debug, Default)]
pub struct AppState {
    pub session: Session,
    pub context_menu: ContextMenuState,
    // Id of the element hosting the mounted diagram, if any
    pub diagram_container: Option<String>,
    pub layout: Layout,
    pub last_error: Option<String>,
    // Persisted project of the previous session, reopened by the first load
    pub restored_project: Option<Project>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one message through the reducers.  Returns the commands to
    /// execute and, when the session changed, the new snapshot to publish.
    pub fn dispatch(&mut self, msg: Message) -> (Vec<Command>, Option<Session>) {
        let before = self.session.clone();
        let commands = update(self, msg);
        let changed = (self.session != before).then(|| self.session.clone());
        (commands, changed)
    }
}

// We use thread_local to store our app state
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
    pub static SESSION: Observable<Session> = Observable::default();
}

/// Subscribe to session snapshots.  The observer is called on every change.
pub fn observe_session(observer: impl Fn(&Session) + 'static) -> crate::store::SubscriptionId {
    SESSION.with(|session| session.subscribe(observer))
}

pub fn current_session() -> Session {
    SESSION.with(|session| session.get())
}

pub fn dispatch_global_message(msg: Message) {
    let (commands, changed) = APP_STATE.with(|state| mut_borrow!(state).dispatch(msg));

    // The state borrow is released: observers and executors may dispatch again.
    if let Some(session) = changed {
        SESSION.with(|cell| cell.clone()).set(session);
    }
    for cmd in commands {
        crate::command_executors::execute(cmd);
    }
}
