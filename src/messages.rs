// src/messages.rs
//
// The events that can occur in the UI and the side effects the reducer asks
// for in response.
//
use crate::layout::{PersistedSidebar, SidebarId};
use crate::models::{ContextMenuState, Project};

#[derive(Debug, Clone)]
pub enum Message {
    // Project lifecycle
    LoadProject,                         // Ask the host for its project (startup / reload)
    SwitchProject(Project),              // Open another project from the recent list
    ProjectLoaded(Project),
    ProjectLoadFailed { command: String, error: String },
    CloseProject,
    RestoreSession {
        current: Option<Project>,
        recent: Vec<Project>,
    },
    RemoveRecentProject { path: String },
    ClearRecentProjects,

    // Selection shown in the title bar
    SetSelectionTitle(String),

    // Diagram interaction
    DiagramMounted { container_id: String },
    DiagramUnmounted,
    OpenContextMenu(ContextMenuState),
    CloseContextMenu,

    // Layout
    OpenSidebar(SidebarId),
    CloseSidebar(SidebarId),
    SetActivePanel { sidebar: SidebarId, panel: String },
    ResizeSidebar { sidebar: SidebarId, size: f64 },
    RestoreSidebar { sidebar: SidebarId, saved: PersistedSidebar },

    // Host failures that only need to be surfaced
    CommandFailed { command: String, error: String },
}

/// Side effects produced by `update`; executed once the state borrow is
/// released.
pub enum Command {
    /// `load_project` on the host
    LoadProject,

    /// Make the host load the substations of a freshly switched project
    ActivateProject(Project),

    /// Write current + recent projects to storage
    PersistProjects {
        current: Option<Project>,
        recent: Vec<Project>,
    },

    PersistSidebar {
        sidebar: SidebarId,
        saved: PersistedSidebar,
    },

    /// Push the live-feed endpoint to the host
    SetZmqUrl(String),
    SetZmqSubscription(String),

    /// (Re)draw or remove the diagram context menu
    RenderContextMenu {
        container_id: String,
        menu: ContextMenuState,
    },

    /// Show an error toast
    NotifyError(String),
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::LoadProject => f.write_str("LoadProject"),
            Command::ActivateProject(p) => f.debug_tuple("ActivateProject").field(&p.path).finish(),
            Command::PersistProjects { current, recent } => f
                .debug_struct("PersistProjects")
                .field("current", &current.as_ref().map(|p| &p.path))
                .field("recent", &recent.len())
                .finish(),
            Command::PersistSidebar { sidebar, .. } => f.debug_tuple("PersistSidebar").field(sidebar).finish(),
            Command::SetZmqUrl(url) => f.debug_tuple("SetZmqUrl").field(url).finish(),
            Command::SetZmqSubscription(sub) => f.debug_tuple("SetZmqSubscription").field(sub).finish(),
            Command::RenderContextMenu { container_id, menu } => f
                .debug_struct("RenderContextMenu")
                .field("container_id", container_id)
                .field("visible", &menu.visible)
                .finish(),
            Command::NotifyError(msg) => f.debug_tuple("NotifyError").field(msg).finish(),
        }
    }
}
