//! Sidebar / tool panel layout.
//!
//! Four dockable areas surround the central diagram panel.  Each one has a
//! fixed catalogue of panels, one active panel, an open flag and a size (in
//! percent of the window).  Only the catalogue is static; the rest is user
//! state and gets persisted per area.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_SIDEBAR_SIZE;

#[derive(Debug, PartialEq, Eq)]
pub struct PanelItem {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug)]
pub struct SidebarConfig {
    pub name: &'static str,
    pub panels: &'static [PanelItem],
    pub default_size: f64,
}

pub static LEFT_SIDEBAR: SidebarConfig = SidebarConfig {
    name: "left-sidebar-store",
    panels: &[
        PanelItem { id: "equipment-explorer", label: "Explorer" },
        PanelItem { id: "projects", label: "Projects" },
    ],
    default_size: DEFAULT_SIDEBAR_SIZE,
};

pub static LEFT_TOOLS: SidebarConfig = SidebarConfig {
    name: "left-tools-store",
    panels: &[
        PanelItem { id: "terminal", label: "Terminal" },
        PanelItem { id: "log", label: "Log" },
    ],
    default_size: DEFAULT_SIDEBAR_SIZE,
};

pub static RIGHT_SIDEBAR: SidebarConfig = SidebarConfig {
    name: "right-sidebar-store",
    panels: &[
        PanelItem { id: "equipment-controls", label: "Equipment" },
        PanelItem { id: "metadata", label: "Metadata" },
    ],
    default_size: DEFAULT_SIDEBAR_SIZE,
};

pub static RIGHT_TOOLS: SidebarConfig = SidebarConfig {
    name: "right-tools-store",
    panels: &[
        PanelItem { id: "task-dashboard", label: "Tasks" },
        PanelItem { id: "historic", label: "Historic" },
    ],
    default_size: DEFAULT_SIDEBAR_SIZE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SidebarId {
    LeftSidebar,
    LeftTools,
    RightSidebar,
    RightTools,
}

impl SidebarId {
    pub const ALL: [SidebarId; 4] = [
        SidebarId::LeftSidebar,
        SidebarId::LeftTools,
        SidebarId::RightSidebar,
        SidebarId::RightTools,
    ];

    /// Look an area up by its storage name (`"left-sidebar-store"`, ...).
    pub fn from_name(name: &str) -> Option<SidebarId> {
        SidebarId::ALL.into_iter().find(|id| id.config().name == name)
    }

    pub fn config(self) -> &'static SidebarConfig {
        match self {
            SidebarId::LeftSidebar => &LEFT_SIDEBAR,
            SidebarId::LeftTools => &LEFT_TOOLS,
            SidebarId::RightSidebar => &RIGHT_SIDEBAR,
            SidebarId::RightTools => &RIGHT_TOOLS,
        }
    }

    fn index(self) -> usize {
        match self {
            SidebarId::LeftSidebar => 0,
            SidebarId::LeftTools => 1,
            SidebarId::RightSidebar => 2,
            SidebarId::RightTools => 3,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Panel {panel} not found in {sidebar}")]
    UnknownPanel { panel: String, sidebar: &'static str },
}

/// What survives a restart for one area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSidebar {
    pub is_open: bool,
    pub active_item_id: String,
    pub size: f64,
}

#[derive(Clone, Debug)]
pub struct Sidebar {
    config: &'static SidebarConfig,
    is_open: bool,
    active: usize,
    size: f64,
}

impl Sidebar {
    pub fn new(config: &'static SidebarConfig) -> Self {
        Self {
            config,
            is_open: false,
            active: 0,
            size: config.default_size,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn active_item(&self) -> &'static PanelItem {
        &self.config.panels[self.active]
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn set_active_item(&mut self, panel_id: &str) -> Result<(), LayoutError> {
        match self.config.panels.iter().position(|p| p.id == panel_id) {
            Some(index) => {
                self.active = index;
                Ok(())
            }
            None => Err(LayoutError::UnknownPanel {
                panel: panel_id.to_string(),
                sidebar: self.config.name,
            }),
        }
    }

    /// Non-finite sizes are ignored.
    pub fn set_size(&mut self, size: f64) {
        if size.is_finite() {
            self.size = size;
        }
    }

    pub fn to_persisted(&self) -> PersistedSidebar {
        PersistedSidebar {
            is_open: self.is_open,
            active_item_id: self.active_item().id.to_string(),
            size: self.size,
        }
    }

    /// Apply saved state.  A panel that no longer exists falls back to the
    /// first panel of the catalogue.
    pub fn restore(&mut self, saved: &PersistedSidebar) {
        self.is_open = saved.is_open;
        self.set_size(saved.size);
        if self.set_active_item(&saved.active_item_id).is_err() {
            self.active = 0;
        }
    }
}

#[derive(Clone, Debug)]
pub struct Layout {
    sidebars: [Sidebar; 4],
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            sidebars: SidebarId::ALL.map(|id| Sidebar::new(id.config())),
        }
    }
}

impl Layout {
    pub fn sidebar(&self, id: SidebarId) -> &Sidebar {
        &self.sidebars[id.index()]
    }

    pub fn sidebar_mut(&mut self, id: SidebarId) -> &mut Sidebar {
        &mut self.sidebars[id.index()]
    }
}
