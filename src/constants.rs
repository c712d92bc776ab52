// Diagram classes - these mirror the stylesheet shipped with the SVG renderer
pub const CLASS_OPEN: &str = "sld-open";
pub const CLASS_CLOSED: &str = "sld-closed";
pub const CLASS_BREAKER: &str = "sld-breaker";
pub const CLASS_LABEL: &str = "sld-label";
pub const CLASS_SWITCHING: &str = "sld-switching";
pub const CLASS_SWITCHING_OPEN: &str = "sld-switching-open";
pub const CLASS_SWITCHING_CLOSE: &str = "sld-switching-close";

/// Selector matching every element a user can switch with a direct click.
pub const SWITCHABLE_SELECTOR: &str = ".sld-breaker, .sld-disconnector";

// Visual cue played after a state change
pub const FLASH_OPACITY: &str = "0.8";
pub const FLASH_DURATION_MS: u32 = 100;
// Slightly longer than the CSS keyframes of the switching animation
pub const SWITCHING_ANIMATION_MS: u32 = 650;

// Context menu
pub const CONTEXT_MENU_ID: &str = "sld-context-menu";
pub const CONTEXT_MENU_CLASS: &str = "sld-context-menu";

// Persistence keys (web-view localStorage)
pub const KEY_CURRENT_PROJECT: &str = "current-project";
pub const KEY_RECENT_PROJECTS: &str = "recent-projects";
pub const SETTINGS_KEY_PREFIX: &str = "settings:";

/// Upper bound of the most-recently-used project list.
pub const MAX_RECENT_PROJECTS: usize = 10;

// Title bar
pub const TITLE_BAR_ID: &str = "title-bar";
pub const DEFAULT_SELECTION_TITLE: &str = "No selection";

pub const DEFAULT_SIDEBAR_SIZE: f64 = 15.0;
