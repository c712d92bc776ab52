use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{CLASS_BREAKER, CLASS_CLOSED, CLASS_LABEL, CLASS_OPEN};

/// Two-state visual status of a switching device (breaker, disconnector).
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum SwitchState {
    Open,
    Closed,
}

impl SwitchState {
    pub fn from_open(open: bool) -> Self {
        if open {
            SwitchState::Open
        } else {
            SwitchState::Closed
        }
    }

    /// Read the state back from an element's classes.  Anything that is not
    /// explicitly closed is treated as open.
    pub fn from_classes<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        if classes.into_iter().any(|c| c == CLASS_CLOSED) {
            SwitchState::Closed
        } else {
            SwitchState::Open
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            SwitchState::Open => CLASS_OPEN,
            SwitchState::Closed => CLASS_CLOSED,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            SwitchState::Open => SwitchState::Closed,
            SwitchState::Closed => SwitchState::Open,
        }
    }

    pub fn is_open(self) -> bool {
        self == SwitchState::Open
    }
}

/// Snapshot of the element a context menu is anchored on.
///
/// The DOM element itself is not kept: the diagram can be regenerated between
/// two right-clicks, so only plain data survives the event.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TargetSummary {
    pub id: String,
    pub tag_name: String,
    pub classes: Vec<String>,
    pub text: String,
    pub attributes: Vec<(String, String)>,
}

impl TargetSummary {
    pub fn is_breaker(&self) -> bool {
        self.classes.iter().any(|c| c == CLASS_BREAKER)
    }

    pub fn is_label(&self) -> bool {
        self.classes.iter().any(|c| c == CLASS_LABEL)
    }

    pub fn switch_state(&self) -> SwitchState {
        SwitchState::from_classes(self.classes.iter().map(String::as_str))
    }

    /// Serialize the element back to a self-closing tag, used by "Copy element".
    pub fn to_markup(&self) -> String {
        let mut out = format!("<{}", self.tag_name);
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, value));
        }
        out.push_str(" />");
        out
    }
}

/// Context menu position and anchor.  Coordinates are relative to the
/// diagram container.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ContextMenuState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub target: Option<TargetSummary>,
}

/// Project as returned by the host.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub path: String,
    #[serde(default, alias = "config_path", skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    #[serde(default = "Utc::now", alias = "last_accessed")]
    pub last_accessed: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, path: impl Into<String>, config_path: Option<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            config_path,
            last_accessed: Utc::now(),
        }
    }

    /// Copy of the project stamped with the current time.
    pub fn touched(&self) -> Self {
        Self {
            last_accessed: Utc::now(),
            ..self.clone()
        }
    }
}

/// Arguments of `create_new_project`.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct CreateProjectParams {
    pub name: String,
    pub path: String,
    pub config_path: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ServerUrlResponse {
    pub url: String,
    pub status: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug, Default)]
pub struct ProxyConfig {
    pub url: String,
    #[serde(default)]
    pub no_proxy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ProxyResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ZmqUrlResponse {
    pub url: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Generic acknowledgement for commands that only report how they went.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct FetchStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Rows returned by a project database query.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct QueryResponse {
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default)]
    pub row_count: usize,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct VoltageLevel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nominal_v: Option<f64>,
    #[serde(default)]
    pub high_voltage_limit: Option<f64>,
    #[serde(default)]
    pub low_voltage_limit: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct Substation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tso: String,
    #[serde(default)]
    pub geo_tags: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub voltage_levels: Vec<VoltageLevel>,
}

/// Rendered diagram of one element plus the renderer's metadata blob.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct SldDiagram {
    pub svg: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_state_reads_closed_class() {
        assert_eq!(SwitchState::from_classes(["sld-breaker", "sld-closed"]), SwitchState::Closed);
        assert_eq!(SwitchState::from_classes(["sld-breaker", "sld-open"]), SwitchState::Open);
        assert_eq!(SwitchState::from_classes(Vec::<&str>::new()), SwitchState::Open);
    }

    #[test]
    fn project_accepts_host_field_names() {
        let raw = r#"{"name":"Grid","path":"/tmp/grid","config_path":"/tmp/grid/cfg.toml"}"#;
        let project: Project = serde_json::from_str(raw).expect("decode project");
        assert_eq!(project.config_path.as_deref(), Some("/tmp/grid/cfg.toml"));

        let encoded = serde_json::to_value(&project).unwrap();
        assert!(encoded.get("configPath").is_some());
        assert!(encoded.get("lastAccessed").is_some());
    }

    #[test]
    fn target_markup_lists_attributes() {
        let target = TargetSummary {
            id: "brk-1".into(),
            tag_name: "g".into(),
            classes: vec!["sld-breaker".into(), "sld-closed".into()],
            text: String::new(),
            attributes: vec![("id".into(), "brk-1".into()), ("class".into(), "sld-breaker sld-closed".into())],
        };
        assert_eq!(target.to_markup(), r#"<g id="brk-1" class="sld-breaker sld-closed" />"#);
        assert!(target.is_breaker());
        assert_eq!(target.switch_state(), SwitchState::Closed);
    }
}
