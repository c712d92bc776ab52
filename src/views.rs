//! Views driven by the session snapshot: the title bar and the
//! recent-projects panel.  Both are plain observers of `SESSION`; they never
//! borrow `APP_STATE`.

use std::cell::RefCell;

use chrono::Utc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, MouseEvent};

use crate::constants::{DEFAULT_SELECTION_TITLE, TITLE_BAR_ID};
use crate::dom_utils::clear_children;
use crate::messages::Message;
use crate::state::{dispatch_global_message, observe_session, ProjectStatus, Session};
use crate::utils::{format_last_accessed, path_basename};

const RECENT_PROJECTS_ID: &str = "recent-projects";
const APP_NAME: &str = "SLD Studio";

thread_local! {
    static RECENT_HANDLERS: RefCell<Vec<Closure<dyn FnMut(MouseEvent)>>> = RefCell::new(Vec::new());
}

/// Text of the title bar for `session`.
pub fn title_text(session: &Session) -> String {
    let project: &str = match &session.project {
        ProjectStatus::Unloaded => "No project",
        ProjectStatus::Loading => "Loading project...",
        ProjectStatus::Loaded(p) if p.name.is_empty() => path_basename(&p.path),
        ProjectStatus::Loaded(p) => &p.name,
    };
    let selection: &str = if session.selection_title.is_empty() {
        DEFAULT_SELECTION_TITLE
    } else {
        &session.selection_title
    };
    format!("{} | {}", project, selection)
}

pub fn render_title_bar(document: &Document, session: &Session) {
    let text = title_text(session);
    if let Some(bar) = document.get_element_by_id(TITLE_BAR_ID) {
        bar.set_text_content(Some(&text));
    }
    document.set_title(&format!("{} - {}", APP_NAME, text));
}

/// Rebuild the `#recent-projects` list, when the page has one.
pub fn render_recent_projects(document: &Document, session: &Session) -> Result<(), JsValue> {
    let Some(list) = document.get_element_by_id(RECENT_PROJECTS_ID) else {
        return Ok(());
    };
    clear_children(&list);

    let current_path = session.current_project().map(|p| p.path.as_str());
    let now = Utc::now();
    let mut handlers = Vec::new();

    for project in &session.recent_projects {
        let item = document.create_element("li")?;
        item.set_class_name("recent-project");
        if Some(project.path.as_str()) == current_path {
            item.class_list().add_1("active")?;
        }
        item.set_attribute("title", &project.path)?;

        let name = document.create_element("span")?;
        name.set_class_name("recent-project-name");
        let label: &str = if project.name.is_empty() {
            path_basename(&project.path)
        } else {
            &project.name
        };
        name.set_text_content(Some(label));
        item.append_child(&name)?;

        let when = document.create_element("span")?;
        when.set_class_name("recent-project-time");
        when.set_text_content(Some(&format_last_accessed(project.last_accessed, now)));
        item.append_child(&when)?;

        let target = project.clone();
        let handler = Closure::wrap(Box::new(move |_: MouseEvent| {
            // The switch re-renders this list, which drops the handler.
            let target = target.clone();
            Timeout::new(0, move || dispatch_global_message(Message::SwitchProject(target))).forget();
        }) as Box<dyn FnMut(_)>);
        item.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handlers.push(handler);

        list.append_child(&item)?;
    }

    RECENT_HANDLERS.with(|cell| *mut_borrow!(cell) = handlers);
    Ok(())
}

fn render_session(session: &Session) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    render_title_bar(&document, session);
    if let Err(e) = render_recent_projects(&document, session) {
        log_error!("Failed to render recent projects: {:?}", e);
    }
}

/// Draw once with `initial`, then follow every session change.
pub fn install(initial: &Session) {
    render_session(initial);
    observe_session(render_session);
}
