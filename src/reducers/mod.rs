//! Domain reducers.
//!
//! Each domain (project, diagram, layout) lives in its own module.  The root
//! `update.rs` delegates to them and handles the few cross-cutting messages
//! itself.

pub mod diagram;
pub mod layout;
pub mod project;
