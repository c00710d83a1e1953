//! Application-level orchestration.
//!
//! This module owns the export lifecycle: it serializes export triggers,
//! runs the generation exchange, saves the payload, and reports outcomes as
//! events. UI/CLI layers call into this module to keep responsibilities
//! separated.

mod controller;

pub use controller::{run_controller, UiCommand};
