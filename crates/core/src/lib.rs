//! Pure domain logic for the ladle recipe client.
//!
//! This crate has **zero I/O dependencies**. Everything here is synchronous
//! in-memory state and rule evaluation: the recipe draft model, the
//! validation engine, the form controller, the unsaved-changes guard, and
//! the list/filter state machine. The async collaborators (HTTP API,
//! debounce timers, submit flows) live in `ladle-client`.

pub mod auth;
pub mod draft;
pub mod error;
pub mod form;
pub mod guard;
pub mod list;
pub mod path;
pub mod types;
pub mod validation;
