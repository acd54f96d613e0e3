//! Champdex - champion catalog browser
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod autocomplete;
pub mod catalog;
pub mod components;
pub mod debounce;
pub mod effect;
pub mod logging;
pub mod query;
pub mod record;
pub mod reducer;
pub mod state;
pub mod view;
