//! gitpanel: a presentation layer over a REST backend that exposes branches,
//! commits and pull/merge requests of GitHub, GitLab and a unified provider.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
