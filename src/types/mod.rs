// gitpanel shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod git;
pub mod provider;
pub mod request;
pub mod settings;
pub mod view;
