// gitpanel state managers
// Managers hold the page state: visible section, request sequencing, forms and containers.

pub mod dashboard;
pub mod request_tracker;
pub mod tab_router;
