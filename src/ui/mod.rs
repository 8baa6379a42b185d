//! gitpanel UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering. The page is plain
//! HTML/CSS/JS served from a custom protocol; it talks to the Rust side through
//! wry IPC using the same methods as the `gitpanel-rpc` bridge.

pub mod webview_app;
