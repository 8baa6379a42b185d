//! gitpanel: browse branches, commits and pull/merge requests through a unified REST backend.
//!
//! With the `gui` feature the panel opens in a native WebView window.
//! Without it, one form submission is run from the command line and the
//! rendered fragments are printed:
//!
//! ```text
//! gitpanel github <owner> <repo> [state]
//! gitpanel gitlab <project-id> [state]
//! gitpanel unified <github|gitlab> <repository> [state]
//! ```

#[cfg(feature = "gui")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    gitpanel::ui::webview_app::run();
}

#[cfg(not(feature = "gui"))]
#[tokio::main]
async fn main() {
    use gitpanel::app::App;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (identity, state) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("usage: gitpanel github <owner> <repo> [state]");
            eprintln!("       gitpanel gitlab <project-id> [state]");
            eprintln!("       gitpanel unified <github|gitlab> <repository> [state]");
            std::process::exit(2);
        }
    };

    let mut app = match App::new(std::env::var("GITPANEL_CONFIG").ok()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("failed to initialize gitpanel: {}", e);
            std::process::exit(1);
        }
    };

    for update in app.submit(identity, state.as_deref()).await {
        println!("── {} ({:?}) ──", update.container, update.status);
        println!("{}", update.html);
        println!();
    }
}

#[cfg(not(feature = "gui"))]
fn parse_args(
    args: &[String],
) -> Result<(gitpanel::types::provider::Identity, Option<String>), String> {
    use gitpanel::types::provider::{Identity, Provider};

    let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or("");
    let provider: Provider = arg(0).parse().map_err(|e| format!("{}", e))?;
    let (identity, state_index) = match provider {
        Provider::GitHub => (Identity::github(arg(1), arg(2)), 3),
        Provider::GitLab => (Identity::gitlab(arg(1)), 2),
        Provider::Unified => (Identity::unified(arg(1), arg(2)), 3),
    };
    let identity = identity.map_err(|e| e.to_string())?;
    Ok((identity, args.get(state_index).cloned()))
}
