//! HTML fragment renderer for branches, commits and pull/merge requests.
//!
//! Every piece of text that comes from the backend is escaped before it is
//! inserted. Icons are emitted as `data-feather` placeholders; swapping them for
//! glyphs is left to the page once the fragment is injected.

use chrono::{DateTime, Local};

use crate::types::git::{Branch, Commit, PullRequest};

/// Length of the abbreviated commit hash shown in tables.
pub const SHORT_SHA_LEN: usize = 7;

/// Trait defining the fragment renderer interface.
pub trait RendererTrait {
    fn render_branches(&self, branches: &[Branch]) -> String;
    fn render_commits(&self, commits: &[Commit]) -> String;
    fn render_pull_requests(&self, pull_requests: &[PullRequest]) -> String;
    /// `<option>` list for the branch filter; the leading blank option selects the default branch.
    fn render_branch_options(&self, branches: &[Branch], selected: Option<&str>) -> String;
    fn render_error(&self, message: &str) -> String;
    fn render_loading(&self) -> String;
}

/// Visual bucket of a pull/merge request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateBadge {
    Open,
    Closed,
    Merged,
    Other,
}

impl StateBadge {
    pub fn from_state(state: &str) -> Self {
        match state {
            "open" | "opened" => StateBadge::Open,
            "closed" => StateBadge::Closed,
            "merged" => StateBadge::Merged,
            _ => StateBadge::Other,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StateBadge::Open => "success",
            StateBadge::Closed => "danger",
            StateBadge::Merged => "primary",
            StateBadge::Other => "secondary",
        }
    }
}

/// Stateless renderer producing Bootstrap-flavoured markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }
}

impl RendererTrait for Renderer {
    fn render_branches(&self, branches: &[Branch]) -> String {
        if branches.is_empty() {
            return empty_notice("No branches found.");
        }

        let mut html = table_open(&["Branch", "Latest Commit"]);
        for branch in branches {
            html.push_str(&format!(
                "<tr><td><i data-feather=\"git-branch\" class=\"feather-sm\"></i> {}</td><td><code>{}</code></td></tr>",
                escape_html(&branch.name),
                escape_html(short_sha(&branch.commit_sha)),
            ));
        }
        html.push_str(TABLE_CLOSE);
        html
    }

    fn render_commits(&self, commits: &[Commit]) -> String {
        if commits.is_empty() {
            return empty_notice("No commits found.");
        }

        let mut html = table_open(&["Commit", "Author", "Date", "Message"]);
        for commit in commits {
            html.push_str(&format!(
                "<tr><td><i data-feather=\"git-commit\" class=\"feather-sm\"></i> <code>{}</code></td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(short_sha(&commit.sha)),
                escape_html(&commit.author),
                escape_html(&format_timestamp(&commit.timestamp)),
                escape_html(first_line(&commit.message)),
            ));
        }
        html.push_str(TABLE_CLOSE);
        html
    }

    fn render_pull_requests(&self, pull_requests: &[PullRequest]) -> String {
        if pull_requests.is_empty() {
            return empty_notice("No pull/merge requests found.");
        }

        let mut html = table_open(&["#", "Title", "Author", "State", "Created", "Branches"]);
        for pr in pull_requests {
            let badge = StateBadge::from_state(&pr.state);
            html.push_str(&format!(
                "<tr><td>#{}</td><td>{}</td><td>{}</td><td><span class=\"badge bg-{}\">{}</span></td><td>{}</td><td><i data-feather=\"git-pull-request\" class=\"feather-sm\"></i> {} \u{2192} {}</td></tr>",
                pr.number,
                escape_html(&pr.title),
                escape_html(&pr.author),
                badge.css_class(),
                escape_html(&pr.state),
                escape_html(&format_timestamp(&pr.created_at)),
                escape_html(&pr.source_branch),
                escape_html(&pr.target_branch),
            ));
        }
        html.push_str(TABLE_CLOSE);
        html
    }

    fn render_branch_options(&self, branches: &[Branch], selected: Option<&str>) -> String {
        let mut html = String::from("<option value=\"\">Default branch</option>");
        for branch in branches {
            let marker = if selected == Some(branch.name.as_str()) {
                " selected"
            } else {
                ""
            };
            let name = escape_html(&branch.name);
            html.push_str(&format!("<option value=\"{}\"{}>{}</option>", name, marker, name));
        }
        html
    }

    fn render_error(&self, message: &str) -> String {
        format!(
            "<div class=\"alert alert-danger\" role=\"alert\">{}</div>",
            escape_html(message)
        )
    }

    fn render_loading(&self) -> String {
        "<div class=\"d-flex justify-content-center\"><div class=\"spinner-border text-primary\" role=\"status\"><span class=\"visually-hidden\">Loading...</span></div></div>".to_string()
    }
}

const TABLE_CLOSE: &str = "</tbody></table></div>";

fn table_open(headers: &[&str]) -> String {
    let mut html = String::from(
        "<div class=\"table-responsive\"><table class=\"table table-hover\"><thead><tr>",
    );
    for header in headers {
        html.push_str("<th>");
        html.push_str(header);
        html.push_str("</th>");
    }
    html.push_str("</tr></thead><tbody>");
    html
}

fn empty_notice(text: &str) -> String {
    format!("<div class=\"alert alert-info\">{}</div>", text)
}

/// Escapes the five HTML-special characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// First `SHORT_SHA_LEN` characters of a hash; shorter input is returned whole.
pub fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

/// Subject line of a commit message.
pub fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}

/// Formats an ISO-8601 timestamp in the local time zone.
///
/// Unparseable input is shown as received.
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}
