//! Dashboard page and its embedded static assets.

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};

use osinfo_core::error::OsInfoError;

use crate::app_state::AppState;
use crate::error::ApiResult;

const PAGE: &str = include_str!("assets/dashboard.html");

/// (name, content type, body)
const ASSETS: &[(&str, &str, &str)] = &[
    ("dashboard.js", "text/javascript; charset=utf-8", include_str!("assets/dashboard.js")),
    ("dashboard.css", "text/css; charset=utf-8", include_str!("assets/dashboard.css")),
];

pub async fn page(State(state): State<AppState>) -> Html<String> {
    let cfg = state.cfg();
    Html(render_page(&cfg.dashboard.title, &cfg.server.prefix))
}

pub async fn asset(Path(path): Path<String>) -> ApiResult<Response> {
    let name = path.trim_start_matches('/');
    let (_, content_type, body) = ASSETS
        .iter()
        .find(|(n, _, _)| *n == name)
        .ok_or_else(|| OsInfoError::NotFound(format!("static/{name}")))?;

    Ok(([(header::CONTENT_TYPE, *content_type)], *body).into_response())
}

/// Fill the page template. `prefix` lets the page find its sibling routes.
pub fn render_page(title: &str, prefix: &str) -> String {
    let base = if prefix == "/" { "" } else { prefix };
    // base first: the title is user text and may itself contain "{{base}}"
    PAGE.replace("{{base}}", &escape_html(base))
        .replace("{{title}}", &escape_html(title))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
