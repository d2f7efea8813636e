//! Plain-text rendering of command results.

use crate::router::{RouteMatch, RouteTable};
use crate::services::SessionStatus;
use chrono::{DateTime, Local, Utc};
use client::model::status::{collection_status, search_status};
use client::model::{Collection, Search};
use std::fmt::Write;

fn local_time(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub fn collections(items: &[Collection]) -> String {
    if items.is_empty() {
        return "No collections yet.".to_string();
    }
    let mut out = String::new();
    for item in items {
        let status = collection_status(item.status);
        let _ = writeln!(
            out,
            "{:>5}  {:<32} {:>6} photos  {}",
            item.id, item.name, item.photo_quantity, status.title
        );
    }
    out
}

pub fn searches(items: &[Search]) -> String {
    if items.is_empty() {
        return "No searches yet.".to_string();
    }
    let mut out = String::new();
    for item in items {
        let status = item.status.map_or("-", |status| search_status(status).title);
        let _ = writeln!(
            out,
            "{:>5}  {:<32} {:>3}%  {} collection(s)  {}",
            item.id,
            item.name,
            item.tolerance_level,
            item.collections.len(),
            status
        );
    }
    out
}

pub fn session(status: &SessionStatus) -> String {
    if !status.authenticated {
        return "Not signed in.".to_string();
    }
    let who = status
        .user
        .as_ref()
        .and_then(|user| user.username.as_deref().or(user.email.as_deref()))
        .unwrap_or("unknown user");
    match status.expires_at {
        Some(expires_at) => format!("Signed in as {who} until {}.", local_time(expires_at)),
        None => format!("Signed in as {who}."),
    }
}

pub fn routes(table: &RouteTable) -> String {
    let mut out = String::new();
    for entry in table.entries() {
        let views: Vec<&str> = entry.views.iter().map(|view| view.component()).collect();
        let _ = write!(out, "{:<20} {}", entry.path, views.join(" > "));
        if let Some(target) = &entry.redirect {
            let _ = write!(out, " (redirects to {target})");
        }
        out.push('\n');
    }
    for conflict in table.conflicts() {
        let _ = writeln!(
            out,
            "conflict: {} registered twice; {} kept, {} ignored",
            conflict.path, conflict.kept, conflict.ignored
        );
    }
    out
}

pub fn route_match(matched: &RouteMatch) -> String {
    let mut out = format!("{} -> {}", matched.path, matched.route);
    if let Some(page) = matched.page() {
        let _ = write!(out, " ({})", page.component());
    }
    if let Some(from) = &matched.redirected_from {
        let _ = write!(out, "\nredirected from {from}");
    }
    for (name, value) in &matched.params {
        let _ = write!(out, "\n{name} = {value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::default_routes;
    use client::model::ProcessingStatus;

    #[test]
    fn test_collections_show_status_title() {
        let text = collections(&[Collection {
            id: 3,
            name: "Formatura".to_string(),
            status: ProcessingStatus::Failed,
            photo_quantity: 12,
            thumbnail_photo_id: None,
            created_at: None,
            updated_at: None,
        }]);
        assert!(text.contains("Formatura"));
        assert!(text.contains("Processamento falhou"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(collections(&[]), "No collections yet.");
        assert_eq!(searches(&[]), "No searches yet.");
    }

    #[test]
    fn test_routes_list_conflict() {
        let text = routes(&RouteTable::build(&default_routes()));
        assert!(text.contains("/login"));
        assert!(text.contains("(redirects to /collections)"));
        assert!(text.contains("conflict: /collections/:id registered twice"));
    }

    #[test]
    fn test_signed_out_session() {
        let status = SessionStatus {
            authenticated: false,
            user: None,
            expires_at: None,
        };
        assert_eq!(session(&status), "Not signed in.");
    }
}
