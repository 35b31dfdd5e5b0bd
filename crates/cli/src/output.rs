//! Output formatting utilities
//!
//! Text renderers return strings so commands decide where they go.

use std::fmt::Write;

use colored::Colorize;
use edutalks_client::Session;
use edutalks_taxonomy::{FileRecord, Route, RouteTable, SectionIndex, TaxonomyTree};
use serde_json::{Value, json};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

fn inactive_marker(is_active: bool) -> String {
    if is_active {
        String::new()
    } else {
        format!(" {}", "(inactive)".dimmed())
    }
}

/// Tabs in server order with their sections indented below
pub fn render_tree(tree: &TaxonomyTree) -> String {
    if tree.is_empty() {
        return "No tabs".dimmed().to_string();
    }

    let mut out = String::new();
    for node in tree.nodes() {
        let _ = writeln!(
            out,
            "{:>3}  {} {}{}  {}",
            node.tab.position,
            node.tab.title.bold(),
            node.tab.path().cyan(),
            inactive_marker(node.tab.is_active),
            format!("[{} docs]", node.docs_count()).dimmed(),
        );
        for entry in &node.sections {
            let section = &entry.section;
            let _ = writeln!(
                out,
                "     {:>3}  {} ({}){}  {}  {}",
                section.position,
                section.title,
                section.slug,
                inactive_marker(section.is_active),
                format!("[{} docs]", entry.docs_count).dimmed(),
                format!("#{}", section.id).dimmed(),
            );
        }
    }
    out
}

/// One line per registered path
pub fn render_routes(routes: &RouteTable) -> String {
    if routes.is_empty() {
        return "No routes".dimmed().to_string();
    }

    let mut out = String::new();
    for entry in routes.entries() {
        let target = match &entry.route {
            Route::Tab { tab_id, .. } => format!("tab #{tab_id}"),
            Route::AdminTabs => "admin".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<24} {}  {}",
            entry.path.cyan(),
            entry.route.label(),
            target.dimmed()
        );
    }
    out
}

fn file_line(out: &mut String, record: &FileRecord) {
    let _ = writeln!(
        out,
        "  {:>5}  {}  {}  {}",
        record.id,
        record.filename,
        record.category.as_deref().unwrap_or("-").dimmed(),
        record.uploaded_at.format("%Y-%m-%d").to_string().dimmed(),
    );
}

/// Files grouped under the sections of the tree; files whose section is not
/// in the tree are listed last
pub fn render_files(tree: &TaxonomyTree, index: &SectionIndex) -> String {
    let mut out = String::new();
    let mut listed = 0;

    for (tab_id, section) in tree.sections() {
        let files = index.files_for(section.id);
        if files.is_empty() {
            continue;
        }
        let tab = tree
            .node(tab_id)
            .map(|node| node.tab.title.as_str())
            .unwrap_or("?");
        let _ = writeln!(out, "{} / {}", tab.bold(), section.title.bold());
        for record in files {
            file_line(&mut out, record);
        }
        listed += files.len();
    }

    let unassigned = index.unassigned();
    if !unassigned.is_empty() {
        let _ = writeln!(out, "{}", "Unassigned".bold());
        for record in unassigned {
            file_line(&mut out, record);
        }
        listed += unassigned.len();
    }

    if listed < index.len() {
        let _ = writeln!(out, "{}", "Other sections".bold());
        let known: Vec<_> = tree.sections().map(|(_, s)| s.id).collect();
        for section in index.section_ids() {
            if known.contains(&section) {
                continue;
            }
            for record in index.files_for(section) {
                file_line(&mut out, record);
            }
        }
    }

    if out.is_empty() {
        return "No documents".dimmed().to_string();
    }
    out
}

/// Files of a single section
pub fn render_file_list(files: &[FileRecord]) -> String {
    if files.is_empty() {
        return "No documents".dimmed().to_string();
    }
    let mut out = String::new();
    for record in files {
        file_line(&mut out, record);
    }
    out
}

/// Stored session, token redacted
pub fn render_session(session: &Session) -> String {
    if !session.is_authenticated() {
        return format!("{} (role: {})", "Not signed in".yellow(), session.role);
    }
    let mut out = String::new();
    let _ = writeln!(out, "User:    {}", session.username.as_deref().unwrap_or("-"));
    if let Some(name) = &session.display_name {
        let _ = writeln!(out, "Name:    {}", name);
    }
    let _ = writeln!(out, "Role:    {}", session.role);
    let _ = write!(out, "Token:   {}", redact(session.access_token.as_deref().unwrap_or("")));
    out
}

/// Session as JSON; the token never leaves in full
pub fn session_json(session: &Session) -> Value {
    json!({
        "authenticated": session.is_authenticated(),
        "username": session.username,
        "display_name": session.display_name,
        "role": session.role,
        "token": session.access_token.as_deref().map(redact),
    })
}

/// Routes as JSON
pub fn routes_json(routes: &RouteTable) -> Value {
    Value::Array(
        routes
            .entries()
            .iter()
            .map(|entry| json!({"path": entry.path, "label": entry.route.label()}))
            .collect(),
    )
}

/// Keep the first four characters of a token
fn redact(token: &str) -> String {
    let shown: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{shown}****")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edutalks_client::Credentials;
    use edutalks_core::{Role, Slug};
    use edutalks_taxonomy::{Section, Tab, TabNode, compose_routes};

    fn tree() -> TaxonomyTree {
        TaxonomyTree::new(vec![
            TabNode::new(Tab::new(1, "Legal", Slug::from_server("legal")).with_position(1))
                .with_section(
                    Section::new(10, "Forms", Slug::from_server("forms")).with_position(1),
                    2,
                ),
            TabNode::new(
                Tab::new(2, "Archive", Slug::from_server("archive"))
                    .with_position(2)
                    .with_active(false),
            ),
        ])
    }

    #[test]
    fn test_render_tree() {
        colored::control::set_override(false);
        let text = render_tree(&tree());
        assert!(text.contains("Legal /legal  [2 docs]"));
        assert!(text.contains("Forms (forms)"));
        assert!(text.contains("Archive /archive (inactive)"));
        assert_eq!(render_tree(&TaxonomyTree::empty()), "No tabs");
    }

    #[test]
    fn test_render_routes_for_admin() {
        colored::control::set_override(false);
        let routes = compose_routes(&tree(), &Role::Admin);
        let text = render_routes(&routes);
        assert!(text.contains("/legal"));
        assert!(!text.contains("/archive"));
        assert!(text.contains("/admin/tabs"));

        let json = routes_json(&routes);
        assert_eq!(json[0]["path"], "/legal");
        assert_eq!(json[1]["label"], "Manage tabs");
    }

    #[test]
    fn test_session_is_redacted() {
        colored::control::set_override(false);
        let session = Session::from_credentials(
            Credentials::new("secret-token", Role::Admin, "root"),
            false,
        );
        let text = render_session(&session);
        assert!(text.contains("User:    root"));
        assert!(text.contains("secr****"));
        assert!(!text.contains("secret-token"));
        assert_eq!(session_json(&session)["token"], "secr****");

        assert!(render_session(&Session::default()).starts_with("Not signed in"));
    }

    #[test]
    fn test_redact_short_token() {
        assert_eq!(redact("abc"), "****");
        assert_eq!(redact("abcdef"), "abcd****");
    }
}
