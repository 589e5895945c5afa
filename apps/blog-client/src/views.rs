//! Terminal rendering of the list, detail and form views.

use std::fmt::Write;

use chrono::{DateTime, Datelike, Utc};

use blogmini_core::domain::Post;

pub const BRAND: &str = "BlogMini";

/// Characters of content shown on a list card.
pub const EXCERPT_CHARS: usize = 100;

pub fn navbar() -> String {
    format!("{BRAND}    Home: blog-client list    New Post: blog-client new\n")
}

pub fn footer(now: DateTime<Utc>) -> String {
    format!("\n© {} {BRAND}\n", now.year())
}

pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// First [`EXCERPT_CHARS`] characters followed by an ellipsis.
pub fn excerpt(content: &str) -> String {
    let head: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{head}...")
}

/// The home page: every post as a card, or the empty state.
pub fn render_list(posts: &[Post]) -> String {
    let mut out = String::from("Recent Posts\n\n");

    if posts.is_empty() {
        out.push_str("No posts yet. Create your first post!\n");
        return out;
    }

    for post in posts {
        let _ = writeln!(out, "{}", post.title);
        let _ = writeln!(out, "By {} • {}", post.author, format_date(&post.created_at));
        let _ = writeln!(out, "{}", excerpt(&post.content));
        let _ = writeln!(out, "Read More: blog-client show {}", post.id);
        out.push('\n');
    }
    out
}

/// A single post with its actions.
pub fn render_detail(post: &Post) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", post.title);

    let _ = write!(out, "By {} • {}", post.author, format_date(&post.created_at));
    if let Some(updated) = &post.updated_at {
        let _ = write!(out, " • Updated: {}", format_date(updated));
    }
    out.push_str("\n\n");

    for paragraph in post.content.split('\n') {
        let _ = writeln!(out, "{paragraph}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Edit: blog-client edit {}", post.id);
    let _ = writeln!(out, "Delete: blog-client delete {}", post.id);
    let _ = writeln!(out, "Back to Home: blog-client list");
    out
}

pub fn render_error(message: &str) -> String {
    format!("Error: {message}\n")
}
