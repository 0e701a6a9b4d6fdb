//! Plain-text rendering of notes and settings.

use watermelon_core::{Appearance, Note};

const PREVIEW_LINES: usize = 2;

/// Renders the list view: 1-based position, title, then up to two
/// indented content lines.
pub fn render_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes yet. Create one with `watermelon new <title> [content...]`.\n"
            .to_string();
    }

    let mut out = String::new();
    for (index, note) in notes.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, first_line(&note.title)));
        for line in note.preview_lines(PREVIEW_LINES) {
            out.push_str(&format!("   {line}\n"));
        }
    }
    out
}

/// Renders the detail view of one note.
pub fn render_note(note: &Note) -> String {
    let divider = "-".repeat(note.title.chars().count().clamp(3, 60));
    let mut out = format!("{}\n{}\n", note.title, divider);
    if !note.content.is_empty() {
        out.push_str(&note.content);
        if !note.content.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

pub fn render_settings(appearance: Appearance, version: &str) -> String {
    format!(
        "Appearance: {}\nAbout: Watermelon Notes {}\n",
        appearance.as_str(),
        version
    )
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
