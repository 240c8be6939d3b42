// src/ports/html.rs
use crate::domain::Note;
use html_escape::encode_text;
use tracing::instrument;

/// Renders the details view of a single note as a standalone page.
#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Escape note text and keep its line breaks.
    fn process_content(&self, content: &str) -> String {
        encode_text(content).replace('\n', "<br>\n")
    }

    #[instrument(level = "debug", skip_all, fields(note_id = %note.id))]
    pub fn render(&self, note: &Note) -> String {
        let title = encode_text(&note.title);
        let content = self.process_content(&note.content);
        let created = note.created_at.format("%Y-%m-%d %H:%M UTC");
        let updated = note.updated_at.format("%Y-%m-%d %H:%M UTC");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            padding: 2rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .tag {{
            display: inline-block;
            background: #e9ecef;
            padding: 2px 8px;
            border-radius: 4px;
            font-size: 0.8em;
        }}
        .note-info {{
            margin-top: 1rem;
            padding-top: 1rem;
            border-top: 1px solid #eee;
            font-size: 0.9em;
            color: #666;
        }}
    </style>
</head>
<body>
    <div class="card">
        <h2>{title}</h2>
        <span class="tag">{tag}</span>
        <div class="note-content">{content}</div>
        <div class="note-info">
            <div>Note ID: {note_id}</div>
            <div>Created: {created}</div>
            <div>Updated: {updated}</div>
        </div>
    </div>
</body>
</html>"#,
            title = title,
            tag = note.tag,
            content = content,
            note_id = encode_text(&note.id),
            created = created,
            updated = updated,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;
    use crate::util::testing::sample_note;

    #[test]
    fn given_markup_in_content_when_rendering_then_escaped() {
        let presenter = HtmlPresenter::new();
        let mut note = sample_note("1", "Tags <b>", Tag::Work);
        note.content = "<script>alert(1)</script>".to_string();

        let html = presenter.render(&note);

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tags &lt;b&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn given_multiline_content_when_processing_then_keeps_line_breaks() {
        let presenter = HtmlPresenter::new();
        assert_eq!(presenter.process_content("a\nb"), "a<br>\nb");
    }
}
