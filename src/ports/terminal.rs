// src/ports/terminal.rs
use crate::application::Pagination;
use crate::constants::PREVIEW_MAX_CHARS;
use crate::domain::{DomainError, DraftField, Note, NotesPage, Notice, NoticeLevel, TagFilter, ValidationErrors};
use crate::util::text::preview;
use std::fmt::Write;

/// Plain-text rendering of the list view and of notices.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_note_line(&self, note: &Note) -> String {
        format!(
            "{}\t[{}]\t{}\t{}",
            note.id,
            note.tag,
            note.title,
            preview(&note.content, PREVIEW_MAX_CHARS)
        )
    }

    /// Header, one line per note, and a pagination bar when there is more
    /// than one page.
    pub fn render_page(&self, page: &NotesPage, text: &str, tag: TagFilter) -> String {
        let mut out = String::new();
        let search = if text.is_empty() {
            String::new()
        } else {
            format!(" matching \"{text}\"")
        };
        let _ = writeln!(out, "Notes [{tag}]{search}");

        if page.notes.is_empty() {
            let _ = writeln!(out, "No notes found");
        }
        for note in &page.notes {
            let _ = writeln!(out, "{}", self.render_note_line(note));
        }

        let mut pagination = Pagination::new();
        pagination.update_total_pages(page.total_pages);
        if pagination.set_page(page.page).is_ok() && pagination.has_multiple_pages() {
            let _ = writeln!(out, "{}", self.render_pagination(&pagination));
        }
        out
    }

    /// `‹ 1 [2] 3 ›` style bar.
    pub fn render_pagination(&self, pagination: &Pagination) -> String {
        let current = pagination.current_page();
        let total = pagination.total_pages();
        let pages: Vec<String> = (1..=total)
            .map(|n| {
                if n == current {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        let prev = if current > 1 { "‹" } else { " " };
        let next = if current < total { "›" } else { " " };
        format!("{prev} {} {next}", pages.join(" "))
    }

    pub fn render_notice(&self, notice: &Notice) -> String {
        match notice.level {
            NoticeLevel::Success => format!("✔ {}", notice.message),
            NoticeLevel::Error => format!("✖ {}", notice.message),
        }
    }

    /// The notice for a failed action, followed by field messages or a
    /// retry hint when the error carries one.
    pub fn render_error(&self, err: &DomainError) -> String {
        let mut out = self.render_notice(&err.notice());
        match err {
            DomainError::Validation(errors) => {
                out.push('\n');
                out.push_str(&self.render_validation(errors));
            }
            e if e.is_retryable() => {
                out.push_str("\nRun the command again once the service is reachable");
            }
            _ => {}
        }
        out
    }

    /// One line per invalid form field.
    pub fn render_validation(&self, errors: &ValidationErrors) -> String {
        errors
            .fields()
            .map(|(field, message)| format!("  {:<8} {message}", label(field)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn label(field: DraftField) -> &'static str {
    match field {
        DraftField::Title => "Title",
        DraftField::Content => "Content",
        DraftField::Tag => "Tag",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Draft, Tag};
    use crate::util::testing::sample_note;

    #[test]
    fn given_single_page_when_rendering_then_no_pagination_bar() {
        let presenter = TerminalPresenter::new();
        let page = NotesPage {
            notes: vec![sample_note("n1", "Buy milk", Tag::Shopping)],
            page: 1,
            total_pages: 1,
        };

        let out = presenter.render_page(&page, "milk", TagFilter::Only(Tag::Shopping));

        assert!(out.starts_with("Notes [Shopping] matching \"milk\""));
        assert!(out.contains("n1\t[Shopping]\tBuy milk\tContent of Buy milk"));
        assert!(!out.contains("[1]"));
    }

    #[test]
    fn given_empty_page_when_rendering_then_says_so() {
        let presenter = TerminalPresenter::new();
        let page = NotesPage {
            notes: vec![],
            page: 1,
            total_pages: 0,
        };

        let out = presenter.render_page(&page, "", TagFilter::All);

        assert!(out.contains("No notes found"));
    }

    #[test]
    fn given_middle_page_when_rendering_pagination_then_marks_current() {
        let presenter = TerminalPresenter::new();
        let mut pagination = Pagination::new();
        pagination.update_total_pages(3);
        pagination.set_page(2).unwrap();

        assert_eq!(presenter.render_pagination(&pagination), "‹ 1 [2] 3 ›");
    }

    #[test]
    fn given_invalid_draft_when_rendering_validation_then_lists_fields() {
        let presenter = TerminalPresenter::new();
        let errors = Draft::new("ab", "", "Todo").validate().unwrap_err();

        let out = presenter.render_validation(&errors);

        assert!(out.contains("Title"));
        assert!(out.contains("Content"));
        assert!(!out.contains("Tag "));
    }

    #[test]
    fn given_success_notice_when_rendering_then_prefixed_with_check() {
        let presenter = TerminalPresenter::new();
        let out = presenter.render_notice(&Notice::success("Note created successfully"));
        assert_eq!(out, "✔ Note created successfully");
    }

    #[test]
    fn given_service_failure_when_rendering_error_then_single_notice() {
        let presenter = TerminalPresenter::new();
        let err = DomainError::Service {
            status: 500,
            message: "boom".to_string(),
        };

        let out = presenter.render_error(&err);

        assert_eq!(out.matches('✖').count(), 1);
        assert_eq!(out, "✖ Request failed. Please try again later");
    }

    #[test]
    fn given_invalid_draft_when_rendering_error_then_notice_and_field_lines() {
        let presenter = TerminalPresenter::new();
        let errors = Draft::new("ab", "", "Todo").validate().unwrap_err();

        let out = presenter.render_error(&DomainError::Validation(errors));

        assert_eq!(out.matches('✖').count(), 1);
        assert!(out.contains("Title"));
        assert!(out.contains("This field is required"));
    }

    #[test]
    fn given_network_failure_when_rendering_error_then_retry_hint() {
        let out = TerminalPresenter::new().render_error(&DomainError::Network("reset".to_string()));
        assert!(out.ends_with("Run the command again once the service is reachable"));
    }
}
