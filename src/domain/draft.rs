// src/domain/draft.rs
use crate::constants::{CONTENT_MAX_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
use crate::domain::{NewNote, Tag};
use std::collections::BTreeMap;
use std::fmt;

/// Unsaved note as typed into the creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub tag: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: Tag::Todo.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Title,
    Content,
    Tag,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftField::Title => "title",
            DraftField::Content => "content",
            DraftField::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// Per-field messages from a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<DraftField, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag: tag.into(),
        }
    }

    /// Check the draft against the service's field rules.
    ///
    /// Lengths count characters, not bytes. Every violated field gets a
    /// message; a draft only converts into a `NewNote` when none do.
    pub fn validate(&self) -> Result<NewNote, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title_len = self.title.chars().count();
        if title_len < TITLE_MIN_CHARS {
            errors.insert(
                DraftField::Title,
                format!("Must be at least {TITLE_MIN_CHARS} characters"),
            );
        } else if title_len > TITLE_MAX_CHARS {
            errors.insert(
                DraftField::Title,
                format!("Must be at most {TITLE_MAX_CHARS} characters"),
            );
        }

        if self.content.is_empty() {
            errors.insert(DraftField::Content, "This field is required");
        } else if self.content.chars().count() > CONTENT_MAX_CHARS {
            errors.insert(
                DraftField::Content,
                format!("Must be at most {CONTENT_MAX_CHARS} characters"),
            );
        }

        let tag = if self.tag.is_empty() {
            errors.insert(DraftField::Tag, "Required");
            None
        } else {
            match self.tag.parse::<Tag>() {
                Ok(tag) => Some(tag),
                Err(_) => {
                    let allowed: Vec<&str> = Tag::ALL.iter().map(Tag::as_str).collect();
                    errors.insert(
                        DraftField::Tag,
                        format!("Must be one of: {}", allowed.join(", ")),
                    );
                    None
                }
            }
        };

        match tag {
            Some(tag) if errors.is_empty() => Ok(NewNote {
                title: self.title.clone(),
                content: self.content.clone(),
                tag,
            }),
            _ => Err(errors),
        }
    }
}
