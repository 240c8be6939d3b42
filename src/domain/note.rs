// src/domain/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of categories the service accepts for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl Tag {
    pub const ALL: [Tag; 5] = [
        Tag::Todo,
        Tag::Work,
        Tag::Personal,
        Tag::Meeting,
        Tag::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Todo => "Todo",
            Tag::Work => "Work",
            Tag::Personal => "Personal",
            Tag::Meeting => "Meeting",
            Tag::Shopping => "Shopping",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tag '{0}'")]
pub struct UnknownTag(pub String);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Tag part of a list query. `All` sends no tag to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagFilter {
    #[default]
    All,
    Only(Tag),
}

impl TagFilter {
    pub fn tag(&self) -> Option<Tag> {
        match self {
            TagFilter::All => None,
            TagFilter::Only(tag) => Some(*tag),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::All => f.write_str("All"),
            TagFilter::Only(tag) => tag.fmt(f),
        }
    }
}

impl FromStr for TagFilter {
    type Err = UnknownTag;

    /// Parses a tag-path segment: `All` or one of the tag names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(TagFilter::All),
            other => other.parse().map(TagFilter::Only),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tag: Tag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for `POST /notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tag: Tag,
}
