// src/constants.rs
//
// Application-wide constants shared by the domain rules, the HTTP client
// and the presenters.

/// Inactivity window before typed search text is committed.
///
/// Used in: `application/debouncer.rs`, `infrastructure/config.rs`
pub const DEBOUNCE_DELAY_MS: u64 = 300;

/// Page size requested from `GET /notes`.
pub const NOTES_PER_PAGE: u32 = 10;

pub const DEFAULT_BASE_URL: &str = "https://notehub-public.goit.study/api";

/// Environment variable holding the bearer token.
pub const TOKEN_ENV_VAR: &str = "NOTEHUB_TOKEN";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 50;
pub const CONTENT_MAX_CHARS: usize = 500;

/// Characters of content shown per note in the list view.
pub const PREVIEW_MAX_CHARS: usize = 60;

/// Delay in milliseconds after writing HTML file before returning from browser launch.
///
/// The browser needs a brief moment to read the file before the temporary
/// directory can be dropped.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
