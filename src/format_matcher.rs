//! Case-insensitive matching of distribution format labels.
//!
//! [`FormatMatcher`] decides which distribution of a record is harvested. Two
//! properties matter to operators:
//!
//! - Matching is against the **whole** format label. The pattern `json`
//!   matches `"JSON"` but not `"GeoJSON"`; use `.*json` for a suffix match.
//! - A pattern that fails to compile is **not** an error. The matcher silently
//!   falls back to [`DEFAULT_FORMAT_PATTERN`] and harvesting continues with
//!   default matching behavior. [`FormatMatcher::is_fallback`] reports when this
//!   happened.
//!
//! # Examples
//!
//! ```
//! use dcat_harvest::FormatMatcher;
//!
//! let matcher = FormatMatcher::compile("json");
//! assert!(matcher.matches("JSON"));
//! assert!(!matcher.matches("GeoJSON"));
//!
//! let fallback = FormatMatcher::compile("[unclosed");
//! assert!(fallback.is_fallback());
//! assert!(fallback.matches("Esri REST"));
//! ```

use lazy_static::lazy_static;
use regex_automata::meta::{BuildError, Regex};
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input, MatchKind};
use std::fmt;

/// Pattern used whenever the configured pattern fails to compile.
///
/// Selects ArcGIS REST service endpoints, labelled `"Esri REST"` in DCAT feeds.
pub const DEFAULT_FORMAT_PATTERN: &str = "esri rest";

lazy_static! {
    static ref DEFAULT_FORMAT_REGEX: Regex = build_full_match(DEFAULT_FORMAT_PATTERN)
        .expect("default format pattern is a valid regular expression");
}

/// Compile `pattern` case-insensitively, as written.
///
/// `MatchKind::All` makes an anchored search report the longest match at the
/// start of the haystack, so a full match exists exactly when that match ends
/// at the end of the haystack.
fn build_full_match(pattern: &str) -> Result<Regex, BuildError> {
    Regex::builder()
        .configure(Regex::config().match_kind(MatchKind::All))
        .syntax(syntax::Config::new().case_insensitive(true))
        .build(pattern)
}

/// Compiled, always-valid format pattern.
///
/// Immutable once constructed and cheap to clone.
#[derive(Clone)]
pub struct FormatMatcher {
    pattern: String,
    regex: Regex,
    fallback: bool,
}

impl FormatMatcher {
    /// Compile `pattern`, substituting [`DEFAULT_FORMAT_PATTERN`] if it is
    /// not a valid regular expression.
    ///
    /// Never fails.
    #[must_use]
    pub fn compile(pattern: &str) -> Self {
        match build_full_match(pattern) {
            Ok(regex) => FormatMatcher {
                pattern: pattern.to_string(),
                regex,
                fallback: false,
            },
            Err(_) => {
                tracing::debug!(
                    rejected = pattern,
                    default = DEFAULT_FORMAT_PATTERN,
                    "format pattern did not compile, using default"
                );
                FormatMatcher {
                    fallback: true,
                    ..Self::default()
                }
            },
        }
    }

    /// Whether `candidate` matches the pattern in its entirety.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let input = Input::new(candidate).anchored(Anchored::Yes);
        self.regex
            .search(&input)
            .is_some_and(|m| m.end() == candidate.len())
    }

    /// The pattern in force, as written by the caller or the default.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether the default pattern was substituted for the requested one.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl Default for FormatMatcher {
    /// Matcher for [`DEFAULT_FORMAT_PATTERN`].
    fn default() -> Self {
        FormatMatcher {
            pattern: DEFAULT_FORMAT_PATTERN.to_string(),
            regex: DEFAULT_FORMAT_REGEX.clone(),
            fallback: false,
        }
    }
}

impl fmt::Debug for FormatMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatMatcher")
            .field("pattern", &self.pattern)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl fmt::Display for FormatMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
