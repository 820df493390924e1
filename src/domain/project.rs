//! Remote project identity
//!
//! A design is linked to an AISLER project through a single designated
//! title-block comment line of the form `AISLER Project ID: XXXXXXXX`.
//! This module owns that format: the comment pattern is parsed and rendered
//! here and nowhere else.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Anchored pattern for the linkage comment line.
const COMMENT_PATTERN: &str = r"^AISLER Project ID: ([A-Z]{8})$";

fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(COMMENT_PATTERN).expect("comment pattern is valid"))
}

/// AISLER project identifier newtype wrapper
///
/// An 8-letter uppercase code assigned by the fabrication service.
///
/// # Examples
///
/// ```
/// use aisler_push::domain::project::ProjectId;
/// use std::str::FromStr;
///
/// let id = ProjectId::from_str("ABCDEFGH").unwrap();
/// assert_eq!(id.as_str(), "ABCDEFGH");
/// assert_eq!(id.to_comment(), "AISLER Project ID: ABCDEFGH");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new ProjectId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The project identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(ProjectId)` if the ID is exactly 8 uppercase ASCII
    /// letters, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.len() != 8 || !id.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(format!(
                "Invalid project ID '{id}'. Expected exactly 8 uppercase letters"
            ));
        }
        Ok(Self(id))
    }

    /// Parses the designated title-block comment line
    ///
    /// Any content other than the exact linkage format (including an empty
    /// line) means "no linked project" and yields `None`. Malformed content
    /// is never an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use aisler_push::domain::project::ProjectId;
    ///
    /// assert!(ProjectId::from_comment("AISLER Project ID: ABCDEFGH").is_some());
    /// assert!(ProjectId::from_comment("AISLER Project ID: abcdefgh").is_none());
    /// assert!(ProjectId::from_comment("").is_none());
    /// ```
    pub fn from_comment(comment: &str) -> Option<Self> {
        comment_regex()
            .captures(comment)
            .map(|caps| Self(caps[1].to_string()))
    }

    /// Renders the title-block comment line that links a design to this project
    pub fn to_comment(&self) -> String {
        format!("AISLER Project ID: {}", self.0)
    }

    /// Returns the project ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
