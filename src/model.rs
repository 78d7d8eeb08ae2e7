use std::fmt;

use serde::{Deserialize, Serialize};

/// Material/technique classification. Closed set; `Other` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Medium {
    Bronze,
    Wood,
    Lithography,
    Other,
}

impl Medium {
    pub fn as_str(self) -> &'static str {
        match self {
            Medium::Bronze => "Bronze",
            Medium::Wood => "Wood",
            Medium::Lithography => "Lithography",
            Medium::Other => "Other",
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One artwork, derived from one image occurrence in a source page.
///
/// `year` and `dimensions` belong to the catalog schema but the extractor
/// never fills them; they are omitted from the JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub title: String,
    pub medium: Medium,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
