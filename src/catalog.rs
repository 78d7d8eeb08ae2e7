//! The catalog as the website sees it.
//!
//! The site does not trust the JSON blindly: it drops incomplete entries,
//! derives an `id` from the title when none is given and roots image paths
//! at `/`. The same rules live here so `list` and `stats` show exactly what
//! ends up on the gallery page.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{ExtractError, Result};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub const ALL_MEDIUMS: &str = "All";

/// An entry as stored on disk. Everything is optional because the file may
/// have been edited by hand after extraction. `year` and `dimensions` are
/// never shown on the gallery page and are ignored here.
#[derive(Debug, Default, Deserialize)]
pub struct RawEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub medium: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub medium: String,
    pub image: String,
    pub description: Option<String>,
}

pub fn load(path: &Path) -> Result<Vec<CatalogEntry>> {
    let text = fs::read_to_string(path).map_err(|source| ExtractError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<RawEntry> =
        serde_json::from_str(&text).map_err(|source| ExtractError::ParseCatalog {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(normalize(raw))
}

/// Drop entries missing a title, image or medium, then fill in `id` and
/// root the image path.
pub fn normalize(raw: Vec<RawEntry>) -> Vec<CatalogEntry> {
    raw.into_iter()
        .filter_map(|e| {
            let title = non_empty(e.title)?;
            let image = non_empty(e.image)?;
            let medium = non_empty(e.medium)?;
            let id = non_empty(e.id).unwrap_or_else(|| slugify(&title));

            Some(CatalogEntry {
                id,
                title,
                medium,
                image: root_image_path(image),
                description: e.description,
            })
        })
        .collect()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Lower-case, each whitespace run replaced by a single `-`.
/// Not unique: equal titles give equal ids.
pub fn slugify(title: &str) -> String {
    WHITESPACE_RE.replace_all(&title.to_lowercase(), "-").into_owned()
}

fn root_image_path(image: String) -> String {
    if image.starts_with('/') {
        image
    } else {
        format!("/{}", image)
    }
}

/// Filter buttons: "All", then each medium once, in order of first appearance.
pub fn mediums(entries: &[CatalogEntry]) -> Vec<String> {
    let mut out = vec![ALL_MEDIUMS.to_string()];
    for e in entries {
        if !out.contains(&e.medium) {
            out.push(e.medium.clone());
        }
    }
    out
}

pub fn filter<'a>(entries: &'a [CatalogEntry], medium: &str) -> Vec<&'a CatalogEntry> {
    entries
        .iter()
        .filter(|e| medium == ALL_MEDIUMS || e.medium == medium)
        .collect()
}

/// Ids used by more than one entry, with how many entries share each.
pub fn duplicate_ids(entries: &[CatalogEntry]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for e in entries {
        *counts.entry(e.id.as_str()).or_default() += 1;
    }
    let mut dups: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, n)| (id.to_string(), n))
        .collect();
    dups.sort();
    dups
}
