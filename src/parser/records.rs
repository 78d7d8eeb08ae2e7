use super::dom::{closest_ancestor, descendants_by_tag, first_descendant, DomNode};
use super::medium;
use crate::model::ArtworkRecord;

const CONTAINER_TAG: &str = "div";
/// Checked in this order; the first level present in the container wins.
const TITLE_TAGS: &[&str] = &["h2", "h3", "h4"];

/// Build one record per usable `<img>` under `root`, in document order.
///
/// Images without a `src`, or without an enclosing container, are skipped.
pub fn extract_records<N: DomNode>(root: &N, filename: &str) -> Vec<ArtworkRecord> {
    descendants_by_tag(root, "img")
        .iter()
        .filter_map(|img| build_record(img, filename))
        .collect()
}

fn build_record<N: DomNode>(img: &N, filename: &str) -> Option<ArtworkRecord> {
    let src = img.attr("src").filter(|s| !s.trim().is_empty())?;
    let container = closest_ancestor(img, CONTAINER_TAG)?;

    let heading = TITLE_TAGS
        .iter()
        .find_map(|tag| first_descendant(&container, tag))
        .map(|h| h.text_content());
    let raw_description = first_descendant(&container, "p")
        .map(|p| p.text_content())
        .unwrap_or_default();

    let title = match heading.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => title_from_src(src),
    };

    Some(ArtworkRecord {
        title,
        medium: medium::classify(filename, &raw_description),
        year: None,
        dimensions: None,
        image: src.to_string(),
        description: Some(raw_description.trim().to_string()),
    })
}

/// Last path segment of `src` without its extension; falls back to the
/// whole (trimmed) `src` if that leaves nothing.
fn title_from_src(src: &str) -> String {
    let stem = file_stem(src);
    if stem.is_empty() {
        src.trim().to_string()
    } else {
        stem.to_string()
    }
}

fn file_stem(src: &str) -> &str {
    let path = src.trim_end_matches('/');
    let base = path.rsplit('/').next().unwrap_or(path);
    match base.rfind('.') {
        // a leading dot marks a hidden file, not an extension
        Some(i) if i > 0 => &base[..i],
        _ => base,
    }
}
