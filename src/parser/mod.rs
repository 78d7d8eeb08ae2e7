pub mod dom;
pub mod medium;
pub mod records;

use scraper::Html;

use crate::model::ArtworkRecord;

/// Two-step pipeline: html → DOM → artwork records.
pub fn extract_document(filename: &str, html: &str) -> Vec<ArtworkRecord> {
    let doc = Html::parse_document(html);
    records::extract_records(&doc.root_element(), filename)
}
