//! Output file names.

use crate::model::HotelRecord;

/// File name of the all-hotels export.
pub const ALL_HOTELS_FILE_NAME: &str = "all-hotels.pdf";

/// Lowercase `name`, collapse every run of non-alphanumeric characters
/// into one `-` and trim dashes at both ends. Never returns an empty slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "hotel".to_string()
    } else {
        slug
    }
}

/// `<slug>-proposal.pdf` for a hotel document.
pub fn document_file_name(hotel: &HotelRecord) -> String {
    format!("{}-proposal.pdf", slugify(hotel.name.as_deref().unwrap_or("")))
}
