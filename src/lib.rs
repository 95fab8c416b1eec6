//! # Staysheet
//!
//! Hotel information sheets and client stay proposals as paginated A4 PDFs.
//!
//! A hotel record, its photos and an optional proposal draft are laid out
//! top to bottom with an explicit cursor. Every row, header and photo is an
//! unbreakable block: it either fits above the bottom limit or moves whole
//! to the next page.
//!
//! ## Architecture
//!
//! ```text
//! HotelRecord + ProposalDraft?        ImageSource (hotel API)
//!       |                                   |
//!       |                  [image_loader] normalize to JPEG/PNG
//!       ↓                                   ↓
//!   [layout]     cursor, page breaks, hotel/proposal sections
//!       ↓
//!   [surface]    drawing surface; records pages
//!       ↓
//!   [pdf]        serialize to PDF bytes
//!       ↓
//!   <slug>-proposal.pdf
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod naming;
pub mod pdf;
pub mod style;
pub mod surface;
pub mod text;

use std::path::{Path, PathBuf};

pub use client::{HotelApiClient, ImageSource};
pub use config::Config;
pub use error::{Result, StaysheetError};
pub use model::{
    HotelFilter, HotelRecord, HotelSort, NewProposal, ProposalDraft, RoomRequest, SortKey,
    SortOrder,
};

use image_loader::{normalize_image, NormalizedImage};
use layout::document::{layout_hotel_catalog, layout_hotel_document};
use model::Metadata;
use surface::{PdfSurface, Surface};

/// A finished PDF and the name it should be saved under.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl RenderedDocument {
    /// Write the PDF into `dir` under its file name.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        log::info!(
            "saved {} ({} page(s), {} bytes)",
            path.display(),
            self.page_count,
            self.bytes.len()
        );
        Ok(path)
    }
}

/// Gather and normalize a hotel's photos, in display order.
///
/// Inline `images` on the record win over the image source. A failed
/// fetch yields no photos; an image that fails to normalize is skipped.
/// Neither is an error.
pub async fn collect_photos(hotel: &HotelRecord, source: &dyn ImageSource) -> Vec<NormalizedImage> {
    let sources = match (&hotel.images, hotel.id) {
        (Some(inline), _) => inline.clone(),
        (None, Some(id)) => match source.hotel_images(id).await {
            Ok(images) => images,
            Err(e) => {
                log::warn!("could not fetch images for hotel {}: {}", id, e);
                Vec::new()
            }
        },
        (None, None) => Vec::new(),
    };

    let mut photos = Vec::with_capacity(sources.len());
    for (i, src) in sources.into_iter().enumerate() {
        match normalize_image(src).await {
            Ok(photo) => photos.push(photo),
            Err(e) => log::warn!("skipping image {}: {}", i + 1, e),
        }
    }
    photos
}

/// Render one hotel document, with the proposal section when a draft is
/// given.
pub async fn render_hotel_document(
    hotel: &HotelRecord,
    proposal: Option<&ProposalDraft>,
    source: &dyn ImageSource,
) -> Result<RenderedDocument> {
    let photos = collect_photos(hotel, source).await;

    let mut surface = PdfSurface::new();
    layout_hotel_document(&mut surface, hotel, &photos, proposal);
    let page_count = surface.page_count();

    let metadata = Metadata {
        title: hotel.name.clone(),
        author: None,
        subject: Some(if proposal.is_some() {
            "Hotel proposal".to_string()
        } else {
            "Hotel information".to_string()
        }),
    };

    Ok(RenderedDocument {
        file_name: naming::document_file_name(hotel),
        bytes: surface.finish(&metadata)?,
        page_count,
    })
}

/// Render every hotel into one document, each starting on a new page.
pub async fn render_all_hotels(
    hotels: &[HotelRecord],
    source: &dyn ImageSource,
) -> Result<RenderedDocument> {
    let mut sections = Vec::with_capacity(hotels.len());
    for hotel in hotels {
        let photos = collect_photos(hotel, source).await;
        sections.push((hotel.clone(), photos));
    }

    let mut surface = PdfSurface::new();
    layout_hotel_catalog(&mut surface, &sections);
    let page_count = surface.page_count();

    let metadata = Metadata {
        title: Some("All hotels".to_string()),
        author: None,
        subject: Some("Hotel information".to_string()),
    };

    Ok(RenderedDocument {
        file_name: naming::ALL_HOTELS_FILE_NAME.to_string(),
        bytes: surface.finish(&metadata)?,
        page_count,
    })
}

/// Render a hotel document and save it as `<slug>-proposal.pdf` in
/// `out_dir`.
pub async fn export_hotel_document(
    hotel: &HotelRecord,
    proposal: Option<&ProposalDraft>,
    source: &dyn ImageSource,
    out_dir: &Path,
) -> Result<PathBuf> {
    render_hotel_document(hotel, proposal, source)
        .await?
        .save(out_dir)
}
