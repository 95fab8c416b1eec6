//! # Hotel Document Layout
//!
//! Draws a hotel (and optionally a proposal) onto a [`Surface`]:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ HOTEL            header band │
//! ├──────────────────────────────┤
//! │ [ HOTEL INFORMATION ]        │
//! │ Name:  ....   City:  ....    │  two-column field pairs,
//! │ Address: ...  Stars: ...     │  row height from wrapping
//! │ [ PHOTOS ]                   │  only when images exist
//! │ ┌────────┐                   │
//! │ └────────┘                   │  fitted into 180 x 90 mm
//! └──────────────────────────────┘
//!   new page: [ PROPOSAL ] rows
//! ```
//!
//! Each block checks the cursor against the bottom limit before it is
//! drawn and moves whole to a new page when it would cross it.

use super::Cursor;
use crate::font::StandardFont;
use crate::image_loader::NormalizedImage;
use crate::model::{HotelRecord, ProposalDraft};
use crate::style::{palette, Color};
use crate::surface::Surface;

/// Rendered in place of any missing value.
pub const PLACEHOLDER: &str = "-";

pub const HEADER_BAND_HEIGHT: f64 = 30.0;
pub const HEADER_TITLE: &str = "HOTEL";

pub const SECTION_BOX_X: f64 = 10.0;
pub const SECTION_BOX_WIDTH: f64 = 190.0;
pub const SECTION_BOX_HEIGHT: f64 = 20.0;
/// Space a hotel section header occupies, box plus gap.
pub const SECTION_BLOCK_HEIGHT: f64 = 30.0;
/// Space the proposal header occupies.
pub const PROPOSAL_BLOCK_HEIGHT: f64 = 28.0;

pub const LINE_HEIGHT: f64 = 6.5;
pub const LEFT_X: f64 = 15.0;
pub const RIGHT_X: f64 = 110.0;
pub const LABEL_WIDTH: f64 = 28.0;
pub const MARGIN_RIGHT: f64 = 15.0;
pub const COLUMN_GUTTER: f64 = 5.0;
pub const MIN_COLUMN_WIDTH: f64 = 10.0;

pub const PHOTO_X: f64 = 15.0;
pub const PHOTO_MAX_WIDTH: f64 = 180.0;
pub const PHOTO_MAX_HEIGHT: f64 = 90.0;
pub const PHOTO_GAP: f64 = 8.0;

pub const PROPOSAL_VALUE_X: f64 = 60.0;
pub const PROPOSAL_VALUE_WIDTH: f64 = 120.0;

const BODY_FONT_SIZE: f64 = 10.0;
const SECTION_FONT_SIZE: f64 = 14.0;
const HEADER_FONT_SIZE: f64 = 16.0;
const URL_DISPLAY_LIMIT: usize = 38;

/// One label/value cell of the hotel information grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    /// A field whose value may be missing; `None` becomes [`PLACEHOLDER`].
    pub fn new(label: &'static str, value: Option<&str>) -> Self {
        Self {
            label,
            value: value.unwrap_or(PLACEHOLDER).to_string(),
        }
    }

    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// A row of the hotel information grid. The right cell is optional.
pub type FieldPair = (Field, Option<Field>);

/// The fitted draw size of an image, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedSize {
    pub width: f64,
    pub height: f64,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// The hotel information rows in drawing order.
pub fn hotel_fields(hotel: &HotelRecord) -> Vec<FieldPair> {
    let stars = hotel.star_rating().map(|s| s.to_string());
    let website = hotel.website_link.as_deref().map(shorten_url);
    let location = hotel.location_link.as_deref().map(shorten_url);

    vec![
        (
            Field::new("Name", hotel.name.as_deref()),
            Some(Field::new("City", hotel.city.as_deref())),
        ),
        (
            Field::new("Address", hotel.address.as_deref()),
            Some(Field::new("Stars", stars.as_deref())),
        ),
        (
            Field::new("Group", hotel.group_name.as_deref()),
            Some(Field::new("Type", hotel.hotel_type.as_deref())),
        ),
        (
            Field::new("Website", website.as_deref()),
            Some(Field::new("Location", location.as_deref())),
        ),
        (Field::text("Breakfast", yes_no(hotel.breakfast)), None),
    ]
}

/// The proposal rows in drawing order.
pub fn proposal_rows(proposal: &ProposalDraft) -> Vec<Field> {
    let rooms = proposal
        .rooms
        .iter()
        .map(|r| r.count.map(|c| c.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    // zero guests is an unfilled form field; a zero price is a real price
    let guests = proposal.guests.filter(|g| *g > 0).map(|g| g.to_string());
    let price = proposal.price.map(|p| p.to_string());

    vec![
        Field::new("Client", proposal.client_name.as_deref()),
        Field::new("Guests", guests.as_deref()),
        Field::new("Check-in", proposal.check_in.as_deref()),
        Field::new("Check-out", proposal.check_out.as_deref()),
        Field::text("Breakfast", yes_no(proposal.breakfast)),
        Field::text("Free cancel", yes_no(proposal.free_cancel)),
        Field::new("Rooms", Some(rooms.as_str()).filter(|r| !r.is_empty())),
        Field::new("Price", price.as_deref()),
    ]
}

/// Shorten a URL for display: host without `www.` plus path, no trailing
/// slash, cut at 38 characters.
pub fn shorten_url(url: &str) -> String {
    let shortened = match reqwest::Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            let host = strip_www(host);
            let path = parsed.path().trim_end_matches('/');
            let joined = format!("{}{}", host, path);
            if joined.is_empty() {
                host.to_string()
            } else {
                joined
            }
        }
        Err(_) => {
            let lower = url.to_ascii_lowercase();
            let rest = if lower.starts_with("https://") {
                &url[8..]
            } else if lower.starts_with("http://") {
                &url[7..]
            } else {
                url
            };
            strip_www(rest).to_string()
        }
    };

    if shortened.chars().count() > URL_DISPLAY_LIMIT {
        let cut: String = shortened.chars().take(URL_DISPLAY_LIMIT).collect();
        format!("{}…", cut)
    } else {
        shortened
    }
}

fn strip_www(host: &str) -> &str {
    match host.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &host[4..],
        _ => host,
    }
}

/// Height of a field row: the taller of the two wrapped cells.
pub fn row_height(left_lines: usize, right_lines: usize) -> f64 {
    left_lines.max(right_lines).max(1) as f64 * LINE_HEIGHT
}

/// Fit an image of `width_px` x `height_px` into the photo box.
///
/// Aspect ratio is preserved and images are only ever scaled down. Unknown
/// (zero) dimensions fall back to the full box.
pub fn fit_image(width_px: u32, height_px: u32) -> FittedSize {
    if width_px == 0 || height_px == 0 {
        return FittedSize {
            width: PHOTO_MAX_WIDTH,
            height: PHOTO_MAX_HEIGHT,
        };
    }
    let w = width_px as f64;
    let h = height_px as f64;
    let ratio = (PHOTO_MAX_WIDTH / w).min(PHOTO_MAX_HEIGHT / h).min(1.0);
    FittedSize {
        width: w * ratio,
        height: h * ratio,
    }
}

/// Draw the full-width title band at the top of the current page and
/// return the cursor below it.
pub fn draw_header_band<S: Surface + ?Sized>(surface: &mut S, title: &str) -> Cursor {
    surface.set_fill_color(palette::PRIMARY);
    let width = surface.page_width();
    surface.fill_rect(0.0, 0.0, width, HEADER_BAND_HEIGHT);
    surface.set_text_color(Color::WHITE);
    surface.set_font(StandardFont::HelveticaBold, HEADER_FONT_SIZE);
    surface.text(title, LEFT_X, 18.0);
    Cursor::at(HEADER_BAND_HEIGHT + 10.0)
}

/// Draw a rounded section header box with `title` at the cursor. Returns
/// the cursor at the box top; callers advance past it.
pub fn draw_section_header<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: Cursor,
    title: &str,
    color: Color,
) -> Cursor {
    surface.set_fill_color(palette::LIGHT);
    surface.fill_rounded_rect(
        SECTION_BOX_X,
        cursor.y(),
        SECTION_BOX_WIDTH,
        SECTION_BOX_HEIGHT,
        2.0,
    );
    surface.set_font(StandardFont::HelveticaBold, SECTION_FONT_SIZE);
    surface.set_text_color(color);
    surface.text(title, LEFT_X, cursor.y() + 12.0);
    cursor
}

fn draw_lines<S: Surface + ?Sized>(surface: &mut S, lines: &[String], x: f64, y: f64) {
    for (i, line) in lines.iter().enumerate() {
        surface.text(line, x, y + i as f64 * LINE_HEIGHT);
    }
}

/// Draw one two-column field row and return the cursor below it.
pub fn draw_field_pair<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: Cursor,
    left: &Field,
    right: Option<&Field>,
) -> Cursor {
    let left_value_x = LEFT_X + LABEL_WIDTH;
    let right_value_x = RIGHT_X + LABEL_WIDTH;
    let left_width = (RIGHT_X - left_value_x - COLUMN_GUTTER).max(MIN_COLUMN_WIDTH);
    let right_width = (surface.page_width() - MARGIN_RIGHT - right_value_x).max(MIN_COLUMN_WIDTH);

    surface.set_font(StandardFont::Helvetica, BODY_FONT_SIZE);
    let left_lines = surface.split_text_to_size(&left.value, left_width);
    let right_lines = right
        .map(|f| surface.split_text_to_size(&f.value, right_width))
        .unwrap_or_default();
    let block_height = row_height(left_lines.len(), right_lines.len());

    let cursor = cursor.reserve(surface, block_height);
    let y = cursor.y();

    surface.set_font(StandardFont::HelveticaBold, BODY_FONT_SIZE);
    surface.text(&format!("{}:", left.label), LEFT_X, y);
    if let Some(right) = right {
        surface.text(&format!("{}:", right.label), RIGHT_X, y);
    }

    surface.set_font(StandardFont::Helvetica, BODY_FONT_SIZE);
    draw_lines(surface, &left_lines, left_value_x, y);
    draw_lines(surface, &right_lines, right_value_x, y);

    cursor.advance(block_height)
}

/// Draw the photos section. Nothing is drawn for an empty list.
pub fn draw_photos<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: Cursor,
    photos: &[NormalizedImage],
) -> Cursor {
    if photos.is_empty() {
        return cursor;
    }

    let cursor = cursor.reserve(surface, SECTION_BLOCK_HEIGHT);
    let mut cursor =
        draw_section_header(surface, cursor, "PHOTOS", palette::PRIMARY).advance(SECTION_BLOCK_HEIGHT);

    for photo in photos {
        let size = fit_image(photo.width_px, photo.height_px);
        log::debug!(
            "photo {}x{}px ({}) fitted to {:.1}x{:.1}mm",
            photo.width_px,
            photo.height_px,
            photo.format.name(),
            size.width,
            size.height
        );
        cursor = cursor.reserve(surface, size.height);
        surface.image(photo, PHOTO_X, cursor.y(), size.width, size.height);
        cursor = cursor.advance(size.height + PHOTO_GAP);
    }
    cursor
}

/// Draw a hotel's header band, information grid and photos, starting at
/// the top of the current (empty) page.
pub fn draw_hotel_page<S: Surface + ?Sized>(
    surface: &mut S,
    hotel: &HotelRecord,
    photos: &[NormalizedImage],
) -> Cursor {
    let cursor = draw_header_band(surface, HEADER_TITLE);

    let cursor = cursor.reserve(surface, SECTION_BLOCK_HEIGHT);
    let mut cursor = draw_section_header(surface, cursor, "HOTEL INFORMATION", palette::PRIMARY)
        .advance(SECTION_BLOCK_HEIGHT);

    surface.set_text_color(palette::TEXT);
    for (left, right) in hotel_fields(hotel) {
        cursor = draw_field_pair(surface, cursor, &left, right.as_ref());
    }

    draw_photos(surface, cursor, photos)
}

/// Draw the proposal section on a new page.
pub fn draw_proposal<S: Surface + ?Sized>(surface: &mut S, proposal: &ProposalDraft) -> Cursor {
    surface.add_page();
    let cursor = draw_section_header(surface, Cursor::top(), "PROPOSAL", palette::SECONDARY);
    let mut cursor = cursor.advance(PROPOSAL_BLOCK_HEIGHT);

    surface.set_text_color(palette::TEXT);
    for row in proposal_rows(proposal) {
        surface.set_font(StandardFont::Helvetica, BODY_FONT_SIZE);
        let lines = surface.split_text_to_size(&row.value, PROPOSAL_VALUE_WIDTH);
        let block_height = row_height(lines.len(), 0);
        cursor = cursor.reserve(surface, block_height);

        surface.set_font(StandardFont::HelveticaBold, BODY_FONT_SIZE);
        surface.text(&format!("{}:", row.label), LEFT_X, cursor.y());
        surface.set_font(StandardFont::Helvetica, BODY_FONT_SIZE);
        draw_lines(surface, &lines, PROPOSAL_VALUE_X, cursor.y());

        cursor = cursor.advance(block_height);
    }
    cursor
}

/// Lay out a complete hotel document: hotel page, photos, and the
/// proposal when one is given.
pub fn layout_hotel_document<S: Surface + ?Sized>(
    surface: &mut S,
    hotel: &HotelRecord,
    photos: &[NormalizedImage],
    proposal: Option<&ProposalDraft>,
) {
    draw_hotel_page(surface, hotel, photos);
    if let Some(proposal) = proposal {
        draw_proposal(surface, proposal);
    }
}

/// Lay out several hotels, each starting on its own page.
pub fn layout_hotel_catalog<S: Surface + ?Sized>(
    surface: &mut S,
    hotels: &[(HotelRecord, Vec<NormalizedImage>)],
) {
    for (i, (hotel, photos)) in hotels.iter().enumerate() {
        if i > 0 {
            surface.add_page();
        }
        draw_hotel_page(surface, hotel, photos);
    }
}
