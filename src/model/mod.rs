//! # Records
//!
//! The hotel and proposal records the API and the CLI hand to the layout
//! engine. Every field the API may leave out, or send malformed, is an
//! `Option` defaulted at the serde boundary, so rendering never has to
//! guess whether a field exists and one bad value never loses a record.

mod lenient;

use serde::{Deserialize, Serialize};

/// A hotel as returned by `GET /hotels`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub group_name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_string")]
    pub hotel_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u8")]
    pub stars: Option<u8>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub website_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub breakfast: bool,
    /// Inline image references (data URIs). When absent the images are
    /// fetched from the API by `id`.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt")]
    pub images: Option<Vec<String>>,
}

impl HotelRecord {
    /// The star rating, if it is a valid 1-5 value.
    pub fn star_rating(&self) -> Option<u8> {
        self.stars.filter(|s| (1..=5).contains(s))
    }
}

/// One requested room in a proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomRequest {
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub count: Option<u32>,
}

/// A client stay proposal drafted against a hotel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDraft {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub guests: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub check_in: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub breakfast: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub free_cancel: bool,
    #[serde(default, deserialize_with = "lenient::list")]
    pub rooms: Vec<RoomRequest>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
}

/// Body of `GET /hotels/{id}/images/base64`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub images: Vec<String>,
}

/// The hotel reference embedded in a proposal listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalHotel {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub city: Option<String>,
}

/// A row of `GET /proposals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub proposal_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub hotel: Option<ProposalHotel>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub guests: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub check_in: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub breakfast: bool,
}

impl ProposalSummary {
    /// The proposal number, or the id when the API assigned none.
    pub fn reference(&self) -> Option<String> {
        self.proposal_number
            .clone()
            .or_else(|| self.id.map(|id| id.to_string()))
    }
}

/// Body of `POST /proposals`.
///
/// Built from a draft with the form defaults filled in: one guest, a price
/// of 0 and one of each room when the draft leaves them out or at zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProposal {
    pub client_name: String,
    pub guests: u32,
    pub check_in: String,
    pub check_out: String,
    pub breakfast: bool,
    pub free_cancel: bool,
    pub price: f64,
    pub hotel_id: u64,
    pub rooms: Vec<NewRoom>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewRoom {
    pub count: u32,
}

impl NewProposal {
    pub fn from_draft(hotel_id: u64, draft: &ProposalDraft) -> Self {
        Self {
            client_name: draft.client_name.clone().unwrap_or_default(),
            guests: draft.guests.filter(|g| *g > 0).unwrap_or(1),
            check_in: draft.check_in.clone().unwrap_or_default(),
            check_out: draft.check_out.clone().unwrap_or_default(),
            breakfast: draft.breakfast,
            free_cancel: draft.free_cancel,
            price: draft.price.unwrap_or(0.0),
            hotel_id,
            rooms: draft
                .rooms
                .iter()
                .map(|r| NewRoom {
                    count: r.count.filter(|c| *c > 0).unwrap_or(1),
                })
                .collect(),
        }
    }
}

/// Client-side hotel list filter.
#[derive(Debug, Clone, Default)]
pub struct HotelFilter {
    /// Case-insensitive substring of the city.
    pub city: Option<String>,
    /// Exact star rating.
    pub stars: Option<u8>,
    /// Case-insensitive substring of the group name.
    pub group_name: Option<String>,
}

impl HotelFilter {
    pub fn matches(&self, hotel: &HotelRecord) -> bool {
        if let Some(ref city) = self.city {
            if !contains_ignore_case(hotel.city.as_deref(), city) {
                return false;
            }
        }
        if let Some(stars) = self.stars {
            if hotel.stars != Some(stars) {
                return false;
            }
        }
        if let Some(ref group) = self.group_name {
            if !contains_ignore_case(hotel.group_name.as_deref(), group) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, hotels: &'a [HotelRecord]) -> Vec<&'a HotelRecord> {
        hotels.iter().filter(|h| self.matches(h)).collect()
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// Field a hotel listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    City,
    Stars,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Hotel list ordering. Text compares case-insensitively, stars
/// numerically; a missing value sorts as empty text or zero stars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotelSort {
    pub by: SortKey,
    pub order: SortOrder,
}

impl HotelSort {
    /// Stable: hotels that compare equal keep their listing order.
    pub fn sort<'a>(&self, mut hotels: Vec<&'a HotelRecord>) -> Vec<&'a HotelRecord> {
        hotels.sort_by(|a, b| {
            let ordering = match self.by {
                SortKey::Name => text_key(&a.name).cmp(&text_key(&b.name)),
                SortKey::City => text_key(&a.city).cmp(&text_key(&b.city)),
                SortKey::Stars => a.stars.unwrap_or(0).cmp(&b.stars.unwrap_or(0)),
            };
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        hotels
    }

    /// Same key, opposite direction.
    pub fn toggled(self) -> Self {
        let order = match self.order {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        };
        Self { order, ..self }
    }
}

fn text_key(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").to_lowercase()
}

/// Document metadata embedded in the PDF.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_from_api_json() {
        let hotel: HotelRecord = serde_json::from_str(
            r#"{"id": 7, "name": "Grand", "city": "Paris", "group_name": "Accor",
                "type": "Boutique", "stars": 4, "address": "1 Rue X",
                "website_link": "https://www.grand.fr/", "location_link": null,
                "breakfast": true, "price": 120}"#,
        )
        .unwrap();
        assert_eq!(hotel.id, Some(7));
        assert_eq!(hotel.hotel_type.as_deref(), Some("Boutique"));
        assert_eq!(hotel.location_link, None);
        assert!(hotel.breakfast);
        assert_eq!(hotel.images, None);
    }

    #[test]
    fn test_hotel_missing_fields_default() {
        let hotel: HotelRecord = serde_json::from_str(r#"{"name": "Grand"}"#).unwrap();
        assert_eq!(hotel.city, None);
        assert_eq!(hotel.stars, None);
        assert!(!hotel.breakfast);
    }

    #[test]
    fn test_star_rating_out_of_range() {
        let mut hotel = HotelRecord {
            stars: Some(0),
            ..Default::default()
        };
        assert_eq!(hotel.star_rating(), None);
        hotel.stars = Some(6);
        assert_eq!(hotel.star_rating(), None);
        hotel.stars = Some(5);
        assert_eq!(hotel.star_rating(), Some(5));
    }

    #[test]
    fn test_proposal_camel_case() {
        let draft: ProposalDraft = serde_json::from_str(
            r#"{"clientName": "ACME", "guests": 3, "checkIn": "2026-05-01",
                "checkOut": "2026-05-04", "freeCancel": true,
                "rooms": [{"count": 2}, {"count": 1}], "price": 450.5}"#,
        )
        .unwrap();
        assert_eq!(draft.client_name.as_deref(), Some("ACME"));
        assert!(draft.free_cancel);
        assert!(!draft.breakfast);
        assert_eq!(draft.rooms.len(), 2);
        assert_eq!(draft.rooms[0].count, Some(2));
        assert_eq!(draft.price, Some(450.5));
    }

    #[test]
    fn test_filter_matches() {
        let hotels = vec![
            HotelRecord {
                name: Some("A".into()),
                city: Some("Paris".into()),
                stars: Some(4),
                group_name: Some("Accor".into()),
                ..Default::default()
            },
            HotelRecord {
                name: Some("B".into()),
                city: Some("Lyon".into()),
                stars: Some(3),
                ..Default::default()
            },
        ];

        let by_city = HotelFilter {
            city: Some("par".into()),
            ..Default::default()
        };
        assert_eq!(by_city.apply(&hotels).len(), 1);

        let by_group = HotelFilter {
            group_name: Some("ACC".into()),
            ..Default::default()
        };
        let found = by_group.apply(&hotels);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.as_deref(), Some("A"));

        let by_stars = HotelFilter {
            stars: Some(3),
            ..Default::default()
        };
        assert_eq!(by_stars.apply(&hotels)[0].name.as_deref(), Some("B"));

        assert_eq!(HotelFilter::default().apply(&hotels).len(), 2);
    }

    #[test]
    fn test_hotel_numeric_strings() {
        let hotel: HotelRecord =
            serde_json::from_str(r#"{"id": "7", "name": "Grand", "stars": "4"}"#).unwrap();
        assert_eq!(hotel.id, Some(7));
        assert_eq!(hotel.stars, Some(4));
        assert_eq!(hotel.star_rating(), Some(4));
    }

    #[test]
    fn test_bad_stars_keep_the_listing() {
        let hotels: Vec<HotelRecord> = serde_json::from_str(
            r#"[{"name": "A", "stars": 4}, {"name": "B", "stars": 300},
                {"name": "C", "stars": "four", "breakfast": null}]"#,
        )
        .unwrap();
        assert_eq!(hotels.len(), 3);
        assert_eq!(hotels[0].stars, Some(4));
        assert_eq!(hotels[1].stars, None);
        assert_eq!(hotels[1].name.as_deref(), Some("B"));
        assert_eq!(hotels[2].stars, None);
        assert!(!hotels[2].breakfast);
    }

    #[test]
    fn test_malformed_hotel_fields_are_absent() {
        let hotel: HotelRecord = serde_json::from_str(
            r#"{"id": -3, "name": {"en": "Grand"}, "city": 75001, "images": "none"}"#,
        )
        .unwrap();
        assert_eq!(hotel.id, None);
        assert_eq!(hotel.name, None);
        assert_eq!(hotel.city.as_deref(), Some("75001"));
        assert_eq!(hotel.images, None);
    }

    #[test]
    fn test_draft_price_as_text() {
        let draft: ProposalDraft = serde_json::from_str(
            r#"{"price": "450.00", "guests": "2", "breakfast": null,
                "freeCancel": "true", "rooms": [{"count": "2"}, "x", {"count": null}]}"#,
        )
        .unwrap();
        assert_eq!(draft.price, Some(450.0));
        assert_eq!(draft.guests, Some(2));
        assert!(!draft.breakfast);
        assert!(draft.free_cancel);
        assert_eq!(draft.rooms.len(), 3);
        assert_eq!(draft.rooms[0].count, Some(2));
        assert_eq!(draft.rooms[1].count, None);
        assert_eq!(draft.rooms[2].count, None);
    }

    #[test]
    fn test_draft_bad_price_and_rooms() {
        let draft: ProposalDraft =
            serde_json::from_str(r#"{"price": "on request", "rooms": {"count": 2}}"#).unwrap();
        assert_eq!(draft.price, None);
        assert!(draft.rooms.is_empty());
    }

    #[test]
    fn test_summary_tolerates_bad_fields() {
        let rows: Vec<ProposalSummary> = serde_json::from_str(
            r#"[{"id": 1, "proposalNumber": 42, "price": "99.5", "breakfast": null,
                 "hotel": "Grand"},
                {"clientName": "ACME", "guests": -1}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].proposal_number.as_deref(), Some("42"));
        assert_eq!(rows[0].price, Some(99.5));
        assert!(!rows[0].breakfast);
        assert_eq!(rows[0].hotel, None);
        assert_eq!(rows[1].id, None);
        assert_eq!(rows[1].guests, None);
        assert_eq!(rows[0].reference().as_deref(), Some("42"));
        assert_eq!(rows[1].reference(), None);
    }

    fn named(name: &str, city: &str, stars: Option<u8>) -> HotelRecord {
        HotelRecord {
            name: Some(name.into()),
            city: Some(city.into()),
            stars,
            ..Default::default()
        }
    }

    fn names(hotels: &[&HotelRecord]) -> Vec<String> {
        hotels
            .iter()
            .map(|h| h.name.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let hotels = vec![
            named("bristol", "Paris", Some(5)),
            named("Adlon", "Berlin", Some(5)),
            named("Crillon", "Paris", Some(4)),
        ];
        let sorted = HotelSort::default().sort(hotels.iter().collect());
        assert_eq!(names(&sorted), ["Adlon", "bristol", "Crillon"]);

        let desc = HotelSort::default().toggled();
        assert_eq!(desc.order, SortOrder::Desc);
        assert_eq!(
            names(&desc.sort(hotels.iter().collect())),
            ["Crillon", "bristol", "Adlon"]
        );
    }

    #[test]
    fn test_sort_by_stars_is_numeric_and_stable() {
        let hotels = vec![
            named("A", "Paris", Some(4)),
            named("B", "Lyon", None),
            named("C", "Nice", Some(5)),
            named("D", "Metz", Some(4)),
        ];
        let by_stars = HotelSort {
            by: SortKey::Stars,
            order: SortOrder::Desc,
        };
        assert_eq!(names(&by_stars.sort(hotels.iter().collect())), ["C", "A", "D", "B"]);

        let by_city = HotelSort {
            by: SortKey::City,
            order: SortOrder::Asc,
        };
        assert_eq!(names(&by_city.sort(hotels.iter().collect())), ["B", "D", "C", "A"]);
    }

    #[test]
    fn test_new_proposal_defaults() {
        let draft = ProposalDraft {
            client_name: Some("ACME".into()),
            guests: Some(0),
            rooms: vec![RoomRequest { count: Some(2) }, RoomRequest { count: None }],
            free_cancel: true,
            ..Default::default()
        };
        let body = serde_json::to_value(NewProposal::from_draft(7, &draft)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "clientName": "ACME",
                "guests": 1,
                "checkIn": "",
                "checkOut": "",
                "breakfast": false,
                "freeCancel": true,
                "price": 0.0,
                "hotelId": 7,
                "rooms": [{"count": 2}, {"count": 1}]
            })
        );
    }
}
