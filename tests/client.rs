//! Hotel API client tests against a mock HTTP server.

use std::io::Cursor;

use base64::Engine;
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use staysheet::{
    export_hotel_document, Config, HotelApiClient, HotelRecord, ImageSource, NewProposal,
    ProposalDraft, StaysheetError,
};

fn client_for(server: &MockServer) -> HotelApiClient {
    HotelApiClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn contains(bytes: &[u8], needle: &[u8]) -> bool {
    bytes.windows(needle.len()).any(|w| w == needle)
}

fn png_uri(width: u32, height: u32) -> String {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageOutputFormat::Png)
        .unwrap();
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(buf.into_inner())
    )
}

#[tokio::test]
async fn test_list_hotels_by_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels"))
        .and(query_param("city", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "name": "Grand", "city": "Paris", "stars": 4, "type": "Boutique"},
            {"id": 9, "name": "Lutetia", "city": "Paris", "breakfast": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let hotels = client_for(&server).list_hotels(Some("Paris")).await.unwrap();

    assert_eq!(hotels.len(), 2);
    assert_eq!(hotels[0].name.as_deref(), Some("Grand"));
    assert_eq!(hotels[0].hotel_type.as_deref(), Some("Boutique"));
    assert!(hotels[1].breakfast);
}

#[tokio::test]
async fn test_find_hotel_missing_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "A"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.find_hotel(1).await.unwrap().name.as_deref(), Some("A"));
    assert!(matches!(
        client.find_hotel(2).await,
        Err(StaysheetError::HotelNotFound(2))
    ));
}

#[tokio::test]
async fn test_hotel_images_with_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels/7/images/base64"))
        .and(query_param("limit", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"images": ["data:image/png;base64,AAAA"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HotelApiClient::builder()
        .base_url(server.uri())
        .image_limit(3)
        .build()
        .unwrap();
    let images = client.hotel_images(7).await.unwrap();
    assert_eq!(images, vec!["data:image/png;base64,AAAA".to_string()]);
}

#[tokio::test]
async fn test_error_status_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proposals"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_proposals().await.unwrap_err();
    match err {
        StaysheetError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_proposals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proposals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 3,
            "proposalNumber": "P-0003",
            "clientName": "ACME",
            "hotel": {"name": "Grand", "city": "Paris"},
            "guests": 2,
            "checkIn": "2024-05-01",
            "checkOut": "2024-05-04",
            "price": 450.5,
            "breakfast": true
        }])))
        .mount(&server)
        .await;

    let proposals = client_for(&server).list_proposals().await.unwrap();
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0].proposal_number.as_deref(), Some("P-0003"));
    assert_eq!(
        proposals[0].hotel.as_ref().and_then(|h| h.city.as_deref()),
        Some("Paris")
    );
    assert_eq!(proposals[0].price, Some(450.5));
}

#[tokio::test]
async fn test_create_proposal_posts_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/proposals"))
        .and(body_json(json!({
            "clientName": "ACME",
            "guests": 2,
            "checkIn": "2024-05-01",
            "checkOut": "2024-05-04",
            "breakfast": true,
            "freeCancel": false,
            "price": 450.0,
            "hotelId": 7,
            "rooms": [{"count": 1}, {"count": 3}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 12,
            "proposalNumber": "P-0012",
            "clientName": "ACME",
            "price": 450.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft: ProposalDraft = serde_json::from_value(json!({
        "clientName": "ACME",
        "guests": "2",
        "checkIn": "2024-05-01",
        "checkOut": "2024-05-04",
        "breakfast": true,
        "price": "450",
        "rooms": [{"count": 0}, {"count": 3}]
    }))
    .unwrap();
    let created = client_for(&server)
        .create_proposal(&NewProposal::from_draft(7, &draft))
        .await
        .unwrap();

    assert_eq!(created.id, Some(12));
    assert_eq!(created.reference().as_deref(), Some("P-0012"));
}

#[tokio::test]
async fn test_created_proposal_without_number_uses_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/proposals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_proposal(&NewProposal::from_draft(1, &ProposalDraft::default()))
        .await
        .unwrap();
    assert_eq!(created.reference().as_deref(), Some("5"));
}

#[tokio::test]
async fn test_create_proposal_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/proposals"))
        .respond_with(ResponseTemplate::new(400).set_body_string("hotelId missing"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_proposal(&NewProposal::from_draft(1, &ProposalDraft::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, StaysheetError::Api { status: 400, .. }));
}

#[tokio::test]
async fn test_delete_proposal() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/proposals/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete_proposal(3).await.unwrap();
}

#[tokio::test]
async fn test_export_fetches_images_from_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels/7/images/base64"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"images": [png_uri(20, 10)]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        api_url: server.uri(),
        ..Default::default()
    };
    let hotel = HotelRecord {
        id: Some(7),
        name: Some("Grand Hôtel".into()),
        ..Default::default()
    };
    let dir = tempfile::tempdir().unwrap();
    let path = export_hotel_document(&hotel, None, &config.client().unwrap(), dir.path())
        .await
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "grand-hôtel-proposal.pdf");
    let bytes = std::fs::read(path).unwrap();
    assert!(contains(&bytes, b"/XObject << /Im0 "));
}

#[tokio::test]
async fn test_export_survives_image_endpoint_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hotels/7/images/base64"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let hotel = HotelRecord {
        id: Some(7),
        name: Some("Grand".into()),
        ..Default::default()
    };
    let dir = tempfile::tempdir().unwrap();
    let path = export_hotel_document(&hotel, None, &client_for(&server), dir.path())
        .await
        .unwrap();
    assert!(path.exists());
}
