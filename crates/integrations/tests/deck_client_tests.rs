#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_lines)]

use chrono::{TimeZone, Utc};
use integrations::pm::deck::{format_duedate, CardCreateInput, DeckClient, DeckError};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/index.php/apps/deck/api/v1.0";

async fn client(server: &MockServer) -> DeckClient {
    DeckClient::new(&server.uri(), "alice", "app-password").unwrap()
}

fn capabilities(status: &str, deck_version: Option<&str>) -> serde_json::Value {
    let mut caps = json!({ "core": { "pollinterval": 60 } });
    if let Some(version) = deck_version {
        caps["deck"] = json!({ "version": version, "canCreateBoards": true });
    }
    json!({
        "ocs": {
            "meta": { "status": status, "statuscode": 100, "message": "OK" },
            "data": { "capabilities": caps }
        }
    })
}

#[tokio::test]
async fn test_requests_carry_ocs_header_and_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/boards")))
        .and(header("OCS-APIRequest", "true"))
        .and(basic_auth("alice", "app-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "Personal", "color": "0087C5", "labels": [] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let boards = client(&server).await.get_boards().await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].title, "Personal");
}

#[tokio::test]
async fn test_requests_ask_for_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ocs/v1.php/cloud/capabilities"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(capabilities("ok", Some("1.9.0"))))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).await.check_compatibility().await.unwrap();
}

#[tokio::test]
async fn test_get_board_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/boards/7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "title": "Roadmap",
            "color": "b04632",
            "archived": false,
            "labels": [
                { "id": 31, "title": "Bug", "color": "eb5a46", "boardId": 7 },
                { "id": 32, "title": "Idea", "color": "f2d600", "boardId": 7 }
            ],
            "stacks": null,
            "owner": { "uid": "alice" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let board = client(&server).await.get_board_details(7).await.unwrap();
    assert_eq!(board.id, 7);
    assert_eq!(board.title, "Roadmap");
    assert_eq!(board.color, "b04632");
    assert_eq!(board.labels.len(), 2);
    assert_eq!(board.labels[1].title, "Idea");
    assert_eq!(board.labels[1].board_id, Some(7));
    assert!(board.stacks.is_empty());
}

#[tokio::test]
async fn test_non_200_is_an_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/boards/9")))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
        .mount(&server)
        .await;

    let err = client(&server).await.get_board_details(9).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    match err {
        DeckError::Status { body, .. } => assert_eq!(body, "Permission denied"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_other_success_codes_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/boards/3/labels")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .create_label("Bug", "eb5a46", 3)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(201));
}

#[tokio::test]
async fn test_create_board_removes_default_labels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/boards")))
        .and(body_json(json!({ "title": "Roadmap", "color": "519839" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "title": "Roadmap",
            "color": "519839",
            "labels": [
                { "id": 40, "title": "Finished", "color": "31CC7C" },
                { "id": 41, "title": "To review", "color": "317CCC" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    for label_id in [40, 41] {
        Mock::given(method("DELETE"))
            .and(path(format!("{API}/boards/12/labels/{label_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let board = client(&server)
        .await
        .create_board("Roadmap", "519839")
        .await
        .unwrap();
    assert_eq!(board.id, 12);
}

#[tokio::test]
async fn test_create_stack_and_card() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/boards/12/stacks")))
        .and(body_json(json!({ "title": "Todo", "order": 0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "title": "Todo", "boardId": 12, "order": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let due = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    Mock::given(method("POST"))
        .and(path(format!("{API}/boards/12/stacks/5/cards")))
        .and(body_json(json!({
            "title": "Plan",
            "type": "plain",
            "order": 0,
            "description": "Write it down",
            "duedate": "2024-05-01T09:00:00+00:00"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 77, "title": "Plan", "type": "plain", "order": 0, "stackId": 5,
            "owner": "alice", "duedate": "2024-05-01T09:00:00+00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deck = client(&server).await;
    let stack = deck.create_stack("Todo", 0, 12).await.unwrap();
    let card = deck
        .create_card(
            &CardCreateInput {
                title: "Plan".to_string(),
                card_type: "plain".to_string(),
                order: 0,
                description: "Write it down".to_string(),
                duedate: format_duedate(Some(due)),
            },
            12,
            stack.id,
        )
        .await
        .unwrap();
    assert_eq!(card.id, 77);
    assert_eq!(card.stack_id, Some(5));
}

#[tokio::test]
async fn test_card_without_due_date_sends_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/boards/1/stacks/2/cards")))
        .and(body_json(json!({
            "title": "Someday",
            "type": "plain",
            "order": 3,
            "description": "",
            "duedate": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "title": "Someday", "type": "plain", "order": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = CardCreateInput {
        title: "Someday".to_string(),
        card_type: "plain".to_string(),
        order: 3,
        description: String::new(),
        duedate: None,
    };
    client(&server)
        .await
        .create_card(&input, 1, 2)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_assign_label_archive_and_comment() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{API}/boards/1/stacks/2/cards/3/assignLabel")))
        .and(body_json(json!({ "labelId": 9 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{API}/boards/1/stacks/2/cards/3")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ocs/v2.php/apps/deck/api/v1.0/cards/3/comments"))
        .and(body_json(json!({ "message": "Looks good", "parentId": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ocs": { "meta": { "status": "ok" }, "data": { "id": 1, "message": "Looks good" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deck = client(&server).await;
    deck.assign_label(9, 3, 1, 2).await.unwrap();

    let card = serde_json::from_value(json!({
        "id": 3, "title": "Ship", "type": "plain", "order": 0, "owner": "alice", "archived": false
    }))
    .unwrap();
    deck.archive_card(&card, 1, 2).await.unwrap();
    deck.comment_on_card(3, "Looks good", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let archive = requests
        .iter()
        .find(|r| r.url.path() == format!("{API}/boards/1/stacks/2/cards/3"))
        .unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&archive.body).unwrap();
    assert_eq!(sent["archived"], true);
    assert_eq!(sent["owner"], "alice");
    assert_eq!(sent["title"], "Ship");
}

#[tokio::test]
async fn test_attach_to_card_uploads_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/boards/1/stacks/2/cards/3/attachments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .await
        .attach_to_card(1, 2, 3, "notes.txt", b"hello deck".to_vec(), "text/plain")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"type\""));
    assert!(body.contains("filename=\"notes.txt\""));
    assert!(body.contains("hello deck"));
}

#[tokio::test]
async fn test_stacks_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/boards/4/stacks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "Todo", "boardId": 4, "order": 0,
              "cards": [{ "id": 8, "title": "A", "type": "plain", "order": 0 }] },
            { "id": 2, "title": "Done", "boardId": 4, "order": 1 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/boards/4/stacks/archived")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let deck = client(&server).await;
    let stacks = deck.get_stacks(4).await.unwrap();
    assert_eq!(stacks.len(), 2);
    assert_eq!(stacks[0].cards.len(), 1);
    assert!(stacks[1].cards.is_empty());
    assert!(deck.get_stacks_archived(4).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_compatibility_check_passes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ocs/v1.php/cloud/capabilities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(capabilities("ok", Some("1.9.0"))))
        .mount(&server)
        .await;

    client(&server).await.check_compatibility().await.unwrap();
}

#[tokio::test]
async fn test_compatibility_check_failures() {
    let cases = [
        (capabilities("failure", Some("1.9.0")), "The compatibility check failed"),
        (
            capabilities("ok", None),
            "Please install deck on your nextcloud instance",
        ),
        (
            capabilities("ok", Some("1.0.7")),
            "This script only supports version 1.1.0 and above",
        ),
    ];

    for (body, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ocs/v1.php/cloud/capabilities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = client(&server).await.check_compatibility().await.unwrap_err();
        match err {
            DeckError::Incompatible(message) => assert_eq!(message, expected),
            other => panic!("unexpected error: {other}"),
        }
    }
}
