//! REST surface tests: the real router, driven with `oneshot`.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{create_test_router, send};

const BASE: &str = "/v/api/users";

fn dipesh() -> Value {
    json!({ "data": {
        "firstName": "Dipesh",
        "lastName": "Ghimire",
        "email": "dipesh@example.com",
        "phoneNumber": "+9779812345678"
    }})
}

fn assert_timestamp(v: &Value) {
    let ts = v["timestamp"].as_str().expect("timestamp present");
    assert!(
        chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").is_ok(),
        "bad timestamp {ts}"
    );
}

#[tokio::test]
async fn create_returns_201_with_envelope() {
    let router = create_test_router().await;

    let (status, body) = send(&router, Method::POST, BASE, Some(dipesh())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert!(body.get("message").is_none());
    assert_timestamp(&body);
    let user = &body["data"];
    assert!(user["id"].as_str().is_some());
    assert_eq!(user["firstName"], "Dipesh");
    assert_eq!(user["phoneNumber"], "+9779812345678");
    assert_eq!(user["createdAt"], user["updatedAt"]);
    assert!(user.get("isActive").is_none());
}

#[tokio::test]
async fn duplicate_create_is_409() {
    let router = create_test_router().await;
    send(&router, Method::POST, BASE, Some(dipesh())).await;

    let (status, body) = send(&router, Method::POST, BASE, Some(dipesh())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "Failure");
    assert_eq!(body["data"]["errorCode"], "DUPLICATE_ENTITY");
    assert_eq!(
        body["message"],
        "User already exists with email: dipesh@example.com"
    );
    assert_eq!(body["data"]["message"], body["message"]);
}

#[tokio::test]
async fn validation_errors_are_keyed_by_wire_field() {
    let router = create_test_router().await;
    let payload = json!({ "data": {
        "firstName": "x".repeat(101),
        "email": "not-an-email",
        "phoneNumber": "12"
    }});

    let (status, body) = send(&router, Method::POST, BASE, Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "Failure");
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(
        body["data"],
        json!({
            "firstName": "First name must not exceed 100 characters",
            "lastName": "Last name must not be blank.",
            "email": "Email must be valid",
            "phoneNumber": "Phone number must be valid"
        })
    );
}

#[tokio::test]
async fn get_and_trailing_slash_collection() {
    let router = create_test_router().await;
    let (_, created) = send(&router, Method::POST, &format!("{BASE}/"), Some(dipesh())).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&router, Method::GET, &format!("{BASE}/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], created["data"]);

    let (status, body) = send(&router, Method::GET, &format!("{BASE}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalElements"], 1);
}

#[tokio::test]
async fn unknown_id_is_404_and_malformed_id_is_400() {
    let router = create_test_router().await;
    let missing = uuid::Uuid::now_v7();

    let (status, body) = send(&router, Method::GET, &format!("{BASE}/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["errorCode"], "RESOURCE_NOT_FOUND");
    assert_eq!(body["message"], format!("User not found with id: {missing}"));

    let (status, body) = send(&router, Method::GET, &format!("{BASE}/not-a-uuid"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["errorCode"], "BAD_REQUEST");
}

#[tokio::test]
async fn patch_applies_present_fields_only() {
    let router = create_test_router().await;
    let (_, created) = send(&router, Method::POST, BASE, Some(dipesh())).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let patch = json!({ "data": { "lastName": "Sharma", "email": "" } });
    let (status, body) = send(&router, Method::PATCH, &format!("{BASE}/{id}"), Some(patch)).await;

    assert_eq!(status, StatusCode::OK);
    let user = &body["data"];
    assert_eq!(user["lastName"], "Sharma");
    assert_eq!(user["firstName"], "Dipesh");
    assert_eq!(user["email"], "dipesh@example.com");
    assert_eq!(user["phoneNumber"], "+9779812345678");
    assert_eq!(user["createdAt"], created["data"]["createdAt"]);
    assert_ne!(user["updatedAt"], created["data"]["updatedAt"]);
}

#[tokio::test]
async fn patch_with_bad_email_is_400_and_unknown_user_404() {
    let router = create_test_router().await;
    let (_, created) = send(&router, Method::POST, BASE, Some(dipesh())).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let patch = json!({ "data": { "email": "broken" } });
    let (status, body) =
        send(&router, Method::PATCH, &format!("{BASE}/{id}"), Some(patch.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["email"], "Email must be valid");

    let missing = uuid::Uuid::now_v7();
    let ok_patch = json!({ "data": { "firstName": "X" } });
    let (status, _) =
        send(&router, Method::PATCH, &format!("{BASE}/{missing}"), Some(ok_patch)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_empty_envelope_then_404() {
    let router = create_test_router().await;
    let (_, created) = send(&router, Method::POST, BASE, Some(dipesh())).await;
    let uri = format!("{BASE}/{}", created["data"]["id"].as_str().unwrap());

    let (status, body) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body.get("data").is_none());
    assert_timestamp(&body);

    let (status, _) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the address is free again
    let (status, _) = send(&router, Method::POST, BASE, Some(dipesh())).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn list_reports_paging_metadata() {
    let router = create_test_router().await;
    for i in 0..25 {
        let payload = json!({ "data": {
            "firstName": "User",
            "lastName": format!("No{i:02}"),
            "email": format!("user{i}@example.com")
        }});
        let (status, _) = send(&router, Method::POST, BASE, Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&router, Method::GET, &format!("{BASE}?page=2&size=10"), None).await;
    assert_eq!(status, StatusCode::OK);
    let page = &body["data"];
    assert_eq!(page["content"].as_array().unwrap().len(), 5);
    assert_eq!(page["page"], 2);
    assert_eq!(page["size"], 10);
    assert_eq!(page["totalElements"], 25);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["first"], false);
    assert_eq!(page["last"], true);

    let (_, body) = send(
        &router,
        Method::GET,
        &format!("{BASE}?size=3&sort=lastName,desc"),
        None,
    )
    .await;
    let names: Vec<_> = body["data"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["lastName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["No24", "No23", "No22"]);
}

#[tokio::test]
async fn bad_paging_and_sort_are_400() {
    let router = create_test_router().await;
    for query in ["size=0", "size=5000", "page=abc", "sort=password", "sort=email,sideways"] {
        let (status, body) = send(&router, Method::GET, &format!("{BASE}?{query}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query {query}");
        assert_eq!(body["data"]["errorCode"], "BAD_REQUEST", "query {query}");
    }
}

#[tokio::test]
async fn page_index_past_offset_range_is_400() {
    let router = create_test_router().await;
    for query in [
        "page=18446744073709551615&size=1",
        "page=9223372036854775807&size=2",
    ] {
        let (status, body) = send(&router, Method::GET, &format!("{BASE}?{query}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query {query}");
        assert_eq!(body["status"], "Failure", "query {query}");
        assert_eq!(body["data"]["errorCode"], "BAD_REQUEST", "query {query}");
        assert_eq!(body["message"], "Page index is out of range", "query {query}");
    }
}

#[tokio::test]
async fn null_required_fields_are_field_errors() {
    let router = create_test_router().await;
    let payload = json!({ "data": {
        "firstName": null,
        "lastName": null,
        "email": null
    }});

    let (status, body) = send(&router, Method::POST, BASE, Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "Failure");
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(
        body["data"],
        json!({
            "firstName": "First name must not be blank.",
            "lastName": "Last name must not be blank.",
            "email": "Email must not be blank"
        })
    );
}

#[tokio::test]
async fn malformed_body_is_400() {
    let router = create_test_router().await;

    let (status, body) = send(&router, Method::POST, BASE, Some(json!({ "firstName": "No envelope" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "Failure");
    assert_eq!(body["data"]["errorCode"], "BAD_REQUEST");
}
