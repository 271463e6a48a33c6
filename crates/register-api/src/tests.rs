//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use register_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use super::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

async fn create(app: &Router, uri: &str, body: Value) -> Value {
  let (status, json) = send(app, "POST", uri, Some(body)).await;
  assert_eq!(status, StatusCode::CREATED, "{json}");
  json
}

fn id(v: &Value) -> &str { v["id"].as_str().unwrap() }

// ── People ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn person_crud() {
  let app = app().await;
  let person = create(&app, "/people", json!({ "name": "John Doe", "gender": "Male" })).await;
  assert_eq!(person["name"], "John Doe");
  assert_eq!(person["is_active"], true);
  assert!(person.get("pkid").is_none());

  let (status, fetched) = send(&app, "GET", &format!("/people/{}", id(&person)), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched["display"], "John Doe");

  let (status, patched) = send(
    &app,
    "PATCH",
    &format!("/people/{}", id(&person)),
    Some(json!({ "gender": null, "summary": "Speaker" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(patched["gender"], Value::Null);
  assert_eq!(patched["summary"], "Speaker");

  let (status, _) = send(&app, "DELETE", &format!("/people/{}", id(&person)), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, body) = send(&app, "GET", &format!("/people/{}", id(&person)), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn null_required_field_in_patch_is_bad_request() {
  let app = app().await;
  let person = create(&app, "/people", json!({ "name": "John Doe" })).await;
  let uri = format!("/people/{}", id(&person));

  let (status, err) = send(&app, "PATCH", &uri, Some(json!({ "name": null }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(err["error"].is_string());

  let (_, unchanged) = send(&app, "GET", &uri, None).await;
  assert_eq!(unchanged["name"], "John Doe");
}

#[tokio::test]
async fn blank_name_is_bad_request() {
  let app = app().await;
  let (status, body) = send(&app, "POST", "/people", Some(json!({ "name": "   " }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn missing_ids_are_not_found() {
  let app = app().await;
  let missing = uuid::Uuid::new_v4();
  for uri in [
    format!("/people/{missing}"),
    format!("/organizations/{missing}"),
    format!("/posts/{missing}"),
    format!("/memberships/{missing}"),
  ] {
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
  }
  let (status, _) = send(&app, "PATCH", &format!("/people/{missing}"), Some(json!({}))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Organizations ───────────────────────────────────────────────────────────

#[tokio::test]
async fn organization_display_and_hierarchy() {
  let app = app().await;
  let parliament = create(
    &app,
    "/organizations",
    json!({ "name": "National Assembly", "classification": "legislature", "country_code": "nga" }),
  )
  .await;
  assert_eq!(parliament["country_code"], "NGA");

  let committee = create(
    &app,
    "/organizations",
    json!({
      "name": "Committee on Public Accounts",
      "classification": "committee",
      "country_code": "NGA",
      "parent_id": id(&parliament),
    }),
  )
  .await;

  let (_, fetched) = send(&app, "GET", &format!("/organizations/{}", id(&parliament)), None).await;
  assert_eq!(fetched["display"], "National Assembly (Legislature)");

  let (status, children) =
    send(&app, "GET", &format!("/organizations/{}/children", id(&parliament)), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(children.as_array().unwrap().len(), 1);
  assert_eq!(children[0]["id"], committee["id"]);

  let (status, body) = send(
    &app,
    "PATCH",
    &format!("/organizations/{}", id(&parliament)),
    Some(json!({ "parent_id": id(&committee) })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[tokio::test]
async fn organization_filters() {
  let app = app().await;
  for (name, classification, cc) in [
    ("National Assembly", "legislature", "NGA"),
    ("Labour Party", "party", "NGA"),
    ("African National Congress", "party", "ZAF"),
  ] {
    create(
      &app,
      "/organizations",
      json!({ "name": name, "classification": classification, "country_code": cc }),
    )
    .await;
  }

  let (_, parties) = send(&app, "GET", "/organizations?classification=party", None).await;
  assert_eq!(parties.as_array().unwrap().len(), 2);
  assert_eq!(parties[0]["name"], "African National Congress");

  let (_, nga_parties) =
    send(&app, "GET", "/organizations?classification=party&country_code=NGA", None).await;
  assert_eq!(nga_parties.as_array().unwrap().len(), 1);

  let (_, found) = send(&app, "GET", "/organizations?q=national", None).await;
  assert_eq!(found.as_array().unwrap().len(), 2);

  let (status, _) = send(&app, "GET", "/organizations?classification=cabal", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn undecodable_bodies_are_json_bad_requests() {
  let app = app().await;
  for body in [
    json!({ "name": "X", "classification": "cabal", "country_code": "NGA" }),
    json!({ "country_code": "NGA" }),
    json!({ "name": "X", "country_code": "NG" }),
  ] {
    let (status, err) = send(&app, "POST", "/organizations", Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert!(err["error"].is_string(), "{err}");
  }

  let (status, err) = send(&app, "POST", "/people", Some(json!({ "gender": "Female" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(err["error"].as_str().unwrap().contains("name"), "{err}");

  let req = Request::builder()
    .method("POST")
    .uri("/people")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{\"name\": "))
    .unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let err: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(err["error"].is_string());
}

#[tokio::test]
async fn undecodable_query_is_json_bad_request() {
  let app = app().await;
  let (status, err) = send(&app, "GET", "/memberships?person=not-a-uuid", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(err["error"].is_string());
}

// ── Posts and memberships ───────────────────────────────────────────────────

#[tokio::test]
async fn post_and_membership_flow() {
  let app = app().await;
  let parliament = create(
    &app,
    "/organizations",
    json!({ "name": "National Assembly", "classification": "legislature", "country_code": "NGA" }),
  )
  .await;
  let speaker = create(
    &app,
    "/posts",
    json!({
      "label": "Speaker of the House",
      "role_type": "legislative",
      "organization_id": id(&parliament),
    }),
  )
  .await;
  let person = create(&app, "/people", json!({ "name": "John Doe" })).await;

  let (_, post) = send(&app, "GET", &format!("/posts/{}", id(&speaker)), None).await;
  assert_eq!(post["display"], "Speaker of the House (National Assembly)");

  let (_, posts) = send(&app, "GET", &format!("/organizations/{}/posts", id(&parliament)), None).await;
  assert_eq!(posts.as_array().unwrap().len(), 1);

  let membership = create(
    &app,
    "/memberships",
    json!({
      "person_id": id(&person),
      "organization_id": id(&parliament),
      "post_id": id(&speaker),
      "start_date": "2023-05-29",
      "selection_method": "elected",
    }),
  )
  .await;

  let (_, fetched) = send(&app, "GET", &format!("/memberships/{}", id(&membership)), None).await;
  assert_eq!(fetched["display"], "John Doe - National Assembly (2023-05-29)");

  let (_, of_person) = send(&app, "GET", &format!("/people/{}/memberships", id(&person)), None).await;
  assert_eq!(of_person.as_array().unwrap().len(), 1);
  assert_eq!(of_person[0]["id"], membership["id"]);

  let (_, found) = send(&app, "GET", "/memberships?q=speaker&ongoing=true", None).await;
  assert_eq!(found.as_array().unwrap().len(), 1);

  let (status, body) = send(
    &app,
    "PATCH",
    &format!("/memberships/{}", id(&membership)),
    Some(json!({ "end_date": "2020-01-01" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

  let (status, ended) = send(
    &app,
    "PATCH",
    &format!("/memberships/{}", id(&membership)),
    Some(json!({ "end_date": "2027-06-11" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ended["end_date"], "2027-06-11");

  // Deleting the post keeps the membership.
  let (status, _) = send(&app, "DELETE", &format!("/posts/{}", id(&speaker)), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (_, after) = send(&app, "GET", &format!("/memberships/{}", id(&membership)), None).await;
  assert_eq!(after["post_id"], Value::Null);
}

#[tokio::test]
async fn post_with_unknown_organization_is_bad_request() {
  let app = app().await;
  let (status, _) = send(
    &app,
    "POST",
    "/posts",
    Some(json!({ "label": "Speaker", "organization_id": uuid::Uuid::new_v4() })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn choices_lists_every_set() {
  let app = app().await;
  let (status, choices) = send(&app, "GET", "/choices", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(choices["organization_type"].as_array().unwrap().len(), 7);
  assert_eq!(choices["post_type"].as_array().unwrap().len(), 6);
  assert_eq!(choices["selection_method"].as_array().unwrap().len(), 5);
  assert!(
    choices["organization_type"]
      .as_array()
      .unwrap()
      .contains(&json!({ "value": "party", "label": "Political Party" }))
  );
}
