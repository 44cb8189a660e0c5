mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn moderator_creates_flight() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("alice", "Moderator").await?;

    let res = server
        .post("/flights")
        .bearer_auth(&token)
        .json(&common::flight_body("Kyiv", "Warsaw", 3))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert!(body["id"].as_i64().is_some_and(|id| id > 0));
    Ok(())
}

#[tokio::test]
async fn plain_user_cannot_create_flight() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("alice", "User").await?;

    let res = server
        .post("/flights")
        .bearer_auth(&token)
        .json(&common::flight_body("Kyiv", "Warsaw", 3))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body: Value = res.json().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn anonymous_create_is_unauthorized() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .post("/flights")
        .json(&common::flight_body("Kyiv", "Warsaw", 3))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn authorization_is_checked_before_the_body() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("alice", "User").await?;

    let res = server
        .post("/flights")
        .bearer_auth(&token)
        .json(&json!({ "origin": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.put("/flights").json(&json!({})).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn create_validates_schedule_and_fields() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("alice", "Moderator").await?;

    let res = server
        .post("/flights")
        .bearer_auth(&token)
        .json(&common::flight_body("Kyiv", "Warsaw", -1))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["departure"].is_string());

    let mut backwards = common::flight_body("Kyiv", "Warsaw", 3);
    backwards["arrival"] = backwards["departure"].clone();
    let res = server.post("/flights").bearer_auth(&token).json(&backwards).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["arrival"].is_string());

    let mut unknown_status = common::flight_body("Kyiv", "Warsaw", 3);
    unknown_status["status"] = json!("Landed");
    let res = server.post("/flights").bearer_auth(&token).json(&unknown_status).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .post("/flights")
        .bearer_auth(&token)
        .json(&common::flight_body("", "Warsaw", 3))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["origin"].is_string());
    Ok(())
}

#[tokio::test]
async fn list_filters_by_origin_and_destination() -> Result<()> {
    let server = common::spawn_server().await?;
    let moderator = server.token_for("alice", "Moderator").await?;
    let reader = server.token_for("bob", "User").await?;

    for (origin, destination) in [("Kyiv", "Warsaw"), ("Kyiv", "Berlin"), ("Lviv", "Warsaw")] {
        let res = server
            .post("/flights")
            .bearer_auth(&moderator)
            .json(&common::flight_body(origin, destination, 2))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let from_kyiv: Vec<Value> = server
        .get("/flights?origin=Kyiv")
        .bearer_auth(&reader)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(from_kyiv.len(), 2);
    assert!(from_kyiv.iter().all(|f| f["origin"] == "Kyiv"));
    assert!(from_kyiv[0]["id"].as_i64() < from_kyiv[1]["id"].as_i64());

    let to_warsaw: Vec<Value> = server
        .get("/flights?destination=Warsaw")
        .bearer_auth(&reader)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(to_warsaw.len(), 2);

    let both: Vec<Value> = server
        .get("/flights?origin=Lviv&destination=Warsaw")
        .bearer_auth(&reader)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(both.len(), 1);
    assert_eq!(both[0]["status"], "InTime");

    let none: Vec<Value> = server
        .get("/flights?origin=kyiv")
        .bearer_auth(&reader)
        .send()
        .await?
        .json()
        .await?;
    assert!(none.is_empty());
    Ok(())
}

#[tokio::test]
async fn list_requires_a_filter_and_a_token() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("bob", "User").await?;

    let res = server.get("/flights").bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server.get("/flights?origin=").bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server.get("/flights?origin=Kyiv").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn moderator_updates_status() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("alice", "Moderator").await?;

    let created: Value = server
        .post("/flights")
        .bearer_auth(&token)
        .json(&common::flight_body("Kyiv", "Warsaw", 1))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_i64().expect("id");

    let res = server
        .put("/flights")
        .bearer_auth(&token)
        .json(&json!({ "flightId": id, "status": "Delayed" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let flights: Vec<Value> = server
        .get("/flights?origin=Kyiv")
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(flights[0]["status"], "Delayed");
    Ok(())
}

#[tokio::test]
async fn update_of_missing_flight_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("alice", "Moderator").await?;

    let res = server
        .put("/flights")
        .bearer_auth(&token)
        .json(&json!({ "flightId": 4242, "status": "Cancelled" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .put("/flights")
        .bearer_auth(&token)
        .json(&json!({ "flightId": 0, "status": "Cancelled" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["flightId"].is_string());
    Ok(())
}

#[tokio::test]
async fn plain_user_cannot_update_status() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("bob", "User").await?;

    let res = server
        .put("/flights")
        .bearer_auth(&token)
        .json(&json!({ "flightId": 1, "status": "Cancelled" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}
