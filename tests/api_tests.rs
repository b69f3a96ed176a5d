use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use filmorate::config::Config;
use filmorate::state::SharedState;
use filmorate::storage::{MemoryCatalogStore, MemoryFilmStore, MemoryUserStore};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn spawn_app() -> Router {
    let state = SharedState::from_stores(
        Config::default(),
        Arc::new(MemoryFilmStore::new()),
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryCatalogStore::new()),
    );
    filmorate::api::router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn film_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "A film",
        "release_date": "2000-01-01",
        "duration": 120,
    })
}

fn user_body(login: &str) -> Value {
    json!({
        "email": format!("{login}@example.com"),
        "login": login,
        "name": "",
        "birthday": "1990-05-01",
    })
}

async fn create_film(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, Method::POST, "/films", Some(film_body(name))).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_i64().unwrap()
}

async fn create_user(app: &Router, login: &str) -> i64 {
    let (status, body) = send(app, Method::POST, "/users", Some(user_body(login))).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_film_crud_roundtrip() {
    let app = spawn_app();

    let id = create_film(&app, "Alien").await;
    assert_eq!(id, 1);

    let (status, body) = send(&app, Method::GET, "/films/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alien");
    assert_eq!(body["data"]["duration"], 120);

    let update = json!({
        "id": 1,
        "name": "Aliens",
        "description": "The sequel",
        "release_date": "1986-07-18",
        "duration": 137,
    });
    let (status, body) = send(&app, Method::PUT, "/films", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Aliens");

    let (status, body) = send(&app, Method::GET, "/films", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, "/films/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/films/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_film_ids_are_sequential() {
    let app = spawn_app();

    assert_eq!(create_film(&app, "First").await, 1);
    assert_eq!(create_film(&app, "Second").await, 2);

    let (status, _) = send(&app, Method::DELETE, "/films/2", None).await;
    assert_eq!(status, StatusCode::OK);

    // Removed ids are never reused.
    assert_eq!(create_film(&app, "Third").await, 3);
}

#[tokio::test]
async fn test_film_validation_rules() {
    let app = spawn_app();

    let mut blank_name = film_body("ok");
    blank_name["name"] = json!("   ");
    let (status, _) = send(&app, Method::POST, "/films", Some(blank_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut long_description = film_body("Long");
    long_description["description"] = json!("x".repeat(201));
    let (status, _) = send(&app, Method::POST, "/films", Some(long_description)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut max_description = film_body("Exactly 200");
    max_description["description"] = json!("x".repeat(200));
    let (status, _) = send(&app, Method::POST, "/films", Some(max_description)).await;
    assert_eq!(status, StatusCode::OK);

    let mut too_early = film_body("Too early");
    too_early["release_date"] = json!("1895-12-27");
    let (status, _) = send(&app, Method::POST, "/films", Some(too_early)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The first day of cinema is allowed.
    let mut first_day = film_body("First day");
    first_day["release_date"] = json!("1895-12-28");
    let (status, _) = send(&app, Method::POST, "/films", Some(first_day)).await;
    assert_eq!(status, StatusCode::OK);

    let mut zero_duration = film_body("Zero");
    zero_duration["duration"] = json!(0);
    let (status, _) = send(&app, Method::POST, "/films", Some(zero_duration)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_film_name_rejected() {
    let app = spawn_app();

    create_film(&app, "Alien").await;
    let (status, _) = send(&app, Method::POST, "/films", Some(film_body("Alien"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_film_with_mpa_and_genres() {
    let app = spawn_app();

    let mut body = film_body("Rated");
    body["mpa"] = json!({ "id": 3 });
    body["genres"] = json!([{ "id": 2 }, { "id": 1 }, { "id": 2 }]);

    let (status, body) = send(&app, Method::POST, "/films", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["mpa"]["name"], "PG-13");

    // Genres come back deduplicated and in ascending id order.
    let genres = body["data"]["genres"].as_array().unwrap();
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[0]["id"], 1);
    assert_eq!(genres[0]["name"], "Comedy");
    assert_eq!(genres[1]["id"], 2);

    let mut unknown_mpa = film_body("Unknown MPA");
    unknown_mpa["mpa"] = json!({ "id": 99 });
    let (status, _) = send(&app, Method::POST, "/films", Some(unknown_mpa)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut unknown_genre = film_body("Unknown genre");
    unknown_genre["genres"] = json!([{ "id": 99 }]);
    let (status, _) = send(&app, Method::POST, "/films", Some(unknown_genre)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_crud_and_default_name() {
    let app = spawn_app();

    let (status, body) = send(&app, Method::POST, "/users", Some(user_body("alice"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
    // A blank display name falls back to the login.
    assert_eq!(body["data"]["name"], "alice");

    let update = json!({
        "id": 1,
        "email": "alice@example.org",
        "login": "alice",
        "name": "Alice",
        "birthday": "1990-05-01",
    });
    let (status, body) = send(&app, Method::PUT, "/users", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["email"], "alice@example.org");

    let (status, _) = send(&app, Method::GET, "/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_validation_rules() {
    let app = spawn_app();

    let mut bad_email = user_body("bob");
    bad_email["email"] = json!("not-an-email");
    let (status, _) = send(&app, Method::POST, "/users", Some(bad_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut spaced_login = user_body("bob");
    spaced_login["login"] = json!("bo b");
    let (status, _) = send(&app, Method::POST, "/users", Some(spaced_login)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut future_birthday = user_body("bob");
    future_birthday["birthday"] = json!("2099-01-01");
    let (status, _) = send(&app, Method::POST, "/users", Some(future_birthday)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    create_user(&app, "bob").await;
    let (status, _) = send(&app, Method::POST, "/users", Some(user_body("bob"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_like_lifecycle() {
    let app = spawn_app();

    create_film(&app, "Alien").await;
    create_user(&app, "alice").await;

    let (status, body) = send(&app, Method::PUT, "/films/1/like/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["likes"].as_array().unwrap().len(), 1);

    // Liking the same film twice is an error.
    let (status, _) = send(&app, Method::PUT, "/films/1/like/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::DELETE, "/films/1/like/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["likes"].as_array().unwrap().is_empty());

    // As is withdrawing a like that was never given.
    let (status, _) = send(&app, Method::DELETE, "/films/1/like/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/films/1/like/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PUT, "/films/42/like/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_preserves_likes() {
    let app = spawn_app();

    create_film(&app, "Alien").await;
    create_user(&app, "alice").await;
    send(&app, Method::PUT, "/films/1/like/1", None).await;

    let update = json!({
        "id": 1,
        "name": "Alien (Director's Cut)",
        "description": "Recut",
        "release_date": "1979-05-25",
        "duration": 116,
    });
    let (status, body) = send(&app, Method::PUT, "/films", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["likes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_popular_films_ranking() {
    let app = spawn_app();

    create_film(&app, "One").await;
    create_film(&app, "Two").await;
    create_film(&app, "Three").await;
    for login in ["a", "b", "c"] {
        create_user(&app, login).await;
    }

    // Film 2 gets three likes, film 3 gets one, film 1 none.
    for user in 1..=3 {
        send(&app, Method::PUT, &format!("/films/2/like/{user}"), None).await;
    }
    send(&app, Method::PUT, "/films/3/like/1", None).await;

    let (status, body) = send(&app, Method::GET, "/films/popular?count=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let films = body["data"].as_array().unwrap();
    assert_eq!(films.len(), 2);
    assert_eq!(films[0]["id"], 2);
    assert_eq!(films[1]["id"], 3);

    // Default count is 10; ties keep ascending id order.
    let (status, body) = send(&app, Method::GET, "/films/popular", None).await;
    assert_eq!(status, StatusCode::OK);
    let films = body["data"].as_array().unwrap();
    assert_eq!(films.len(), 3);
    assert_eq!(films[2]["id"], 1);

    let (status, _) = send(&app, Method::GET, "/films/popular?count=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/films/popular?count=-5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_friendship_lifecycle() {
    let app = spawn_app();

    create_user(&app, "alice").await;
    create_user(&app, "bob").await;
    create_user(&app, "carol").await;

    let (status, body) = send(&app, Method::PUT, "/users/1/friends/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["friends"], json!([2]));

    // Friendship is symmetric: bob sees alice too.
    let (status, body) = send(&app, Method::GET, "/users/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["friends"], json!([1]));

    let (status, _) = send(&app, Method::PUT, "/users/1/friends/2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/users/1/friends/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/users/1/friends/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, Method::PUT, "/users/2/friends/3", None).await;

    let (status, body) = send(&app, Method::GET, "/users/1/friends", None).await;
    assert_eq!(status, StatusCode::OK);
    let friends = body["data"].as_array().unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0]["login"], "bob");

    // Alice and carol share bob.
    let (status, body) = send(&app, Method::GET, "/users/1/friends/common/3", None).await;
    assert_eq!(status, StatusCode::OK);
    let common = body["data"].as_array().unwrap();
    assert_eq!(common.len(), 1);
    assert_eq!(common[0]["id"], 2);

    let (status, body) = send(&app, Method::DELETE, "/users/1/friends/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["friends"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::DELETE, "/users/1/friends/2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/users/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["friends"], json!([3]));
}

#[tokio::test]
async fn test_user_removal_dissolves_relations() {
    let app = spawn_app();

    create_film(&app, "Alien").await;
    create_user(&app, "alice").await;
    create_user(&app, "bob").await;

    send(&app, Method::PUT, "/users/1/friends/2", None).await;
    send(&app, Method::PUT, "/films/1/like/1", None).await;

    let (status, _) = send(&app, Method::DELETE, "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/users/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["friends"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, Method::GET, "/films/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["likes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_catalog_endpoints() {
    let app = spawn_app();

    let (status, body) = send(&app, Method::GET, "/genres", None).await;
    assert_eq!(status, StatusCode::OK);
    let genres = body["data"].as_array().unwrap();
    assert_eq!(genres.len(), 6);
    assert_eq!(genres[0]["name"], "Comedy");
    assert_eq!(genres[5]["name"], "Action");

    let (status, body) = send(&app, Method::GET, "/genres/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Cartoon");

    let (status, _) = send(&app, Method::GET, "/genres/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/mpa", None).await;
    assert_eq!(status, StatusCode::OK);
    let ratings = body["data"].as_array().unwrap();
    assert_eq!(ratings.len(), 5);
    assert_eq!(ratings[0]["name"], "G");

    let (status, body) = send(&app, Method::GET, "/mpa/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "NC-17");

    let (status, _) = send(&app, Method::GET, "/mpa/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
