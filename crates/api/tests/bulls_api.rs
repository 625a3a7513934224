//! HTTP-level integration tests for the bull catalog and favorites endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_auth, post_json};
use sqlx::PgPool;

use herdbook_api::auth::password::hash_password;
use herdbook_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert a bull with uniform trait values so its composite score equals the
/// trait value (the weights sum to 1.0).
async fn insert_uniform_bull(pool: &PgPool, ear_tag: &str, name: &str, trait_value: f64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO bulls \
            (ear_tag, name, purpose, origin, coat, breed, age_months, \
             growth, calving_ease, reproduction, moderation, carcass) \
         VALUES ($1, $2, 'heifer', 'owned', 'black', 'Angus', 24, $3, $3, $3, $3, $3) \
         RETURNING id",
    )
    .bind(ear_tag)
    .bind(name)
    .bind(trait_value)
    .fetch_one(pool)
    .await
    .expect("insert bull")
}

/// Create a user and log in through the API, returning an access token.
async fn create_user_and_login(pool: &PgPool, email: &str) -> String {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    UserRepo::create(pool, email, &hashed, None)
        .await
        .expect("user creation should succeed");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Catalog listing
// ---------------------------------------------------------------------------

/// Anonymous listing works and returns the page envelope sorted by score.
#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_listing_returns_sorted_page(pool: PgPool) {
    insert_uniform_bull(&pool, "TAG001", "Alpha", 40.0).await;
    insert_uniform_bull(&pool, "TAG002", "Bravo", 72.1).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/bulls").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["total"], 2);
    assert_eq!(json["page"], 1);
    assert_eq!(json["limit"], 10);
    assert_eq!(json["total_pages"], 1);
    assert_eq!(json["data"][0]["ear_tag"], "TAG002");
    assert_eq!(json["data"][1]["ear_tag"], "TAG001");
    // Anonymous viewers never see favorite flags set.
    assert_eq!(json["data"][0]["is_favorite"], false);
}

/// Out-of-range pagination parameters are rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_limit_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/bulls?limit=0").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_page_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/bulls?page=0").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Filters are accepted as query parameters and narrow the result.
#[sqlx::test(migrations = "../../db/migrations")]
async fn search_and_filters_narrow_listing(pool: PgPool) {
    insert_uniform_bull(&pool, "TAG010", "Ranger", 50.0).await;
    insert_uniform_bull(&pool, "TAG011", "Duke", 60.0).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/bulls?search=rang").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["name"], "Ranger");
}

// ---------------------------------------------------------------------------
// Detail view
// ---------------------------------------------------------------------------

/// Detail view returns the stats block with the composite score.
#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_view_includes_stats_block(pool: PgPool) {
    let id = insert_uniform_bull(&pool, "TAG020", "Solo", 55.5).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/bulls/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["ear_tag"], "TAG020");
    assert_eq!(json["data"]["stats"]["growth"], 55.5);
    let score = json["data"]["bull_score"].as_f64().unwrap();
    assert!((score - 55.5).abs() < 1e-9);
}

/// Unknown bull id returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_bull_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/bulls/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// Favorites listing requires authentication.
#[sqlx::test(migrations = "../../db/migrations")]
async fn favorites_listing_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/bulls/favorites").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage token is rejected rather than treated as anonymous.
#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_token_is_rejected_on_public_route(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/bulls", "not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Full favorite round-trip: add, list, remove. Both add and remove are
/// idempotent.
#[sqlx::test(migrations = "../../db/migrations")]
async fn favorite_round_trip(pool: PgPool) {
    let bull_id = insert_uniform_bull(&pool, "TAG030", "Keeper", 80.0).await;
    insert_uniform_bull(&pool, "TAG031", "Other", 70.0).await;
    let token = create_user_and_login(&pool, "roundtrip@test.com").await;

    // Add.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/bulls/{bull_id}/favorite"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["bull_id"], bull_id);

    // Adding again succeeds and refers to the same link.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/bulls/{bull_id}/favorite"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let repeat = body_json(response).await;
    assert_eq!(repeat["data"]["id"], json["data"]["id"]);

    // Favorites listing contains only the favorited bull.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/bulls/favorites", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["data"][0]["id"], bull_id);
    assert_eq!(listing["data"][0]["is_favorite"], true);

    // Remove returns 204.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/bulls/{bull_id}/favorite"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Removing again still returns 204.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/bulls/{bull_id}/favorite"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Favorites listing is now the empty page.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/bulls/favorites", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    assert_eq!(listing["total"], 0);
    assert_eq!(listing["total_pages"], 0);
    assert_eq!(listing["data"].as_array().unwrap().len(), 0);
}

/// Favoriting a bull that does not exist returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn favoriting_unknown_bull_returns_404(pool: PgPool) {
    let token = create_user_and_login(&pool, "nobull@test.com").await;

    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/v1/bulls/999999/favorite", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
