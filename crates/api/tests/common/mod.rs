//! Shared harness for HTTP-level integration tests.
//!
//! Builds the same router + middleware stack as `main.rs` against a
//! per-test database, plus request helpers and account seeding.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use tulong_api::auth::jwt::{generate_access_token, JwtConfig};
use tulong_api::auth::password::hash_password;
use tulong_api::config::ServerConfig;
use tulong_api::routes;
use tulong_api::state::AppState;
use tulong_core::submission::NormalizedRequest;
use tulong_core::types::DbId;
use tulong_db::models::account::{Account, CreateAccount};
use tulong_db::models::recipient_request::RecipientRequest;
use tulong_db::repositories::{AccountRepo, BarangayRepo, RecipientRequestRepo, RoleRepo};

/// Fixed plaintext password for all seeded test accounts.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a fixed JWT secret so tests can mint
/// their own tokens.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// The JWT config shared by the test app and token-minting helpers.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-keep-it-long".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Multipart boundary used by [`post_multipart`].
const BOUNDARY: &str = "tulong-test-boundary";

/// Send a POST request with a multipart form of text fields plus an optional
/// `proof_photo` file part.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    photo: Option<&[u8]>,
) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some(bytes) = photo {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"proof_photo\"; filename=\"proof.jpg\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Consume a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Consume a response body and return the raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create an account with the given role directly in the database.
///
/// The password is always [`TEST_PASSWORD`].
pub async fn create_account(
    pool: &PgPool,
    role_name: &str,
    contact_number: &str,
    barangay_id: Option<DbId>,
) -> Account {
    let role = RoleRepo::find_by_name(pool, role_name)
        .await
        .expect("role lookup should succeed")
        .unwrap_or_else(|| panic!("role '{role_name}' should be seeded"));

    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateAccount {
        name: format!("Test {role_name} {contact_number}"),
        org_name: None,
        contact_number: contact_number.to_string(),
        email: None,
        address: None,
        password_hash: hashed,
        role_id: role.id,
        barangay_id,
    };
    AccountRepo::create(pool, &input)
        .await
        .expect("account creation should succeed")
}

/// Create an admin account. `barangay_id` scopes it to one barangay.
pub async fn create_admin(pool: &PgPool, contact_number: &str, barangay_id: Option<DbId>) -> Account {
    create_account(pool, "admin", contact_number, barangay_id).await
}

/// Create a donor account.
pub async fn create_donor(pool: &PgPool, contact_number: &str) -> Account {
    create_account(pool, "donor", contact_number, None).await
}

/// Mint an access token for a seeded account, signed with the test secret.
pub fn token_for(account: &Account, role: &str) -> String {
    generate_access_token(account.id, role, account.barangay_id, &test_jwt_config())
        .expect("token generation should succeed")
}

/// Id of the alphabetically first seeded barangay.
pub async fn first_barangay_id(pool: &PgPool) -> DbId {
    let rows = BarangayRepo::list(pool)
        .await
        .expect("barangay list should succeed");
    rows.first().expect("barangays should be seeded").id
}

/// Insert an aid request through the repository, bypassing the HTTP intake.
pub async fn seed_request(
    pool: &PgPool,
    barangay_id: DbId,
    calamity: &str,
    necessities: &str,
) -> RecipientRequest {
    let normalized = NormalizedRequest {
        complete_name: "Seeded Resident".to_string(),
        age: 34,
        contact_number: "09180000000".to_string(),
        email_address: None,
        barangay_id,
        area: "Zone 1".to_string(),
        type_of_calamity: calamity.to_string(),
        no_of_family_members: 5,
        number_of_children: 2,
        age_group_infant: 1,
        age_group_early_child: 1,
        age_group_middle_child: 0,
        age_group_adolescent: 0,
        in_kind_necessities: necessities.to_string(),
        specifications: serde_json::json!({}),
        proof_photo: None,
    };
    RecipientRequestRepo::create(pool, &normalized)
        .await
        .expect("request creation should succeed")
}
