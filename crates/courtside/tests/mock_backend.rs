//! Mock backend tests for the courtside client.
//!
//! These tests use wiremock to simulate the backend and exercise the request
//! pipeline's auth, retry, and normalization behavior without network access.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use courtside::services::BookingStatus;
use courtside::telemetry::{ErrorContext, TelemetrySink};
use courtside::{
    ApiBaseUrl, ApiClient, ApiConfig, ApiError, CallConfig, CourtsideClient, Credentials,
    ErrorKind, Session, TracingTelemetry, UserId,
};

/// Config pointed at a mock server, with a backoff base small enough to keep
/// the retry ladder shape without the wait.
fn test_config(server: &MockServer) -> ApiConfig {
    ApiConfig::new(ApiBaseUrl::new(server.uri()).unwrap())
        .with_retry_base_delay(Duration::from_millis(10))
}

/// A session restored from persisted tokens, as an app would do on startup.
fn persisted_session(config: &ApiConfig, access: &str, refresh: Option<&str>) -> Session {
    Session::from_persisted(
        config,
        UserId::new("user_1").unwrap(),
        access.to_string(),
        refresh.map(String::from),
    )
}

fn authed_client(config: &ApiConfig, session: &Session) -> ApiClient {
    ApiClient::new(
        config.clone(),
        Arc::new(session.clone()),
        Arc::new(TracingTelemetry),
    )
}

/// Telemetry sink that records every report for assertions.
#[derive(Default)]
struct RecordingTelemetry {
    reports: Mutex<Vec<(ErrorKind, String)>>,
}

impl RecordingTelemetry {
    fn reports(&self) -> Vec<(ErrorKind, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn report_error(&self, error: &ApiError, _context: &ErrorContext<'_>) {
        self.reports
            .lock()
            .unwrap()
            .push((error.kind, error.request_id.to_string()));
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "identifier": "alice@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": "user_1",
            "accessToken": "access-1",
            "refreshToken": "refresh-1",
            "expiresIn": 3600
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn login_attaches_returned_token_to_subsequent_calls() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bookings": [] })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let credentials = Credentials::new("alice@example.com", "secret123");
    let session = Session::login(&config, credentials).await.unwrap();
    assert_eq!(session.user_id().as_str(), "user_1");

    let client = CourtsideClient::with_session(config, session);
    let page = client.bookings().list(&Default::default()).await.unwrap();
    assert!(page.bookings.is_empty());
}

#[tokio::test]
async fn login_rejection_maps_domain_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "AUTH_INVALID_CREDENTIALS",
            "message": "Invalid account or password"
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let credentials = Credentials::new("bob@example.com", "wrong");
    let err = Session::login(&config, credentials).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::AuthInvalidCredentials);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn valid_token_never_triggers_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/venues"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "venues": [], "cursor": null })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "fresh-access", Some("refresh-1"));
    let client = CourtsideClient::with_session(config, session);

    for _ in 0..2 {
        client
            .venues()
            .list_venues(&Default::default())
            .await
            .unwrap();
    }
}

// ============================================================================
// 401 refresh-and-redispatch
// ============================================================================

#[tokio::test]
async fn single_401_refreshes_once_and_redispatches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bookings": [] })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": "user_1",
            "accessToken": "access-2",
            "refreshToken": "refresh-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "stale-access", Some("refresh-1"));
    let client = authed_client(&config, &session);

    let page: serde_json::Value = client.get("bookings", &()).await.unwrap();
    assert_eq!(page, json!({ "bookings": [] }));

    // The rotated pair is what the session now holds.
    assert_eq!(
        session.export_access_token().await.as_deref(),
        Some("access-2")
    );
    assert_eq!(
        session.export_refresh_token().await.as_deref(),
        Some("refresh-2")
    );
}

#[tokio::test]
async fn second_401_does_not_refresh_again() {
    let server = MockServer::start().await;

    // The endpoint rejects even the refreshed token.
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": "user_1",
            "accessToken": "access-2",
            "refreshToken": "refresh-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "stale-access", Some("refresh-1"));
    let telemetry = Arc::new(RecordingTelemetry::default());
    let client = ApiClient::new(config.clone(), Arc::new(session.clone()), telemetry.clone());

    let err = client
        .get::<_, serde_json::Value>("bookings", &())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::AuthUnauthorized);

    // Refresh succeeded, so the session survives with the new pair.
    assert!(session.is_authenticated().await);
    assert_eq!(
        session.export_access_token().await.as_deref(),
        Some("access-2")
    );

    // Exactly one normalized failure reached telemetry.
    let reports = telemetry.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, ErrorKind::AuthUnauthorized);
    assert!(reports[0].1.starts_with("req_"));
}

#[tokio::test]
async fn refresh_failure_signs_out_and_propagates_original_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "AUTH_TOKEN_EXPIRED",
            "message": "Token has expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "stale-access", Some("dead-refresh"));

    let signed_out = Arc::new(AtomicBool::new(false));
    let flag = signed_out.clone();
    session.set_sign_out_hook(move || flag.store(true, Ordering::SeqCst));

    let client = authed_client(&config, &session);
    let err = client
        .get::<_, serde_json::Value>("bookings", &())
        .await
        .unwrap_err();

    // The caller sees the original 401, never a silent success.
    assert_eq!(err.kind, ErrorKind::AuthUnauthorized);

    assert!(signed_out.load(Ordering::SeqCst));
    assert!(!session.is_authenticated().await);
    assert!(session.export_access_token().await.is_none());
}

#[tokio::test]
async fn skip_auth_calls_never_refresh_on_401() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/venues"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "stale-access", Some("refresh-1"));
    let client = authed_client(&config, &session);

    let err = client
        .get_with::<_, serde_json::Value>("venues", &(), CallConfig::unauthenticated())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::AuthUnauthorized);
}

#[tokio::test]
async fn concurrent_401s_each_refresh_independently() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bookings": [] })))
        .mount(&server)
        .await;

    // Both in-flight calls may race into refresh; either one or two calls
    // is correct, and both requests must converge on the final state.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": "user_1",
            "accessToken": "access-2",
            "refreshToken": "refresh-2"
        })))
        .expect(1..=2)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "stale-access", Some("refresh-1"));
    let client = authed_client(&config, &session);

    let (a, b) = tokio::join!(
        client.get::<_, serde_json::Value>("bookings", &()),
        client.get::<_, serde_json::Value>("bookings", &()),
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(
        session.export_access_token().await.as_deref(),
        Some("access-2")
    );
}

// ============================================================================
// Network retry and normalization
// ============================================================================

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/venues"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = ApiClient::unauthenticated(config);

    let err = client
        .get::<_, serde_json::Value>("venues", &())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NetworkServerError);
    assert_eq!(err.message, ErrorKind::NetworkServerError.message());
}

#[tokio::test]
async fn connection_failure_retries_twice_then_reports_offline() {
    // Bind and drop a listener so the port is known to refuse connections.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = ApiConfig::new(ApiBaseUrl::new(format!("http://127.0.0.1:{port}")).unwrap())
        .with_retry_base_delay(Duration::from_millis(10));
    let client = ApiClient::unauthenticated(config);

    let started = Instant::now();
    let err = client
        .get::<_, serde_json::Value>("venues", &())
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err.kind, ErrorKind::NetworkOffline);
    assert!(!err.message.is_empty());

    // Two retries at base * 2 and base * 4 were slept through.
    assert!(
        elapsed >= Duration::from_millis(60),
        "elapsed only {elapsed:?}"
    );
}

#[tokio::test]
async fn timeout_normalizes_to_network_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = ApiClient::unauthenticated(config);

    let call = CallConfig::default()
        .with_timeout(Duration::from_millis(50))
        .with_max_network_retries(0);
    let err = client
        .get_with::<_, serde_json::Value>("slow", &(), call)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NetworkTimeout);
}

#[tokio::test]
async fn domain_code_maps_with_body_message_override() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "BOOKING_SLOT_TAKEN",
            "message": "Court 3 is already booked at 18:00"
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = ApiClient::unauthenticated(config);

    let err = client
        .post::<_, serde_json::Value>("bookings", &json!({ "courtId": "court_3" }))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::BookingSlotTaken);
    assert_eq!(err.message, "Court 3 is already booked at 18:00");
}

#[tokio::test]
async fn expiry_marker_in_message_maps_to_token_expired() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "jwt token expired"
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = ApiClient::unauthenticated(config);

    let err = client
        .get::<_, serde_json::Value>("bookings", &())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::AuthTokenExpired);
}

#[tokio::test]
async fn unrecognized_failure_is_unknown_with_displayable_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/venues"))
        .respond_with(
            ResponseTemplate::new(418)
                .set_body_string("short and stout")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = ApiClient::unauthenticated(config);

    let err = client
        .get::<_, serde_json::Value>("venues", &())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(err.message, ErrorKind::Unknown.message());
    assert!(!err.message.contains("short and stout"));
}

// ============================================================================
// Payload and header contracts
// ============================================================================

#[tokio::test]
async fn success_payload_passes_through_unmodified() {
    let server = MockServer::start().await;

    let body = json!({
        "id": "venue_1",
        "name": "Southside Padel",
        "city": "Austin",
        "address": "812 Red River St",
        "sports": ["padel", "tennis"],
        "rating": 4.5,
        "extraFieldTheClientDoesNotKnow": { "nested": [1, 2, 3] }
    });

    Mock::given(method("GET"))
        .and(path("/venues/venue_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = ApiClient::unauthenticated(config);

    let fetched: serde_json::Value = client.get("venues/venue_1", &()).await.unwrap();
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn every_call_carries_a_request_id_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/venues"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "venues": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = ApiClient::unauthenticated(config);

    client
        .get::<_, serde_json::Value>("venues", &())
        .await
        .unwrap();
}

#[tokio::test]
async fn skip_auth_calls_omit_the_bearer_header() {
    let server = MockServer::start().await;

    // Mounted first so it would win if the header were present.
    Mock::given(method("GET"))
        .and(path("/venues"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "venues": [] })))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/venues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "venues": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "some-access", Some("refresh-1"));
    let client = authed_client(&config, &session);

    client
        .get_with::<_, serde_json::Value>("venues", &(), CallConfig::unauthenticated())
        .await
        .unwrap();
}

// ============================================================================
// Domain services
// ============================================================================

#[tokio::test]
async fn create_booking_sends_camel_case_body_and_decodes_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(body_json(json!({
            "courtId": "court_1",
            "startsAt": "2026-08-07T18:00:00Z",
            "endsAt": "2026-08-07T19:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "bkg_1",
            "courtId": "court_1",
            "venueId": "venue_1",
            "userId": "user_1",
            "startsAt": "2026-08-07T18:00:00Z",
            "endsAt": "2026-08-07T19:00:00Z",
            "status": "confirmed",
            "priceCents": 4500,
            "createdAt": "2026-08-06T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "fresh-access", None);
    let client = CourtsideClient::with_session(config, session);

    let court = courtside::CourtId::new("court_1").unwrap();
    let request = courtside::services::CreateBookingRequest {
        court_id: &court,
        starts_at: "2026-08-07T18:00:00Z".parse().unwrap(),
        ends_at: "2026-08-07T19:00:00Z".parse().unwrap(),
    };

    let booking = client.bookings().create(&request).await.unwrap();
    assert_eq!(booking.id.as_str(), "bkg_1");
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.price_cents, 4500);
}

#[tokio::test]
async fn cancel_booking_posts_to_the_cancel_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bookings/bkg_1/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "bkg_1",
            "courtId": "court_1",
            "venueId": "venue_1",
            "userId": "user_1",
            "startsAt": "2026-08-07T18:00:00Z",
            "endsAt": "2026-08-07T19:00:00Z",
            "status": "cancelled",
            "priceCents": 4500,
            "createdAt": "2026-08-06T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "fresh-access", None);
    let client = CourtsideClient::with_session(config, session);

    let booking_id = courtside::BookingId::new("bkg_1").unwrap();
    let booking = client.bookings().cancel(&booking_id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn court_slots_query_carries_the_date() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courts/court_1/slots"))
        .and(query_param("date", "2026-08-07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "courtId": "court_1",
                "startsAt": "2026-08-07T18:00:00Z",
                "endsAt": "2026-08-07T19:00:00Z",
                "priceCents": 4500,
                "available": true
            }
        ])))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = CourtsideClient::anonymous(config);

    let court = courtside::CourtId::new("court_1").unwrap();
    let slots = client
        .venues()
        .court_slots(&court, "2026-08-07".parse().unwrap())
        .await
        .unwrap();

    assert_eq!(slots.len(), 1);
    assert!(slots[0].available);
}

#[tokio::test]
async fn clip_feed_filters_by_venue() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clips"))
        .and(query_param("venueId", "venue_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clips": [{
                "id": "clip_1",
                "authorId": "user_2",
                "title": "match point",
                "videoUrl": "https://cdn.courtside.app/clips/clip_1.mp4",
                "durationSecs": 14,
                "likeCount": 3,
                "commentCount": 1,
                "createdAt": "2026-08-06T12:00:00Z"
            }],
            "cursor": "next"
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = CourtsideClient::anonymous(config);

    let venue = courtside::VenueId::new("venue_1").unwrap();
    let query = courtside::services::ClipFeedQuery {
        venue_id: Some(&venue),
        ..Default::default()
    };

    let page = client.highlights().feed(&query).await.unwrap();
    assert_eq!(page.clips.len(), 1);
    assert_eq!(page.clips[0].title, "match point");
    assert_eq!(page.cursor.as_deref(), Some("next"));
}

#[tokio::test]
async fn delete_clip_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clips/clip_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "fresh-access", None);
    let client = CourtsideClient::with_session(config, session);

    let clip = courtside::ClipId::new("clip_1").unwrap();
    client.highlights().delete(&clip).await.unwrap();
}

#[tokio::test]
async fn like_and_unlike_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/clips/clip_1/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clipId": "clip_1",
            "liked": true,
            "likeCount": 4
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/clips/clip_1/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clipId": "clip_1",
            "liked": false,
            "likeCount": 3
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "fresh-access", None);
    let client = CourtsideClient::with_session(config, session);

    let clip = courtside::ClipId::new("clip_1").unwrap();
    let liked = client.social().like(&clip).await.unwrap();
    assert!(liked.liked);
    assert_eq!(liked.like_count, 4);

    let unliked = client.social().unlike(&clip).await.unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.like_count, 3);
}

#[tokio::test]
async fn comment_posting_and_listing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/clips/clip_1/comments"))
        .and(body_json(json!({ "text": "what a rally" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cmt_1",
            "clipId": "clip_1",
            "author": { "id": "user_1", "displayName": "Alice" },
            "text": "what a rally",
            "createdAt": "2026-08-06T12:00:00Z"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clips/clip_1/comments"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comments": [{
                "id": "cmt_1",
                "clipId": "clip_1",
                "author": { "id": "user_1", "displayName": "Alice" },
                "text": "what a rally",
                "createdAt": "2026-08-06T12:00:00Z"
            }]
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "fresh-access", None);
    let client = CourtsideClient::with_session(config, session);

    let clip = courtside::ClipId::new("clip_1").unwrap();
    let comment = client.social().comment(&clip, "what a rally").await.unwrap();
    assert_eq!(comment.author.display_name, "Alice");

    let page = courtside::services::PageQuery {
        limit: Some(10),
        cursor: None,
    };
    let comments = client.social().comments(&clip, &page).await.unwrap();
    assert_eq!(comments.comments.len(), 1);
}

#[tokio::test]
async fn follow_and_unfollow_report_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/user_2/follow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": "user_2",
            "following": true,
            "followerCount": 10
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/users/user_2/follow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": "user_2",
            "following": false,
            "followerCount": 9
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "fresh-access", None);
    let client = CourtsideClient::with_session(config, session);

    let user = UserId::new("user_2").unwrap();
    let followed = client.social().follow(&user).await.unwrap();
    assert!(followed.following);

    let unfollowed = client.social().unfollow(&user).await.unwrap();
    assert!(!unfollowed.following);
    assert_eq!(unfollowed.follower_count, 9);
}

#[tokio::test]
async fn self_follow_rejection_surfaces_the_social_kind() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/user_1/follow"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": "SOCIAL_SELF_FOLLOW"
        })))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = persisted_session(&config, "fresh-access", None);
    let client = CourtsideClient::with_session(config, session);

    let user = UserId::new("user_1").unwrap();
    let err = client.social().follow(&user).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::SocialSelfFollow);
    assert_eq!(err.message, ErrorKind::SocialSelfFollow.message());
}
