use std::sync::Arc;

use api::route::{health::build_health_check_routers, v1};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use kernel::{
    model::{
        auth::AccessToken,
        event::Event,
        id::{EventId, UserId},
        registration::Registration,
        role::Role,
        user::User,
    },
    repository::{
        auth::MockAuthRepository, event::MockEventRepository,
        health::MockHealthCheckRepository, photo::MockPhotoStorage,
        registration::MockRegistrationRepository, user::MockUserRepository,
    },
};
use registry::AppRegistry;
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "valid-token";
const BOUNDARY: &str = "X-BOUNDARY";

struct Mocks {
    health: MockHealthCheckRepository,
    events: MockEventRepository,
    users: MockUserRepository,
    registrations: MockRegistrationRepository,
    auth: MockAuthRepository,
    photos: MockPhotoStorage,
}

impl Mocks {
    fn new() -> Self {
        Self {
            health: MockHealthCheckRepository::new(),
            events: MockEventRepository::new(),
            users: MockUserRepository::new(),
            registrations: MockRegistrationRepository::new(),
            auth: MockAuthRepository::new(),
            photos: MockPhotoStorage::new(),
        }
    }

    // TOKEN を持つリクエストを user として認証する
    fn signed_in_as(mut self, user: User) -> Self {
        let user_id = user.user_id;
        self.auth
            .expect_fetch_user_id_from_token()
            .returning(move |token| Ok((token.0 == TOKEN).then_some(user_id)));
        self.users
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .returning(move |_| Ok(Some(user.clone())));
        self
    }

    fn into_app(self) -> Router {
        let registry = AppRegistry::from_parts(
            Arc::new(self.health),
            Arc::new(self.events),
            Arc::new(self.users),
            Arc::new(self.registrations),
            Arc::new(self.auth),
            Arc::new(self.photos),
        );
        Router::new()
            .merge(v1::routes())
            .merge(build_health_check_routers())
            .with_state(registry)
    }
}

fn user(role: Role) -> User {
    User {
        user_id: UserId::new(),
        user_name: "Test User".into(),
        email: "test@example.com".into(),
        role,
    }
}

fn event(event_id: EventId) -> Event {
    let now = Utc::now();
    Event {
        event_id,
        title: "Rust meetup".into(),
        datetime: now + Duration::days(7),
        reg_open_date: now - Duration::days(1),
        reg_close_date: now + Duration::days(1),
    }
}

fn registration(event_id: EventId, user_id: UserId) -> Registration {
    Registration {
        event_id,
        user_id,
        attendance: false,
        photo_submission: None,
        registered_at: Utc::now(),
    }
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn authorized(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

fn authorized_json(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authorized_multipart(uri: &str, parts: &[(&str, Option<&str>, &str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file_name, content_type, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match file_name {
            Some(file_name) => {
                format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n")
            }
            None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n"),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn health_check_reports_database_state() -> anyhow::Result<()> {
    let mut mocks = Mocks::new();
    mocks.health.expect_check_db().returning(|| false);
    let app = mocks.into_app();

    let res = app.clone().oneshot(request(Method::GET, "/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.oneshot(request(Method::GET, "/health/db")).await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[rstest]
#[case(Method::POST, "register")]
#[case(Method::DELETE, "register")]
#[case(Method::POST, "attendance")]
#[case(Method::PUT, "photo")]
#[tokio::test]
async fn registration_routes_reject_anonymous_callers(
    #[case] method: Method,
    #[case] action: &str,
) -> anyhow::Result<()> {
    // 参加登録のモックには期待値を設定しないため、呼ばれればパニックする
    let app = Mocks::new().into_app();
    let uri = format!("/api/v1/events/{}/{}", EventId::new(), action);

    let res = app.oneshot(request(method, &uri)).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn unknown_token_is_unauthorized() -> anyhow::Result<()> {
    let mut mocks = Mocks::new();
    mocks
        .auth
        .expect_fetch_user_id_from_token()
        .returning(|_| Ok(None));
    let app = mocks.into_app();

    let res = app.oneshot(authorized(Method::GET, "/api/v1/users/me")).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn register_uses_the_authenticated_user() -> anyhow::Result<()> {
    let me = user(Role::User);
    let user_id = me.user_id;
    let event_id = EventId::new();

    let mut mocks = Mocks::new().signed_in_as(me);
    mocks
        .events
        .expect_find_by_id()
        .returning(move |id| Ok(Some(event(id))));
    mocks
        .registrations
        .expect_create()
        .withf(move |c| c.event_id == event_id && c.user_id == user_id)
        .times(1)
        .returning(|_| Ok(()));
    let app = mocks.into_app();

    let uri = format!("/api/v1/events/{event_id}/register");
    let res = app.oneshot(authorized(Method::POST, &uri)).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn unregister_without_registration_is_no_content() -> anyhow::Result<()> {
    let mut mocks = Mocks::new().signed_in_as(user(Role::User));
    mocks
        .events
        .expect_find_by_id()
        .returning(move |id| Ok(Some(event(id))));
    mocks.registrations.expect_delete().returning(|_| Ok(()));
    let app = mocks.into_app();

    let uri = format!("/api/v1/events/{}/register", EventId::new());
    let res = app.oneshot(authorized(Method::DELETE, &uri)).await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn attendance_without_registration_is_bad_request() -> anyhow::Result<()> {
    let mut mocks = Mocks::new().signed_in_as(user(Role::User));
    mocks
        .registrations
        .expect_update_attendance()
        .returning(|_| Ok(None));
    let app = mocks.into_app();

    let uri = format!("/api/v1/events/{}/attendance", EventId::new());
    let res = app.oneshot(authorized(Method::POST, &uri)).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn attendance_returns_the_updated_registration() -> anyhow::Result<()> {
    let me = user(Role::User);
    let user_id = me.user_id;
    let event_id = EventId::new();

    let mut mocks = Mocks::new().signed_in_as(me);
    mocks
        .registrations
        .expect_update_attendance()
        .returning(move |_| {
            Ok(Some(Registration {
                attendance: true,
                ..registration(event_id, user_id)
            }))
        });
    let app = mocks.into_app();

    let uri = format!("/api/v1/events/{event_id}/attendance");
    let res = app.oneshot(authorized(Method::POST, &uri)).await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = json_body(res).await?;
    assert_eq!(body["attendance"], true);
    assert_eq!(body["userId"], user_id.to_string());
    Ok(())
}

#[tokio::test]
async fn unknown_event_is_not_found() -> anyhow::Result<()> {
    let mut mocks = Mocks::new();
    mocks.events.expect_find_by_id().returning(|_| Ok(None));
    let app = mocks.into_app();

    let uri = format!("/api/v1/events/{}", EventId::new());
    let res = app.clone().oneshot(request(Method::GET, &uri)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let uri = format!("/api/v1/events/{}/registrations", EventId::new());
    let res = app.oneshot(request(Method::GET, &uri)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn invalid_event_is_reported_per_field() -> anyhow::Result<()> {
    // 検証に失敗した場合は保存しない
    let app = Mocks::new().signed_in_as(user(Role::User)).into_app();

    let res = app
        .oneshot(authorized_json(
            Method::POST,
            "/api/v1/events",
            json!({
                "title": "",
                "datetime": "2024-06-01T10:00:00Z",
                "regOpenDate": "2024-05-01T00:00:00Z",
                "regCloseDate": "2024-05-31T00:00:00Z",
            }),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = json_body(res).await?;
    assert!(body["fields"]["title"].is_array());
    Ok(())
}

#[tokio::test]
async fn create_event_returns_created() -> anyhow::Result<()> {
    let mut mocks = Mocks::new().signed_in_as(user(Role::User));
    mocks.events.expect_create().returning(|c| {
        Ok(Event {
            event_id: EventId::new(),
            title: c.title,
            datetime: c.datetime,
            reg_open_date: c.reg_open_date,
            reg_close_date: c.reg_close_date,
        })
    });
    let app = mocks.into_app();

    let res = app
        .oneshot(authorized_json(
            Method::POST,
            "/api/v1/events",
            json!({
                "title": "Rust meetup",
                "datetime": "2024-06-01T10:00:00Z",
                "regOpenDate": "2024-05-01T00:00:00Z",
                "regCloseDate": "2024-05-31T00:00:00Z",
            }),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = json_body(res).await?;
    assert_eq!(body["title"], "Rust meetup");
    assert_eq!(body["regOpenDate"], "2024-05-01T00:00:00Z");
    Ok(())
}

#[tokio::test]
async fn created_user_never_exposes_password() -> anyhow::Result<()> {
    let mut mocks = Mocks::new();
    mocks.users.expect_create().returning(|c| {
        Ok(User {
            user_id: UserId::new(),
            user_name: c.user_name,
            email: c.email,
            role: Role::User,
        })
    });
    let app = mocks.into_app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "secret",
            })
            .to_string(),
        ))?;
    let res = app.oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = json_body(res).await?;
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["role"], "user");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
    Ok(())
}

#[rstest]
#[case(Role::User, StatusCode::FORBIDDEN)]
#[case(Role::Admin, StatusCode::OK)]
#[tokio::test]
async fn only_admin_changes_roles(
    #[case] role: Role,
    #[case] expected: StatusCode,
) -> anyhow::Result<()> {
    let mut mocks = Mocks::new().signed_in_as(user(role));
    mocks.users.expect_update_role().returning(|_| Ok(()));
    let app = mocks.into_app();

    let uri = format!("/api/v1/users/{}/role", UserId::new());
    let res = app
        .oneshot(authorized_json(Method::PUT, &uri, json!({ "role": "admin" })))
        .await?;
    assert_eq!(res.status(), expected);
    Ok(())
}

#[tokio::test]
async fn login_issues_access_token() -> anyhow::Result<()> {
    let me = user(Role::Admin);
    let user_id = me.user_id;

    let mut mocks = Mocks::new();
    mocks
        .auth
        .expect_verify_user()
        .withf(|email, password| email == "test@example.com" && password == "secret")
        .returning(move |_, _| Ok(user_id));
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(me.clone())));
    mocks
        .auth
        .expect_create_token()
        .returning(|c| Ok(AccessToken(c.access_token)));
    let app = mocks.into_app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "test@example.com", "password": "secret" }).to_string(),
        ))?;
    let res = app.oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await?;
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["role"], "admin");
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
    Ok(())
}

#[tokio::test]
async fn logout_revokes_the_presented_token() -> anyhow::Result<()> {
    let mut mocks = Mocks::new().signed_in_as(user(Role::User));
    mocks
        .auth
        .expect_delete_token()
        .withf(|token| *token == AccessToken(TOKEN.into()))
        .times(1)
        .returning(|_| Ok(()));
    let app = mocks.into_app();

    let res = app
        .oneshot(authorized(Method::POST, "/api/v1/auth/logout"))
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn photo_upload_stores_image_and_returns_registration() -> anyhow::Result<()> {
    let me = user(Role::User);
    let user_id = me.user_id;
    let event_id = EventId::new();

    let mut mocks = Mocks::new().signed_in_as(me);
    mocks
        .registrations
        .expect_find()
        .returning(move |e, u| Ok(Some(registration(e, u))));
    mocks
        .photos
        .expect_store()
        .withf(|_, _, photo| photo.is_image() && photo.content == &b"png-bytes"[..])
        .returning(|_, _, _| Ok("pic/stored.png".into()));
    mocks
        .registrations
        .expect_update_photo_submission()
        .returning(move |c| {
            Ok(Some(Registration {
                photo_submission: Some(c.photo_submission),
                ..registration(event_id, user_id)
            }))
        });
    let app = mocks.into_app();

    let uri = format!("/api/v1/events/{event_id}/photo");
    let res = app
        .oneshot(authorized_multipart(
            &uri,
            &[
                ("comment", None, "text/plain", &b"hello"[..]),
                ("photoSubmission", Some("me.png"), "image/png", &b"png-bytes"[..]),
            ],
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = json_body(res).await?;
    assert_eq!(body["photoSubmission"], "pic/stored.png");
    Ok(())
}

#[tokio::test]
async fn photo_upload_without_file_is_a_field_error() -> anyhow::Result<()> {
    let app = Mocks::new().signed_in_as(user(Role::User)).into_app();

    let uri = format!("/api/v1/events/{}/photo", EventId::new());
    let res = app
        .oneshot(authorized_multipart(
            &uri,
            &[("comment", None, "text/plain", &b"hello"[..])],
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = json_body(res).await?;
    assert!(body["fields"]["photoSubmission"].is_array());
    Ok(())
}

#[tokio::test]
async fn registered_events_of_unknown_user_is_not_found() -> anyhow::Result<()> {
    let mut mocks = Mocks::new();
    mocks.users.expect_find_by_id().returning(|_| Ok(None));
    let app = mocks.into_app();

    let uri = format!("/api/v1/users/{}/events", UserId::new());
    let res = app.oneshot(request(Method::GET, &uri)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_event_body_is_reported_per_field() -> anyhow::Result<()> {
    // 入力エラーの場合はイベントを保存しない
    let app = Mocks::new().signed_in_as(user(Role::User)).into_app();

    // 必須項目の欠落
    let res = app
        .clone()
        .oneshot(authorized_json(
            Method::POST,
            "/api/v1/events",
            json!({
                "title": "no datetime",
                "regOpenDate": "2024-05-01T00:00:00Z",
                "regCloseDate": "2024-05-31T00:00:00Z",
            }),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await?;
    assert!(body["fields"]["datetime"].is_array());

    // 型の誤り
    let res = app
        .clone()
        .oneshot(authorized_json(
            Method::POST,
            "/api/v1/events",
            json!({
                "title": 1,
                "datetime": "2024-06-01T10:00:00Z",
                "regOpenDate": "2024-05-01T00:00:00Z",
                "regCloseDate": "2024-05-31T00:00:00Z",
            }),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await?;
    assert!(body["fields"]["title"].is_array());

    // Content-Type がない場合は 400
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/events")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::from("{}"))?;
    let res = app.oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[rstest]
#[case("/api/v1/events/123")]
#[case("/api/v1/events/not-a-uuid/registrations")]
#[case("/api/v1/users/123/events")]
#[tokio::test]
async fn unparsable_id_is_not_found_with_json_body(#[case] uri: &str) -> anyhow::Result<()> {
    // リポジトリには期待値を設定しないため、呼ばれればパニックする
    let app = Mocks::new().into_app();

    let res = app.oneshot(request(Method::GET, uri)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(&b"application/json"[..])
    );
    let body = json_body(res).await?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn active_events_use_the_current_time() -> anyhow::Result<()> {
    let open_event = event(EventId::new());
    let expected_id = open_event.event_id.to_string();

    let mut mocks = Mocks::new();
    mocks
        .events
        .expect_find_in_registration_window()
        .withf(|now| (Utc::now() - *now).num_seconds().abs() < 60)
        .times(1)
        .returning(move |_| Ok(vec![open_event.clone()]));
    let app = mocks.into_app();

    let res = app
        .oneshot(request(Method::GET, "/api/v1/events/active"))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await?;
    let items = body["items"].as_array().map(Vec::len);
    assert_eq!(items, Some(1));
    assert_eq!(body["items"][0]["id"], expected_id);
    Ok(())
}
