use crate::{api, AppState};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use voxdesk_assistant::{AssistantClient, AssistantClientConfig};
use voxdesk_core::Role;
use voxdesk_storage::Database;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestApp {
    state: AppState,
    platform: MockServer,
}

impl TestApp {
    async fn new() -> Self {
        let platform = MockServer::start().await;
        let db = Database::in_memory().await.unwrap();
        let client =
            AssistantClient::new(AssistantClientConfig::new(platform.uri(), "test-key")).unwrap();
        let state = AppState::new(db, Arc::new(client), chrono::Duration::hours(1));

        state
            .auth
            .register_user("ops@voxdesk.io", "supersecret", None, Role::Admin)
            .await
            .unwrap();
        state
            .auth
            .register_user(
                "mia@pizza.co.nz",
                "pepperoni-pass",
                Some("Mia Chen".to_string()),
                Role::Client,
            )
            .await
            .unwrap();

        Self { state, platform }
    }

    fn router(&self) -> Router {
        api::create_router(self.state.clone())
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": email, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_plans_endpoint() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/plans", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!([
            {"key": "entry", "name": "Entry Plan", "monthly_price": "$66 NZD/month"},
            {"key": "starter", "name": "Starter Plan", "monthly_price": "$99 NZD/month"}
        ])
    );
}

#[tokio::test]
async fn test_login_redirects_by_role() {
    let app = TestApp::new().await;

    let (_, admin) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ops@voxdesk.io", "password": "supersecret"})),
        )
        .await;
    assert_eq!(admin["data"]["redirect_to"], "/admin");

    let (_, client) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "mia@pizza.co.nz", "password": "pepperoni-pass"})),
        )
        .await;
    assert_eq!(client["data"]["redirect_to"], "/dashboard");
    assert_eq!(client["data"]["profile"]["role"], "client");
}

#[tokio::test]
async fn test_login_failure_message() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "mia@pizza.co.nz", "password": "wrong-password"})),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_me_requires_session() {
    let app = TestApp::new().await;

    let (status, _) = app.send(Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.login("mia@pizza.co.nz", "pepperoni-pass").await;
    let (status, body) = app.send(Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["profile"]["email"], "mia@pizza.co.nz");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new().await;
    let token = app.login("mia@pizza.co.nz", "pepperoni-pass").await;

    let (status, body) = app
        .send(Method::POST, "/api/auth/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["signed_out"], true);

    let (status, _) = app.send(Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_waitlist_signup() {
    let app = TestApp::new().await;
    let signup = json!({
        "full_name": "Tama Walker",
        "business_name": "Walker Auto",
        "email": "tama@walkerauto.nz",
        "phone": "022 555 0199",
        "business_type": "Auto Services",
        "plan": "entry",
        "agree_terms": true
    });

    let (status, body) = app
        .send(Method::POST, "/api/waitlist", None, Some(signup.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["plan_name"], "Entry Plan");
    assert_eq!(body["data"]["monthly_price"], "$66 NZD/month");

    let (status, body) = app.send(Method::POST, "/api/waitlist", None, Some(signup)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_waitlist_requires_terms() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/waitlist",
            None,
            Some(json!({"email": "tama@walkerauto.nz", "agree_terms": false})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = TestApp::new().await;
    let client = app.login("mia@pizza.co.nz", "pepperoni-pass").await;
    let admin = app.login("ops@voxdesk.io", "supersecret").await;

    let (status, _) = app
        .send(Method::GET, "/api/admin/profiles", Some(&client), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(Method::GET, "/api/admin/profiles", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = app
        .send(Method::GET, "/api/admin/waitlist", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _) = app.send(Method::GET, "/api/dashboard", Some(&admin), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_create_edit_save() {
    let app = TestApp::new().await;
    let token = app.login("mia@pizza.co.nz", "pepperoni-pass").await;

    let (status, body) = app.send(Method::GET, "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "no_assistant");

    Mock::given(method("POST"))
        .and(path("/assistant"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "a1", "name": "Mia's Pizza"})),
        )
        .expect(1)
        .mount(&app.platform)
        .await;
    Mock::given(method("GET"))
        .and(path("/assistant/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a1",
            "name": "Mia's Pizza",
            "model": {"messages": [{"role": "system", "content": "Hello"}]}
        })))
        .up_to_n_times(2)
        .mount(&app.platform)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/assistant/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a1"})))
        .expect(1)
        .mount(&app.platform)
        .await;
    Mock::given(method("GET"))
        .and(path("/assistant/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a1",
            "name": "Mia's Pizza",
            "model": {"messages": [{"role": "system", "content": "Take pizza orders"}]}
        })))
        .mount(&app.platform)
        .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/dashboard/assistant",
            Some(&token),
            Some(json!({"name": "Mia's Pizza"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "configured");
    assert_eq!(body["data"]["system_prompt_draft"], "Hello");

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/dashboard/prompt",
            Some(&token),
            Some(json!({"system_prompt": "Take pizza orders"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["system_prompt_draft"], "Take pizza orders");

    let (status, body) = app
        .send(Method::POST, "/api/dashboard/save", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["system_prompt_draft"], "Take pizza orders");
    assert_eq!(body["data"]["success_notice"], "Assistant configuration saved.");

    // A second create is refused now that an assistant exists
    let (status, body) = app
        .send(
            Method::POST,
            "/api/dashboard/assistant",
            Some(&token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_dashboard_create_failure_is_reported_in_view() {
    let app = TestApp::new().await;
    let token = app.login("mia@pizza.co.nz", "pepperoni-pass").await;
    app.send(Method::GET, "/api/dashboard", Some(&token), None).await;

    Mock::given(method("POST"))
        .and(path("/assistant"))
        .respond_with(ResponseTemplate::new(402).set_body_string("quota exceeded"))
        .mount(&app.platform)
        .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/dashboard/assistant",
            Some(&token),
            Some(json!({})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "no_assistant");
    assert!(body["data"]["error"]
        .as_str()
        .unwrap()
        .contains("quota exceeded"));
}

#[tokio::test]
async fn test_blank_assistant_name_rejected() {
    let app = TestApp::new().await;
    let token = app.login("mia@pizza.co.nz", "pepperoni-pass").await;
    app.send(Method::GET, "/api/dashboard", Some(&token), None).await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/dashboard/assistant",
            Some(&token),
            Some(json!({"name": "   "})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_endpoint() {
    let app = TestApp::new().await;

    let (status, _) = app.send(Method::GET, "/api/nonexistent", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
