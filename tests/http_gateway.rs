use anyhow::{Context, Result};
use authgate::{
    api,
    gateway::{AuthGateway, SessionIssuer},
    provider::CognitoClient,
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::AUTHORIZATION},
    response::Response,
};
use secrecy::SecretString;
use serde_json::{Value, json};
use std::{net::TcpListener, sync::Arc, time::Duration};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

const CLIENT_ID: &str = "test-client-id";
const JWT_SECRET: &str = "integration-secret";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

struct TestApp {
    router: Router,
    gateway: Arc<AuthGateway>,
}

impl TestApp {
    fn new(cognito: &MockServer) -> Result<Self> {
        let provider = CognitoClient::new(
            "us-east-1",
            Some(cognito.uri().as_str()),
            Duration::from_secs(5),
        )?;
        let sessions = SessionIssuer::new(&SecretString::from(JWT_SECRET.to_string()), 3600)?;
        let gateway = Arc::new(AuthGateway::new(Arc::new(provider), CLIENT_ID, sessions));

        Ok(Self {
            router: api::router(gateway.clone()),
            gateway,
        })
    }

    async fn post(&self, uri: &str, body: &Value) -> Result<Response> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(body)?))?;
        Ok(self.router.clone().oneshot(request).await?)
    }

    async fn get(&self, uri: &str, bearer: Option<&str>) -> Result<Response> {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(self.router.clone().oneshot(request.body(Body::empty())?).await?)
    }
}

fn target(operation: &str) -> String {
    format!("AWSCognitoIdentityProviderService.{operation}")
}

async fn text(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    String::from_utf8(bytes.to_vec()).context("response body is not UTF-8")
}

async fn json_body(response: Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn sign_in_issues_session_token_for_profile() -> Result<()> {
    if !can_bind_localhost() {
        return Ok(());
    }

    let cognito = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("x-amz-target", target("InitiateAuth").as_str()))
        .and(body_partial_json(json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": CLIENT_ID,
            "AuthParameters": { "USERNAME": "a@b.com", "PASSWORD": "Password123" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AuthenticationResult": {
                "AccessToken": "abc123",
                "ExpiresIn": 3600,
                "TokenType": "Bearer"
            },
            "ChallengeParameters": {}
        })))
        .expect(1)
        .mount(&cognito)
        .await;

    let app = TestApp::new(&cognito)?;

    let response = app
        .post(
            "/auth/signin",
            &json!({ "email": "a@b.com", "password": "Password123" }),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let token = text(response).await?;
    let claims = app.gateway.sessions().verify(&token)?;
    assert_eq!(claims.email, "a@b.com");
    assert_eq!(claims.token, "abc123");

    let response = app.get("/user/profile", Some(&token)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = json_body(response).await?;
    assert_eq!(profile["email"], "a@b.com");
    assert_eq!(profile["token"], "abc123");

    Ok(())
}

#[tokio::test]
async fn sign_up_passes_provider_result_through() -> Result<()> {
    if !can_bind_localhost() {
        return Ok(());
    }

    let provider_result = json!({
        "UserConfirmed": false,
        "UserSub": "8f0a1c2e-0000-4000-8000-000000000000",
        "CodeDeliveryDetails": {
            "AttributeName": "email",
            "DeliveryMedium": "EMAIL",
            "Destination": "a***@b.com"
        }
    });

    let cognito = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("SignUp").as_str()))
        .and(body_partial_json(json!({
            "ClientId": CLIENT_ID,
            "Username": "a@b.com",
            "Password": "Password123",
            "UserAttributes": [{ "Name": "email", "Value": "a@b.com" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_result.clone()))
        .expect(1)
        .mount(&cognito)
        .await;

    let app = TestApp::new(&cognito)?;
    let response = app
        .post(
            "/auth/signup",
            &json!({ "email": "a@b.com", "password": "Password123" }),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await?, provider_result);
    Ok(())
}

#[tokio::test]
async fn confirm_with_wrong_code_reports_provider_error() -> Result<()> {
    if !can_bind_localhost() {
        return Ok(());
    }

    let cognito = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("ConfirmSignUp").as_str()))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "CodeMismatchException",
            "message": "Invalid code"
        })))
        .expect(1)
        .mount(&cognito)
        .await;

    let app = TestApp::new(&cognito)?;
    let response = app
        .post(
            "/auth/confirm",
            &json!({ "email": "a@b.com", "code": "000000" }),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await?;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Invalid code");
    assert_eq!(body["code"], "CodeMismatchException");
    assert_eq!(body["path"], "/auth/confirm");
    Ok(())
}

#[tokio::test]
async fn confirm_success_returns_fixed_message() -> Result<()> {
    if !can_bind_localhost() {
        return Ok(());
    }

    let cognito = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("ConfirmSignUp").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&cognito)
        .await;

    let app = TestApp::new(&cognito)?;
    let response = app
        .post(
            "/auth/confirm",
            &json!({ "email": "a@b.com", "code": "123456" }),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await?,
        json!({ "message": "Code validated successfully." })
    );
    Ok(())
}

#[tokio::test]
async fn throttled_provider_keeps_status_and_type() -> Result<()> {
    if !can_bind_localhost() {
        return Ok(());
    }

    let cognito = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("ForgotPassword").as_str()))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-amzn-errortype", "TooManyRequestsException:")
                .set_body_string(""),
        )
        .expect(1)
        .mount(&cognito)
        .await;

    let app = TestApp::new(&cognito)?;
    let response = app
        .post("/auth/forgot-password", &json!({ "email": "a@b.com" }))
        .await?;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = json_body(response).await?;
    assert_eq!(body["statusCode"], 429);
    assert_eq!(body["code"], "TooManyRequestsException");
    assert_eq!(body["message"], "Internal server error");
    Ok(())
}

#[tokio::test]
async fn validation_failure_never_reaches_provider() -> Result<()> {
    if !can_bind_localhost() {
        return Ok(());
    }

    let cognito = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&cognito)
        .await;

    let app = TestApp::new(&cognito)?;
    let response = app
        .post(
            "/auth/signin",
            &json!({ "email": "not-an-email", "password": "Password123" }),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await?["message"], "email must be an email");
    Ok(())
}

#[tokio::test]
async fn change_password_forwards_access_token() -> Result<()> {
    if !can_bind_localhost() {
        return Ok(());
    }

    let cognito = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("ChangePassword").as_str()))
        .and(body_partial_json(json!({
            "AccessToken": "access",
            "PreviousPassword": "OldPassword1",
            "ProposedPassword": "NewPassword1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&cognito)
        .await;

    let app = TestApp::new(&cognito)?;
    let response = app
        .post(
            "/auth/change-password",
            &json!({
                "AccessToken": "access",
                "oldPassword": "OldPassword1",
                "newPassword": "NewPassword1"
            }),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await?, json!({}));
    Ok(())
}

#[tokio::test]
async fn profile_rejects_foreign_token() -> Result<()> {
    if !can_bind_localhost() {
        return Ok(());
    }

    let cognito = MockServer::start().await;
    let app = TestApp::new(&cognito)?;

    let foreign = SessionIssuer::new(&SecretString::from("other-secret".to_string()), 3600)?
        .issue("a@b.com", "abc123")?;

    let response = app.get("/user/profile", Some(&foreign)).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await?["statusCode"], 401);
    Ok(())
}
