use social_errors::AppError;
use social_login::application::services::TokenConverter;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONVERT_PATH: &str = "/auth/convert-token/";

async fn convert(base_url: &str) -> Result<String, AppError> {
    TokenConverter::new(reqwest::Client::new())
        .convert(base_url, "local-client", "local-secret", "github", "tok1")
        .await
}

#[tokio::test]
async fn test_convert_posts_form_and_returns_session_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CONVERT_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=convert_token"))
        .and(body_string_contains("client_id=local-client"))
        .and(body_string_contains("client_secret=local-secret"))
        .and(body_string_contains("backend=github"))
        .and(body_string_contains("token=tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"access_token":"sess1","expires_in":36000,"token_type":"Bearer","scope":"read write","refresh_token":"r1"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let session = convert(&format!("{}/", server.uri())).await.unwrap();
    assert_eq!(session, "sess1");
}

#[tokio::test]
async fn test_base_url_without_trailing_slash() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CONVERT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"access_token":"T"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let session = convert(&server.uri()).await.unwrap();
    assert_eq!(session, "T");
}

#[tokio::test]
async fn test_response_without_access_token_is_missing_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CONVERT_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"error":"invalid_grant","error_description":"Invalid credentials given."}"#,
        ))
        .mount(&server)
        .await;

    let err = convert(&format!("{}/", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingField(ref field) if field == "access_token"));
}

#[tokio::test]
async fn test_non_json_response_is_missing_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CONVERT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Server Error (500)</h1>"))
        .mount(&server)
        .await;

    let err = convert(&format!("{}/", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingField(_)));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let err = TokenConverter::new(reqwest::Client::new())
        .convert("http://127.0.0.1:1/", "local-client", "local-secret", "github", "tok1")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Transport(_)), "got {:?}", err);
}
