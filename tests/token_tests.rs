//! Access token acquisition tests
//!
//! The client never caches: every `acquire_token` call is one request.

use wecom_sdk::types::{CorpId, CorpSecret};
use wecom_sdk::{Wecom, WecomError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_wecom(mock_server: &MockServer) -> Wecom {
    Wecom::builder()
        .base_url(mock_server.uri())
        .build()
        .unwrap()
}

fn credentials() -> (CorpId, CorpSecret) {
    (
        CorpId::new("corp1").unwrap(),
        CorpSecret::new("secret1").unwrap(),
    )
}

#[tokio::test]
async fn test_acquire_token_returns_token_and_expiry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .and(query_param("corpid", "corp1"))
        .and(query_param("corpsecret", "secret1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 0,
            "errmsg": "ok",
            "access_token": "tok123",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let wecom = create_test_wecom(&mock_server);
    let (corp_id, corp_secret) = credentials();

    let token = wecom.acquire_token(&corp_id, &corp_secret).await.unwrap();

    assert_eq!(token.access_token.as_str(), "tok123");
    assert_eq!(token.expires_in, 7200);
}

#[tokio::test]
async fn test_acquire_token_sends_no_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 0,
            "errmsg": "ok",
            "access_token": "tok123",
            "expires_in": 7200
        })))
        .mount(&mock_server)
        .await;

    let wecom = create_test_wecom(&mock_server);
    let (corp_id, corp_secret) = credentials();
    wecom.acquire_token(&corp_id, &corp_secret).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_acquire_token_is_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 0,
            "errmsg": "ok",
            "access_token": "tok123",
            "expires_in": 7200
        })))
        .expect(3)
        .mount(&mock_server)
        .await;

    let wecom = create_test_wecom(&mock_server);
    let (corp_id, corp_secret) = credentials();

    for _ in 0..3 {
        wecom.acquire_token(&corp_id, &corp_secret).await.unwrap();
    }
}

#[tokio::test]
async fn test_acquire_token_concurrent_callers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 0,
            "errmsg": "ok",
            "access_token": "tok123",
            "expires_in": 7200
        })))
        .expect(10)
        .mount(&mock_server)
        .await;

    let wecom = create_test_wecom(&mock_server);

    let handles = (0..10).map(|_| {
        let wecom = wecom.clone();
        tokio::spawn(async move {
            let (corp_id, corp_secret) = credentials();
            wecom.acquire_token(&corp_id, &corp_secret).await
        })
    });

    for result in futures::future::join_all(handles).await {
        let token = result.unwrap().unwrap();
        assert_eq!(token.access_token.as_str(), "tok123");
    }
}

#[tokio::test]
async fn test_acquire_token_invalid_secret() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 40001,
            "errmsg": "invalid credential, hint: [1700000000_1]"
        })))
        .mount(&mock_server)
        .await;

    let wecom = create_test_wecom(&mock_server);
    let (corp_id, corp_secret) = credentials();

    match wecom.acquire_token(&corp_id, &corp_secret).await {
        Err(WecomError::Api { code, message }) => {
            assert_eq!(code, 40001);
            assert_eq!(message, "invalid credential, hint: [1700000000_1]");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_acquire_token_success_without_token_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"errcode": 0, "errmsg": "ok"})),
        )
        .mount(&mock_server)
        .await;

    let wecom = create_test_wecom(&mock_server);
    let (corp_id, corp_secret) = credentials();

    let result = wecom.acquire_token(&corp_id, &corp_secret).await;
    assert!(
        matches!(result, Err(WecomError::Decode(_))),
        "Expected Decode error, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_acquire_token_wrong_field_type_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 0,
            "access_token": "tok123",
            "expires_in": "two hours"
        })))
        .mount(&mock_server)
        .await;

    let wecom = create_test_wecom(&mock_server);
    let (corp_id, corp_secret) = credentials();

    let result = wecom.acquire_token(&corp_id, &corp_secret).await;
    assert!(matches!(result, Err(WecomError::Decode(_))));
}
