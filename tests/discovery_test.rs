use deltacloud_client::{BasicAuth, DeltacloudClient, DeltacloudError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry_point_body(base: &str) -> String {
    format!(
        r#"<api driver="mock" version="1.0">
            <link rel="instances" href="{base}/api/instances">
                <feature name="user_name"/>
                <feature name="user_data"/>
            </link>
            <link rel="realms" href="{base}/api/realms"/>
        </api>"#
    )
}

#[tokio::test]
async fn discovers_links_at_initialization() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string(entry_point_body(&server.uri())))
        .expect(1)
        .mount(&server)
        .await;

    let client = DeltacloudClient::new(format!("{}/api", server.uri()), BasicAuth::new("u", "p"))
        .await
        .expect("Failed to initialize client");

    assert_eq!(client.links().len(), 2);
    assert!(client.supports("instances"));
    assert!(client.supports("realms"));
    assert!(!client.supports("storage_volumes"));

    let link = client.resolve("instances").expect("instances link");
    assert_eq!(link.href, format!("{}/api/instances", server.uri()));
    assert_eq!(link.features.len(), 2);
    assert_eq!(link.features[0].name, "user_name");

    // supports agrees with resolve on every relation
    for rel in ["instances", "realms", "keys", ""] {
        assert_eq!(client.supports(rel), client.resolve(rel).is_ok());
    }
}

#[tokio::test]
async fn sends_basic_credentials_on_every_request() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    // "admin:secret" base64-encoded
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(header("Authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(entry_point_body(&server.uri())))
        .expect(1)
        .mount(&server)
        .await;

    DeltacloudClient::new(
        format!("{}/api", server.uri()),
        BasicAuth::new("admin", "secret"),
    )
    .await
    .expect("Failed to initialize client");
}

#[tokio::test]
async fn unparsable_entry_point_fails_construction() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not xml"))
        .mount(&server)
        .await;

    let err = DeltacloudClient::new(format!("{}/api", server.uri()), BasicAuth::new("u", "p"))
        .await
        .unwrap_err();
    assert!(matches!(err, DeltacloudError::Xml(_)), "{:?}", err);
}

#[tokio::test]
async fn wrong_entry_point_root_fails_construction() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<apis><link/></apis>"))
        .mount(&server)
        .await;

    let err = DeltacloudClient::new(format!("{}/api", server.uri()), BasicAuth::new("u", "p"))
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("api"), "{}", msg);
    assert!(msg.contains("apis"), "{}", msg);
}

#[tokio::test]
async fn empty_entry_point_body_fails_construction() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = DeltacloudClient::new(format!("{}/api", server.uri()), BasicAuth::new("u", "p"))
        .await
        .unwrap_err();
    assert!(matches!(err, DeltacloudError::EmptyResponse(_)), "{:?}", err);
}

#[tokio::test]
async fn error_document_at_entry_point_fails_construction() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<error><message>maintenance window</message></error>"),
        )
        .mount(&server)
        .await;

    let err = DeltacloudClient::new(format!("{}/api", server.uri()), BasicAuth::new("u", "p"))
        .await
        .unwrap_err();
    match err {
        DeltacloudError::Server(msg) => assert_eq!(msg, "maintenance window"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_entry_point_is_a_transport_error() {
    let _ = env_logger::try_init();

    // a port nothing listens on
    let err = DeltacloudClient::new("http://127.0.0.1:1/api", BasicAuth::new("u", "p"))
        .await
        .unwrap_err();
    assert!(matches!(err, DeltacloudError::Get(_)), "{:?}", err);
}
