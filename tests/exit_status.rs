#![cfg(all(feature = "env", feature = "client"))]

use std::process::{Command, Output};

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const BIN: &str = env!("CARGO_BIN_EXE_delete-tag-and-release");

/// Runs the binary in a clean environment pointed at `server`.
async fn run(server: &MockServer, inputs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(BIN);
    command
        .env_clear()
        .env("GITHUB_API_URL", server.uri())
        .env("INPUT_GITHUB_TOKEN", "a-fake-token")
        .env("INPUT_REPO", "a-fake-user/a-fake-repo")
        .envs(inputs.iter().copied());

    tokio::task::spawn_blocking(move || command.output())
        .await
        .unwrap()
        .unwrap()
}

async fn received(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

async fn mount_tag_response(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("DELETE"))
        .and(path("/repos/a-fake-user/a-fake-repo/git/refs/tags/v1.0.0"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn fails_without_a_tag_before_any_request() {
    let server = MockServer::start().await;

    let output = run(&server, &[]).await;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(received(&server).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn fails_on_a_non_boolean_flag_before_any_request() {
    let server = MockServer::start().await;

    let output = run(
        &server,
        &[("INPUT_TAG_NAME", "v1.0.0"), ("INPUT_DELETE_RELEASE", "yes")],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(received(&server).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn succeeds_when_the_tag_is_deleted() {
    let server = MockServer::start().await;
    mount_tag_response(&server, ResponseTemplate::new(204)).await;

    let output = run(&server, &[("INPUT_TAG_NAME", "v1.0.0")]).await;

    assert_eq!(output.status.code(), Some(0));
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn succeeds_when_the_tag_is_already_gone() {
    let server = MockServer::start().await;
    mount_tag_response(
        &server,
        ResponseTemplate::new(422).set_body_json(json!({ "message": "Reference does not exist" })),
    )
    .await;

    let output = run(&server, &[("INPUT_TAG_NAME", "v1.0.0")]).await;

    assert_eq!(output.status.code(), Some(0));
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn succeeds_without_matching_releases() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/a-fake-user/a-fake-repo/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "tag_name": "other", "draft": false },
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_tag_response(&server, ResponseTemplate::new(204)).await;

    let output = run(
        &server,
        &[("INPUT_TAG_NAME", "v1.0.0"), ("INPUT_DELETE_RELEASE", "true")],
    )
    .await;

    assert_eq!(output.status.code(), Some(0));
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn fails_when_the_tag_cannot_be_deleted() {
    let server = MockServer::start().await;
    mount_tag_response(
        &server,
        ResponseTemplate::new(403)
            .set_body_json(json!({ "message": "Resource not accessible by integration" })),
    )
    .await;

    let output = run(&server, &[("INPUT_TAG_NAME", "v1.0.0")]).await;

    assert_eq!(output.status.code(), Some(1));
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn fails_when_a_release_cannot_be_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/a-fake-user/a-fake-repo/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "tag_name": "v1.0.0", "draft": false },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/a-fake-user/a-fake-repo/releases/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/a-fake-user/a-fake-repo/git/refs/tags/v1.0.0"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = run(
        &server,
        &[("INPUT_TAG_NAME", "v1.0.0"), ("INPUT_DELETE_RELEASE", "true")],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    server.verify().await;
}
