use scriptlink_common::cancel::CancelFlag;
use scriptlink_common::network::range::PortRange;
use scriptlink_common::outcome::ExecutionOutcome;
use scriptlink_core::executor::{Executor, SUCCESS_MESSAGE};
use tokio::net::TcpListener;

use crate::support::{SENTINEL, ToyServer, closed_port, config_for};

async fn run(server: &ToyServer, payload: &str) -> ExecutionOutcome {
    let ports = PortRange::single(server.port).unwrap();
    let exec = Executor::over_http(config_for(ports)).unwrap();
    exec.execute_script(payload, &CancelFlag::new()).await
}

#[tokio::test]
async fn delivered_script_reports_server_body() {
    let server = ToyServer::bind((200, SENTINEL), (200, "ok")).await;
    let payload: &str = "print(\"hello\")\nwait(1)\n";

    let outcome = run(&server, payload).await;

    assert!(outcome.success());
    assert_eq!(outcome.message(), SUCCESS_MESSAGE);
    assert_eq!(outcome.details(), "ok");

    let posts: Vec<_> = server
        .requests()
        .into_iter()
        .filter(|r| r.method == "POST")
        .collect();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, "/execute");
    assert_eq!(posts[0].body, payload);
    assert_eq!(posts[0].content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn rejected_script_reports_status_and_body() {
    let server = ToyServer::bind((200, SENTINEL), (500, "boom")).await;

    let outcome = run(&server, "error()").await;

    assert!(!outcome.success());
    assert!(outcome.message().contains("500"));
    assert!(outcome.message().contains("boom"));
}

#[tokio::test]
async fn nothing_is_dispatched_without_handshake() {
    let server = ToyServer::bind((200, "0xdeadbeeF"), (200, "ok")).await;

    let outcome = run(&server, "x").await;

    assert!(!outcome.success());
    assert!(server.requests().iter().all(|r| r.method == "GET"));
}

#[tokio::test]
async fn exhaustion_outcome_names_range() {
    let port: u16 = closed_port().await;
    let exec = Executor::over_http(config_for(PortRange::single(port).unwrap())).unwrap();

    let outcome = exec.execute_script("x", &CancelFlag::new()).await;

    assert!(!outcome.success());
    assert!(outcome.message().contains(&port.to_string()));
    assert!(outcome.message().contains("Could not locate HTTP server"));
}

#[tokio::test]
async fn redirected_dispatch_is_rejected_without_following() {
    let outside = ToyServer::bind((200, SENTINEL), (200, "outside-ok")).await;
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let inside = ToyServer::redirecting(listener, (200, SENTINEL), (307, ""), outside.port);

    let outcome = run(&inside, "payload").await;

    assert!(!outcome.success());
    assert!(outcome.message().contains("307"));
    assert!(outside.requests().is_empty(), "script left the discovered port");

    let posts: usize = inside
        .requests()
        .iter()
        .filter(|r| r.method == "POST")
        .count();
    assert_eq!(posts, 1);
}
