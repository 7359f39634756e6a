//! End-to-end tests of the command-line binary.

use std::process::Output;

use tokio::process::Command;

use argocd_renderer::Settings;

mod common;

async fn cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argocd-renderer-cli"))
        .args(args)
        .output()
        .await
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[tokio::test]
async fn test_main_help() {
    let out = cli(&["--help"]).await;
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("ArgoCD Renderer CLI"));
}

#[tokio::test]
async fn test_bare_invocation_prints_usage() {
    let out = cli(&[]).await;
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("Usage"));
    assert!(text.contains("render"));
    assert!(text.contains("whitelist"));
}

#[tokio::test]
async fn test_render_unreachable_server() {
    let url = format!("http://{}", common::unused_addr().await);

    let out = cli(&["render", "--repo", "https://github.com/org/repo", "--server", &url]).await;

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains(&format!("Error: Cannot connect to server at {}", url)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_render_denied() {
    let server = common::spawn_server(Settings::default()).await;

    let out = cli(&["render", "-r", "https://evil.com/x", "-s", &server.url()]).await;

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Error: Repository URL not allowed: https://evil.com/x"));

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_render_json_output() {
    let server = common::spawn_server(Settings::default()).await;

    let out = cli(&[
        "render",
        "--repo",
        "https://github.com/org/repo",
        "--path",
        "apps",
        "--revision",
        "main",
        "--server",
        &server.url(),
    ])
    .await;

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let body: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(body["path"], "apps");
    assert_eq!(body["targetRevision"], "main");
    assert_eq!(body["mock"], true);

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_render_text_output() {
    let server = common::spawn_server(Settings::default()).await;

    let out = cli(&[
        "render",
        "-r",
        "https://github.com/org/repo",
        "-o",
        "yaml",
        "-s",
        &server.url(),
    ])
    .await;

    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("repoURL: https://github.com/org/repo"));
    assert!(text.contains("mock: true"));
    assert!(text.contains("  - ConfigMap/mock-manifest"));

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_whitelist_list() {
    let server = common::spawn_server(Settings::default()).await;

    let out = cli(&["whitelist", "list", "--server", &server.url()]).await;

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "Whitelist patterns:\n  - https://github.com/*\n");

    server.stop().await;
}

#[tokio::test]
async fn test_whitelist_list_unreachable() {
    let url = format!("http://{}", common::unused_addr().await);
    let out = cli(&["whitelist", "list", "-s", &url]).await;
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Cannot connect to server at"));
}
