#![allow(dead_code)]

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use octocrab::Octocrab;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client pointed at the mock server
pub fn mock_client(server: &MockServer) -> Octocrab {
    let _ = rustls::crypto::ring::default_provider().install_default();
    devops_digest::github::create_client_with_base("test-token", &server.uri()).unwrap()
}

pub fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn days_ago(now: DateTime<Utc>, days: i64) -> String {
    iso(now - Duration::days(days))
}

pub fn search_item(id: u64, repo: &str, number: u64, created_at: &str) -> Value {
    json!({
        "id": id,
        "number": number,
        "title": format!("PR {}", number),
        "html_url": format!("https://github.com/{}/pull/{}", repo, number),
        "repository_url": format!("https://api.github.com/repos/{}", repo),
        "created_at": created_at,
        "state": "open"
    })
}

pub fn search_page(items: Vec<Value>) -> Value {
    json!({
        "total_count": items.len(),
        "incomplete_results": false,
        "items": items
    })
}

pub async fn mount_search(server: &MockServer, query: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", query))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_error(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "message": "Server Error",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(server)
        .await;
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn run(name: &str, conclusion: Option<&str>, updated_at: &str, id: u64) -> Value {
    json!({
        "id": id,
        "name": name,
        "head_branch": "feature/x",
        "status": "completed",
        "conclusion": conclusion,
        "updated_at": updated_at,
        "html_url": format!("https://github.com/org/a/actions/runs/{}", id)
    })
}

pub fn branch(name: &str, sha: &str) -> Value {
    json!({
        "name": name,
        "commit": {"sha": sha, "url": "https://api.github.com/x"},
        "protected": false
    })
}

pub fn commit(login: Option<&str>, author_name: &str, committed_at: &str) -> Value {
    json!({
        "sha": "ignored",
        "author": login.map(|l| json!({"login": l})),
        "commit": {
            "author": {"name": author_name, "email": "dev@example.com", "date": committed_at},
            "committer": {"name": author_name, "email": "dev@example.com", "date": committed_at}
        }
    })
}
