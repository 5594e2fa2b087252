// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use smartexpense::advice::{fallback_tips, AdviceBackend, AdviceProvider, GeminiBackend};
use smartexpense::config::AdviceConfig;
use smartexpense::models::{TipAction, TipIcon};

const KEY: &str = "SECRET-KEY-123";

fn config(api_base: &str) -> AdviceConfig {
    let mut cfg = AdviceConfig::new(KEY);
    cfg.api_base = api_base.to_string();
    cfg.timeout = Duration::from_secs(5);
    cfg
}

/// Answer exactly one request with `status` and `body`; the join handle
/// yields the raw request that was received.
fn serve_once(status: &str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let status = status.to_string();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });
    (base, handle)
}

fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn envelope(parts: &[&str]) -> String {
    let parts: Vec<_> = parts.iter().map(|t| json!({ "text": t })).collect();
    json!({ "candidates": [ { "content": { "parts": parts } } ] }).to_string()
}

fn live_provider(base: &str) -> AdviceProvider {
    AdviceProvider::with_backend(Arc::new(GeminiBackend::new(config(base)).unwrap()))
}

#[test]
fn valid_envelope_yields_parsed_tips() {
    let tips = r#"[
        {"title": "Cook at home", "description": "Dining out doubled.", "icon": "idea"},
        {"title": "Review Recurring Bills", "description": "Two streaming plans.", "icon": "alert", "action": "review_bills"}
    ]"#;
    let (base, server) = serve_once("200 OK", envelope(&[tips]));

    let got = live_provider(&base).get_financial_advice(&[]);
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].title, "Cook at home");
    assert_eq!(got[0].icon, TipIcon::Idea);
    assert_eq!(got[1].action, Some(TipAction::ReviewBills));

    let request = server.join().unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent "));
    assert!(!request_line.contains(KEY));
    assert!(request
        .lines()
        .any(|l| l.eq_ignore_ascii_case(&format!("x-goog-api-key: {}", KEY))));
    assert!(request.contains(r#""responseMimeType":"application/json""#));
}

#[test]
fn reply_split_across_parts_is_joined() {
    let (base, server) = serve_once(
        "200 OK",
        envelope(&[
            r#"[{"title": "Emergency Fund", "#,
            r#""description": "Keep three months aside.", "icon": "check"}]"#,
        ]),
    );
    let backend = GeminiBackend::new(config(&base)).unwrap();
    let text = backend.generate("prompt").unwrap();
    assert!(text.starts_with(r#"[{"title": "Emergency Fund", "description""#));
    server.join().unwrap();
}

#[test]
fn empty_candidates_fall_back() {
    let (base, server) = serve_once("200 OK", json!({ "candidates": [] }).to_string());
    assert_eq!(live_provider(&base).get_financial_advice(&[]), fallback_tips());
    server.join().unwrap();
}

#[test]
fn candidate_without_text_is_an_error() {
    let body = json!({ "candidates": [ { "content": { "parts": [ {} ] } } ] }).to_string();
    let (base, server) = serve_once("200 OK", body);
    let err = GeminiBackend::new(config(&base))
        .unwrap()
        .generate("prompt")
        .unwrap_err();
    assert!(err.to_string().contains("no text"), "{}", err);
    server.join().unwrap();
}

#[test]
fn server_error_falls_back_and_hides_the_key() {
    let (base, server) = serve_once(
        "500 Internal Server Error",
        json!({ "error": { "code": 500 } }).to_string(),
    );
    let err = GeminiBackend::new(config(&base))
        .unwrap()
        .generate("prompt")
        .unwrap_err();
    let text = err.to_string();
    assert!(text.contains("500"), "{}", text);
    assert!(!text.contains(KEY), "{}", text);
    assert!(!format!("{:?}", err).contains(KEY));
    server.join().unwrap();

    let (base, server) = serve_once("500 Internal Server Error", String::new());
    assert_eq!(live_provider(&base).get_financial_advice(&[]), fallback_tips());
    server.join().unwrap();
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn connection_failure_log_never_contains_the_key() {
    let backend = GeminiBackend::new(config("http://127.0.0.1:1")).unwrap();
    let err = backend.generate("prompt").unwrap_err();
    assert!(!err.to_string().contains(KEY), "{}", err);

    let logs = Captured::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();
    let tips = tracing::subscriber::with_default(subscriber, || {
        live_provider("http://127.0.0.1:1").get_financial_advice(&[])
    });
    assert_eq!(tips, fallback_tips());

    let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("advice request failed"), "{}", logged);
    assert!(!logged.contains(KEY), "{}", logged);
    assert!(!format!("{:?}", config("x")).contains(KEY));
}
