//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use serpshot::SerpShotClient;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const TEST_KEY: &str = "test-key-0123456789";
pub const SEARCH_PATH: &str = "/api/search/google";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Async client pointed at the mock server with millisecond backoff.
    pub fn client(&self) -> SerpShotClient {
        SerpShotClient::builder()
            .api_key(TEST_KEY)
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(5))
            .retry_base_delay(Duration::from_millis(5))
            .build()
            .expect("client should build")
    }

    /// Mock a search call whose request body contains `partial`, expected
    /// exactly `hits` times.
    pub async fn mock_search(
        &mut self,
        partial: Value,
        status: usize,
        body: Value,
        hits: usize,
    ) -> Mock {
        self.server
            .mock("POST", SEARCH_PATH)
            .match_header("x-api-key", TEST_KEY)
            .match_body(Matcher::PartialJson(partial))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(hits)
            .create_async()
            .await
    }

    /// Mock any search call with a fixed status, headers and raw body.
    pub async fn mock_raw(
        &mut self,
        status: usize,
        headers: &[(&str, &str)],
        body: &str,
        hits: usize,
    ) -> Mock {
        let mut mock = self
            .server
            .mock("POST", SEARCH_PATH)
            .with_status(status)
            .with_body(body)
            .expect(hits);
        for (k, v) in headers {
            mock = mock.with_header(*k, *v);
        }
        mock.create_async().await
    }
}

/// `{code: 200, msg: "ok", data}` success envelope.
pub fn envelope(data: Value) -> Value {
    json!({"code": 200, "msg": "ok", "data": data})
}

/// Backend item for a web search with `n` organic results.
pub fn organic_item(query: &str, n: usize) -> Value {
    let results: Vec<Value> = (1..=n)
        .map(|i| {
            json!({
                "title": format!("{query} result {i}"),
                "link": format!("https://example.com/{query}/{i}"),
                "snippet": format!("snippet {i}"),
                "position": i,
            })
        })
        .collect();
    json!({
        "search_params": {"q": query, "type": "search"},
        "search_info": {"total_results": "About 1,000,000", "search_time": "0.42"},
        "results": results,
        "credits": 1,
    })
}

/// Backend item for an image search with one result.
pub fn image_item(query: &str) -> Value {
    json!({
        "search_params": {"q": query, "type": "image"},
        "search_info": {"total_results": 100, "search_time": 0.3},
        "results": [{
            "title": format!("{query} picture"),
            "imageUrl": format!("https://img.example.com/{query}.png"),
            "thumbnailUrl": format!("https://img.example.com/{query}_t.png"),
            "source": "example.com",
            "link": format!("https://example.com/{query}"),
            "imageWidth": 640,
            "imageHeight": 480,
            "position": 1,
        }],
        "credits": 2,
    })
}

/// Plain TCP server that accepts the first `stalls` connections and never
/// answers them, then replies `200` with `body` to every later request.
///
/// Returns the base URL and a counter of accepted connections. The server
/// thread lives until the test process exits.
pub fn stalling_server(stalls: usize, body: String) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= stalls {
                held.push(stream);
                continue;
            }
            read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    (format!("http://{addr}"), hits)
}

/// Consume one HTTP/1.1 request (headers plus `content-length` body).
fn read_request(stream: &mut TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let body_len = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + body_len {
            return;
        }
    }
}
