use agentnav::assistant::{AssistantClient, AssistantError, AssistantReply};
use agentnav::routing::RouteTable;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    path: String,
    auth_header: String,
    body: String,
}

struct MockAssistantServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockAssistantServer {
    fn start(status_line: &'static str, response_body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_for_thread = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader
                .read_line(&mut request_line)
                .expect("read request line");
            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let path = parts.next().unwrap_or("/").to_string();

            let mut auth_header = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("read header");
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if lower.starts_with("authorization:") {
                    auth_header = line
                        .split_once(':')
                        .map(|(_, v)| v.trim().to_string())
                        .unwrap_or_default();
                }
                if lower.starts_with("content-length:") {
                    content_length = line
                        .split_once(':')
                        .map(|(_, v)| v.trim().parse::<usize>().unwrap_or(0))
                        .unwrap_or(0);
                }
            }

            let mut body = vec![0_u8; content_length];
            if content_length > 0 {
                reader.read_exact(&mut body).expect("read body");
            }

            requests_for_thread
                .lock()
                .expect("lock requests")
                .push(RecordedRequest {
                    method,
                    path,
                    auth_header,
                    body: String::from_utf8_lossy(&body).to_string(),
                });

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response_body.len(),
                response_body
            );
            stream
                .write_all(response.as_bytes())
                .expect("write response");
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
            handle: Some(handle),
        }
    }

    fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock server");
        }
        self.requests.lock().expect("lock requests").clone()
    }
}

#[test]
fn assistant_client_fetches_context_with_bearer_token() {
    let server = MockAssistantServer::start(
        "200 OK",
        r#"{"scope":{"company":"acme"},"plan":{"id":"p-1"},"goals":[]}"#,
    );
    let client = AssistantClient::new(&format!("{}/", server.base_url), Some("t-123".to_string()));

    let context = client.fetch_context().expect("context");
    assert_eq!(context.plan, Some(serde_json::json!({"id": "p-1"})));

    let requests = server.finish();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/assistant/context");
    assert_eq!(requests[0].auth_header, "Bearer t-123");
}

#[test]
fn assistant_client_posts_message_and_parses_structured_reply() {
    let server = MockAssistantServer::start(
        "200 OK",
        r#"{"directAnswer":"Vamos lá","recommendedActions":[{"label":"Iniciar diagnóstico","payload":{"diagnosticId":"d-4"}}]}"#,
    );
    let client = AssistantClient::new(&server.base_url, None);

    let reply = client.send_message("  por onde começo?  ").expect("reply");
    let table = RouteTable::builtin();
    let routes = reply
        .recommended_actions()
        .iter()
        .map(|action| action.resolve(&table).route)
        .collect::<Vec<_>>();
    assert_eq!(routes, vec!["/diagnosticos?diagnosticId=d-4".to_string()]);

    let requests = server.finish();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/assistant/chat");
    assert!(requests[0].auth_header.is_empty());
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).expect("json body");
    assert_eq!(body, serde_json::json!({"message": "por onde começo?"}));
}

#[test]
fn assistant_client_keeps_plain_text_bodies() {
    let server = MockAssistantServer::start("200 OK", "Olá, tudo bem?");
    let client = AssistantClient::new(&server.base_url, None);
    let reply = client.send_message("oi").expect("reply");
    assert_eq!(
        reply,
        AssistantReply::Plain {
            text: "Olá, tudo bem?".to_string()
        }
    );
    server.finish();
}

#[test]
fn assistant_client_surfaces_http_errors() {
    let server = MockAssistantServer::start("503 Service Unavailable", r#"{"error":"down"}"#);
    let client = AssistantClient::new(&server.base_url, None);
    let err = client.fetch_context().expect_err("should fail");
    match err {
        AssistantError::ApiResponse { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("down"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    server.finish();
}

#[test]
fn assistant_client_rejects_blank_messages_without_a_request() {
    let client = AssistantClient::new("http://127.0.0.1:9/api", None);
    assert!(matches!(
        client.send_message("   "),
        Err(AssistantError::EmptyMessage)
    ));
}
