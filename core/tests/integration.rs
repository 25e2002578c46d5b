//! Full lifecycle test against the live mock server.
//!
//! Starts the mock Box Panel on a random port, then drives every client
//! operation over real HTTP through the default ureq transport.

use std::io::{Read, Write};
use std::net::SocketAddr;
use std::time::Duration;

use bluebox_core::{ApiError, BlockParams, Client, ClientConfig, Credentials, TemplateParams};
use mock_server::BASE_TEMPLATE_ID;

/// Spawns the mock server on its own runtime thread and returns its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, "customer", "secret").await
        })
        .unwrap();
    });

    addr
}

/// Answers a single connection with a raw HTTP response, whatever was asked.
fn serve_raw_once(status_line: &'static str, body: &'static [u8]) -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(body).unwrap();
        stream.flush().unwrap();
    });

    addr
}

fn client(addr: SocketAddr, api_key: &str) -> Client {
    Client::with_config(
        ClientConfig::default()
            .with_base_url(&format!("http://{addr}"))
            .with_timeout(Duration::from_secs(10)),
        Credentials::new("customer", api_key),
    )
}

#[test]
fn block_and_template_lifecycle() {
    let client = client(start_server(), "secret");

    // Step 1: no blocks yet; the base template is listed.
    assert!(client.blocks().list().unwrap().is_empty());
    let templates = client.templates().list().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].id, BASE_TEMPLATE_ID);

    // Step 2: invalid parameters fail locally.
    let err = client
        .blocks()
        .create(&BlockParams::with_password("small", "", "pw"))
        .unwrap_err();
    assert!(err.is_validation());

    // Step 3: create a block.
    let params = BlockParams::with_password("small", BASE_TEMPLATE_ID, "hunter2")
        .hostname("web1.example.com")
        .username("deploy");
    let created = client.blocks().create(&params).unwrap();
    assert_eq!(created.hostname, "web1.example.com");
    assert_eq!(created.status, "queued");
    assert_eq!(created.addresses().count(), 1);

    // Step 4: get and list agree with the created record.
    let fetched = client.blocks().get(&created.id).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(client.blocks().list().unwrap(), vec![created.clone()]);

    // Step 5: snapshot the block into a template.
    let status = client
        .templates()
        .create(&TemplateParams::new(&created.id).description("web1 snapshot"))
        .unwrap();
    assert_eq!(status.text, "queued");
    assert!(!status.is_error());

    let template = client.templates().get(&status.status).unwrap();
    assert_eq!(template.description, "web1 snapshot");
    assert!(!template.public);

    // Step 6: destroy the block; a second destroy is a 404, not a panic.
    client.blocks().destroy(&created.id).unwrap();
    let err = client.blocks().destroy(&created.id).unwrap_err();
    assert!(err.is_not_found());

    // Step 7: get after destroy is a 404.
    let err = client.blocks().get(&created.id).unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404 }));

    // Step 8: destroy the template.
    client.templates().destroy(&template.id).unwrap();
    assert_eq!(client.templates().list().unwrap().len(), 1);
}

#[test]
fn template_from_unknown_block_is_404() {
    let client = client(start_server(), "secret");
    let err = client.templates().create_from_block("missing").unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn template_without_block_id_is_answered_by_the_server() {
    let client = client(start_server(), "secret");
    let err = client.templates().create_from_block("").unwrap_err();
    assert_eq!(err.status(), Some(422));
}

#[test]
fn error_status_wins_over_an_undecodable_body() {
    let addr = serve_raw_once("404 Not Found", b"\xff\xfe\x00bad");
    let err = client(addr, "secret").blocks().get("abc").unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404 }), "{err:?}");
}

#[test]
fn destroy_ignores_a_non_utf8_body() {
    let addr = serve_raw_once("200 OK", b"\xff\xfe");
    client(addr, "secret").blocks().destroy("abc").unwrap();
}

#[test]
fn non_utf8_success_body_is_a_decode_error() {
    let addr = serve_raw_once("200 OK", b"\xff\xfe");
    let err = client(addr, "secret").blocks().get("abc").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[test]
fn wrong_api_key_is_401() {
    let client = client(start_server(), "wrong");
    let err = client.blocks().list().unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401 }));
}

#[test]
fn unreachable_host_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client(addr, "secret");
    let err = client.blocks().list().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
