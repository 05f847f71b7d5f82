use std::fs;

use utilbelt::http::{agent, download_image, send_request};
use utilbelt::mime::ImageMime;

mod common;
use common::OneShotServer;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

#[test]
fn download_writes_body_to_file() {
    let server = OneShotServer::start("200 OK", &[("Content-Type", "image/png")], PNG_BYTES);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.png");

    let download = download_image(&agent(), &format!("{}/card.png", server.url), &path).unwrap();

    assert_eq!(download.bytes, PNG_BYTES.len() as u64);
    assert_eq!(download.mime, Some(ImageMime::Png));
    assert_eq!(fs::read(&path).unwrap(), PNG_BYTES);
    assert!(server.request().starts_with("GET /card.png HTTP/1.1"));
}

#[test]
fn download_keeps_non_image_content() {
    let server = OneShotServer::start("200 OK", &[("Content-Type", "text/plain")], b"hello");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.png");

    let download = download_image(&agent(), &server.url, &path).unwrap();

    assert_eq!(download.mime, None);
    assert_eq!(fs::read(&path).unwrap(), b"hello");
    server.request();
}

#[test]
fn download_fails_on_missing_image() {
    let server = OneShotServer::start("404 Not Found", &[], b"no such image");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.png");

    let err = download_image(&agent(), &server.url, &path).unwrap_err();

    assert_eq!(err.to_string(), "Error Getting Image");
    assert!(!path.exists());
    server.request();
}

#[test]
fn download_into_missing_directory_fails() {
    let server = OneShotServer::start("200 OK", &[("Content-Type", "image/png")], PNG_BYTES);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("card.png");

    let err = download_image(&agent(), &server.url, &path).unwrap_err();

    assert_eq!(err.to_string(), "Error Creating File");
    server.request();
}

#[test]
fn request_returns_body() {
    let server = OneShotServer::start("200 OK", &[("Content-Type", "application/json")], br#"{"ok":true}"#);

    let request = agent().post(&format!("{}/echo", server.url)).set("X-Test", "yes");
    let body = send_request(request, Some(b"payload")).unwrap();

    assert_eq!(body, br#"{"ok":true}"#);
    let received = server.request();
    assert!(received.starts_with("POST /echo HTTP/1.1"));
    assert!(received.to_ascii_lowercase().contains("x-test: yes"));
    assert!(received.ends_with("payload"));
}

#[test]
fn request_returns_body_of_error_status() {
    let server = OneShotServer::start("500 Internal Server Error", &[], b"boom");

    let body = send_request(agent().get(&server.url), None).unwrap();

    assert_eq!(body, b"boom");
    server.request();
}
