//! End-to-end tests: raw request → fetch from disk → real `image` backend → JPEG.
//!
//! Sources are synthetic PNGs written to a temp directory and referenced as
//! `file:///<absolute path>`. Remote sources are served from a one-shot
//! loopback listener; nothing leaves the machine.

use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::TempDir;
use thumbframe::config::ServiceConfig;
use thumbframe::imaging::RustBackend;
use thumbframe::request::RawParams;
use thumbframe::service::{ThumbnailResponse, ThumbnailService};
use thumbframe::source::HttpFetcher;

/// Write a solid-colour PNG and return its `file:///` reference.
fn write_source(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> String {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb(color))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    // Prefix is followed verbatim by the absolute path ("/tmp/..."), giving "file:////tmp/...".
    format!("file:///{}", path.display())
}

fn request(source: &str, width: &str, height: &str) -> ThumbnailResponse {
    let config = ServiceConfig::default();
    let service = ThumbnailService::new(
        RustBackend::new(),
        HttpFetcher::new(config.fetch_limits()).unwrap(),
        config.render_config(),
    );
    service.handle(&RawParams {
        url: Some(source.to_string()),
        width: Some(width.to_string()),
        height: Some(height.to_string()),
        target: "/thumbnail".to_string(),
    })
}

fn decode(response: &ThumbnailResponse) -> DynamicImage {
    assert_eq!(response.status, 200, "body: {}", String::from_utf8_lossy(&response.body));
    assert_eq!(response.content_type, "image/jpeg");
    image::load(Cursor::new(&response.body), ImageFormat::Jpeg).unwrap()
}

/// True if every channel of the pixel is within `tolerance` of `expected`.
fn near(pixel: [u8; 3], expected: [u8; 3], tolerance: u8) -> bool {
    pixel
        .iter()
        .zip(expected)
        .all(|(&a, b)| a.abs_diff(b) <= tolerance)
}

fn rgb_at(img: &DynamicImage, x: u32, y: u32) -> [u8; 3] {
    let p = img.get_pixel(x, y).0;
    [p[0], p[1], p[2]]
}

#[test]
fn wide_source_gets_top_and_bottom_bars() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), "wide.png", 1000, 500, [255, 255, 255]);

    let img = decode(&request(&source, "200", "200"));
    assert_eq!(img.dimensions(), (200, 200));

    // Content band is rows 50..150.
    assert!(near(rgb_at(&img, 100, 10), [0, 0, 0], 16));
    assert!(near(rgb_at(&img, 100, 190), [0, 0, 0], 16));
    assert!(near(rgb_at(&img, 100, 100), [255, 255, 255], 16));
    assert!(near(rgb_at(&img, 5, 100), [255, 255, 255], 16));
}

#[test]
fn tall_source_gets_side_bars() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), "tall.png", 300, 600, [200, 30, 30]);

    let img = decode(&request(&source, "200", "200"));
    assert_eq!(img.dimensions(), (200, 200));

    // 100x200 centred → columns 50..150.
    assert!(near(rgb_at(&img, 10, 100), [0, 0, 0], 16));
    assert!(near(rgb_at(&img, 190, 100), [0, 0, 0], 16));
    assert!(near(rgb_at(&img, 100, 100), [200, 30, 30], 24));
}

#[test]
fn larger_box_pads_without_upscaling() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), "small.png", 40, 40, [255, 255, 255]);

    let img = decode(&request(&source, "120", "80"));
    assert_eq!(img.dimensions(), (120, 80));

    // Native 40x40 at offset (40, 20).
    assert!(near(rgb_at(&img, 60, 40), [255, 255, 255], 16));
    assert!(near(rgb_at(&img, 20, 40), [0, 0, 0], 16));
    assert!(near(rgb_at(&img, 100, 40), [0, 0, 0], 16));
    assert!(near(rgb_at(&img, 60, 5), [0, 0, 0], 16));
    assert!(near(rgb_at(&img, 60, 75), [0, 0, 0], 16));
}

#[test]
fn matching_aspect_has_no_bars() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), "match.png", 800, 600, [255, 255, 255]);

    let img = decode(&request(&source, "400", "300"));
    assert_eq!(img.dimensions(), (400, 300));
    for (x, y) in [(1, 1), (398, 1), (1, 298), (398, 298)] {
        assert!(near(rgb_at(&img, x, y), [255, 255, 255], 16), "corner ({x}, {y})");
    }
}

#[test]
fn configured_background_fills_bars() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), "wide.png", 400, 100, [0, 0, 0]);

    let mut config = ServiceConfig::default();
    config.output.background = "#ffffff".parse().unwrap();
    let service = ThumbnailService::new(
        RustBackend::new(),
        HttpFetcher::new(config.fetch_limits()).unwrap(),
        config.render_config(),
    );
    let response = service.handle(&RawParams {
        url: Some(source),
        width: Some("100".to_string()),
        height: Some("100".to_string()),
        target: "/thumbnail".to_string(),
    });

    let img = decode(&response);
    assert!(near(rgb_at(&img, 50, 5), [255, 255, 255], 16));
    assert!(near(rgb_at(&img, 50, 50), [0, 0, 0], 16));
}

#[test]
fn missing_source_file_is_bad_request() {
    let response = request("file:////nonexistent/dir/img.png", "10", "10");
    assert_eq!(response.status, 400);
    assert_eq!(response.content_type, "application/json");
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert!(body["Error"].as_str().unwrap().contains("unable to get image"));
}

#[test]
fn non_image_source_is_bad_request() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("notes.txt");
    std::fs::write(&path, "not an image").unwrap();

    let response = request(&format!("file:///{}", path.display()), "10", "10");
    assert_eq!(response.status, 400);
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert!(body["Error"].as_str().unwrap().contains("error decoding"));
}

#[test]
fn zero_width_is_bad_request() {
    let response = request("file:///whatever.png", "0", "10");
    assert_eq!(response.status, 400);
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert!(body["Error"].as_str().unwrap().contains("Width: 0"));
}

#[test]
fn max_u32_box_is_bad_request_not_panic() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), "tiny.png", 4, 4, [255, 255, 255]);

    let response = request(&source, "4294967295", "4294967295");
    assert_eq!(response.status, 400);
    assert_eq!(response.content_type, "application/json");
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert!(body["Error"].as_str().unwrap().contains("too large"));
}

#[test]
fn box_over_configured_pixel_limit_is_bad_request() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), "tiny.png", 4, 4, [255, 255, 255]);

    let mut config = ServiceConfig::default();
    config.output.max_pixels = 64 * 64;
    let service = ThumbnailService::new(
        RustBackend::new(),
        HttpFetcher::new(config.fetch_limits()).unwrap(),
        config.render_config(),
    );
    let raw = |size: &str| RawParams {
        url: Some(source.clone()),
        width: Some(size.to_string()),
        height: Some(size.to_string()),
        target: "/thumbnail".to_string(),
    };

    assert_eq!(decode(&service.handle(&raw("64"))).dimensions(), (64, 64));
    assert_eq!(service.handle(&raw("65")).status, 400);
}

#[test]
fn remote_not_found_is_bad_request() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
    });

    let url = format!("http://{addr}/missing.png");
    let response = request(&url, "10", "10");
    server.join().unwrap();

    assert_eq!(response.status, 400);
    assert_eq!(response.content_type, "application/json");
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(
        body["Error"].as_str().unwrap(),
        format!("unable to get image from url: {url}")
    );
}
