// End-to-end tests for the resize preview pipeline through the public API
use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgb};

use image_resizer::{
    PreviewError, PreviewFailure, PreviewSession, ResizeAdvancedConfig, ResizeConfig,
    ResizeService, UploadedFile,
};

fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn create_image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let r = (x % 255) as u8;
        let g = (y % 255) as u8;
        let b = ((x + y) % 255) as u8;
        Rgb([r, g, b])
    });

    let dyn_img = DynamicImage::ImageRgb8(img);
    let mut cursor = Cursor::new(Vec::new());
    dyn_img
        .write_to(&mut cursor, format)
        .expect("failed to encode test image");
    cursor.into_inner()
}

fn decode_payload(payload: &str) -> DynamicImage {
    let bytes = general_purpose::STANDARD
        .decode(payload)
        .expect("payload should be valid base64");
    image::load_from_memory(&bytes).expect("payload should decode as an image")
}

#[tokio::test]
async fn landscape_png_is_scaled_to_target_width() {
    init_test_logger();
    let service = ResizeService::new().expect("service init failed");
    let file = UploadedFile::new(
        "landscape.png",
        "image/png",
        create_image_bytes(2000, 1000, ImageFormat::Png),
    );

    let payload = service
        .get_resized_image(&file, 1248)
        .await
        .expect("resize should succeed");

    assert!(!payload.starts_with("data:"));
    assert!(!payload.contains(";base64,"));

    let decoded = decode_payload(&payload);
    assert_eq!(decoded.dimensions(), (1248, 624));
}

#[tokio::test]
async fn small_jpeg_is_upscaled_to_target_width() {
    init_test_logger();
    let service = ResizeService::new().expect("service init failed");
    let file = UploadedFile::new(
        "small.jpg",
        "image/jpeg",
        create_image_bytes(500, 500, ImageFormat::Jpeg),
    );

    let payload = service
        .get_resized_image(&file, 1248)
        .await
        .expect("resize should succeed");

    let decoded = decode_payload(&payload);
    assert_eq!(decoded.dimensions(), (1248, 1248));

    // Output is always PNG regardless of the input format.
    let bytes = general_purpose::STANDARD
        .decode(&payload)
        .expect("payload should be valid base64");
    let format = image::guess_format(&bytes).expect("payload should carry a known signature");
    assert_eq!(format, ImageFormat::Png);
}

#[tokio::test]
async fn gif_declaration_is_rejected_without_decoding() {
    let service = ResizeService::new().expect("service init failed");
    // Deliberately broken bytes: reaching the decode stage would yield Decode instead.
    let file = UploadedFile::new("anim.gif", "image/gif", b"GIF89a but not really".to_vec());

    let result = service.get_resized_image(&file, 1248).await;

    assert!(matches!(result, Err(PreviewError::UnsupportedFileType(_))));
}

#[tokio::test]
async fn plain_text_declaration_is_rejected() {
    let service = ResizeService::new().expect("service init failed");
    let file = UploadedFile::new(
        "notes.txt",
        "text/plain",
        create_image_bytes(16, 16, ImageFormat::Png),
    );

    let result = service.get_resized_image(&file, 100).await;

    assert!(matches!(result, Err(PreviewError::UnsupportedFileType(_))));
}

#[tokio::test]
async fn media_type_match_is_case_sensitive() {
    let service = ResizeService::new().expect("service init failed");
    let file = UploadedFile::new(
        "shouty.png",
        "IMAGE/PNG",
        create_image_bytes(16, 16, ImageFormat::Png),
    );

    let result = service.get_resized_image(&file, 100).await;

    assert!(matches!(result, Err(PreviewError::UnsupportedFileType(_))));
}

#[tokio::test]
async fn wrapped_image_media_type_is_accepted() {
    // The acceptance match is unanchored, so "image" may appear mid-string.
    let service = ResizeService::new().expect("service init failed");
    let file = UploadedFile::new(
        "wrapped.bin",
        "application/x-image-wrapper",
        create_image_bytes(40, 30, ImageFormat::Png),
    );

    let payload = service
        .get_resized_image(&file, 20)
        .await
        .expect("resize should succeed");

    let decoded = decode_payload(&payload);
    assert_eq!(decoded.dimensions(), (20, 15));
}

#[tokio::test]
async fn empty_content_is_invalid_input() {
    let service = ResizeService::new().expect("service init failed");
    let file = UploadedFile::new("empty.png", "image/png", Vec::new());

    let result = service.get_resized_image(&file, 100).await;

    assert!(matches!(result, Err(PreviewError::InvalidInput(_))));
}

#[tokio::test]
async fn corrupted_bytes_fail_at_decode_stage() {
    let service = ResizeService::new().expect("service init failed");
    let file = UploadedFile::new(
        "fake.png",
        "image/png",
        b"definitely not an image".to_vec(),
    );

    let result = service.get_resized_image(&file, 100).await;

    assert!(matches!(result, Err(PreviewError::Decode(_))));
}

#[tokio::test]
async fn oversized_file_hits_resource_limit() {
    let mut config = ResizeConfig::default();
    config.max_file_size = 1024;

    let service = ResizeService::with_config(config).expect("service init failed");
    let file = UploadedFile::new(
        "big.png",
        "image/png",
        create_image_bytes(256, 256, ImageFormat::Png),
    );

    let result = service.get_resized_image(&file, 100).await;

    assert!(matches!(result, Err(PreviewError::ResourceLimit(_))));
}

#[tokio::test]
async fn zero_target_width_is_a_resize_error() {
    let service = ResizeService::new().expect("service init failed");
    let file = UploadedFile::new(
        "square.png",
        "image/png",
        create_image_bytes(64, 64, ImageFormat::Png),
    );

    let result = service.get_resized_image(&file, 0).await;

    assert!(matches!(result, Err(PreviewError::Resize(_))));
}

#[tokio::test]
async fn profile_switch_is_visible_through_service() {
    let service = ResizeService::new().expect("service init failed");

    service
        .set_performance_profile("speed")
        .expect("set profile should succeed");
    let profile = service
        .get_performance_profile()
        .expect("get profile should succeed");
    assert_eq!(profile, "speed");

    let file = UploadedFile::new(
        "after-switch.png",
        "image/png",
        create_image_bytes(64, 64, ImageFormat::Png),
    );
    let payload = service
        .get_resized_image(&file, 32)
        .await
        .expect("resize should still succeed after profile switch");

    let decoded = decode_payload(&payload);
    assert_eq!(decoded.dimensions(), (32, 32));
}

#[tokio::test]
async fn session_round_trip_builds_preview_data_url() {
    init_test_logger();
    let service = ResizeService::new().expect("service init failed");
    let mut session = PreviewSession::new();

    let file = UploadedFile::new(
        "photo.png",
        "image/png",
        create_image_bytes(400, 300, ImageFormat::Png),
    );
    let seq = session.select_file(file.clone());

    let result = service.get_resized_image(&file, 200).await;
    assert!(session.apply_result(seq, result));

    let url = session
        .preview_data_url()
        .expect("preview data url should exist");
    assert!(url.starts_with("data:image/png;base64,"));

    let payload = session.preview_payload().expect("payload should exist");
    let decoded = decode_payload(payload);
    assert_eq!(decoded.dimensions(), (200, 150));
    assert!(session.last_failure().is_none());
}

#[tokio::test]
async fn session_records_failure_for_rejected_file() {
    let service = ResizeService::new().expect("service init failed");
    let mut session = PreviewSession::new();

    let file = UploadedFile::new("anim.gif", "image/gif", b"whatever".to_vec());
    let seq = session.select_file(file.clone());

    let result = service.get_resized_image(&file, 200).await;
    assert!(session.apply_result(seq, result));

    let failure = session.last_failure().expect("failure should be recorded");
    assert_eq!(failure.code, "E_UNSUPPORTED_FILE_TYPE");
    assert_eq!(failure.stage, "validate");
}

#[test]
fn advanced_config_round_trips_through_json() {
    let config = ResizeAdvancedConfig {
        max_file_size: 8 * 1024 * 1024,
        max_decoded_pixels: 10_000_000,
        max_decoded_bytes: 64 * 1024 * 1024,
        max_target_pixels: 5_000_000,
    };

    let json = serde_json::to_value(&config).expect("serialize failed");
    assert_eq!(json["max_file_size"], 8 * 1024 * 1024);
    assert_eq!(json["max_decoded_pixels"], 10_000_000);
    assert_eq!(json["max_decoded_bytes"], 64 * 1024 * 1024);
    assert_eq!(json["max_target_pixels"], 5_000_000);

    let parsed: ResizeAdvancedConfig = serde_json::from_value(json).expect("deserialize failed");
    assert_eq!(parsed.max_file_size, config.max_file_size);
    assert_eq!(parsed.max_target_pixels, config.max_target_pixels);
}

#[test]
fn preview_failure_serializes_with_code_and_stage() {
    let error = PreviewError::UnsupportedFileType("image/gif".to_string());
    let failure = PreviewFailure::from(&error);

    let json = serde_json::to_value(&failure).expect("serialize failed");
    assert_eq!(json["code"], "E_UNSUPPORTED_FILE_TYPE");
    assert_eq!(json["stage"], "validate");
    assert!(
        json["message"]
            .as_str()
            .expect("message should be a string")
            .contains("image/gif")
    );
}

#[test]
fn preview_error_serializes_as_readable_string() {
    let error = PreviewError::Decode("图片解码失败".to_string());
    let json = serde_json::to_value(&error).expect("serialize failed");

    assert_eq!(json, serde_json::Value::String(error.to_string()));
}

#[test]
fn preview_error_converts_into_plain_string() {
    let error = PreviewError::InvalidInput("输入不是文件".to_string());
    let message: String = error.into();

    assert!(message.contains("输入无效"));
    assert!(message.contains("输入不是文件"));
}
