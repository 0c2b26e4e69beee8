use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use derive_more::Display;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use serde::Serialize;

// ───── Constants ──────────────────────────────────────────────────────
pub const MAX_EDGE: u32 = 600;
pub const JPEG_QUALITY: u8 = 70;
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;


#[derive(Debug, Display)]
pub enum ImageError {
    #[display("No image data provided")]
    EmptyUpload,

    #[display("Uploaded file is not an image")]
    NotAnImage,

    #[display("Upload exceeds the {_0} byte limit")]
    TooLarge(usize),

    #[display("Failed to decode image: {_0}")]
    Decode(String),

    #[display("Failed to encode image: {_0}")]
    Encode(String),
}

/// Card-sized rendition of an upload. `data_url` goes straight into a
/// card's `imageUrl`, the dimensions are the rendition's.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    pub source_width: u32,
    pub source_height: u32,
    pub bytes: usize,
}

/// Fit within `MAX_EDGE` on the longest side, never upscaling.
pub fn scaled_dimensions(width: u32, height: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= MAX_EDGE {
        return (width, height);
    }
    let scale = MAX_EDGE as f64 / longest as f64;
    let scaled_w = ((width as f64 * scale).round() as u32).max(1);
    let scaled_h = ((height as f64 * scale).round() as u32).max(1);
    (scaled_w, scaled_h)
}

/// Decode, downscale and re-encode an upload as a compact JPEG data URL.
/// CPU-bound, callers on the request path run it on a blocking thread.
pub fn normalize_image(bytes: &[u8]) -> Result<NormalizedImage, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyUpload);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ImageError::TooLarge(MAX_UPLOAD_BYTES));
    }

    let kind = infer::get(bytes).ok_or(ImageError::NotAnImage)?;
    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(ImageError::NotAnImage);
    }

    let decoded = image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
    let (source_width, source_height) = (decoded.width(), decoded.height());
    let (width, height) = scaled_dimensions(source_width, source_height);

    let resized = if (width, height) == (source_width, source_height) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };

    // JPEG cannot carry an alpha channel
    let rgb = resized.to_rgb8();

    let mut encoded = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|e| ImageError::Encode(e.to_string()))?;

    let data_url = format!("data:image/jpeg;base64,{}", BASE64.encode(&encoded));
    let encoded_len = encoded.len();

    Ok(NormalizedImage {
        data_url,
        width,
        height,
        source_width,
        source_height,
        bytes: encoded_len,
    })
}
