//! Uploaded media: format sniffing and storage naming.
//!
//! The extension of a stored file is derived from the bytes, never from the
//! client-supplied filename.

use image::ImageFormat;

/// Image formats accepted for recipe photos.
const ACCEPTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Detect the image format of an upload and return the extension to store
/// it under, or `None` if the bytes are not an accepted image.
pub fn sniff_image_extension(bytes: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(bytes).ok()?;
    if !ACCEPTED_FORMATS.contains(&format) {
        return None;
    }
    format.extensions_str().first().copied()
}

/// Path of a stored upload relative to the media root, e.g.
/// `recipes/images/0190f3c2-....png`.
pub fn stored_relative_path(upload_to: &str, extension: &str) -> String {
    let upload_to = upload_to.trim_matches('/');
    format!("{upload_to}/{}.{extension}", uuid::Uuid::new_v4())
}

/// Upload directory for a recipe's cover image.
pub const RECIPE_COVER_DIR: &str = "recipes/covers";

/// Upload directory for recipe gallery images.
pub const RECIPE_GALLERY_DIR: &str = "recipes/images";
