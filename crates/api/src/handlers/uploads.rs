//! Handler for recipe photo uploads.

use axum::extract::{Multipart, State};
use axum::response::Response;
use pantry_core::media::{
    sniff_image_extension, stored_relative_path, RECIPE_COVER_DIR, RECIPE_GALLERY_DIR,
};
use pantry_core::recipes::{recipe_url, MAX_GALLERY_IMAGES_PER_UPLOAD};
use pantry_db::repositories::RecipeImageRepo;

use crate::config::MediaConfig;
use crate::error::{AppError, AppResult};
use crate::extract::PathId;
use crate::forms::FormErrors;
use crate::handlers::recipes::{load_detail, owned_recipe};
use crate::middleware::auth::AuthUser;
use crate::response::created;
use crate::state::AppState;

/// A validated upload waiting to be written.
struct PendingImage {
    extension: &'static str,
    data: Vec<u8>,
}

/// POST /recipes/{id}/images
///
/// Accepts a multipart form with up to three `image` fields, each added to
/// the recipe's gallery, and an optional `cover` field that replaces the
/// recipe's own image. Files are identified by their content, not their
/// name. Nothing is stored unless every file is acceptable, and a replaced
/// cover's file is removed once the new one is recorded.
pub async fn upload_images(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
    mut multipart: Multipart,
) -> AppResult<Response> {
    owned_recipe(&state.pool, recipe_id, &auth).await?;

    let media = &state.config.media;
    let mut errors = FormErrors::default();
    let mut gallery: Vec<PendingImage> = Vec::new();
    let mut cover: Option<PendingImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "image" && name != "cover" {
            continue; // ignore unknown fields
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        match check_image(&data, media) {
            Ok(extension) => {
                let pending = PendingImage {
                    extension,
                    data: data.to_vec(),
                };
                if name == "cover" {
                    cover = Some(pending);
                } else {
                    gallery.push(pending);
                }
            }
            Err(message) => errors.add(&name, message),
        }
    }

    if gallery.len() > MAX_GALLERY_IMAGES_PER_UPLOAD {
        errors.add(
            "image",
            format!("Upload at most {MAX_GALLERY_IMAGES_PER_UPLOAD} images at a time."),
        );
    }
    if gallery.is_empty() && cover.is_none() && !errors.has("image") && !errors.has("cover") {
        errors.add("image", "No file was submitted.");
    }
    errors.finish()?;

    // Every file is on disk before any row points at it.
    let mut written: Vec<String> = Vec::with_capacity(gallery.len() + 1);
    for (upload_to, image) in gallery
        .iter()
        .map(|image| (RECIPE_GALLERY_DIR, image))
        .chain(cover.iter().map(|image| (RECIPE_COVER_DIR, image)))
    {
        match store(media, upload_to, image).await {
            Ok(path) => written.push(path),
            Err(err) => {
                discard(media, &written).await;
                return Err(err);
            }
        }
    }

    let (gallery_paths, cover_path) = if cover.is_some() {
        let (rest, last) = written.split_at(written.len() - 1);
        (rest, Some(last[0].as_str()))
    } else {
        (written.as_slice(), None)
    };

    let replaced =
        match RecipeImageRepo::attach(&state.pool, recipe_id, gallery_paths, cover_path).await {
            Ok(replaced) => replaced,
            Err(err) => {
                discard(media, &written).await;
                return Err(err.into());
            }
        };
    if let Some(old) = replaced {
        discard(media, std::slice::from_ref(&old)).await;
    }

    tracing::info!(
        recipe_id,
        user_id = auth.user_id,
        gallery = gallery.len(),
        cover = cover.is_some(),
        "Recipe images uploaded",
    );

    let detail = load_detail(&state.pool, recipe_id).await?;
    Ok(created(&recipe_url(recipe_id), detail))
}

/// Size and format check for one uploaded file.
fn check_image(data: &[u8], media: &MediaConfig) -> Result<&'static str, String> {
    if data.is_empty() {
        return Err("The submitted file is empty.".to_string());
    }
    if data.len() > media.max_upload_bytes {
        return Err(format!(
            "The file is too large. The limit is {} bytes.",
            media.max_upload_bytes
        ));
    }
    sniff_image_extension(data).ok_or_else(|| {
        "Upload a valid image. The file you uploaded was either not an image or a corrupted image."
            .to_string()
    })
}

/// Write an upload under the media root and return its path relative to it.
async fn store(media: &MediaConfig, upload_to: &str, image: &PendingImage) -> AppResult<String> {
    let relative = stored_relative_path(upload_to, image.extension);
    let full_path = media.root.join(&relative);

    if let Some(dir) = full_path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
    }
    tokio::fs::write(&full_path, &image.data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(relative)
}

/// Remove stored uploads, relative to the media root. Failures are logged.
async fn discard(media: &MediaConfig, paths: &[String]) {
    for relative in paths {
        let full_path = media.root.join(relative);
        if let Err(e) = tokio::fs::remove_file(&full_path).await {
            tracing::warn!(path = %full_path.display(), error = %e, "Failed to remove upload");
        }
    }
}
