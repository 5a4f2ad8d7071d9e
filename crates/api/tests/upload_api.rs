//! Integration tests for recipe photo uploads (`POST /recipes/{id}/images`).

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use common::{body_json, create_user, send, token_for};
use pantry_db::models::recipe::RecipeForm;
use pantry_db::models::user::User;
use pantry_db::repositories::{ChefRepo, RecipeRepo};
use sqlx::PgPool;

const BOUNDARY: &str = "pantry-test-boundary";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_recipe(pool: &PgPool, owner: &User) -> i64 {
    let chef = ChefRepo::find_by_user(pool, owner.id).await.unwrap().unwrap();
    let form = RecipeForm {
        title: "Omelette".into(),
        instructions: "Whisk and fry.".into(),
        ..Default::default()
    };
    RecipeRepo::create(pool, chef.id, &form).await.unwrap().id
}

/// Encode `(field, filename, bytes)` parts as a multipart/form-data body.
fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, filename, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: Router, recipe_id: i64, token: &str, parts: &[(&str, &str, &[u8])]) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/recipes/{recipe_id}/images"))
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn gallery_and_cover_are_stored(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let ann = create_user(&pool, "ann").await;
    let recipe_id = seed_recipe(&pool, &ann).await;
    let app = common::build_test_app_with_media(pool, media.path().to_path_buf());

    let response = upload(
        app,
        recipe_id,
        &token_for(&ann),
        &[
            ("image", "one.png", PNG_BYTES),
            ("image", "two.txt", PNG_BYTES),
            ("cover", "cover.png", PNG_BYTES),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let images = json["data"]["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);

    for image in images {
        let path = image["image"].as_str().unwrap();
        assert!(path.starts_with("recipes/images/"));
        // Extension comes from the content, not the client filename.
        assert!(path.ends_with(".png"));
        assert_eq!(std::fs::read(media.path().join(path)).unwrap(), PNG_BYTES);
    }

    let cover = json["data"]["image"].as_str().unwrap();
    assert!(cover.starts_with("recipes/covers/"));
    assert!(media.path().join(cover).is_file());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_cover_replaces_old_file(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let ann = create_user(&pool, "ann").await;
    let recipe_id = seed_recipe(&pool, &ann).await;
    let app = common::build_test_app_with_media(pool, media.path().to_path_buf());
    let token = token_for(&ann);

    let response = upload(app.clone(), recipe_id, &token, &[("cover", "a.png", PNG_BYTES)]).await;
    let first = body_json(response).await;
    let first_cover = first["data"]["image"].as_str().unwrap().to_string();
    assert!(media.path().join(&first_cover).is_file());

    let response = upload(app, recipe_id, &token, &[("cover", "b.png", PNG_BYTES)]).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let second = body_json(response).await;
    let second_cover = second["data"]["image"].as_str().unwrap();

    assert_ne!(second_cover, first_cover);
    assert!(media.path().join(second_cover).is_file());
    assert!(!media.path().join(&first_cover).exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_write_stores_nothing(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    // A plain file where the cover directory belongs makes the cover write fail.
    std::fs::create_dir_all(media.path().join("recipes")).unwrap();
    std::fs::write(media.path().join("recipes/covers"), b"").unwrap();
    let ann = create_user(&pool, "ann").await;
    let recipe_id = seed_recipe(&pool, &ann).await;
    let app = common::build_test_app_with_media(pool.clone(), media.path().to_path_buf());

    let response = upload(
        app,
        recipe_id,
        &token_for(&ann),
        &[("image", "one.png", PNG_BYTES), ("cover", "cover.png", PNG_BYTES)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let row = RecipeRepo::find_row(&pool, recipe_id).await.unwrap().unwrap();
    assert!(row.recipe.image.is_none());
    let detail = RecipeRepo::detail(&pool, row).await.unwrap();
    assert!(detail.images.is_empty());

    let gallery_dir = media.path().join("recipes/images");
    let leftover = std::fs::read_dir(&gallery_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_image_rejects_whole_upload(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let ann = create_user(&pool, "ann").await;
    let recipe_id = seed_recipe(&pool, &ann).await;
    let app = common::build_test_app_with_media(pool.clone(), media.path().to_path_buf());

    let response = upload(
        app,
        recipe_id,
        &token_for(&ann),
        &[
            ("image", "ok.png", PNG_BYTES),
            ("image", "notes.png", &b"just some text"[..]),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["image"][0]
        .as_str()
        .unwrap()
        .starts_with("Upload a valid image."));

    let row = RecipeRepo::find_row(&pool, recipe_id).await.unwrap().unwrap();
    let detail = RecipeRepo::detail(&pool, row).await.unwrap();
    assert!(detail.images.is_empty());
    assert!(!media.path().join("recipes").exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn too_many_gallery_images(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let ann = create_user(&pool, "ann").await;
    let recipe_id = seed_recipe(&pool, &ann).await;
    let app = common::build_test_app_with_media(pool, media.path().to_path_buf());

    let parts: Vec<(&str, &str, &[u8])> = (0..4).map(|_| ("image", "x.png", PNG_BYTES)).collect();
    let response = upload(app, recipe_id, &token_for(&ann), &parts).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["image"][0], "Upload at most 3 images at a time.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_upload_is_rejected(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let ann = create_user(&pool, "ann").await;
    let recipe_id = seed_recipe(&pool, &ann).await;
    let app = common::build_test_app_with_media(pool, media.path().to_path_buf());

    let response = upload(app, recipe_id, &token_for(&ann), &[]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["image"][0], "No file was submitted.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_file_is_rejected(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let ann = create_user(&pool, "ann").await;
    let recipe_id = seed_recipe(&pool, &ann).await;
    let app = common::build_test_app_with_media(pool, media.path().to_path_buf());

    let mut big = PNG_BYTES.to_vec();
    big.resize(64 * 1024 + 1, 0);
    let response = upload(app, recipe_id, &token_for(&ann), &[("cover", "big.png", big.as_slice())]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["cover"][0]
        .as_str()
        .unwrap()
        .starts_with("The file is too large."));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_owner_may_upload(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let ann = create_user(&pool, "ann").await;
    let bob = create_user(&pool, "bob").await;
    let recipe_id = seed_recipe(&pool, &ann).await;
    let app = common::build_test_app_with_media(pool, media.path().to_path_buf());

    let response = upload(
        app,
        recipe_id,
        &token_for(&bob),
        &[("image", "x.png", PNG_BYTES)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(!media.path().join("recipes").exists());
}
