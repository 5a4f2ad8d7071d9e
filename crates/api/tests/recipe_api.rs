//! HTTP-level integration tests for the recipe pages: listing filters,
//! pagination, visibility, creation, and the owner-only edit/delete flow.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, create_user, get, get_auth, post_auth, post_json_auth, token_for};
use pantry_db::models::recipe::RecipeForm;
use pantry_db::models::user::User;
use pantry_db::repositories::{ChefRepo, IngredientRepo, RecipeRepo, TagRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_recipe(
    pool: &PgPool,
    owner: &User,
    title: &str,
    ingredients: Vec<i64>,
    tags: Vec<i64>,
) -> i64 {
    let chef = ChefRepo::find_by_user(pool, owner.id).await.unwrap().unwrap();
    let form = RecipeForm {
        title: title.to_string(),
        instructions: "Mix and cook.".to_string(),
        cook_time_in_minutes: 15,
        ingredients,
        tags,
        ..Default::default()
    };
    RecipeRepo::create(pool, chef.id, &form).await.unwrap().id
}

fn titles(json: &serde_json::Value) -> Vec<String> {
    let mut titles: Vec<String> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    titles
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn tag_filter_is_case_insensitive_and_distinct(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let breakfast = TagRepo::create(&pool, "Breakfast").await.unwrap().id;
    let quick = TagRepo::create(&pool, "Quick").await.unwrap().id;
    let egg = IngredientRepo::create(&pool, "Egg").await.unwrap().id;
    let milk = IngredientRepo::create(&pool, "Milk").await.unwrap().id;
    seed_recipe(&pool, &ann, "Omelette", vec![egg, milk], vec![breakfast, quick]).await;
    seed_recipe(&pool, &ann, "Pancakes", vec![egg, milk], vec![breakfast]).await;
    seed_recipe(&pool, &ann, "Stew", vec![], vec![quick]).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/recipes?tag=breakfast").await).await;

    assert_eq!(titles(&json), ["Omelette", "Pancakes"]);
    assert_eq!(json["page"]["count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recipe_matching_several_links_is_listed_once(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    // Names differing only by case are distinct rows that all match the filter.
    let tags = vec![
        TagRepo::create(&pool, "Breakfast").await.unwrap().id,
        TagRepo::create(&pool, "breakfast").await.unwrap().id,
    ];
    let ingredients = vec![
        IngredientRepo::create(&pool, "Egg").await.unwrap().id,
        IngredientRepo::create(&pool, "egg").await.unwrap().id,
    ];
    seed_recipe(&pool, &ann, "Omelette", ingredients, tags).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/recipes?tag=BREAKFAST&ingredient=EGG").await).await;

    assert_eq!(json["page"]["count"], 1);
    assert_eq!(titles(&json), ["Omelette"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_id_is_a_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/recipes/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filters_intersect(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let bob = create_user(&pool, "bob").await;
    let breakfast = TagRepo::create(&pool, "Breakfast").await.unwrap().id;
    let egg = IngredientRepo::create(&pool, "Egg").await.unwrap().id;
    seed_recipe(&pool, &ann, "Ann Omelette", vec![egg], vec![breakfast]).await;
    seed_recipe(&pool, &ann, "Ann Toast", vec![], vec![breakfast]).await;
    seed_recipe(&pool, &bob, "Bob Omelette", vec![egg], vec![breakfast]).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/recipes?tag=Breakfast&ingredient=EGG&chef=an&q=").await).await;

    assert_eq!(titles(&json), ["Ann Omelette"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn items_carry_chef_ingredients_and_tags(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let egg = IngredientRepo::create(&pool, "Egg").await.unwrap().id;
    let quick = TagRepo::create(&pool, "Quick").await.unwrap().id;
    seed_recipe(&pool, &ann, "Omelette", vec![egg], vec![quick]).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/recipes").await).await;
    let item = &json["data"][0];

    assert_eq!(item["chef_name"], "ann");
    assert_eq!(item["difficulty"], "M");
    assert_eq!(item["difficulty_label"], "Medium");
    assert_eq!(item["ingredients"][0]["name"], "Egg");
    assert_eq!(item["tags"][0]["name"], "Quick");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_beyond_last_serves_last_page(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    for i in 0..10 {
        seed_recipe(&pool, &ann, &format!("Recipe {i:02}"), vec![], vec![]).await;
    }
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/recipes?page=99").await).await;
    assert_eq!(json["page"]["number"], 2);
    assert_eq!(json["page"]["num_pages"], 2);
    assert_eq!(json["page"]["has_next"], false);
    assert_eq!(json["page"]["previous_page_number"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(app, "/recipes?page=abc").await).await;
    assert_eq!(json["page"]["number"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 8);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn private_recipes_visible_only_to_owner(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let bob = create_user(&pool, "bob").await;
    let secret = seed_recipe(&pool, &ann, "Secret Sauce", vec![], vec![]).await;
    sqlx::query("UPDATE recipes SET is_public = FALSE WHERE id = $1")
        .bind(secret)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let anonymous = body_json(get(app.clone(), "/recipes").await).await;
    assert_eq!(anonymous["page"]["count"], 0);

    let owner = body_json(get_auth(app.clone(), "/recipes", &token_for(&ann)).await).await;
    assert_eq!(titles(&owner), ["Secret Sauce"]);

    let uri = format!("/recipes/{secret}");
    let response = get_auth(app.clone(), &uri, &token_for(&bob)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &uri, &token_for(&ann)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_recipe_uses_callers_chef(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let egg = IngredientRepo::create(&pool, "Egg").await.unwrap().id;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/recipes/add",
        json!({
            "title": "  Boiled Egg ",
            "instructions": "Boil it.",
            "cook_time_in_minutes": 8,
            "difficulty": "E",
            "ingredients": [egg],
        }),
        &token_for(&ann),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers().get(LOCATION).unwrap().to_str().unwrap().to_string();
    let json = body_json(response).await;
    assert_eq!(location, format!("/recipes/{}", json["data"]["id"]));
    assert_eq!(json["data"]["title"], "Boiled Egg");
    assert_eq!(json["data"]["chef_name"], "ann");
    assert_eq!(json["data"]["is_public"], true);
    assert_eq!(json["data"]["ingredients"][0]["name"], "Egg");

    let mine = body_json(get_auth(app, "/recipes/mine", &token_for(&ann)).await).await;
    assert_eq!(titles(&mine), ["Boiled Egg"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_recipe_reports_field_errors(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/recipes/add",
        json!({
            "title": "",
            "instructions": "Stir.",
            "cook_time_in_minutes": -5,
            "tags": [999],
        }),
        &token_for(&ann),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["title"].is_array());
    assert!(json["fields"]["cook_time_in_minutes"].is_array());
    assert_eq!(
        json["fields"]["tags"][0],
        "Select a valid choice. 999 is not one of the available choices."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_recipe_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::post_json(app, "/recipes/add", json!({ "title": "x" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Owner-only edit and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_owner_is_forbidden_everywhere(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let bob = create_user(&pool, "bob").await;
    let id = seed_recipe(&pool, &ann, "Omelette", vec![], vec![]).await;
    let app = common::build_test_app(pool.clone());
    let bob_token = token_for(&bob);

    let edit = format!("/recipes/{id}/edit");
    let delete = format!("/recipes/{id}/delete");

    let response = get_auth(app.clone(), &edit, &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        app.clone(),
        &edit,
        json!({ "title": "Hijacked", "instructions": "x" }),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.clone(), &delete, &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(app, &delete, &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let row = RecipeRepo::find_row(&pool, id).await.unwrap().unwrap();
    assert_eq!(row.recipe.title, "Omelette");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recipe_without_account_is_forbidden(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let chef_id: i64 = sqlx::query_scalar("INSERT INTO chefs (name) VALUES ('Ghost') RETURNING id")
        .fetch_one(&pool)
        .await
        .unwrap();
    let form = RecipeForm {
        title: "Orphan".into(),
        instructions: "x".into(),
        ..Default::default()
    };
    let id = RecipeRepo::create(&pool, chef_id, &form).await.unwrap().id;
    let app = common::build_test_app(pool);

    let response = get_auth(app, &format!("/recipes/{id}/edit"), &token_for(&ann)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_recipe_is_not_found_before_ownership(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/recipes/424242/edit", &token_for(&ann)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_can_edit(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let quick = TagRepo::create(&pool, "Quick").await.unwrap().id;
    let id = seed_recipe(&pool, &ann, "Omelette", vec![], vec![quick]).await;
    let app = common::build_test_app(pool);
    let token = token_for(&ann);
    let edit = format!("/recipes/{id}/edit");

    let current = body_json(get_auth(app.clone(), &edit, &token).await).await;
    assert_eq!(current["data"]["id"], id);
    assert_eq!(current["data"]["form"]["title"], "Omelette");
    assert_eq!(current["data"]["form"]["tags"], json!([quick]));

    let response = post_json_auth(
        app,
        &edit,
        json!({
            "title": "Fluffy Omelette",
            "instructions": "Whisk well.",
            "cook_time_in_minutes": 12,
            "difficulty": "H",
            "is_public": false,
            "tags": [],
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Fluffy Omelette");
    assert_eq!(json["data"]["difficulty"], "H");
    assert_eq!(json["data"]["is_public"], false);
    assert_eq!(json["data"]["tags"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_get_confirms_and_post_deletes(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let id = seed_recipe(&pool, &ann, "Omelette", vec![], vec![]).await;
    let app = common::build_test_app(pool.clone());
    let token = token_for(&ann);
    let delete = format!("/recipes/{id}/delete");

    let response = get_auth(app.clone(), &delete, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["object"], "Omelette");
    assert!(RecipeRepo::find_row(&pool, id).await.unwrap().is_some());

    let response = post_auth(app, &delete, &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/recipes");
    assert!(RecipeRepo::find_row(&pool, id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Chefs, vocabulary and stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn chef_ingredients_are_distinct(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let egg = IngredientRepo::create(&pool, "Egg").await.unwrap().id;
    let milk = IngredientRepo::create(&pool, "Milk").await.unwrap().id;
    seed_recipe(&pool, &ann, "Omelette", vec![egg, milk], vec![]).await;
    seed_recipe(&pool, &ann, "Boiled Egg", vec![egg], vec![]).await;
    let chef = ChefRepo::find_by_user(&pool, ann.id).await.unwrap().unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get(app, &format!("/chefs/{}/ingredients", chef.id)).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, ["Egg", "Milk"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_tag_is_a_field_error(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    TagRepo::create(&pool, "Quick").await.unwrap();
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/tags", json!({ "name": " Quick " }), &token_for(&ann)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["name"][0], "Tag with this Name already exists.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_summarize_recipes(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let egg = IngredientRepo::create(&pool, "Egg").await.unwrap().id;
    let milk = IngredientRepo::create(&pool, "Milk").await.unwrap().id;
    seed_recipe(&pool, &ann, "Omelette", vec![egg, milk], vec![]).await;
    seed_recipe(&pool, &ann, "Boiled Egg", vec![egg], vec![]).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/stats").await).await;
    let stats = &json["data"];

    assert_eq!(stats["total_recipes"], 2);
    assert_eq!(stats["chefs"][0]["chef_name"], "ann");
    assert_eq!(stats["chefs"][0]["recipe_count"], 2);
    assert_eq!(stats["average_cook_time"], 15.0);
    assert_eq!(stats["top_recipes_by_ingredients"][0]["title"], "Omelette");
    assert_eq!(stats["top_recipes_by_ingredients"][0]["ingredient_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_never_name_private_recipes(pool: PgPool) {
    let ann = create_user(&pool, "ann").await;
    let egg = IngredientRepo::create(&pool, "Egg").await.unwrap().id;
    let milk = IngredientRepo::create(&pool, "Milk").await.unwrap().id;
    let flour = IngredientRepo::create(&pool, "Flour").await.unwrap().id;
    let secret = seed_recipe(&pool, &ann, "Secret Family Recipe", vec![egg, milk, flour], vec![]).await;
    seed_recipe(&pool, &ann, "Boiled Egg", vec![egg], vec![]).await;
    sqlx::query("UPDATE recipes SET is_public = FALSE WHERE id = $1")
        .bind(secret)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/stats").await).await;
    let stats = &json["data"];

    assert_eq!(stats["total_recipes"], 2);
    assert_eq!(stats["chefs"][0]["recipe_count"], 2);
    let top = stats["top_recipes_by_ingredients"].as_array().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0]["title"], "Boiled Egg");
    assert!(!json.to_string().contains("Secret Family Recipe"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_with_no_recipes(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/stats").await).await;

    assert_eq!(json["data"]["total_recipes"], 0);
    assert!(json["data"]["average_cook_time"].is_null());
}
