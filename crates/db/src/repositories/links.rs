//! Helpers for many-to-many junction tables.

use std::collections::HashMap;

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::reference::{group_links, LinkedName, NameRef};

/// A junction table and the table its second column points at.
pub(crate) struct Junction {
    pub table: &'static str,
    pub owner_column: &'static str,
    pub target_column: &'static str,
    pub target_table: &'static str,
}

pub(crate) const BOOK_GENRES: Junction = Junction {
    table: "book_genres",
    owner_column: "book_id",
    target_column: "genre_id",
    target_table: "genres",
};

pub(crate) const RECIPE_INGREDIENTS: Junction = Junction {
    table: "recipe_ingredients",
    owner_column: "recipe_id",
    target_column: "ingredient_id",
    target_table: "ingredients",
};

pub(crate) const RECIPE_TAGS: Junction = Junction {
    table: "recipe_tags",
    owner_column: "recipe_id",
    target_column: "tag_id",
    target_table: "tags",
};

pub(crate) const MOVIE_GENRES: Junction = Junction {
    table: "movie_genre_links",
    owner_column: "movie_id",
    target_column: "genre_id",
    target_table: "movie_genres",
};

/// Replace the links of one owner within an existing transaction.
pub(crate) async fn replace_links(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    junction: &Junction,
    owner_id: DbId,
    target_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    let delete = format!(
        "DELETE FROM {} WHERE {} = $1",
        junction.table, junction.owner_column
    );
    sqlx::query(&delete)
        .bind(owner_id)
        .execute(&mut **tx)
        .await?;

    // Duplicate ids in the input collapse to one link.
    let insert = format!(
        "INSERT INTO {} ({}, {}) SELECT $1, UNNEST($2::bigint[]) ON CONFLICT DO NOTHING",
        junction.table, junction.owner_column, junction.target_column
    );
    sqlx::query(&insert)
        .bind(owner_id)
        .bind(target_ids)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Load the linked `{id, name}` rows of many owners in one query, ordered
/// by name.
pub(crate) async fn load_links(
    pool: &PgPool,
    junction: &Junction,
    owner_ids: &[DbId],
) -> Result<HashMap<DbId, Vec<NameRef>>, sqlx::Error> {
    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let query = format!(
        "SELECT j.{owner} AS owner_id, t.id, t.name \
         FROM {table} j \
         JOIN {target} t ON t.id = j.{target_col} \
         WHERE j.{owner} = ANY($1) \
         ORDER BY t.name, t.id",
        owner = junction.owner_column,
        table = junction.table,
        target = junction.target_table,
        target_col = junction.target_column,
    );
    let rows = sqlx::query_as::<_, LinkedName>(&query)
        .bind(owner_ids)
        .fetch_all(pool)
        .await?;
    Ok(group_links(rows))
}

/// Which of `ids` exist in `table`. Used to report unknown references as
/// field errors before writing.
pub(crate) async fn existing_ids(
    pool: &PgPool,
    table: &'static str,
    ids: &[DbId],
) -> Result<Vec<DbId>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = format!("SELECT id FROM {table} WHERE id = ANY($1) ORDER BY id");
    sqlx::query_scalar::<_, DbId>(&query)
        .bind(ids)
        .fetch_all(pool)
        .await
}
