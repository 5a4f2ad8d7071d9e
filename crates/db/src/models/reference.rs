//! Lightweight `{id, name}` references used when embedding related rows
//! (a book's genres, a recipe's tags) in a response.

use std::collections::HashMap;

use pantry_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// The id and display name of a related row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct NameRef {
    pub id: DbId,
    pub name: String,
}

/// A [`NameRef`] tagged with the id of the row it belongs to, as produced by
/// a junction-table join over many parents at once.
#[derive(Debug, Clone, FromRow)]
pub struct LinkedName {
    pub owner_id: DbId,
    pub id: DbId,
    pub name: String,
}

/// Group junction rows by owner, preserving the query's ordering.
pub fn group_links(rows: Vec<LinkedName>) -> HashMap<DbId, Vec<NameRef>> {
    let mut grouped: HashMap<DbId, Vec<NameRef>> = HashMap::new();
    for row in rows {
        grouped.entry(row.owner_id).or_default().push(NameRef {
            id: row.id,
            name: row.name,
        });
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_grouped_by_owner_in_order() {
        let rows = vec![
            LinkedName { owner_id: 1, id: 10, name: "egg".into() },
            LinkedName { owner_id: 2, id: 11, name: "flour".into() },
            LinkedName { owner_id: 1, id: 12, name: "milk".into() },
        ];

        let grouped = group_links(rows);

        assert_eq!(grouped.len(), 2);
        let names: Vec<_> = grouped[&1].iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["egg", "milk"]);
        assert_eq!(grouped[&2][0].id, 11);
    }
}
