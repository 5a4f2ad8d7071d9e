//! Recipe domain rules: difficulty choices, listing filters, URL helper,
//! and the constants used by the listing and statistics views.

use serde::{Deserialize, Serialize};

use crate::search::{non_blank, optional_contains};
use crate::types::DbId;

/// Recipes shown per listing page.
pub const RECIPES_PER_PAGE: i64 = 8;

/// How many recipes the statistics view ranks by ingredient count.
pub const TOP_RECIPES_BY_INGREDIENTS: i64 = 5;

/// Most gallery images accepted in a single upload request.
pub const MAX_GALLERY_IMAGES_PER_UPLOAD: usize = 3;

/// Stored single-letter difficulty code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[serde(rename = "E")]
    Easy,
    #[default]
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "H")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The one-letter code persisted in `recipes.difficulty`.
    pub fn code(self) -> &'static str {
        match self {
            Difficulty::Easy => "E",
            Difficulty::Medium => "M",
            Difficulty::Hard => "H",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a stored code. Labels are accepted too, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|d| {
            d.code().eq_ignore_ascii_case(value) || d.label().eq_ignore_ascii_case(value)
        })
    }
}

/// A stored difficulty code that is not one of the known choices.
#[derive(Debug, thiserror::Error)]
#[error("unknown difficulty code: {0:?}")]
pub struct UnknownDifficulty(pub String);

impl TryFrom<String> for Difficulty {
    type Error = UnknownDifficulty;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(UnknownDifficulty(value))
    }
}

/// Canonical URL of a recipe's detail view.
pub fn recipe_url(id: DbId) -> String {
    format!("/recipes/{id}")
}

/// URL of the recipe listing, the landing page after signup and deletion.
pub const RECIPE_LIST_URL: &str = "/recipes";

/// Normalized listing filters. Every present filter narrows the result
/// set further; absent filters do not constrain it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Tag name, matched exactly ignoring case.
    pub tag: Option<String>,
    /// Ingredient name, matched exactly ignoring case.
    pub ingredient: Option<String>,
    /// `ILIKE` pattern over the chef's name.
    pub chef_pattern: Option<String>,
    /// `ILIKE` pattern over the recipe title.
    pub title_pattern: Option<String>,
    /// Stored difficulty code.
    pub difficulty: Option<&'static str>,
}

impl RecipeFilter {
    pub fn new(
        tag: Option<&str>,
        ingredient: Option<&str>,
        chef: Option<&str>,
        q: Option<&str>,
        difficulty: Option<&str>,
    ) -> Self {
        Self {
            tag: non_blank(tag),
            ingredient: non_blank(ingredient),
            chef_pattern: optional_contains(chef),
            title_pattern: optional_contains(q),
            difficulty: non_blank(difficulty)
                .and_then(|d| Difficulty::parse(&d))
                .map(Difficulty::code),
        }
    }
}
