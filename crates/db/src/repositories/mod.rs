//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

mod links;

pub mod author_repo;
pub mod book_repo;
pub mod chef_repo;
pub mod genre_repo;
pub mod ingredient_repo;
pub mod movie_genre_repo;
pub mod movie_repo;
pub mod publisher_repo;
pub mod recipe_image_repo;
pub mod recipe_repo;
pub mod review_repo;
pub mod session_repo;
pub mod stats_repo;
pub mod tag_repo;
pub mod user_repo;

pub use author_repo::AuthorRepo;
pub use book_repo::BookRepo;
pub use chef_repo::ChefRepo;
pub use genre_repo::GenreRepo;
pub use ingredient_repo::IngredientRepo;
pub use movie_genre_repo::MovieGenreRepo;
pub use movie_repo::MovieRepo;
pub use publisher_repo::PublisherRepo;
pub use recipe_image_repo::RecipeImageRepo;
pub use recipe_repo::RecipeRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
