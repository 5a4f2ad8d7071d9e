pub mod auth;
pub mod authors;
pub mod books;
pub mod chefs;
pub mod genres;
pub mod home;
pub mod ingredients;
pub mod movie_genres;
pub mod movies;
pub mod publishers;
pub mod recipes;
pub mod reviews;
pub mod signup;
pub mod stats;
pub mod tags;
pub mod uploads;
