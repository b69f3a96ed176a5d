pub mod prelude;

pub mod film_genres;
pub mod film_likes;
pub mod films;
pub mod friendships;
pub mod genres;
pub mod mpa_ratings;
pub mod users;
