pub mod film;
pub mod user;

pub use film::{Film, Genre, MpaRating};
pub use user::User;
