pub mod catalog;
pub mod film;
pub mod user;
