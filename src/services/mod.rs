pub mod catalog_service;
pub mod catalog_service_impl;
pub mod film_service;
pub mod film_service_impl;
pub mod user_service;
pub mod user_service_impl;

pub use catalog_service::{CatalogError, CatalogService};
pub use catalog_service_impl::StoreCatalogService;
pub use film_service::{FilmError, FilmPayload, FilmService};
pub use film_service_impl::StoreFilmService;
pub use user_service::{UserError, UserPayload, UserService};
pub use user_service_impl::StoreUserService;
