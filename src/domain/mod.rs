//! Strongly typed identifiers for the film catalog.
//!
//! Newtype wrappers keep film, user and reference-data ids from being mixed
//! up at call sites. All ids are assigned by the storage layer, start at 1
//! and grow monotonically per entity type.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident, $repr:ty) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name($repr);

        impl $name {
            #[must_use]
            pub const fn new(id: $repr) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> $repr {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$repr> for $name {
            fn from(id: $repr) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $repr {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

id_type!(
    /// Unique identifier of a film.
    FilmId,
    i64
);

id_type!(
    /// Unique identifier of a user.
    UserId,
    i64
);

id_type!(
    /// Identifier of a genre in the reference catalog.
    GenreId,
    i32
);

id_type!(
    /// Identifier of an MPA rating in the reference catalog.
    MpaId,
    i32
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn film_id_conversions() {
        let id = FilmId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i64::from(id), 42);
        assert_eq!(FilmId::from(42), id);
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UserId::new(7));
    }

    #[test]
    fn genre_id_ordering() {
        assert!(GenreId::new(1) < GenreId::new(2));
    }
}
