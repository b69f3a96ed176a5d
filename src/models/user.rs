//! User domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::UserId;

/// A registered user.
///
/// `friends` is symmetric by construction: `b` appears in `a.friends` exactly
/// when `a` appears in `b.friends`. Only the friendship operations on the
/// user service mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub login: String,
    /// Display name; falls back to `login` when left blank.
    #[serde(default)]
    pub name: String,
    pub birthday: NaiveDate,
    #[serde(default)]
    pub friends: BTreeSet<UserId>,
}
