//! [`Query`] collection related to the multiple [`User`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::domain::User;

use super::ApiQuery;

/// Queries all the [`User`]s known to the remote API.
pub type All = ApiQuery<By<Vec<User>, ()>>;
