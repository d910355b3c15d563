//! Service contains the business logic of the users directory.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod form;
pub mod infra;
pub mod query;
pub mod view;

use std::num::NonZeroUsize;

use common::Sort;
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::{
    domain::{user::SortPath, User},
    infra::api,
};
#[cfg(doc)]
use crate::infra::Api;

pub use self::{
    query::Query,
    view::{Listing, State},
};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of [`User`]s on a single page.
    #[default(Config::DEFAULT_PAGE_SIZE)]
    pub page_size: NonZeroUsize,

    /// [`Sort`] specification of [`User`]s.
    #[default(Sort::ascending(SortPath::Name))]
    pub sort: Sort<SortPath>,
}

impl Config {
    /// Default number of [`User`]s on a single page.
    pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
        Some(n) => n,
        None => unreachable!(),
    };
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<A> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Api`] of this [`Service`].
    api: A,
}

impl<A> Service<A> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, api: A) -> Self {
        Self { config, api }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Api`] of this [`Service`].
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Creates a new empty [`State`] according to the [`Config`] of this
    /// [`Service`].
    #[must_use]
    pub fn state(&self) -> State {
        State::new(&self.config)
    }

    /// Loads all the [`User`]s into the provided [`State`].
    ///
    /// Returns the number of loaded [`User`]s.
    ///
    /// # Errors
    ///
    /// If the [`User`]s cannot be fetched. The failure is recorded in the
    /// [`State`] as well, and its [`User`]s are left intact.
    pub async fn load(
        &self,
        state: &mut State,
    ) -> Result<usize, Traced<api::Error>>
    where
        Self: Query<
            query::users::All,
            Ok = Vec<User>,
            Err = Traced<api::Error>,
        >,
    {
        let users = self
            .execute(query::users::All::all())
            .await
            .map_err(|e| {
                let err: &api::Error = e.as_ref();
                state.fail(err);
                e
            })
            .map_err(tracerr::wrap!())?;

        let count = users.len();
        state.load(users);
        Ok(count)
    }
}
