//! List-and-form view of [`User`]s.

use std::num::NonZeroUsize;

use common::{paginate, Sort};
use tracing as log;

use crate::{
    domain::{
        user::{self, Origin, SortPath},
        User,
    },
    form::{self, Draft, Errors, Field},
    Config,
};

/// State of the view.
///
/// Changed only via its transitions: [`State::load()`], [`State::fail()`],
/// [`State::set_page()`], [`State::edit_field()`] and [`State::submit()`].
#[derive(Clone, Debug)]
pub struct State {
    /// All the known [`User`]s, in the order they were received.
    users: Vec<User>,

    /// Current page number (1-based).
    current_page: NonZeroUsize,

    /// Number of [`User`]s on a page.
    page_size: NonZeroUsize,

    /// [`Sort`] specification applied before paginating.
    sort: Sort<SortPath>,

    /// [`Draft`] of a new [`User`].
    draft: Draft,

    /// [`Errors`] of the last [`Draft`] validation.
    errors: Errors,

    /// Description of the last failed [`User`]s loading, if any.
    load_error: Option<String>,
}

impl State {
    /// Creates a new empty [`State`] on the first page.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            users: Vec::new(),
            current_page: NonZeroUsize::MIN,
            page_size: config.page_size,
            sort: config.sort,
            draft: Draft::default(),
            errors: Errors::default(),
            load_error: None,
        }
    }

    /// Replaces all the [`User`]s with the loaded ones.
    ///
    /// Doesn't touch the current page.
    pub fn load(&mut self, users: Vec<User>) {
        log::debug!("loaded {} users", users.len());

        self.users = users;
        self.load_error = None;
    }

    /// Records a failure of loading [`User`]s, leaving the known ones intact.
    pub fn fail(&mut self, error: impl ToString) {
        self.load_error = Some(error.to_string());
    }

    /// Switches to the provided page.
    ///
    /// The `page` is not bounds-checked: a page past the last one is simply
    /// empty.
    pub fn set_page(&mut self, page: NonZeroUsize) {
        self.current_page = page;
    }

    /// Sets a value of a single [`Draft`] [`Field`].
    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Submits the current [`Draft`].
    ///
    /// On success, the new [`User`] is appended and returned, while the
    /// [`Draft`] itself is kept as is.
    ///
    /// # Errors
    ///
    /// If the [`Draft`] is invalid. The [`Errors`] are stored in this
    /// [`State`] as well, and no [`User`] is appended.
    pub fn submit(&mut self) -> Result<&User, &Errors> {
        let (name, email) = match form::check(&self.draft) {
            Ok(valid) => valid,
            Err(errors) => {
                log::debug!("rejected draft with {} errors", errors.len());
                self.errors = errors;
                return Err(&self.errors);
            }
        };
        self.errors = Errors::default();

        let id = self
            .users
            .iter()
            .map(|u| u.id)
            .max()
            .map_or_else(|| user::Id::from(1), user::Id::next);
        self.users.push(User {
            id,
            name,
            email,
            origin: Origin::Local,
        });
        log::info!("appended user `{id}`");

        Ok(&self.users[self.users.len() - 1])
    }

    /// Returns all the known [`User`]s, in the order they were received.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the current page number.
    #[must_use]
    pub fn current_page(&self) -> NonZeroUsize {
        self.current_page
    }

    /// Returns the number of [`User`]s on a page.
    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Returns the [`Sort`] specification of this [`State`].
    #[must_use]
    pub fn sort(&self) -> Sort<SortPath> {
        self.sort
    }

    /// Returns the current [`Draft`].
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns [`Errors`] of the last submission.
    #[must_use]
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Returns the description of the last failed loading, if any.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

/// Sorted and paginated view over [`State`].
#[derive(Clone, Debug)]
pub struct Listing<'s> {
    /// [`User`]s on the current page.
    pub page: Vec<&'s User>,

    /// [`User`]s on the page following the current one.
    pub next: Vec<&'s User>,

    /// Current page number.
    pub current_page: NonZeroUsize,

    /// Total number of [`User`]s across all pages.
    pub total: usize,
}

impl<'s> Listing<'s> {
    /// Derives a [`Listing`] from the provided [`State`].
    ///
    /// Always recomputed from scratch: identical [`State`]s produce identical
    /// [`Listing`]s.
    #[must_use]
    pub fn derive(state: &'s State) -> Self {
        let Sort { path, order } = state.sort;

        let mut sorted = state.users.iter().collect::<Vec<_>>();
        sorted.sort_by(|a, b| order.apply(a.compare_by(b, path)));

        let page = paginate(&sorted, state.current_page, state.page_size);
        let next = state.current_page.checked_add(1).map_or(&[][..], |p| {
            paginate(&sorted, p, state.page_size)
        });

        Self {
            page: page.to_vec(),
            next: next.to_vec(),
            current_page: state.current_page,
            total: sorted.len(),
        }
    }

    /// Indicates whether there is a previous page to navigate to.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page.get() > 1
    }

    /// Indicates whether the next page has any [`User`]s.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.next.is_empty()
    }
}
