//! [`Query`] definition.

pub mod users;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{api, Api},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from an [`Api`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct ApiQuery<T>(T);

impl<W, B> ApiQuery<By<W, B>> {
    /// Creates a new [`ApiQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<W> ApiQuery<By<W, ()>> {
    /// Creates a new [`ApiQuery`] selecting every `W`.
    #[must_use]
    pub fn all() -> Self {
        Self(By::all())
    }
}

impl<A, W, B> Query<ApiQuery<By<W, B>>> for Service<A>
where
    A: Api<Select<By<W, B>>, Ok = W, Err = Traced<api::Error>>,
{
    type Ok = W;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        ApiQuery(by): ApiQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.api().execute(Select(by)).await.map_err(tracerr::wrap!())
    }
}
