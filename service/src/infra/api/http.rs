//! HTTP [`Api`] implementation.

use std::time::Duration;

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError};
use serde::Deserialize;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{
    domain::{
        user::{self, Origin},
        User,
    },
    infra::{api, Api},
};

/// User agent the [`Http`] client identifies itself with.
static USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// [`Http`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// URL of the endpoint returning all the [`User`]s.
    #[default(Url::parse("https://jsonplaceholder.typicode.com/users")
        .expect("valid URL"))]
    pub endpoint: Url,

    /// Timeout of a single request.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

/// HTTP [`Api`] client.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest::Client`].
    client: reqwest::Client,

    /// URL of the endpoint returning all the [`User`]s.
    endpoint: Url,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the underlying [`reqwest::Client`].
    pub fn new(conf: &Config) -> Result<Self, Traced<api::Error>> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(conf.timeout)
            .build()
            .map_err(|e| tracerr::new!(Error::Client(e)))
            .map_err(tracerr::map_from)?;

        Ok(Self {
            client,
            endpoint: conf.endpoint.clone(),
        })
    }

    /// Returns the endpoint URL of this [`Http`] client.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Api<Select<By<Vec<User>, ()>>> for Http {
    type Ok = Vec<User>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<User>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        log::debug!("fetching users from `{}`", self.endpoint);

        let resp = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| tracerr::new!(Error::Request(e)))
            .map_err(tracerr::map_from)?;

        let status = resp.status();
        if !status.is_success() {
            let err = tracerr::new!(Error::Status(status));
            return Err(tracerr::map_from(err));
        }

        let records = resp
            .json::<Vec<Record>>()
            .await
            .map_err(|e| tracerr::new!(Error::Decode(e)))
            .map_err(tracerr::map_from)?;
        log::info!("fetched {} users from `{}`", records.len(), self.endpoint);

        Ok(records.into_iter().map(User::from).collect())
    }
}

/// [`User`] record as returned by the remote API.
///
/// Fields other than the listed ones are ignored.
#[derive(Debug, Deserialize)]
struct Record {
    /// ID of the [`User`].
    id: user::Id,

    /// Name of the [`User`].
    name: String,

    /// Email address of the [`User`].
    email: String,
}

impl From<Record> for User {
    fn from(record: Record) -> Self {
        let Record { id, name, email } = record;

        #[expect(unsafe_code, reason = "trusted remote data")]
        let (name, email) = unsafe {
            (
                user::Name::new_unchecked(name),
                user::Email::new_unchecked(email),
            )
        };

        Self {
            id,
            name,
            email,
            origin: Origin::Remote,
        }
    }
}

/// [`Http`] client error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Failed to build the underlying [`reqwest::Client`].
    #[display("Failed to build HTTP client: {_0}")]
    Client(reqwest::Error),

    /// Failed to perform a request.
    #[display("HTTP request failed: {_0}")]
    Request(reqwest::Error),

    /// Remote API responded with an unsuccessful status.
    #[display("Unexpected HTTP status: {_0}")]
    Status(#[error(not(source))] reqwest::StatusCode),

    /// Failed to decode a response body.
    #[display("Failed to decode HTTP response: {_0}")]
    Decode(reqwest::Error),
}

#[cfg(test)]
mod spec {
    use std::{future::IntoFuture as _, time::Duration};

    use axum::{http::StatusCode, routing::get, Json, Router};
    use common::operations::{By, Select};
    use tokio::net::TcpListener;
    use url::Url;

    use crate::{
        domain::user::{Id, Origin},
        infra::{api, Api as _},
    };

    use super::{Config, Error, Http};

    async fn serve(router: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(tokio::spawn(axum::serve(listener, router).into_future()));
        Url::parse(&format!("http://{addr}/users")).unwrap()
    }

    fn client(endpoint: Url) -> Http {
        Http::new(&Config {
            endpoint,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_users() {
        let url = serve(Router::new().route(
            "/users",
            get(|| async {
                Json(serde_json::json!([
                    {
                        "id": 1,
                        "name": "Leanne Graham",
                        "username": "Bret",
                        "email": "Sincere@april.biz",
                    },
                    {
                        "id": 2,
                        "name": "Ervin Howell",
                        "email": "Shanna@melissa.tv",
                    },
                ]))
            }),
        ))
        .await;

        let users = client(url)
            .execute(Select(By::all()))
            .await
            .unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, Id::from(1));
        assert_eq!(users[0].name.to_string(), "Leanne Graham");
        assert_eq!(users[1].email.to_string(), "Shanna@melissa.tv");
        assert!(users.iter().all(|u| u.origin == Origin::Remote));
    }

    #[tokio::test]
    async fn fails_on_error_status() {
        let url = serve(Router::new().route(
            "/users",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        ))
        .await;

        let err = client(url)
            .execute(Select(By::all()))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            api::Error::Http(Error::Status(s))
                if *s == StatusCode::SERVICE_UNAVAILABLE,
        ));
    }

    #[tokio::test]
    async fn fails_on_malformed_body() {
        let url = serve(
            Router::new().route("/users", get(|| async { "not json" })),
        )
        .await;

        let err = client(url)
            .execute(Select(By::all()))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), api::Error::Http(Error::Decode(_))));
    }
}
