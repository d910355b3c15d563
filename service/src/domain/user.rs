//! [`User`] definitions.

use std::{cmp::Ordering, sync::LazyLock};

use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Directory user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// [`Origin`] of this [`User`].
    pub origin: Origin,
}

impl User {
    /// Compares this [`User`] with the `other` one by the provided
    /// [`SortPath`] in ascending order.
    #[must_use]
    pub fn compare_by(&self, other: &Self, path: SortPath) -> Ordering {
        match path {
            SortPath::Id => self.id.cmp(&other.id),
            SortPath::Name => AsRef::<str>::as_ref(&self.name)
                .cmp(AsRef::<str>::as_ref(&other.name)),
            SortPath::Email => AsRef::<str>::as_ref(&self.email)
                .cmp(AsRef::<str>::as_ref(&other.email)),
        }
    }

    /// Returns [`Highlight`] to render this [`User`] with.
    #[must_use]
    pub fn highlight(&self) -> Highlight {
        if self.email.is_business() {
            Highlight::Green
        } else {
            Highlight::Black
        }
    }
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(u64);

impl Id {
    /// Returns the [`Id`] following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Origin of a [`User`] record.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Origin {
    /// Fetched from the remote API.
    #[display("remote")]
    Remote,

    /// Appended locally from a submitted form.
    #[display("local")]
    Local,
}

/// Name of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    ///
    /// Whitespace is significant, so a blank `name` is still a valid one.
    fn check(name: impl AsRef<str>) -> bool {
        !name.as_ref().is_empty()
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email address of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Email(String);

impl Email {
    /// Minimal number of dot-separated segments in a domain of an [`Email`].
    pub const MIN_DOMAIN_SEGMENTS: usize = 2;

    /// Creates a new [`Email`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Indicates whether this [`Email`] belongs to a `.biz` domain.
    #[must_use]
    pub fn is_business(&self) -> bool {
        self.0.contains(".biz")
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                "^([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                     \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f]+\
                  |\\x22([^\\x0d\\x22\\x5c]\
                  |\\x5c[\\x00-\\x7f])*\\x22)\
                  (\\x2e([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                           \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f]+\
                        |\\x22([^\\x0d\\x22\\x5c]\
                        |\\x5c[\\x00-\\x7f])*\\x22))*\\x40\
                  ([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                     \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f]+\
                  |\\x5b([^\\x0d\\x5b-\\x5d]\
                        |\\x5c[\\x00-\\x7f])*\\x5d)\
                  (\\x2e([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                           \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f]+\
                        |\\x5b([^\\x0d\\x5b-\\x5d]\
                        |\\x5c[\\x00-\\x7f])*\\x5d))*$",
            )
            .expect("valid regex")
        });

        let address = address.as_ref();
        REGEX.is_match(address)
            && address.rsplit_once('@').is_some_and(|(_, domain)| {
                domain.split('.').count() >= Self::MIN_DOMAIN_SEGMENTS
            })
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Color a [`User`] is rendered with.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Highlight {
    /// [`User`] with a business (`.biz`) [`Email`].
    Green,

    /// Any other [`User`].
    Black,
}

/// Path of a [`User`] field to sort by.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortPath {
    /// Sort by [`Id`].
    Id,

    /// Sort by [`Name`].
    #[default]
    Name,

    /// Sort by [`Email`].
    Email,
}

#[cfg(test)]
mod spec {
    use super::{Email, Highlight, Id, Name, Origin, SortPath, User};

    fn user(id: u64, name: &str, email: &str) -> User {
        User {
            id: Id::from(id),
            name: Name::new(name).unwrap(),
            email: Email::new(email).unwrap(),
            origin: Origin::Remote,
        }
    }

    #[test]
    fn name_must_not_be_empty() {
        assert!(Name::new("").is_none());
        assert!(Name::new("Bob").is_some());
        assert!(Name::new(" ").is_some());
        assert!("".parse::<Name>().is_err());
    }

    #[test]
    fn email_requires_two_domain_segments() {
        assert!(Email::new("a@b.com").is_some());
        assert!(Email::new("bob@mail.example.com").is_some());
        assert!(Email::new("Sincere@april.biz").is_some());

        assert!(Email::new("bob@localhost").is_none());
        assert!(Email::new("bob").is_none());
        assert!(Email::new("bob@").is_none());
        assert!(Email::new("@example.com").is_none());
        assert!(Email::new("bob@example.").is_none());
        assert!(Email::new("bob smith@example.com").is_none());
        assert!(Email::new("").is_none());
    }

    #[test]
    fn email_accepts_non_ascii() {
        assert!(Email::new("jörg@example.com").is_some());
        assert!(Email::new("josé@example.com").is_some());
        assert!(Email::new("用户@example.com").is_some());
        assert!(Email::new("jörg@bücher.de").is_some());

        assert!(Email::new("jörg@bücher").is_none());
        assert!(Email::new("jö rg@example.com").is_none());
        assert!(Email::new("jörg\u{7f}@example.com").is_none());
    }

    #[test]
    fn highlights_business_emails() {
        assert_eq!(user(1, "A", "a@april.biz").highlight(), Highlight::Green);
        assert_eq!(user(2, "B", "b@melissa.tv").highlight(), Highlight::Black);
        assert_eq!(Highlight::Green.to_string(), "green");
    }

    #[test]
    fn compares_by_path() {
        let (a, b) = (user(2, "Alice", "z@a.io"), user(1, "Bob", "a@z.io"));

        assert!(a.compare_by(&b, SortPath::Name).is_lt());
        assert!(a.compare_by(&b, SortPath::Email).is_gt());
        assert!(a.compare_by(&b, SortPath::Id).is_gt());
    }

    #[test]
    fn sort_path_from_str() {
        assert_eq!("name".parse::<SortPath>().unwrap(), SortPath::Name);
        assert_eq!("email".parse::<SortPath>().unwrap(), SortPath::Email);
        assert!("phone".parse::<SortPath>().is_err());
    }

    #[test]
    fn next_id() {
        assert_eq!(Id::from(41).next(), Id::from(42));
        assert_eq!(Id::from(u64::MAX).next(), Id::from(u64::MAX));
    }
}
