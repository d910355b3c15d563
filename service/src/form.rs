//! New [`User`] form definitions.

use std::collections::BTreeMap;

use derive_more::{Deref, Display};

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Field of a [`Draft`].
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    /// [`Draft::name`] field.
    Name,

    /// [`Draft::email`] field.
    Email,
}

impl Field {
    /// Returns human-readable label of this [`Field`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
        }
    }
}

/// In-progress, not yet submitted values of a new [`User`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Draft {
    /// Entered [`user::Name`].
    pub name: String,

    /// Entered [`user::Email`] address.
    pub email: String,
}

impl Draft {
    /// Returns the value of the provided [`Field`].
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
        }
    }

    /// Sets the value of the provided [`Field`], leaving other ones intact.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
        };
        *slot = value.into();
    }
}

/// Reason of a [`Field`] failing validation.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Violation {
    /// Value is empty.
    #[display("is not allowed to be empty")]
    Empty,

    /// Value is not a valid [`user::Email`].
    #[display("must be a valid email")]
    InvalidEmail,
}

impl Violation {
    /// Renders a message describing this [`Violation`] of the provided
    /// [`Field`].
    #[must_use]
    pub fn message(self, field: Field) -> String {
        format!("\"{}\" {self}", field.label())
    }
}

/// Validation errors of a [`Draft`], keyed by [`Field`].
///
/// Empty [`Errors`] mean a valid [`Draft`].
#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct Errors(BTreeMap<Field, String>);

impl Errors {
    /// Records the provided [`Violation`] of the given [`Field`].
    fn push(&mut self, field: Field, violation: Violation) {
        _ = self.0.insert(field, violation.message(field));
    }
}

impl FromIterator<(Field, Violation)> for Errors {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (Field, Violation)>,
    {
        let mut errors = Self::default();
        for (field, violation) in iter {
            errors.push(field, violation);
        }
        errors
    }
}

/// Validates the provided [`Draft`], collecting errors of all its
/// [`Field`]s.
///
/// [`None`] is returned if the [`Draft`] is valid.
#[must_use]
pub fn validate(draft: &Draft) -> Option<Errors> {
    check(draft).err()
}

/// Validates the provided [`Draft`] into a [`user::Name`] and an
/// [`user::Email`].
///
/// # Errors
///
/// Errors with all the failed [`Field`]s, not just the first one.
pub fn check(draft: &Draft) -> Result<(user::Name, user::Email), Errors> {
    let name = user::Name::new(draft.name.as_str()).ok_or(Violation::Empty);
    let email = if draft.email.is_empty() {
        Err(Violation::Empty)
    } else {
        user::Email::new(draft.email.as_str()).ok_or(Violation::InvalidEmail)
    };

    match (name, email) {
        (Ok(name), Ok(email)) => Ok((name, email)),
        (name, email) => Err([
            (Field::Name, name.err()),
            (Field::Email, email.err()),
        ]
        .into_iter()
        .filter_map(|(f, v)| Some((f, v?)))
        .collect()),
    }
}
