//! Line-oriented console over a [`State`].

use std::{fmt, num::NonZeroUsize, str::FromStr};

use derive_more::{Display, Error as StdError};
use itertools::Itertools as _;
use service::{
    domain::user::{self, Highlight},
    form::Field,
    Listing, State,
};

/// Usage of the console.
pub const HELP: &str = "\
Commands:
  next | n              go to the next page
  prev | p              go to the previous page
  page <N>              go to the page N
  name <value>          set the name of a new user
  email <value>         set the email of a new user
  submit | add          add a new user
  show | ls             show the current page
  help | ?              show this help
  quit | q              exit";

/// Single line of console input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input {
    /// Go to the next page.
    Next,

    /// Go to the previous page.
    Previous,

    /// Go to the provided page.
    Page(NonZeroUsize),

    /// Set a value of a [`Field`].
    Edit(Field, String),

    /// Submit the draft.
    Submit,

    /// Show the current page.
    Show,

    /// Show [`HELP`].
    Help,

    /// Exit the console.
    Quit,
}

impl FromStr for Input {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (cmd, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line.trim_end(), ""));

        Ok(match cmd {
            "" => return Err(ParseError::Empty),
            "next" | "n" => Self::Next,
            "prev" | "previous" | "p" => Self::Previous,
            "page" => {
                let page = rest.trim();
                Self::Page(
                    page.parse()
                        .map_err(|_| ParseError::InvalidPage(page.into()))?,
                )
            }
            "submit" | "add" => Self::Submit,
            "show" | "ls" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => match other.parse::<Field>() {
                Ok(field) => Self::Edit(field, rest.to_owned()),
                Err(_) => return Err(ParseError::Unknown(other.into())),
            },
        })
    }
}

/// Error of parsing an [`Input`].
#[derive(Clone, Debug, Display, Eq, PartialEq, StdError)]
pub enum ParseError {
    /// Empty line.
    #[display("empty command")]
    Empty,

    /// Unknown command.
    #[display("unknown command `{_0}`, type `help` for usage")]
    Unknown(#[error(not(source))] String),

    /// Page number is not a positive integer.
    #[display("invalid page number `{_0}`")]
    InvalidPage(#[error(not(source))] String),
}

/// Outcome of [`apply()`]ing an [`Input`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// [`State`] should be rendered.
    Render,

    /// [`Input`] was refused, as the corresponding control is disabled.
    Disabled(&'static str),

    /// New user with the provided ID was added.
    Added(user::Id),

    /// Draft was rejected, errors should be rendered.
    Rejected,

    /// [`HELP`] should be shown.
    Help,

    /// Console should exit.
    Quit,
}

/// Applies the provided [`Input`] to the [`State`].
pub fn apply(state: &mut State, input: Input) -> Outcome {
    match input {
        Input::Next => {
            if !Listing::derive(state).has_next() {
                return Outcome::Disabled("no next page");
            }
            match state.current_page().checked_add(1) {
                Some(page) => state.set_page(page),
                None => return Outcome::Disabled("no next page"),
            }
            Outcome::Render
        }
        Input::Previous => {
            let Some(page) = NonZeroUsize::new(state.current_page().get() - 1)
            else {
                return Outcome::Disabled("no previous page");
            };
            state.set_page(page);
            Outcome::Render
        }
        Input::Page(page) => {
            state.set_page(page);
            Outcome::Render
        }
        Input::Edit(field, value) => {
            state.edit_field(field, value);
            Outcome::Render
        }
        Input::Submit => match state.submit() {
            Ok(u) => Outcome::Added(u.id),
            Err(_) => Outcome::Rejected,
        },
        Input::Show => Outcome::Render,
        Input::Help => Outcome::Help,
        Input::Quit => Outcome::Quit,
    }
}

/// Renders the provided [`State`] into the `out`put.
///
/// # Errors
///
/// If writing to the `out`put fails.
pub fn render(
    out: &mut impl fmt::Write,
    state: &State,
    ansi: bool,
) -> fmt::Result {
    let listing = Listing::derive(state);

    writeln!(
        out,
        "Users, page {} ({} total, sorted by {} {}):",
        listing.current_page,
        listing.total,
        state.sort().path,
        state.sort().order,
    )?;
    if listing.page.is_empty() {
        writeln!(out, "  (no users)")?;
    }
    for u in &listing.page {
        let name = match (ansi, u.highlight()) {
            (true, Highlight::Green) => format!("\x1b[32m{}\x1b[0m", u.name),
            (true, Highlight::Black)
            | (false, Highlight::Green | Highlight::Black) => {
                u.name.to_string()
            }
        };
        let id = format!("#{}", u.id);
        writeln!(out, "  {id:<5} {name} <{}>", u.email)?;
    }

    writeln!(
        out,
        "[{}] [{}]",
        if listing.has_previous() { "< Previous" } else { "- Previous" },
        if listing.has_next() { "Next >" } else { "Next -" },
    )?;

    let draft = state.draft();
    writeln!(
        out,
        "Draft: {}",
        [Field::Name, Field::Email]
            .into_iter()
            .map(|f| format!("{f}={:?}", draft.get(f)))
            .join(" "),
    )?;
    for message in state.errors().values() {
        writeln!(out, "  ! {message}")?;
    }

    if let Some(e) = state.load_error() {
        writeln!(out, "! Failed to load users: {e}")?;
    }

    Ok(())
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use service::{
        domain::{
            user::{Email, Id, Name, Origin},
            User,
        },
        form::Field,
        Config, State,
    };

    use super::{apply, render, Input, Outcome, ParseError};

    fn state(n: u64) -> State {
        let mut state = State::new(&Config::default());
        state.load(
            (1..=n)
                .map(|id| User {
                    id: Id::from(id),
                    name: Name::new(format!("User {id:02}")).unwrap(),
                    email: Email::new(format!("u{id}@example.biz")).unwrap(),
                    origin: Origin::Remote,
                })
                .collect(),
        );
        state
    }

    fn rendered(state: &State) -> String {
        let mut out = String::new();
        render(&mut out, state, false).unwrap();
        out
    }

    #[test]
    fn parses_input() {
        assert_eq!("next".parse::<Input>(), Ok(Input::Next));
        assert_eq!(" p".parse::<Input>(), Ok(Input::Previous));
        assert_eq!(
            "page 3".parse::<Input>(),
            Ok(Input::Page(NonZeroUsize::new(3).unwrap())),
        );
        assert_eq!(
            "name Mary Jane".parse::<Input>(),
            Ok(Input::Edit(Field::Name, "Mary Jane".into())),
        );
        assert_eq!(
            "email".parse::<Input>(),
            Ok(Input::Edit(Field::Email, String::new())),
        );
        assert_eq!("add".parse::<Input>(), Ok(Input::Submit));
        assert_eq!("q".parse::<Input>(), Ok(Input::Quit));
    }

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(
            "name\tBob".parse::<Input>(),
            Ok(Input::Edit(Field::Name, "Bob".into())),
        );
        assert_eq!(
            "page\t2".parse::<Input>(),
            Ok(Input::Page(NonZeroUsize::new(2).unwrap())),
        );
        assert_eq!("next\t".parse::<Input>(), Ok(Input::Next));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<Input>(), Err(ParseError::Empty));
        assert_eq!(
            "page 0".parse::<Input>(),
            Err(ParseError::InvalidPage("0".into())),
        );
        assert_eq!(
            "jump".parse::<Input>(),
            Err(ParseError::Unknown("jump".into())),
        );
    }

    #[test]
    fn navigates_within_bounds() {
        let mut state = state(7);

        assert_eq!(
            apply(&mut state, Input::Previous),
            Outcome::Disabled("no previous page"),
        );
        assert_eq!(apply(&mut state, Input::Next), Outcome::Render);
        assert_eq!(state.current_page().get(), 2);
        assert_eq!(
            apply(&mut state, Input::Next),
            Outcome::Disabled("no next page"),
        );
        assert_eq!(apply(&mut state, Input::Previous), Outcome::Render);
        assert_eq!(state.current_page().get(), 1);
    }

    #[test]
    fn submits_draft() {
        let mut state = state(2);

        assert_eq!(apply(&mut state, Input::Submit), Outcome::Rejected);
        _ = apply(&mut state, Input::Edit(Field::Name, "Zoe".into()));
        _ = apply(&mut state, Input::Edit(Field::Email, "zoe@z.io".into()));

        assert_eq!(
            apply(&mut state, Input::Submit),
            Outcome::Added(Id::from(3)),
        );
        assert_eq!(state.users().len(), 3);
    }

    #[test]
    fn renders_page() {
        let mut state = state(6);
        state.edit_field(Field::Email, "bob@localhost");
        _ = state.submit();

        let out = rendered(&state);

        assert!(out.starts_with(
            "Users, page 1 (6 total, sorted by name asc):\n  #1    User 01",
        ));
        assert!(out.contains("[- Previous] [Next >]"));
        assert!(out.contains("Draft: name=\"\" email=\"bob@localhost\""));
        assert!(out.contains("  ! \"Name\" is not allowed to be empty"));
        assert!(out.contains("  ! \"Email\" must be a valid email"));
        assert!(!out.contains("User 06"));
    }

    #[test]
    fn renders_empty_page_and_load_error() {
        let mut state = state(0);
        state.fail("HTTP request failed");

        let out = rendered(&state);

        assert!(out.contains("  (no users)"));
        assert!(out.contains("[- Previous] [Next -]"));
        assert!(out.contains("! Failed to load users: HTTP request failed"));
    }

    #[test]
    fn highlights_with_ansi() {
        let state = state(1);
        let mut out = String::new();

        render(&mut out, &state, true).unwrap();

        assert!(out.contains("\x1b[32mUser 01\x1b[0m"));
    }
}
