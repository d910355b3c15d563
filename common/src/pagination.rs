//! Abstractions for offset pagination and ordering.

use std::{cmp::Ordering, num::NonZeroUsize};

/// Returns the page number `page` (1-based) of `items`, with at most `size`
/// items in it.
///
/// An empty slice is returned if the page starts past the end of `items`.
#[must_use]
pub fn paginate<T>(
    items: &[T],
    page: NonZeroUsize,
    size: NonZeroUsize,
) -> &[T] {
    let Some(start) = (page.get() - 1).checked_mul(size.get()) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size.get()).min(items.len());
    &items[start..end]
}

/// Order of sorting.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Order {
    /// Ascending order.
    #[default]
    #[strum(serialize = "ascending", to_string = "asc")]
    #[cfg_attr(feature = "serde", serde(rename = "asc", alias = "ascending"))]
    Ascending,

    /// Descending order.
    #[strum(serialize = "descending", to_string = "desc")]
    #[cfg_attr(
        feature = "serde",
        serde(rename = "desc", alias = "descending")
    )]
    Descending,
}

impl Order {
    /// Applies this [`Order`] to the provided ascending [`Ordering`].
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Sort specification: which `P`ath to sort by and in which [`Order`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Sort<P> {
    /// Path of the field to sort by.
    pub path: P,

    /// [`Order`] to sort in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: Order,
}

impl<P> Sort<P> {
    /// Creates a new ascending [`Sort`] by the provided `path`.
    #[must_use]
    pub const fn ascending(path: P) -> Self {
        Self {
            path,
            order: Order::Ascending,
        }
    }

    /// Creates a new descending [`Sort`] by the provided `path`.
    #[must_use]
    pub const fn descending(path: P) -> Self {
        Self {
            path,
            order: Order::Descending,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{cmp::Ordering, num::NonZeroUsize};

    use super::{paginate, Order};

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    const ITEMS: [char; 7] = ['A', 'B', 'C', 'D', 'E', 'F', 'G'];

    #[test]
    fn slices_pages() {
        assert_eq!(
            paginate(&ITEMS, nz(1), nz(5)),
            ['A', 'B', 'C', 'D', 'E'],
        );
        assert_eq!(paginate(&ITEMS, nz(2), nz(5)), ['F', 'G']);
        assert!(paginate(&ITEMS, nz(3), nz(5)).is_empty());
    }

    #[test]
    fn handles_exact_boundaries() {
        assert_eq!(paginate(&ITEMS, nz(7), nz(1)), ['G']);
        assert!(paginate(&ITEMS, nz(8), nz(1)).is_empty());
        assert_eq!(paginate(&ITEMS, nz(1), nz(7)), ITEMS);
        assert_eq!(paginate(&ITEMS, nz(1), nz(100)), ITEMS);
        assert!(paginate::<char>(&[], nz(1), nz(5)).is_empty());
    }

    #[test]
    fn does_not_overflow() {
        assert!(paginate(&ITEMS, nz(usize::MAX), nz(usize::MAX)).is_empty());
        assert!(paginate(&ITEMS, nz(2), nz(usize::MAX)).is_empty());
        assert_eq!(paginate(&ITEMS, nz(1), nz(usize::MAX)), ITEMS);
    }

    #[test]
    fn order_from_str() {
        assert_eq!("asc".parse::<Order>().unwrap(), Order::Ascending);
        assert_eq!(
            "descending".parse::<Order>().unwrap(),
            Order::Descending,
        );
        assert_eq!(Order::Descending.to_string(), "desc");
        assert!("up".parse::<Order>().is_err());
    }

    #[test]
    fn order_applies() {
        assert_eq!(Order::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Order::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Order::Descending.apply(Ordering::Equal), Ordering::Equal);
    }
}
