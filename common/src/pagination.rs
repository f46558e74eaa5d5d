//! Abstractions for offset-based pagination.

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// Maximum number of items to return.
    limit: usize,

    /// Number of items to skip.
    offset: usize,
}

impl Arguments {
    /// Number of items returned when no limit is requested.
    pub const DEFAULT_LIMIT: usize = 20;

    /// Upper bound of a requested limit.
    pub const MAX_LIMIT: usize = 100;

    /// Creates new [`Arguments`], falling back to [`Arguments::DEFAULT_LIMIT`]
    /// and a zero offset for missing values.
    ///
    /// [`None`] is returned if the requested `limit` is zero or exceeds
    /// [`Arguments::MAX_LIMIT`].
    #[must_use]
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Option<Self> {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        (1..=Self::MAX_LIMIT).contains(&limit).then(|| Self {
            limit,
            offset: offset.unwrap_or_default(),
        })
    }

    /// Returns the limit requested by these [`Arguments`].
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the offset requested by these [`Arguments`].
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// A page of items.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// [`Arguments`] this [`Page`] was selected with.
    pub arguments: Arguments,

    /// Indicator whether there are more items after this [`Page`].
    pub has_more: bool,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] out of the provided `items`.
    ///
    /// Selecting one item more than the [`Arguments::limit()`] is how the
    /// caller signals there is a next page: the extra item is dropped here.
    #[must_use]
    pub fn new(
        arguments: Arguments,
        items: impl IntoIterator<Item = I>,
    ) -> Self {
        let mut items = items.into_iter().collect::<Vec<_>>();
        let has_more = items.len() > arguments.limit();
        items.truncate(arguments.limit());
        Self {
            items,
            arguments,
            has_more,
        }
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<T>(self, f: impl FnMut(I) -> T) -> Page<T> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            arguments: self.arguments,
            has_more: self.has_more,
        }
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Page};

    #[test]
    fn defaults() {
        let args = Arguments::new(None, None).unwrap();

        assert_eq!(args.limit(), 20);
        assert_eq!(args.offset(), 0);
        assert_eq!(args, Arguments::default());
    }

    #[test]
    fn rejects_out_of_range_limit() {
        assert!(Arguments::new(Some(0), None).is_none());
        assert!(Arguments::new(Some(101), None).is_none());
        assert!(Arguments::new(Some(100), Some(40)).is_some());
    }

    #[test]
    fn detects_next_page() {
        let args = Arguments::new(Some(2), None).unwrap();

        let page = Page::new(args, [1, 2, 3]);
        assert_eq!(page.items, [1, 2]);
        assert!(page.has_more);

        let page = Page::new(args, [1, 2]);
        assert_eq!(page.items, [1, 2]);
        assert!(!page.has_more);
    }
}
