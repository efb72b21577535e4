//! Shared parameter value types.

/// The "return all" toggle of a listing operation.
///
/// `All` selects the auto-paginating fetch. `Limit(n)` selects a
/// bounded fetch where `n` is sent as a request parameter *and*
/// applied again as client-side truncation of the already-paginated
/// result. The double application is redundant on well-behaved
/// pagination helpers but is kept for compatibility with existing
/// configurations that rely on the truncation catching over-fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Follow cursors until the API reports no further pages.
    All,
    /// Single bounded fetch of at most this many items.
    Limit(usize),
}

impl Pagination {
    /// The client-side truncation to apply, if any.
    pub fn truncate_to(&self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Limit(n) => Some(*n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_only_when_limited() {
        assert_eq!(Pagination::All.truncate_to(), None);
        assert_eq!(Pagination::Limit(25).truncate_to(), Some(25));
    }
}
