use std::fmt;

/// Identity of one allocation of context resources.
///
/// Ids are never reused, so a handle captured before a context loss can be
/// told apart from the set allocated after it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceSetId(u64);

impl ResourceSetId {
    pub(crate) const FIRST: Self = Self(1);

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Backend resources tagged with the id they were allocated under.
#[derive(Debug)]
pub struct ResourceSet<R> {
    pub id: ResourceSetId,
    pub resources: R,
}
