use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for objects in the network graph.
///
/// - `u32` keeps memory small
/// - `NonZero` lets `Option<Id>` stay the size of `Id`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    ///
    /// Saturates at `u32::MAX - 1`; the graph never holds that many objects.
    pub fn from_index(index: u32) -> Self {
        let raw = index.saturating_add(1);
        Self(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MAX))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Recover the 0-based index as a `usize` for slice access.
    pub fn idx(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases (no runtime cost).
pub type VolumeId = Id;
pub type RestrictionId = Id;
