use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TIMELINE_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_CLONE_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a timeline; layers are scoped to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineId(pub(crate) u64);

impl TimelineId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_TIMELINE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Serial of one clone operation, used to disambiguate renamed instances.
pub(crate) fn next_clone_serial() -> u64 {
    NEXT_CLONE_SERIAL.fetch_add(1, Ordering::Relaxed)
}

/// Identity key of a shared allocation, used for pointer-identity maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct PtrKey(usize);

impl PtrKey {
    pub(crate) fn of<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>() as usize)
    }
}
