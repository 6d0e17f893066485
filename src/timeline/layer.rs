use crate::foundation::ids::TimelineId;

/// Handle to a layer slot of one timeline.
///
/// Handles compare by owning timeline and slot. Two layers with the same depth on different
/// timelines are never interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerHandle {
    pub(crate) timeline: TimelineId,
    pub(crate) slot: u32,
}

impl LayerHandle {
    /// Timeline that owns the layer.
    pub fn timeline(self) -> TimelineId {
        self.timeline
    }

    /// 1-based depth of the layer on its timeline.
    pub fn depth(self) -> u16 {
        u16::try_from(self.slot + 1).unwrap_or(u16::MAX)
    }
}

/// Depth channel of a timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    pub(crate) handle: LayerHandle,
}

impl Layer {
    /// Handle addressing this layer.
    pub fn handle(&self) -> LayerHandle {
        self.handle
    }

    /// 1-based depth of the layer.
    pub fn depth(&self) -> u16 {
        self.handle.depth()
    }
}

/// Where a freshly allocated layer goes in the stacking order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerPosition {
    /// Above every existing layer.
    Front,
    /// Below every existing layer. Not supported by the allocator.
    Back,
}
