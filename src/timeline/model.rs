use std::collections::HashSet;

use crate::{
    bytecode::name::QName,
    character::model::CharacterRef,
    foundation::error::{WeaveError, WeaveResult},
    foundation::ids::TimelineId,
    timeline::{
        display::{DisplayListItem, PlaceObject},
        frame::Frame,
        layer::{Layer, LayerHandle, LayerPosition},
    },
};

/// Anything that owns a timeline: the root of a document or a sprite.
pub trait TimelineOwner {
    /// Borrow the owned timeline.
    fn timeline(&self) -> &Timeline;
    /// Mutably borrow the owned timeline.
    fn timeline_mut(&mut self) -> &mut Timeline;
}

/// Frames and layers of a document root or sprite.
///
/// Frames are 1-based and appended on demand. Layers live in an arena owned by the timeline and
/// are addressed by [`LayerHandle`]s scoped to this timeline.
#[derive(Debug)]
pub struct Timeline {
    id: TimelineId,
    frames: Vec<Frame>,
    layers: Vec<Layer>,
    class: Option<QName>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Empty timeline with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: TimelineId::fresh(),
            frames: Vec::new(),
            layers: Vec::new(),
            class: None,
        }
    }

    /// Identity of this timeline.
    pub fn id(&self) -> TimelineId {
        self.id
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// All frames in order; `frames()[0]` is frame 1.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at a 1-based index without extending.
    pub fn frame(&self, index: u32) -> Option<&Frame> {
        let idx = usize::try_from(index).ok()?.checked_sub(1)?;
        self.frames.get(idx)
    }

    /// Extend with empty frames until at least `count` frames exist.
    pub fn ensure_frame_count(&mut self, count: usize) {
        if self.frames.len() < count {
            self.frames.resize_with(count, Frame::default);
        }
    }

    /// Frame at a 1-based index, appending empty frames as needed.
    pub fn get_frame(&mut self, index: u32) -> WeaveResult<&mut Frame> {
        if index == 0 {
            return Err(WeaveError::internal(
                "timeline.frame_zero",
                "frame indices are 1-based",
            ));
        }
        let count = index as usize;
        self.ensure_frame_count(count);
        Ok(&mut self.frames[count - 1])
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Handles of all layers, back to front.
    pub fn layers(&self) -> impl Iterator<Item = LayerHandle> + '_ {
        self.layers.iter().map(Layer::handle)
    }

    /// Layer at a 1-based depth, appending empty layers as needed.
    pub fn get_layer(&mut self, depth: u16) -> WeaveResult<LayerHandle> {
        if depth == 0 {
            return Err(WeaveError::internal(
                "timeline.layer_zero",
                "layer depths are 1-based",
            ));
        }
        while self.layers.len() < usize::from(depth) {
            self.push_layer();
        }
        Ok(self.layers[usize::from(depth) - 1].handle)
    }

    /// Allocate a new layer at `position`.
    ///
    /// Only [`LayerPosition::Front`] is supported; asking for the back is a contract violation.
    pub fn get_free_layer(&mut self, position: LayerPosition) -> WeaveResult<LayerHandle> {
        match position {
            LayerPosition::Front => Ok(self.push_layer()),
            LayerPosition::Back => Err(WeaveError::internal(
                "timeline.back_layer",
                "allocating a layer behind existing layers is not supported",
            )),
        }
    }

    fn push_layer(&mut self) -> LayerHandle {
        let handle = LayerHandle {
            timeline: self.id,
            slot: self.layers.len() as u32,
        };
        self.layers.push(Layer { handle });
        handle
    }

    /// Resolve `handle` against this timeline.
    pub fn resolve_layer(&self, handle: LayerHandle) -> WeaveResult<&Layer> {
        if handle.timeline != self.id {
            return Err(WeaveError::internal(
                "timeline.foreign_layer",
                format!(
                    "layer at depth {} belongs to timeline {}, not {}",
                    handle.depth(),
                    handle.timeline.as_u64(),
                    self.id.as_u64()
                ),
            ));
        }
        self.layers
            .get(handle.slot as usize)
            .ok_or_else(|| {
                WeaveError::internal(
                    "timeline.stale_layer",
                    format!("layer slot {} does not exist", handle.slot),
                )
            })
    }

    /// Append `item` to frame `frame` (1-based).
    ///
    /// The item's layer must belong to this timeline and a placement name must not already be
    /// open in that frame.
    pub fn add_display_item(&mut self, frame: u32, item: DisplayListItem) -> WeaveResult<()> {
        self.resolve_layer(item.layer())?;
        self.get_frame(frame)?.push(item)
    }

    /// Shorthand for adding a [`DisplayListItem::Place`].
    pub fn place(&mut self, frame: u32, place: PlaceObject) -> WeaveResult<()> {
        self.add_display_item(frame, DisplayListItem::Place(place))
    }

    /// First placement named `name`, scanning frames in order.
    pub fn find_instance(&self, name: &str) -> Option<&PlaceObject> {
        self.frames.iter().find_map(|f| f.instance(name))
    }

    /// Delete every placement named `name` together with the removals that close them.
    ///
    /// A single forward pass tracks open placements with that name; each removal closes the first
    /// open placement on its layer (and of its character, when it names one). Removals that close
    /// nothing stay in place. Returns `true` if anything was deleted.
    pub fn remove_instance(&mut self, name: &str) -> bool {
        let mut open: Vec<(usize, usize)> = Vec::new();
        let mut doomed: Vec<(usize, usize)> = Vec::new();

        for (fi, frame) in self.frames.iter().enumerate() {
            for (ii, item) in frame.items().iter().enumerate() {
                match item {
                    DisplayListItem::Place(p) => {
                        if p.name.as_deref() == Some(name) {
                            open.push((fi, ii));
                            doomed.push((fi, ii));
                        }
                    }
                    DisplayListItem::Remove(r) => {
                        let hit = open.iter().position(|&(ofi, oii)| {
                            match &self.frames[ofi].items()[oii] {
                                DisplayListItem::Place(p) => r.closes(p),
                                DisplayListItem::Remove(_) => false,
                            }
                        });
                        if let Some(pos) = hit {
                            open.remove(pos);
                            doomed.push((fi, ii));
                        }
                    }
                }
            }
        }

        if doomed.is_empty() {
            return false;
        }
        tracing::debug!(name, items = doomed.len(), "removing instance");

        for (fi, frame) in self.frames.iter_mut().enumerate() {
            let indices: Vec<usize> = doomed
                .iter()
                .filter(|&&(dfi, _)| dfi == fi)
                .map(|&(_, ii)| ii)
                .collect();
            if !indices.is_empty() {
                frame.remove_at(&indices);
            }
        }
        true
    }

    /// Distinct characters placed anywhere on this timeline, in first-placement order.
    pub fn placed_characters(&self) -> Vec<CharacterRef> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for frame in &self.frames {
            for item in frame.items() {
                if let DisplayListItem::Place(p) = item
                    && let Some(c) = &p.character
                    && seen.insert(c.key())
                {
                    out.push(c.clone());
                }
            }
        }
        out
    }

    /// Class this timeline is bound to.
    pub fn class(&self) -> Option<&QName> {
        self.class.as_ref()
    }

    /// Bind the timeline to `class`. A timeline is bound at most once.
    pub fn bind_class(&mut self, class: QName) -> WeaveResult<()> {
        match &self.class {
            Some(existing) if *existing != class => Err(WeaveError::internal(
                "timeline.class_rebound",
                format!("timeline is already bound to '{existing}', refusing '{class}'"),
            )),
            _ => {
                self.class = Some(class);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
