use std::collections::HashMap;

use crate::{
    foundation::error::{WeaveError, WeaveResult},
    foundation::ids::next_clone_serial,
    timeline::{
        layer::{LayerHandle, LayerPosition},
        model::Timeline,
    },
};

/// Clone the frame and layer wiring of `source` into a fresh timeline.
///
/// Every source layer gets a new layer (same depth order), every item is re-pointed at its new
/// layer, characters stay shared. With `rename`, placement names get a suffix unique to this
/// clone operation.
pub fn clone_timeline(source: &Timeline, rename: bool) -> WeaveResult<Timeline> {
    let mut out = Timeline::new();
    clone_timeline_into(source, &mut out, rename)?;
    Ok(out)
}

/// Clone the frame and layer wiring of `source` onto `target`.
///
/// New layers are allocated in front of the target's existing layers and source frame `n`
/// lands in target frame `n`. The rename suffix only guarantees distinct names between clone
/// operations; a collision with a name already open in a target frame is still rejected.
#[tracing::instrument(skip_all, fields(from = source.id().as_u64(), to = target.id().as_u64()))]
pub fn clone_timeline_into(
    source: &Timeline,
    target: &mut Timeline,
    rename: bool,
) -> WeaveResult<()> {
    let mut layer_map: HashMap<LayerHandle, LayerHandle> = HashMap::new();
    for old in source.layers() {
        let new = target.get_free_layer(LayerPosition::Front)?;
        layer_map.insert(old, new);
    }

    let suffix = rename.then(|| format!("${}", next_clone_serial()));

    let mut cloned = 0usize;
    for (fi, frame) in source.frames().iter().enumerate() {
        let frame_no = u32::try_from(fi + 1)
            .map_err(|_| WeaveError::internal("clone.frame_overflow", "too many frames"))?;
        target.get_frame(frame_no)?;
        if let Some(label) = frame.label()
            && target.frame(frame_no).is_some_and(|f| f.label().is_none())
        {
            target
                .get_frame(frame_no)?
                .set_label(Some(label.to_owned()));
        }
        for item in frame.items() {
            let Some(&layer) = layer_map.get(&item.layer()) else {
                return Err(WeaveError::internal(
                    "clone.foreign_layer",
                    format!(
                        "item in frame {frame_no} references a layer outside the source timeline"
                    ),
                ));
            };
            target.add_display_item(frame_no, item.clone_onto(layer, suffix.as_deref()))?;
            cloned += 1;
        }
    }
    tracing::debug!(layers = layer_map.len(), items = cloned, "cloned timeline");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clone.rs"]
mod tests;
