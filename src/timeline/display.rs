use crate::{
    character::model::CharacterRef,
    foundation::core::{Affine, ColorTransform},
    timeline::layer::LayerHandle,
};

/// Opens (or moves) a character's presence on a layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceObject {
    /// Placed character; `None` for a pure move of whatever the layer holds.
    pub character: Option<CharacterRef>,
    /// Owning layer.
    pub layer: LayerHandle,
    /// Placement matrix.
    pub transform: Affine,
    /// Color transform.
    pub color_transform: Option<ColorTransform>,
    /// Morph ratio.
    pub ratio: Option<u16>,
    /// Instance name.
    pub name: Option<String>,
    /// Depth up to which this placement masks.
    pub clip_depth: Option<u16>,
    /// Modifies the layer's existing placement instead of opening a new one.
    pub is_move: bool,
    /// Class the placed instance must be addressable as from script.
    pub class_name: Option<String>,
}

impl PlaceObject {
    /// Placement of `character` on `layer` with an identity transform.
    pub fn new(layer: LayerHandle, character: Option<CharacterRef>) -> Self {
        Self {
            character,
            layer,
            transform: Affine::IDENTITY,
            color_transform: None,
            ratio: None,
            name: None,
            clip_depth: None,
            is_move: false,
            class_name: None,
        }
    }

    /// Set the instance name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the placement matrix.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }
}

/// Closes a character's presence on a layer.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoveObject {
    /// Owning layer.
    pub layer: LayerHandle,
    /// Only close a placement of this character, when set.
    pub character: Option<CharacterRef>,
}

impl RemoveObject {
    /// Removal on `layer`, limited to `character` when set.
    pub fn new(layer: LayerHandle, character: Option<CharacterRef>) -> Self {
        Self { layer, character }
    }

    /// Return `true` if this removal closes `place`.
    pub fn closes(&self, place: &PlaceObject) -> bool {
        if self.layer != place.layer {
            return false;
        }
        match (&self.character, &place.character) {
            (None, _) => true,
            (Some(want), Some(have)) => want.ptr_eq(have),
            (Some(_), None) => false,
        }
    }
}

/// One display-list instruction of a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayListItem {
    /// Open or move a placement.
    Place(PlaceObject),
    /// Close a placement.
    Remove(RemoveObject),
}

impl DisplayListItem {
    /// Layer the instruction operates on.
    pub fn layer(&self) -> LayerHandle {
        match self {
            Self::Place(p) => p.layer,
            Self::Remove(r) => r.layer,
        }
    }

    /// Instance name of a placement.
    pub fn instance_name(&self) -> Option<&str> {
        match self {
            Self::Place(p) => p.name.as_deref(),
            Self::Remove(_) => None,
        }
    }

    /// Copy this instruction onto `layer`.
    ///
    /// Value fields are copied, the character stays shared. With `suffix`, a named placement is
    /// renamed to `<name><suffix>`.
    pub fn clone_onto(&self, layer: LayerHandle, suffix: Option<&str>) -> Self {
        match self {
            Self::Place(p) => {
                let mut out = p.clone();
                out.layer = layer;
                if let (Some(name), Some(suffix)) = (out.name.as_mut(), suffix) {
                    name.push_str(suffix);
                }
                Self::Place(out)
            }
            Self::Remove(r) => Self::Remove(RemoveObject::new(layer, r.character.clone())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/display.rs"]
mod tests;
