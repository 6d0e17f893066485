use std::collections::BTreeMap;

use crate::{
    bytecode::block::AbcBlock,
    bytecode::name::QName,
    character::model::{Character, CharacterRef},
    foundation::core::Rect,
    foundation::error::{WeaveError, WeaveResult},
    timeline::display::PlaceObject,
    timeline::model::{Timeline, TimelineOwner},
};

/// One vector-animation document: a root timeline, a character dictionary and bytecode blocks.
#[derive(Debug)]
pub struct Document {
    name: String,
    root: Timeline,
    characters: BTreeMap<String, CharacterRef>,
    bytecode: Vec<AbcBlock>,
    /// Playback rate in frames per second.
    pub frame_rate: f64,
    /// Stage bounds.
    pub stage: Rect,
    /// Container format version.
    pub version: u8,
}

impl Document {
    /// Empty document with a 550x400 stage at 24 fps.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: Timeline::new(),
            characters: BTreeMap::new(),
            bytecode: Vec::new(),
            frame_rate: 24.0,
            stage: Rect::new(0.0, 0.0, 550.0, 400.0),
            version: 10,
        }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wrap `character` and register it under `key`.
    pub fn define_character(
        &mut self,
        key: impl Into<String>,
        character: Character,
    ) -> WeaveResult<CharacterRef> {
        let character = CharacterRef::new(character);
        self.insert_character(key, character.clone())?;
        Ok(character)
    }

    /// Register an existing character handle under `key`. Keys are unique per document.
    pub fn insert_character(
        &mut self,
        key: impl Into<String>,
        character: CharacterRef,
    ) -> WeaveResult<()> {
        let key = key.into();
        if self.characters.contains_key(&key) {
            return Err(WeaveError::internal(
                "document.duplicate_key",
                format!("character key '{key}' is already defined"),
            )
            .in_document(&self.name));
        }
        self.characters.insert(key, character);
        Ok(())
    }

    /// Character registered under `key`.
    pub fn character(&self, key: &str) -> Option<&CharacterRef> {
        self.characters.get(key)
    }

    /// All registered characters, ordered by key.
    pub fn characters(&self) -> impl Iterator<Item = (&str, &CharacterRef)> + '_ {
        self.characters.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// Number of registered characters.
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Key `character` is registered under, by identity.
    pub fn key_of(&self, character: &CharacterRef) -> Option<&str> {
        self.characters
            .iter()
            .find(|(_, c)| c.ptr_eq(character))
            .map(|(k, _)| k.as_str())
    }

    /// `prefix` if unused, otherwise the first unused `prefix_<n>` with `n >= 2`.
    pub fn free_key(&self, prefix: &str) -> String {
        if !self.characters.contains_key(prefix) {
            return prefix.to_owned();
        }
        (2u64..)
            .map(|n| format!("{prefix}_{n}"))
            .find(|k| !self.characters.contains_key(k))
            .unwrap_or_else(|| prefix.to_owned())
    }

    /// Bytecode blocks in document order.
    pub fn bytecode(&self) -> &[AbcBlock] {
        &self.bytecode
    }

    /// Mutable bytecode blocks.
    pub fn bytecode_mut(&mut self) -> &mut Vec<AbcBlock> {
        &mut self.bytecode
    }

    /// Append a bytecode block.
    pub fn push_bytecode(&mut self, block: AbcBlock) {
        self.bytecode.push(block);
    }

    /// Class the root timeline is bound to.
    pub fn main_class(&self) -> Option<&QName> {
        self.root.class()
    }

    /// Characters placed on the root timeline.
    pub fn root_characters(&self) -> Vec<CharacterRef> {
        self.root.placed_characters()
    }

    /// Resolve a dotted instance path such as `menu.button.label`.
    ///
    /// The first segment is looked up on the root timeline, each further segment on the sprite
    /// placed by the previous one. A missing instance, or descent through a non-sprite, yields
    /// `Ok(None)`. Descending through a placement without a character is a broken reference.
    pub fn lookup_qualified_instance(&self, path: &str) -> WeaveResult<Option<PlaceObject>> {
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return Ok(None);
        };
        let Some(mut current) = self.root.find_instance(first).cloned() else {
            return Ok(None);
        };

        for segment in segments {
            let Some(character) = &current.character else {
                return Err(WeaveError::reference_not_found(
                    "lookup.missing_character",
                    format!(
                        "instance '{}' in path '{path}' has no character",
                        current.name.as_deref().unwrap_or("")
                    ),
                )
                .in_document(&self.name));
            };
            let next = {
                let c = character.borrow();
                match c.as_sprite() {
                    Some(sprite) => sprite.timeline.find_instance(segment).cloned(),
                    None => None,
                }
            };
            match next {
                Some(place) => current = place,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

impl TimelineOwner for Document {
    fn timeline(&self) -> &Timeline {
        &self.root
    }

    fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.root
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
