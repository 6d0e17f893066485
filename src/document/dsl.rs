use crate::{
    bytecode::block::AbcBlock,
    bytecode::name::QName,
    character::model::{Character, CharacterRef, Sprite},
    document::model::Document,
    foundation::core::{Affine, Rect},
    foundation::error::{WeaveError, WeaveResult},
    timeline::display::{DisplayListItem, PlaceObject, RemoveObject},
    timeline::model::{Timeline, TimelineOwner},
};

/// Builder for [`Document`](crate::Document).
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    /// Create a builder for a new document named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            doc: Document::new(name),
        }
    }

    /// Set playback rate.
    pub fn frame_rate(mut self, fps: f64) -> Self {
        self.doc.frame_rate = fps;
        self
    }

    /// Set stage size.
    pub fn stage(mut self, width: f64, height: f64) -> Self {
        self.doc.stage = Rect::new(0.0, 0.0, width, height);
        self
    }

    /// Register a character under unique key.
    pub fn character(mut self, key: impl Into<String>, character: Character) -> WeaveResult<Self> {
        self.doc.define_character(key, character)?;
        Ok(self)
    }

    /// Register an existing shared character under unique key.
    pub fn shared_character(
        mut self,
        key: impl Into<String>,
        character: CharacterRef,
    ) -> WeaveResult<Self> {
        self.doc.insert_character(key, character)?;
        Ok(self)
    }

    /// Place the character registered under `key` on the root timeline.
    pub fn place(self, frame: u32, depth: u16, key: &str, name: Option<&str>) -> WeaveResult<Self> {
        self.place_with(frame, depth, key, name, Affine::IDENTITY)
    }

    /// Place the character registered under `key` with a transform.
    pub fn place_with(
        mut self,
        frame: u32,
        depth: u16,
        key: &str,
        name: Option<&str>,
        transform: Affine,
    ) -> WeaveResult<Self> {
        let character = self.doc.character(key).cloned().ok_or_else(|| {
            WeaveError::reference_not_found(
                "dsl.missing_character",
                format!("no character registered under '{key}'"),
            )
            .in_document(self.doc.name())
        })?;
        place_on(
            self.doc.timeline_mut(),
            frame,
            depth,
            Some(character),
            name,
            transform,
        )?;
        Ok(self)
    }

    /// Place an instance without a character (a bare move of whatever the layer holds).
    pub fn place_empty(mut self, frame: u32, depth: u16, name: Option<&str>) -> WeaveResult<Self> {
        place_on(
            self.doc.timeline_mut(),
            frame,
            depth,
            None,
            name,
            Affine::IDENTITY,
        )?;
        Ok(self)
    }

    /// Close whatever is open at `depth` in `frame`.
    pub fn remove(mut self, frame: u32, depth: u16) -> WeaveResult<Self> {
        remove_on(self.doc.timeline_mut(), frame, depth)?;
        Ok(self)
    }

    /// Label a root frame.
    pub fn label(mut self, frame: u32, label: impl Into<String>) -> WeaveResult<Self> {
        self.doc
            .timeline_mut()
            .get_frame(frame)?
            .set_label(Some(label.into()));
        Ok(self)
    }

    /// Append a bytecode block.
    pub fn bytecode(mut self, block: AbcBlock) -> Self {
        self.doc.push_bytecode(block);
        self
    }

    /// Bind the root timeline to the dotted class name `class`.
    pub fn main_class(mut self, class: &str) -> WeaveResult<Self> {
        self.doc
            .timeline_mut()
            .bind_class(QName::parse_dotted(class))?;
        Ok(self)
    }

    /// Finish the document.
    pub fn build(self) -> Document {
        self.doc
    }
}

/// Builder for sprite characters.
#[derive(Default)]
pub struct SpriteBuilder {
    timeline: Timeline,
}

impl SpriteBuilder {
    /// Create an empty sprite builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `character` at `depth` in `frame`.
    pub fn place(
        mut self,
        frame: u32,
        depth: u16,
        character: &CharacterRef,
        name: Option<&str>,
    ) -> WeaveResult<Self> {
        let character = Some(character.clone());
        place_on(
            &mut self.timeline,
            frame,
            depth,
            character,
            name,
            Affine::IDENTITY,
        )?;
        Ok(self)
    }

    /// Place an instance without a character.
    pub fn place_empty(mut self, frame: u32, depth: u16, name: Option<&str>) -> WeaveResult<Self> {
        place_on(
            &mut self.timeline,
            frame,
            depth,
            None,
            name,
            Affine::IDENTITY,
        )?;
        Ok(self)
    }

    /// Close whatever is open at `depth` in `frame`.
    pub fn remove(mut self, frame: u32, depth: u16) -> WeaveResult<Self> {
        remove_on(&mut self.timeline, frame, depth)?;
        Ok(self)
    }

    /// Make sure the sprite has at least `count` frames.
    pub fn frames(mut self, count: usize) -> Self {
        self.timeline.ensure_frame_count(count);
        self
    }

    /// Bind the sprite's timeline to the dotted class name `class`.
    pub fn class(mut self, class: &str) -> WeaveResult<Self> {
        self.timeline.bind_class(QName::parse_dotted(class))?;
        Ok(self)
    }

    /// Finish as a sprite value.
    pub fn build(self) -> Sprite {
        Sprite::from_timeline(self.timeline)
    }

    /// Finish as a shared character.
    pub fn build_ref(self) -> CharacterRef {
        CharacterRef::new(Character::Sprite(self.build()))
    }
}

fn place_on(
    timeline: &mut Timeline,
    frame: u32,
    depth: u16,
    character: Option<CharacterRef>,
    name: Option<&str>,
    transform: Affine,
) -> WeaveResult<()> {
    let layer = timeline.get_layer(depth)?;
    let mut place = PlaceObject::new(layer, character).with_transform(transform);
    if let Some(name) = name {
        place = place.named(name);
    }
    timeline.place(frame, place)
}

fn remove_on(timeline: &mut Timeline, frame: u32, depth: u16) -> WeaveResult<()> {
    let layer = timeline.get_layer(depth)?;
    let item = DisplayListItem::Remove(RemoveObject::new(layer, None));
    timeline.add_display_item(frame, item)
}

#[cfg(test)]
#[path = "../../tests/unit/document/dsl.rs"]
mod tests;
