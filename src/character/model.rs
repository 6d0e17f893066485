use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
    sync::Arc,
};

use crate::{
    character::font::FontRef,
    foundation::core::{Affine, BezPath, Rect, Rgba8, Vec2},
    foundation::ids::PtrKey,
    timeline::model::{Timeline, TimelineOwner},
};

/// Shared handle to a [`Character`].
///
/// Equality is identity: two handles are equal only when they point at the same allocation.
#[derive(Clone)]
pub struct CharacterRef(Rc<RefCell<Character>>);

impl CharacterRef {
    /// Wrap a character into a new shared handle.
    pub fn new(character: Character) -> Self {
        Self(Rc::new(RefCell::new(character)))
    }

    /// Immutably borrow the character.
    pub fn borrow(&self) -> Ref<'_, Character> {
        self.0.borrow()
    }

    /// Mutably borrow the character.
    pub fn borrow_mut(&self) -> RefMut<'_, Character> {
        self.0.borrow_mut()
    }

    /// Return `true` when both handles share the same character.
    pub fn ptr_eq(&self, other: &CharacterRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Kind of the referenced character.
    pub fn kind(&self) -> CharacterKind {
        self.0.borrow().kind()
    }

    pub(crate) fn key(&self) -> PtrKey {
        PtrKey::of(Rc::as_ptr(&self.0))
    }
}

impl PartialEq for CharacterRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for CharacterRef {}

impl fmt::Debug for CharacterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(c) => write!(f, "CharacterRef({:?}@{:p})", c.kind(), Rc::as_ptr(&self.0)),
            Err(_) => write!(f, "CharacterRef(<borrowed>@{:p})", Rc::as_ptr(&self.0)),
        }
    }
}

/// Discriminant of [`Character`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharacterKind {
    /// Static vector shape.
    Shape,
    /// Shape interpolated between two states by a ratio.
    MorphShape,
    /// Nested timeline.
    Sprite,
    /// Static text block.
    StaticText,
    /// Editable or dynamic text field.
    EditText,
    /// Embedded font.
    Font,
    /// Bitmap image.
    Image,
}

/// Everything that can be defined in a document's character dictionary.
#[derive(Debug)]
pub enum Character {
    /// Static vector shape.
    Shape(Shape),
    /// Morph shape.
    MorphShape(MorphShape),
    /// Nested timeline.
    Sprite(Sprite),
    /// Static text.
    StaticText(StaticText),
    /// Edit text.
    EditText(EditText),
    /// Embedded font, shared with the text characters that use it.
    Font(FontRef),
    /// Bitmap.
    Image(Image),
}

impl Character {
    /// Discriminant of this character.
    pub fn kind(&self) -> CharacterKind {
        match self {
            Self::Shape(_) => CharacterKind::Shape,
            Self::MorphShape(_) => CharacterKind::MorphShape,
            Self::Sprite(_) => CharacterKind::Sprite,
            Self::StaticText(_) => CharacterKind::StaticText,
            Self::EditText(_) => CharacterKind::EditText,
            Self::Font(_) => CharacterKind::Font,
            Self::Image(_) => CharacterKind::Image,
        }
    }

    /// Borrow the sprite payload, if this is a sprite.
    pub fn as_sprite(&self) -> Option<&Sprite> {
        match self {
            Self::Sprite(s) => Some(s),
            _ => None,
        }
    }

    /// Mutably borrow the sprite payload, if this is a sprite.
    pub fn as_sprite_mut(&mut self) -> Option<&mut Sprite> {
        match self {
            Self::Sprite(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the font handle, if this is a font.
    pub fn as_font(&self) -> Option<&FontRef> {
        match self {
            Self::Font(f) => Some(f),
            _ => None,
        }
    }

    /// Bounds of the character where statically known.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Shape(s) => Some(s.bounds),
            Self::MorphShape(m) => Some(m.start_bounds.union(m.end_bounds)),
            Self::StaticText(t) => Some(t.bounds),
            Self::EditText(t) => Some(t.bounds),
            Self::Image(i) => Some(Rect::new(0.0, 0.0, f64::from(i.width), f64::from(i.height))),
            Self::Sprite(_) | Self::Font(_) => None,
        }
    }
}

/// Static vector shape.
#[derive(Clone, Debug)]
pub struct Shape {
    /// Outer bounds including strokes.
    pub bounds: Rect,
    /// Outline geometry.
    pub path: BezPath,
    /// Solid fill, if any.
    pub fill: Option<Rgba8>,
}

impl Shape {
    /// Axis-aligned filled rectangle with origin at `(0, 0)`.
    pub fn rect(width: f64, height: f64, fill: Rgba8) -> Self {
        let bounds = Rect::new(0.0, 0.0, width, height);
        Self {
            bounds,
            path: kurbo::Shape::to_path(&bounds, 0.1),
            fill: Some(fill),
        }
    }
}

/// Two-state shape interpolated by a placement ratio.
#[derive(Clone, Debug)]
pub struct MorphShape {
    /// Bounds at ratio 0.
    pub start_bounds: Rect,
    /// Bounds at ratio 65535.
    pub end_bounds: Rect,
    /// Outline at ratio 0.
    pub start: BezPath,
    /// Outline at ratio 65535.
    pub end: BezPath,
}

/// A character that owns a nested timeline.
#[derive(Debug, Default)]
pub struct Sprite {
    /// Frames and layers of the sprite.
    pub timeline: Timeline,
}

impl Sprite {
    /// Wrap an existing timeline.
    pub fn from_timeline(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

impl TimelineOwner for Sprite {
    fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }
}

/// One glyph of a text record, addressed by code point in the record's font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphEntry {
    /// Code point rendered by this entry.
    pub code_point: char,
    /// Horizontal advance in twips-derived units.
    pub advance: f64,
}

/// A run of glyphs sharing font, height and color.
#[derive(Clone, Debug)]
pub struct TextRecord {
    /// Font used by the run; `None` continues the previous record's font.
    pub font: Option<FontRef>,
    /// Glyph height.
    pub height: f64,
    /// Run color; `None` continues the previous record's color.
    pub color: Option<Rgba8>,
    /// Offset of the run.
    pub offset: Vec2,
    /// Glyphs of the run.
    pub glyphs: Vec<GlyphEntry>,
}

/// Static text block.
#[derive(Clone, Debug)]
pub struct StaticText {
    /// Text bounds.
    pub bounds: Rect,
    /// Text matrix.
    pub transform: Affine,
    /// Glyph runs.
    pub records: Vec<TextRecord>,
}

impl StaticText {
    /// Single-run text laid out with unit advances, for programmatic construction.
    pub fn single_run(font: FontRef, height: f64, text: &str) -> Self {
        let glyphs: Vec<GlyphEntry> = text
            .chars()
            .map(|code_point| GlyphEntry {
                code_point,
                advance: height,
            })
            .collect();
        let width = height * glyphs.len() as f64;
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            transform: Affine::IDENTITY,
            records: vec![TextRecord {
                font: Some(font),
                height,
                color: Some(Rgba8::opaque(0, 0, 0)),
                offset: Vec2::ZERO,
                glyphs,
            }],
        }
    }

    /// Text content spelled by the glyph entries.
    pub fn text(&self) -> String {
        self.records
            .iter()
            .flat_map(|r| r.glyphs.iter().map(|g| g.code_point))
            .collect()
    }
}

/// Behavior flags of an edit text field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditTextFlags {
    /// Text wraps at the field bounds.
    pub word_wrap: bool,
    /// Field accepts newlines.
    pub multiline: bool,
    /// Characters are masked.
    pub password: bool,
    /// Field cannot be edited at runtime.
    pub read_only: bool,
    /// Text may be selected.
    pub selectable: bool,
    /// Field draws a border.
    pub border: bool,
    /// Initial text is HTML.
    pub html: bool,
    /// Glyphs come from the embedded font instead of device fonts.
    pub use_outlines: bool,
}

/// Editable or dynamic text field.
#[derive(Clone, Debug)]
pub struct EditText {
    /// Field bounds.
    pub bounds: Rect,
    /// Embedded font, if any.
    pub font: Option<FontRef>,
    /// Font height.
    pub font_height: f64,
    /// Text color.
    pub color: Option<Rgba8>,
    /// Maximum accepted length.
    pub max_length: Option<u16>,
    /// Script variable bound to the field.
    pub variable_name: Option<String>,
    /// Initial contents.
    pub initial_text: Option<String>,
    /// Behavior flags.
    pub flags: EditTextFlags,
}

/// Bitmap image in straight-alpha RGBA8.
#[derive(Clone, Debug)]
pub struct Image {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub rgba8: Arc<Vec<u8>>,
}

#[cfg(test)]
#[path = "../../tests/unit/character/model.rs"]
mod tests;
