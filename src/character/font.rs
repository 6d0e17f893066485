use std::{
    cell::{Ref, RefCell, RefMut},
    collections::{BTreeMap, BTreeSet},
    fmt,
    rc::Rc,
};

use crate::foundation::{
    core::{BezPath, Rect},
    ids::PtrKey,
};

/// Shared handle to a [`Font`].
///
/// Text characters reference fonts through this handle; equality is identity.
#[derive(Clone)]
pub struct FontRef(Rc<RefCell<Font>>);

impl FontRef {
    /// Wrap a font into a new shared handle.
    pub fn new(font: Font) -> Self {
        Self(Rc::new(RefCell::new(font)))
    }

    /// Immutably borrow the font.
    pub fn borrow(&self) -> Ref<'_, Font> {
        self.0.borrow()
    }

    /// Mutably borrow the font.
    pub fn borrow_mut(&self) -> RefMut<'_, Font> {
        self.0.borrow_mut()
    }

    /// Return `true` when both handles share the same font.
    pub fn ptr_eq(&self, other: &FontRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn key(&self) -> PtrKey {
        PtrKey::of(Rc::as_ptr(&self.0))
    }
}

impl PartialEq for FontRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for FontRef {}

impl fmt::Debug for FontRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(font) => write!(f, "FontRef({:?}@{:p})", font.full_name, Rc::as_ptr(&self.0)),
            Err(_) => write!(f, "FontRef(<borrowed>@{:p})", Rc::as_ptr(&self.0)),
        }
    }
}

/// Advance and bounds of one glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphLayout {
    /// Horizontal advance.
    pub advance: f64,
    /// Glyph bounds.
    pub bounds: Rect,
}

/// Pixel-grid alignment hints for one glyph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelAlignment {
    /// Alignment zones as `[position, size]` pairs.
    pub zones: Vec<[f64; 2]>,
    /// Snap horizontally.
    pub align_x: bool,
    /// Snap vertically.
    pub align_y: bool,
}

/// Kerning adjustment applied between two code points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KerningPair {
    /// Left code point.
    pub left: char,
    /// Right code point.
    pub right: char,
    /// Advance adjustment.
    pub adjustment: f64,
}

/// Properties that decide whether two fonts are "the same" for glyph merging.
///
/// Glyph content is deliberately not part of the key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontMergeKey {
    /// Full font name.
    pub full_name: String,
    /// Bold style.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Small-text rendering flag.
    pub small: bool,
    /// Whether per-glyph layout is present.
    pub has_layout: bool,
    /// Whether pixel-alignment hints are present.
    pub has_pixel_alignment: bool,
}

/// Embedded font with sparse glyphs keyed by code point.
#[derive(Clone, Debug, Default)]
pub struct Font {
    /// Short font name.
    pub name: String,
    /// Full font name.
    pub full_name: String,
    /// Copyright notice.
    pub copyright: Option<String>,
    /// Bold style.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Small-text rendering flag.
    pub small: bool,
    /// Ascent above the baseline.
    pub ascent: f64,
    /// Descent below the baseline.
    pub descent: f64,
    /// Line gap.
    pub leading: f64,
    /// Glyph outlines.
    pub glyphs: BTreeMap<char, BezPath>,
    /// Per-glyph layout, when the font carries layout data.
    pub layout: Option<BTreeMap<char, GlyphLayout>>,
    /// Per-glyph alignment hints, when present.
    pub pixel_alignment: Option<BTreeMap<char, PixelAlignment>>,
    /// Kerning table, when present.
    pub kerning: Option<Vec<KerningPair>>,
}

impl Font {
    /// Empty font with the given short and full name.
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    /// Whether per-glyph layout is present.
    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    /// Whether pixel-alignment hints are present.
    pub fn has_pixel_alignment(&self) -> bool {
        self.pixel_alignment.is_some()
    }

    /// Code points with a glyph, ascending.
    pub fn code_points(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }

    /// Merge-equivalence key of this font.
    pub fn merge_key(&self) -> FontMergeKey {
        FontMergeKey {
            full_name: self.full_name.clone(),
            bold: self.bold,
            italic: self.italic,
            small: self.small,
            has_layout: self.has_layout(),
            has_pixel_alignment: self.has_pixel_alignment(),
        }
    }

    /// Return `true` when `other` may donate glyphs to `self`.
    pub fn is_merge_equivalent(&self, other: &Font) -> bool {
        self.full_name == other.full_name
            && self.bold == other.bold
            && self.italic == other.italic
            && self.small == other.small
            && self.has_layout() == other.has_layout()
            && self.has_pixel_alignment() == other.has_pixel_alignment()
    }

    /// Copy every glyph of `donor` missing from `self` and return how many were added.
    ///
    /// Existing glyphs are never replaced. Layout and alignment entries follow their glyph only
    /// when the donor has them. Donor kerning pairs touching an added code point are appended when
    /// both fonts keep a kerning table.
    pub fn union_missing_from(&mut self, donor: &Font) -> usize {
        let mut added = BTreeSet::new();
        for (&cp, shape) in &donor.glyphs {
            if self.glyphs.contains_key(&cp) {
                continue;
            }
            self.glyphs.insert(cp, shape.clone());
            if let (Some(dst), Some(src)) = (self.pixel_alignment.as_mut(), &donor.pixel_alignment)
                && let Some(entry) = src.get(&cp)
            {
                dst.insert(cp, entry.clone());
            }
            if let (Some(dst), Some(src)) = (self.layout.as_mut(), &donor.layout)
                && let Some(entry) = src.get(&cp)
            {
                dst.insert(cp, *entry);
            }
            added.insert(cp);
        }

        if let (Some(dst), Some(src)) = (self.kerning.as_mut(), &donor.kerning) {
            for pair in src {
                if !(added.contains(&pair.left) || added.contains(&pair.right)) {
                    continue;
                }
                if dst
                    .iter()
                    .any(|p| p.left == pair.left && p.right == pair.right)
                {
                    continue;
                }
                dst.push(*pair);
            }
        }

        added.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/character/font.rs"]
mod tests;
