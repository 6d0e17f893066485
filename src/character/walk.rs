//! Visitor walks over the character graph.
//!
//! Walks descend into sprite timelines but carry no cycle detection: the graph must be acyclic.

use std::collections::HashSet;

use crate::character::{
    font::FontRef,
    model::{Character, CharacterRef},
};

/// Visit every character reachable from `roots`, parents before the contents of their timelines.
///
/// A character placed several times is visited once per path that reaches it.
pub fn for_each_character(roots: &[CharacterRef], f: &mut dyn FnMut(&CharacterRef)) {
    for root in roots {
        visit(root, f);
    }
}

fn visit(character: &CharacterRef, f: &mut dyn FnMut(&CharacterRef)) {
    f(character);
    let children = {
        let c = character.borrow();
        match &*c {
            Character::Sprite(sprite) => sprite.timeline.placed_characters(),
            _ => Vec::new(),
        }
    };
    for child in &children {
        visit(child, f);
    }
}

/// Visit every font reachable from `roots`: font characters and the fonts text characters use.
pub fn for_each_font(roots: &[CharacterRef], f: &mut dyn FnMut(&FontRef)) {
    for_each_character(roots, &mut |character| {
        let c = character.borrow();
        match &*c {
            Character::Font(font) => f(font),
            Character::StaticText(text) => {
                for font in text.records.iter().filter_map(|r| r.font.as_ref()) {
                    f(font);
                }
            }
            Character::EditText(text) => {
                if let Some(font) = &text.font {
                    f(font);
                }
            }
            Character::Shape(_)
            | Character::MorphShape(_)
            | Character::Sprite(_)
            | Character::Image(_) => {}
        }
    });
}

/// Visit every font reference held by a text character reachable from `roots`, mutably.
pub fn for_each_font_ref_mut(roots: &[CharacterRef], f: &mut dyn FnMut(&mut FontRef)) {
    for_each_character(roots, &mut |character| {
        let mut c = character.borrow_mut();
        match &mut *c {
            Character::StaticText(text) => {
                for font in text.records.iter_mut().filter_map(|r| r.font.as_mut()) {
                    f(font);
                }
            }
            Character::EditText(text) => {
                if let Some(font) = text.font.as_mut() {
                    f(font);
                }
            }
            Character::Font(_)
            | Character::Shape(_)
            | Character::MorphShape(_)
            | Character::Sprite(_)
            | Character::Image(_) => {}
        }
    });
}

/// Distinct fonts reachable from `roots`, in discovery order.
pub fn collect_fonts(roots: &[CharacterRef]) -> Vec<FontRef> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for_each_font(roots, &mut |font| {
        if seen.insert(font.key()) {
            out.push(font.clone());
        }
    });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/character/walk.rs"]
mod tests;
