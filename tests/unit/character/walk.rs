use super::*;
use crate::character::font::Font;
use crate::character::model::{Shape, Sprite, StaticText};
use crate::foundation::core::Rgba8;
use crate::timeline::display::PlaceObject;

fn shape() -> CharacterRef {
    CharacterRef::new(Character::Shape(Shape::rect(1.0, 1.0, Rgba8::opaque(0, 0, 0))))
}

fn sprite_of(children: &[CharacterRef]) -> CharacterRef {
    let mut sprite = Sprite::default();
    for (i, child) in children.iter().enumerate() {
        let layer = sprite.timeline.get_layer(i as u16 + 1).unwrap();
        sprite
            .timeline
            .place(1, PlaceObject::new(layer, Some(child.clone())))
            .unwrap();
    }
    CharacterRef::new(Character::Sprite(sprite))
}

#[test]
fn walk_visits_parents_before_children() {
    let leaf = shape();
    let inner = sprite_of(&[leaf.clone()]);
    let outer = sprite_of(&[inner.clone()]);

    let mut seen = Vec::new();
    for_each_character(&[outer.clone()], &mut |c| seen.push(c.clone()));
    assert_eq!(seen, vec![outer, inner, leaf]);
}

#[test]
fn fonts_are_found_through_font_and_text_characters() {
    let font = FontRef::new(Font::new("Sans", "Sans Regular"));
    let other = FontRef::new(Font::new("Mono", "Mono Regular"));
    let run = StaticText::single_run(font.clone(), 10.0, "x");
    let text = CharacterRef::new(Character::StaticText(run));
    let font_char = CharacterRef::new(Character::Font(font.clone()));
    let other_char = CharacterRef::new(Character::Font(other.clone()));
    let root = sprite_of(&[text, font_char, other_char, shape()]);

    let mut visits = 0;
    for_each_font(&[root.clone()], &mut |_| visits += 1);
    assert_eq!(visits, 3);

    let fonts = collect_fonts(&[root]);
    assert_eq!(fonts, vec![font, other]);
}

#[test]
fn font_refs_can_be_repointed_in_place() {
    let old = FontRef::new(Font::new("Sans", "Sans Regular"));
    let new = FontRef::new(Font::new("Sans", "Sans Regular"));
    let run = StaticText::single_run(old.clone(), 10.0, "x");
    let text = CharacterRef::new(Character::StaticText(run));
    let root = sprite_of(&[text.clone()]);

    for_each_font_ref_mut(&[root], &mut |font| {
        if font.ptr_eq(&old) {
            *font = new.clone();
        }
    });

    let c = text.borrow();
    let Character::StaticText(t) = &*c else {
        panic!("not text");
    };
    assert!(t.records[0].font.as_ref().unwrap().ptr_eq(&new));
}
