use super::*;
use crate::character::model::{Character, Shape};
use crate::foundation::core::Rgba8;
use crate::timeline::model::Timeline;

fn shape() -> CharacterRef {
    CharacterRef::new(Character::Shape(Shape::rect(1.0, 1.0, Rgba8::opaque(0, 0, 0))))
}

#[test]
fn removal_closes_only_same_layer() {
    let mut tl = Timeline::new();
    let l1 = tl.get_layer(1).unwrap();
    let l2 = tl.get_layer(2).unwrap();
    let place = PlaceObject::new(l1, Some(shape()));

    assert!(RemoveObject::new(l1, None).closes(&place));
    assert!(!RemoveObject::new(l2, None).closes(&place));
}

#[test]
fn removal_with_character_requires_that_character() {
    let mut tl = Timeline::new();
    let layer = tl.get_layer(1).unwrap();
    let a = shape();
    let b = shape();
    let place = PlaceObject::new(layer, Some(a.clone()));

    assert!(RemoveObject::new(layer, Some(a)).closes(&place));
    assert!(!RemoveObject::new(layer, Some(b.clone())).closes(&place));
    let bare = PlaceObject::new(layer, None);
    assert!(!RemoveObject::new(layer, Some(b)).closes(&bare));
}

#[test]
fn clone_onto_moves_layer_shares_character_and_suffixes_name() {
    let mut src = Timeline::new();
    let mut dst = Timeline::new();
    let from = src.get_layer(1).unwrap();
    let to = dst.get_layer(3).unwrap();
    let character = shape();

    let item = DisplayListItem::Place(
        PlaceObject::new(from, Some(character.clone()))
            .named("hero")
            .with_transform(Affine::translate((5.0, 6.0))),
    );
    let DisplayListItem::Place(copy) = item.clone_onto(to, Some("$7")) else {
        panic!("expected a placement");
    };
    assert_eq!(copy.layer, to);
    assert_eq!(copy.name.as_deref(), Some("hero$7"));
    assert_eq!(copy.transform, Affine::translate((5.0, 6.0)));
    assert!(copy.character.as_ref().unwrap().ptr_eq(&character));

    let plain = item.clone_onto(to, None);
    assert_eq!(plain.instance_name(), Some("hero"));
}

#[test]
fn clone_onto_keeps_removals_unnamed() {
    let mut tl = Timeline::new();
    let a = tl.get_layer(1).unwrap();
    let b = tl.get_layer(2).unwrap();
    let item = DisplayListItem::Remove(RemoveObject::new(a, None));
    let copy = item.clone_onto(b, Some("$1"));
    assert_eq!(copy.layer(), b);
    assert_eq!(copy.instance_name(), None);
}
