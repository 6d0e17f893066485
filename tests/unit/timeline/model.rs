use super::*;
use crate::character::model::{Character, Shape};
use crate::foundation::error::ErrorKind;
use crate::foundation::core::Rgba8;
use crate::timeline::display::RemoveObject;

fn shape() -> CharacterRef {
    CharacterRef::new(Character::Shape(Shape::rect(1.0, 1.0, Rgba8::opaque(0, 0, 0))))
}

fn remove(layer: LayerHandle) -> DisplayListItem {
    DisplayListItem::Remove(RemoveObject::new(layer, None))
}

#[test]
fn get_frame_extends_with_empty_frames() {
    let mut tl = Timeline::new();
    tl.get_frame(5).unwrap();
    assert_eq!(tl.frame_count(), 5);
    assert!(tl.frames().iter().all(Frame::is_empty));

    tl.get_frame(2).unwrap();
    assert_eq!(tl.frame_count(), 5);

    tl.ensure_frame_count(3);
    assert_eq!(tl.frame_count(), 5);
    tl.ensure_frame_count(8);
    assert_eq!(tl.frame_count(), 8);
    assert!(tl.frame(8).is_some());
    assert!(tl.frame(9).is_none());
    assert!(tl.frame(0).is_none());
}

#[test]
fn frame_and_layer_zero_are_rejected() {
    let mut tl = Timeline::new();
    let err = tl.get_frame(0).unwrap_err();
    assert_eq!(err.tag(), Some("timeline.frame_zero"));
    let err = tl.get_layer(0).unwrap_err();
    assert_eq!(err.tag(), Some("timeline.layer_zero"));
}

#[test]
fn get_layer_extends_and_free_layers_go_in_front() {
    let mut tl = Timeline::new();
    let third = tl.get_layer(3).unwrap();
    assert_eq!(tl.layer_count(), 3);
    assert_eq!(third.depth(), 3);
    assert_eq!(tl.get_layer(3).unwrap(), third);

    let front = tl.get_free_layer(LayerPosition::Front).unwrap();
    assert_eq!(front.depth(), 4);
    let depths: Vec<_> = tl.layers().map(LayerHandle::depth).collect();
    assert_eq!(depths, vec![1, 2, 3, 4]);
}

#[test]
fn back_layer_allocation_is_a_contract_violation() {
    let mut tl = Timeline::new();
    let err = tl.get_free_layer(LayerPosition::Back).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.tag(), Some("timeline.back_layer"));
    assert_eq!(tl.layer_count(), 0);
}

#[test]
fn items_on_foreign_layers_are_rejected() {
    let mut a = Timeline::new();
    let mut b = Timeline::new();
    let foreign = b.get_layer(1).unwrap();
    a.get_layer(1).unwrap();

    let placement = PlaceObject::new(foreign, Some(shape()));
    let err = a.place(1, placement).unwrap_err();
    assert_eq!(err.tag(), Some("timeline.foreign_layer"));
    assert!(a.resolve_layer(foreign).is_err());
}

#[test]
fn find_instance_scans_frames_in_order() {
    let mut tl = Timeline::new();
    let layer = tl.get_layer(1).unwrap();
    let first = shape();
    let hero = PlaceObject::new(layer, Some(first.clone())).named("hero");
    tl.place(2, hero).unwrap();
    tl.add_display_item(3, remove(layer)).unwrap();
    tl.place(4, PlaceObject::new(layer, Some(shape())).named("hero"))
        .unwrap();

    let found = tl.find_instance("hero").unwrap();
    assert!(found.character.as_ref().unwrap().ptr_eq(&first));
    assert!(tl.find_instance("villain").is_none());
}

#[test]
fn remove_instance_deletes_placements_and_their_removals() {
    let mut tl = Timeline::new();
    let hero_layer = tl.get_layer(1).unwrap();
    let other_layer = tl.get_layer(2).unwrap();
    tl.place(1, PlaceObject::new(hero_layer, Some(shape())).named("hero"))
        .unwrap();
    let other = PlaceObject::new(other_layer, Some(shape())).named("other");
    tl.place(1, other).unwrap();
    tl.add_display_item(2, remove(hero_layer)).unwrap();
    tl.add_display_item(2, remove(other_layer)).unwrap();

    assert!(tl.remove_instance("hero"));
    assert!(tl.find_instance("hero").is_none());
    assert_eq!(tl.frame(1).unwrap().len(), 1);
    assert_eq!(tl.frame(2).unwrap().len(), 1);
    assert_eq!(tl.frame(2).unwrap().items()[0].layer(), other_layer);
    assert!(tl.find_instance("other").is_some());
}

#[test]
fn remove_instance_is_idempotent() {
    let mut tl = Timeline::new();
    let layer = tl.get_layer(1).unwrap();
    tl.place(1, PlaceObject::new(layer, Some(shape())).named("hero"))
        .unwrap();
    tl.add_display_item(3, remove(layer)).unwrap();

    assert!(tl.remove_instance("hero"));
    let frames_after_first = tl.frame_count();
    assert!(!tl.remove_instance("hero"));
    assert_eq!(tl.frame_count(), frames_after_first);
    assert!(tl.frames().iter().all(Frame::is_empty));
}

#[test]
fn unmatched_removal_stays_inert() {
    let mut tl = Timeline::new();
    let layer = tl.get_layer(1).unwrap();
    tl.add_display_item(1, remove(layer)).unwrap();
    tl.place(2, PlaceObject::new(layer, Some(shape())).named("hero"))
        .unwrap();

    assert!(tl.remove_instance("hero"));
    assert_eq!(tl.frame(1).unwrap().len(), 1);
    assert!(tl.frame(2).unwrap().is_empty());
}

#[test]
fn placed_characters_are_distinct_in_first_use_order() {
    let mut tl = Timeline::new();
    let layer = tl.get_layer(1).unwrap();
    let a = shape();
    let b = shape();
    tl.place(1, PlaceObject::new(layer, Some(a.clone())))
        .unwrap();
    tl.add_display_item(2, remove(layer)).unwrap();
    tl.place(3, PlaceObject::new(layer, Some(b.clone())))
        .unwrap();
    tl.add_display_item(4, remove(layer)).unwrap();
    tl.place(5, PlaceObject::new(layer, Some(a.clone())))
        .unwrap();

    assert_eq!(tl.placed_characters(), vec![a, b]);
}

#[test]
fn class_binding_is_sticky() {
    let mut tl = Timeline::new();
    let hero = QName::parse_dotted("pkg.Hero");
    tl.bind_class(hero.clone()).unwrap();
    tl.bind_class(hero.clone()).unwrap();
    assert_eq!(tl.class(), Some(&hero));

    let villain = QName::parse_dotted("pkg.Villain");
    let err = tl.bind_class(villain).unwrap_err();
    assert_eq!(err.tag(), Some("timeline.class_rebound"));
}
