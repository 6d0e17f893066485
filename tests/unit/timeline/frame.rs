use super::*;
use crate::timeline::display::RemoveObject;
use crate::timeline::model::Timeline;

#[test]
fn push_indexes_named_placements() {
    let mut tl = Timeline::new();
    let layer = tl.get_layer(1).unwrap();
    let mut frame = Frame::default();

    frame
        .push(DisplayListItem::Place(PlaceObject::new(layer, None).named("a")))
        .unwrap();
    frame
        .push(DisplayListItem::Remove(RemoveObject::new(layer, None)))
        .unwrap();
    frame
        .push(DisplayListItem::Place(PlaceObject::new(layer, None).named("b")))
        .unwrap();

    assert_eq!(frame.len(), 3);
    assert_eq!(frame.instance_names(), vec!["a", "b"]);
    assert!(frame.instance("b").is_some());
    assert!(frame.instance("c").is_none());
}

#[test]
fn duplicate_instance_name_is_rejected() {
    let mut tl = Timeline::new();
    let layer = tl.get_layer(1).unwrap();
    let mut frame = Frame::default();
    frame
        .push(DisplayListItem::Place(PlaceObject::new(layer, None).named("a")))
        .unwrap();

    let err = frame
        .push(DisplayListItem::Place(PlaceObject::new(layer, None).named("a")))
        .unwrap_err();
    assert_eq!(err.tag(), Some("frame.duplicate_instance"));
    assert_eq!(frame.len(), 1);
}

#[test]
fn remove_at_reindexes_remaining_names() {
    let mut tl = Timeline::new();
    let layer = tl.get_layer(1).unwrap();
    let mut frame = Frame::default();
    for name in ["a", "b", "c"] {
        frame
            .push(DisplayListItem::Place(PlaceObject::new(layer, None).named(name)))
            .unwrap();
    }

    frame.remove_at(&[0, 0, 9]);
    assert_eq!(frame.instance_names(), vec!["b", "c"]);
    assert_eq!(frame.instance("c").unwrap().name.as_deref(), Some("c"));
    assert_eq!(frame.items()[0].instance_name(), Some("b"));
}

#[test]
fn label_round_trips() {
    let mut frame = Frame::default();
    assert!(frame.is_empty());
    frame.set_label(Some("intro".to_owned()));
    assert_eq!(frame.label(), Some("intro"));
}
