use super::*;
use crate::character::model::Shape;
use crate::foundation::core::Rgba8;

#[test]
fn builder_places_registered_characters() {
    let square = Character::Shape(Shape::rect(2.0, 2.0, Rgba8::opaque(9, 9, 9)));
    let doc = DocumentBuilder::new("host")
        .frame_rate(30.0)
        .stage(320.0, 240.0)
        .character("box", square)
        .unwrap()
        .place(1, 1, "box", Some("a"))
        .unwrap()
        .remove(3, 1)
        .unwrap()
        .label(3, "done")
        .unwrap()
        .build();

    assert_eq!(doc.frame_rate, 30.0);
    assert_eq!(doc.stage, Rect::new(0.0, 0.0, 320.0, 240.0));
    assert_eq!(doc.timeline().frame_count(), 3);
    assert_eq!(doc.timeline().frame(3).unwrap().label(), Some("done"));
    assert_eq!(doc.root_characters().len(), 1);
}

#[test]
fn placing_an_unknown_key_fails() {
    let err = DocumentBuilder::new("host")
        .place(1, 1, "ghost", None)
        .err()
        .unwrap();
    assert_eq!(err.tag(), Some("dsl.missing_character"));
    assert_eq!(err.document(), Some("host"));
}

#[test]
fn sprite_builder_binds_classes_and_pads_frames() {
    let sprite = SpriteBuilder::new()
        .frames(4)
        .class("pkg.Hero")
        .unwrap()
        .build();
    assert_eq!(sprite.timeline.frame_count(), 4);
    let class = QName::parse_dotted("pkg.Hero");
    assert_eq!(sprite.timeline.class(), Some(&class));
}

#[test]
fn bytecode_blocks_are_kept_in_order() {
    let doc = DocumentBuilder::new("host")
        .bytecode(AbcBlock::empty("first"))
        .bytecode(AbcBlock::empty("second"))
        .build();
    let names: Vec<&str> = doc.bytecode().iter().map(AbcBlock::name).collect();
    assert_eq!(names, vec!["first", "second"]);
}
