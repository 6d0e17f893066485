use super::*;
use crate::bytecode::generate::{base_movie_clip, generate_default_class};
use crate::bytecode::name::QName;
use crate::character::font::FontRef;
use crate::character::model::{Shape, StaticText};
use crate::document::dsl::DocumentBuilder;
use crate::foundation::core::{BezPath, Rgba8};

#[test]
fn document_dump_lists_dictionary_and_root_frames() {
    let mut font = Font::new("Sans", "Sans Regular");
    font.glyphs.insert('h', BezPath::new());
    let font = FontRef::new(font);
    let square = Character::Shape(Shape::rect(3.0, 4.0, Rgba8::opaque(0, 0, 0)));
    let hi = Character::StaticText(StaticText::single_run(font.clone(), 10.0, "h"));
    let doc = DocumentBuilder::new("demo")
        .character("box", square)
        .unwrap()
        .character("font", Character::Font(font))
        .unwrap()
        .character("hi", hi)
        .unwrap()
        .place(1, 1, "box", Some("a"))
        .unwrap()
        .remove(2, 1)
        .unwrap()
        .label(2, "end")
        .unwrap()
        .main_class("demo.Main")
        .unwrap()
        .build();

    let text = dump_document(&doc);
    assert!(text.starts_with("document 'demo' v10 24fps stage 550x400\n"));
    assert!(text.contains("main class demo.Main\n"));
    assert!(text.contains("  box: shape 3x4\n"));
    assert!(text.contains("  font: font 'Sans Regular' (1 glyphs)\n"));
    assert!(text.contains("  hi: text \"h\"\n"));
    assert!(text.contains("root timeline: 2 frames, 1 layers, class demo.Main\n"));
    assert!(text.contains("    place @1 #box as 'a'\n"));
    assert!(text.contains("  frame 2 \"end\"\n    remove @1\n"));
}

#[test]
fn timeline_dump_without_document_uses_kinds() {
    let square = Character::Shape(Shape::rect(1.0, 1.0, Rgba8::opaque(0, 0, 0)));
    let doc = DocumentBuilder::new("demo")
        .character("box", square)
        .unwrap()
        .place(1, 1, "box", None)
        .unwrap()
        .build();
    let text = dump_timeline(doc.timeline());
    assert!(text.contains("place @1 <Shape>"));
}

#[test]
fn program_dump_lists_classes_and_methods() {
    let mut p = Program::default();
    let name = QName::parse_dotted("pkg.Hero");
    generate_default_class(&mut p, &name, &base_movie_clip()).unwrap();
    let text = dump_program(&p);
    assert!(text.starts_with("program: 1 scripts, 1 classes, 3 methods\n"));
    let class_line =
        "class pkg.Hero extends flash.display.MovieClip protected protected(\"pkg:Hero\")\n";
    assert!(text.contains(class_line));
    assert!(text.contains("method 0 pkg.Hero/pkg.Hero: 5 instructions\n"));
}

#[test]
fn font_dump_lists_code_points() {
    let mut font = Font::new("Sans", "Sans Bold");
    font.bold = true;
    font.glyphs.insert('b', BezPath::new());
    font.glyphs.insert('a', BezPath::new());
    assert_eq!(
        dump_font(&font),
        "font 'Sans Bold' bold layout=false alignment=false\n  glyphs: \"ab\"\n"
    );
}
