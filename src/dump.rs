//! Plain-text dumps of documents, timelines, programs and fonts for debugging and the CLI.
//!
//! Output is deterministic: dictionary order is key order, and characters are named by their
//! dictionary key where the document knows one.

use std::fmt::Write;

use crate::{
    bytecode::program::{Program, TraitKind},
    character::font::Font,
    character::model::{Character, CharacterRef},
    document::model::Document,
    timeline::display::DisplayListItem,
    timeline::model::{Timeline, TimelineOwner},
};

/// Dump document header, dictionary and root timeline.
pub fn dump_document(doc: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "document '{}' v{} {}fps stage {}x{}",
        doc.name(),
        doc.version,
        doc.frame_rate,
        doc.stage.width(),
        doc.stage.height()
    );
    if let Some(class) = doc.main_class() {
        let _ = writeln!(out, "main class {class}");
    }
    let _ = writeln!(out, "characters ({}):", doc.character_count());
    for (key, character) in doc.characters() {
        let _ = writeln!(out, "  {key}: {}", describe(character));
    }
    let _ = writeln!(out, "bytecode blocks ({}):", doc.bytecode().len());
    for block in doc.bytecode() {
        let state = match (block.is_parsed(), block.is_tampered()) {
            (_, true) => "tampered",
            (true, false) => "parsed",
            (false, false) => "raw",
        };
        let _ = writeln!(out, "  {} [{state}]", block.name());
    }
    out.push_str("root ");
    write_timeline(&mut out, doc.timeline(), 0, Some(doc));
    out
}

/// Dump the frames of `timeline`, naming characters by kind.
pub fn dump_timeline(timeline: &Timeline) -> String {
    let mut out = String::new();
    write_timeline(&mut out, timeline, 0, None);
    out
}

fn write_timeline(out: &mut String, timeline: &Timeline, indent: usize, doc: Option<&Document>) {
    let pad = "  ".repeat(indent);
    let _ = write!(
        out,
        "timeline: {} frames, {} layers",
        timeline.frame_count(),
        timeline.layer_count()
    );
    if let Some(class) = timeline.class() {
        let _ = write!(out, ", class {class}");
    }
    out.push('\n');
    for (i, frame) in timeline.frames().iter().enumerate() {
        if frame.is_empty() && frame.label().is_none() {
            continue;
        }
        let _ = write!(out, "{pad}  frame {}", i + 1);
        if let Some(label) = frame.label() {
            let _ = write!(out, " \"{label}\"");
        }
        out.push('\n');
        for item in frame.items() {
            match item {
                DisplayListItem::Place(p) => {
                    let target = p.character.as_ref().map_or_else(
                        || "-".to_owned(),
                        |c| name_of(c, doc),
                    );
                    let _ = write!(out, "{pad}    place @{} {target}", p.layer.depth());
                    if let Some(name) = &p.name {
                        let _ = write!(out, " as '{name}'");
                    }
                    if p.is_move {
                        out.push_str(" (move)");
                    }
                    out.push('\n');
                }
                DisplayListItem::Remove(r) => {
                    let _ = writeln!(out, "{pad}    remove @{}", r.layer.depth());
                }
            }
        }
    }
}

fn name_of(character: &CharacterRef, doc: Option<&Document>) -> String {
    match doc.and_then(|d| d.key_of(character)) {
        Some(key) => format!("#{key}"),
        None => format!("<{:?}>", character.kind()),
    }
}

fn describe(character: &CharacterRef) -> String {
    let c = character.borrow();
    match &*c {
        Character::Shape(s) => format!("shape {}x{}", s.bounds.width(), s.bounds.height()),
        Character::MorphShape(_) => "morph shape".to_owned(),
        Character::Sprite(s) => format!(
            "sprite {} frames{}",
            s.timeline.frame_count(),
            s.timeline
                .class()
                .map(|c| format!(" class {c}"))
                .unwrap_or_default()
        ),
        Character::StaticText(t) => format!("text {:?}", t.text()),
        Character::EditText(t) => format!(
            "edit text{}",
            t.variable_name
                .as_deref()
                .map(|v| format!(" var {v}"))
                .unwrap_or_default()
        ),
        Character::Font(f) => {
            let f = f.borrow();
            format!("font '{}' ({} glyphs)", f.full_name, f.glyphs.len())
        }
        Character::Image(i) => format!("image {}x{}", i.width, i.height),
    }
}

/// Dump classes, their members and method sizes.
pub fn dump_program(program: &Program) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "program: {} scripts, {} classes, {} methods",
        program.scripts.len(),
        program.classes.len(),
        program.methods.len()
    );
    for class in &program.classes {
        let _ = write!(out, "class {}", class.name);
        if let Some(sup) = &class.super_name {
            let _ = write!(out, " extends {sup}");
        }
        if let Some(ns) = &class.protected_ns {
            let _ = write!(out, " protected {ns}");
        }
        out.push('\n');
        for t in class.traits() {
            let kind = match &t.kind {
                TraitKind::Slot { .. } => "var",
                TraitKind::Const { .. } => "const",
                TraitKind::Method { .. } => "method",
                TraitKind::Getter { .. } => "get",
                TraitKind::Setter { .. } => "set",
                TraitKind::Class { .. } => "class",
                TraitKind::Function { .. } => "function",
            };
            let _ = writeln!(out, "  {kind} {}", t.name);
        }
    }
    for (i, method) in program.methods.iter().enumerate() {
        let len = method.body.as_ref().map_or(0, |b| b.code.len());
        let _ = writeln!(
            out,
            "method {i} {}: {len} instructions",
            method.name.as_deref().unwrap_or("<anonymous>")
        );
    }
    out
}

/// Dump font header and covered code points.
pub fn dump_font(font: &Font) -> String {
    let mut out = String::new();
    let _ = write!(out, "font '{}'", font.full_name);
    if font.bold {
        out.push_str(" bold");
    }
    if font.italic {
        out.push_str(" italic");
    }
    let _ = writeln!(
        out,
        " layout={} alignment={}",
        font.has_layout(),
        font.has_pixel_alignment()
    );
    let points: String = font.code_points().collect();
    let _ = writeln!(out, "  glyphs: {points:?}");
    out
}

#[cfg(test)]
#[path = "../tests/unit/dump/dump.rs"]
mod tests;
