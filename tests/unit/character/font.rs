use super::*;

fn glyph(x: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((x, 0.0));
    p.line_to((x + 1.0, 1.0));
    p.close_path();
    p
}

fn font_with(code_points: &str) -> Font {
    let mut f = Font::new("Sans", "Sans Regular");
    for (i, cp) in code_points.chars().enumerate() {
        f.glyphs.insert(cp, glyph(i as f64));
    }
    f
}

fn layout(advance: f64) -> GlyphLayout {
    GlyphLayout {
        advance,
        bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
    }
}

fn kern(left: char, right: char, adjustment: f64) -> KerningPair {
    KerningPair {
        left,
        right,
        adjustment,
    }
}

#[test]
fn font_refs_compare_by_identity() {
    let a = FontRef::new(font_with("a"));
    let b = FontRef::new(font_with("a"));
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn merge_equivalence_ignores_glyph_content() {
    let a = font_with("ab");
    let b = font_with("xyz");
    assert!(a.is_merge_equivalent(&b));
    assert_eq!(a.merge_key(), b.merge_key());
}

#[test]
fn merge_equivalence_requires_same_style_and_tables() {
    let a = font_with("a");

    let mut bold = font_with("a");
    bold.bold = true;
    assert!(!a.is_merge_equivalent(&bold));

    let mut renamed = font_with("a");
    renamed.full_name = "Serif Regular".to_owned();
    assert!(!a.is_merge_equivalent(&renamed));

    let mut with_layout = font_with("a");
    with_layout.layout = Some(BTreeMap::new());
    assert!(!a.is_merge_equivalent(&with_layout));

    let mut with_alignment = font_with("a");
    with_alignment.pixel_alignment = Some(BTreeMap::new());
    assert!(!a.is_merge_equivalent(&with_alignment));
}

#[test]
fn union_adds_disjoint_glyphs_and_keeps_existing_ones() {
    let mut host = font_with("ab");
    let original_a = host.glyphs[&'a'].clone();
    let original_b = host.glyphs[&'b'].clone();

    let mut donor = Font::new("Sans", "Sans Regular");
    donor.glyphs.insert('c', glyph(10.0));
    donor.glyphs.insert('d', glyph(11.0));

    assert_eq!(host.union_missing_from(&donor), 2);
    assert_eq!(host.code_points().collect::<String>(), "abcd");
    assert_eq!(host.glyphs[&'a'], original_a);
    assert_eq!(host.glyphs[&'b'], original_b);
}

#[test]
fn union_never_replaces_overlapping_glyphs() {
    let mut host = font_with("a");
    let before = host.glyphs[&'a'].clone();
    let mut donor = Font::new("Sans", "Sans Regular");
    donor.glyphs.insert('a', glyph(42.0));

    assert_eq!(host.union_missing_from(&donor), 0);
    assert_eq!(host.glyphs[&'a'], before);
}

#[test]
fn union_carries_layout_alignment_and_kerning_of_added_glyphs() {
    let mut host = font_with("a");
    host.layout = Some(BTreeMap::from([('a', layout(1.0))]));
    host.pixel_alignment = Some(BTreeMap::new());
    host.kerning = Some(Vec::new());

    let mut donor = font_with("ab");
    donor.layout = Some(BTreeMap::from([('a', layout(9.0)), ('b', layout(2.0))]));
    donor.pixel_alignment = Some(BTreeMap::from([('b', PixelAlignment::default())]));
    donor.kerning = Some(vec![kern('a', 'b', -0.5), kern('x', 'y', 1.0)]);

    assert_eq!(host.union_missing_from(&donor), 1);

    let layout = host.layout.as_ref().unwrap();
    assert_eq!(layout[&'a'].advance, 1.0);
    assert_eq!(layout[&'b'].advance, 2.0);
    assert!(host.pixel_alignment.as_ref().unwrap().contains_key(&'b'));
    let kerning = host.kerning.as_ref().unwrap();
    assert_eq!(kerning.len(), 1);
    assert_eq!((kerning[0].left, kerning[0].right), ('a', 'b'));
}
