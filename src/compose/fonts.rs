use std::collections::HashMap;

use crate::{
    character::font::FontRef,
    character::model::CharacterRef,
    character::walk::{collect_fonts, for_each_font_ref_mut},
    document::model::Document,
    foundation::ids::PtrKey,
};

/// Outcome of [`remap_fonts`].
#[derive(Clone, Debug, Default)]
pub struct FontRemapReport {
    /// Donor fonts replaced by an equivalent host font.
    pub remapped: usize,
    /// Glyphs copied into host fonts.
    pub glyphs_added: usize,
    /// Font references rewritten in donor text characters.
    pub references: usize,
    /// Donor fonts without a host equivalent; they stay in use as they are.
    pub unmatched: Vec<FontRef>,
}

/// Dictionary entries plus root placements: everything font lookups start from.
pub(crate) fn document_roots(doc: &Document) -> Vec<CharacterRef> {
    let mut roots: Vec<CharacterRef> = doc.characters().map(|(_, c)| c.clone()).collect();
    roots.extend(doc.root_characters());
    roots
}

/// Fold every donor font into the first merge-equivalent host font and repoint donor text at it.
///
/// Host fonts only ever gain glyphs. A donor font that already is a host font (same allocation)
/// is left alone.
#[tracing::instrument(skip_all, fields(donor = donor.name(), host = host.name()))]
pub fn remap_fonts(donor: &Document, host: &Document) -> FontRemapReport {
    let host_fonts = collect_fonts(&document_roots(host));
    let donor_roots = document_roots(donor);
    let donor_fonts = collect_fonts(&donor_roots);

    let mut report = FontRemapReport::default();
    let mut map: HashMap<PtrKey, FontRef> = HashMap::new();

    for donor_font in donor_fonts {
        if host_fonts.iter().any(|h| h.ptr_eq(&donor_font)) {
            continue;
        }
        let target = {
            let d = donor_font.borrow();
            host_fonts
                .iter()
                .find(|h| h.borrow().is_merge_equivalent(&d))
                .cloned()
        };
        let Some(target) = target else {
            tracing::trace!(font = %donor_font.borrow().full_name, "no equivalent host font");
            report.unmatched.push(donor_font);
            continue;
        };

        let added = target.borrow_mut().union_missing_from(&donor_font.borrow());
        tracing::debug!(font = %target.borrow().full_name, added, "merged donor font");
        report.glyphs_added += added;
        report.remapped += 1;
        map.insert(donor_font.key(), target);
    }

    if !map.is_empty() {
        for_each_font_ref_mut(&donor_roots, &mut |font| {
            if let Some(target) = map.get(&font.key()) {
                *font = target.clone();
                report.references += 1;
            }
        });
    }
    report
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fonts.rs"]
mod tests;
