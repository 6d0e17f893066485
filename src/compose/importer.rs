use crate::{
    bytecode::block::{AbcBlock, BytecodeCodec},
    bytecode::generate::{BASE_MOVIE_CLIP, generate_default_class},
    bytecode::merge::{MergeReport, merge_blocks, merge_programs},
    bytecode::name::QName,
    bytecode::program::Program,
    bytecode::rename::{RenameReport, rename_class},
    character::model::{Character, CharacterRef, Sprite},
    character::walk::{collect_fonts, for_each_character},
    compose::fonts::{FontRemapReport, remap_fonts},
    document::model::Document,
    foundation::error::{WeaveError, WeaveResult},
    timeline::clone::clone_timeline,
    timeline::model::TimelineOwner,
};

/// Options for [`Composer::import_sprite`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImportOpts {
    /// Dotted name of the class imported sprites extend, or are bound to when no class is named.
    pub base_class: String,
    /// Suffix cloned instance names so repeated imports never collide.
    pub rename_instances: bool,
    /// Dictionary key (or key prefix, when taken) of the imported sprite.
    pub sprite_key: String,
    /// Register donor characters reachable from the imported sprite in the host dictionary.
    pub adopt_characters: bool,
}

impl Default for ImportOpts {
    fn default() -> Self {
        Self {
            base_class: BASE_MOVIE_CLIP.to_owned(),
            rename_instances: true,
            sprite_key: "imported".to_owned(),
            adopt_characters: true,
        }
    }
}

/// Result of a successful import.
#[derive(Debug)]
pub struct ImportedSprite {
    /// Host dictionary key of the new sprite.
    pub key: String,
    /// The new sprite.
    pub sprite: CharacterRef,
    /// Class the sprite's timeline is bound to.
    pub class: QName,
    /// Font merge outcome.
    pub fonts: FontRemapReport,
    /// Bytecode merge outcome, when a class was named.
    pub merge: Option<MergeReport>,
    /// Class rename outcome, when the donor's main class was renamed.
    pub rename: Option<RenameReport>,
    /// Keys of donor characters adopted into the host dictionary.
    pub adopted: Vec<String>,
}

/// Imports donor timelines into a host document as sprites.
pub struct Composer<'c> {
    codec: &'c dyn BytecodeCodec,
    opts: ImportOpts,
}

impl<'c> Composer<'c> {
    /// Composer decoding bytecode with `codec` and default options.
    pub fn new(codec: &'c dyn BytecodeCodec) -> Self {
        Self {
            codec,
            opts: ImportOpts::default(),
        }
    }

    /// Replace the import options.
    pub fn with_opts(mut self, opts: ImportOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Current import options.
    pub fn opts(&self) -> &ImportOpts {
        &self.opts
    }

    /// Import the root timeline of `donor` into `host` as a new sprite.
    ///
    /// Display-list wiring is cloned, characters stay shared, donor fonts fold into equivalent
    /// host fonts. With `class_name`, the donor's main class is renamed to it and merged into the
    /// host's first bytecode block (a default class is generated when the donor has none).
    /// Without, the sprite is bound to the base class. The donor document is never modified apart
    /// from its text characters' font references. Failures are not rolled back: host fonts may
    /// already have grown when a later step fails.
    #[tracing::instrument(skip_all, fields(donor = donor.name(), class = class_name))]
    pub fn import_sprite(
        &self,
        host: &mut Document,
        donor: &Document,
        class_name: Option<&str>,
    ) -> WeaveResult<ImportedSprite> {
        let mut timeline = clone_timeline(donor.timeline(), self.opts.rename_instances)
            .map_err(|e| e.in_document(donor.name()))?;

        let fonts = remap_fonts(donor, host);

        let base = QName::parse_dotted(&self.opts.base_class);
        let (class, merge, rename) = match class_name {
            Some(name) => {
                let (class, merge, rename) = self
                    .import_class(host, donor, name, &base)
                    .map_err(|e| e.in_document(donor.name()))?;
                (class, Some(merge), rename)
            }
            None => (base, None, None),
        };
        timeline.bind_class(class.clone())?;

        let sprite = CharacterRef::new(Character::Sprite(Sprite::from_timeline(timeline)));
        let key = host.free_key(&self.opts.sprite_key);
        host.insert_character(key.clone(), sprite.clone())?;

        let adopted = if self.opts.adopt_characters {
            adopt_characters(host, donor, &sprite)?
        } else {
            Vec::new()
        };

        tracing::debug!(key = %key, class = %class, adopted = adopted.len(), "imported sprite");
        Ok(ImportedSprite {
            key,
            sprite,
            class,
            fonts,
            merge,
            rename,
            adopted,
        })
    }

    /// Bring the donor's code into the host under `name`.
    ///
    /// Every donor block is combined on a scratch copy. The donor's main class is renamed there;
    /// without one, a default class `name` is generated next to the donor's code. The host's
    /// bytecode only changes once the scratch program merges cleanly.
    fn import_class(
        &self,
        host: &mut Document,
        donor: &Document,
        name: &str,
        base: &QName,
    ) -> WeaveResult<(QName, MergeReport, Option<RenameReport>)> {
        let new = QName::parse_dotted(name);
        if new.package_name().is_empty() {
            return Err(WeaveError::code_merge(
                "rename.unpackaged_name",
                format!("new class name '{name}' has no package"),
            ));
        }

        let mut scratch = Program::default();
        for block in donor.bytecode() {
            let program = block.resolved_program(self.codec)?;
            merge_programs(&mut scratch, &program)?;
        }

        let rename = match donor.main_class() {
            Some(main) if scratch.class_by_name(main).is_some() => {
                Some(rename_class(&mut scratch, main, name)?)
            }
            main => {
                if let Some(main) = main {
                    tracing::debug!(class = %main, "donor main class not found in its code");
                }
                generate_default_class(&mut scratch, &new, base)?;
                None
            }
        };

        let incoming = AbcBlock::from_program(donor.name(), scratch);
        if host.bytecode().is_empty() {
            host.push_bytecode(AbcBlock::empty("frame1"));
        }
        let Some(block) = host.bytecode_mut().first_mut() else {
            return Err(WeaveError::internal("import.no_block", "host has no bytecode block"));
        };
        let merge = merge_blocks(block, &incoming, self.codec)?;
        Ok((new, merge, rename))
    }
}

/// Register characters reachable from `sprite` (and the fonts they use) that the host lacks.
fn adopt_characters(
    host: &mut Document,
    donor: &Document,
    sprite: &CharacterRef,
) -> WeaveResult<Vec<String>> {
    let mut reachable: Vec<CharacterRef> = Vec::new();
    for_each_character(std::slice::from_ref(sprite), &mut |c| {
        if !c.ptr_eq(sprite) {
            reachable.push(c.clone());
        }
    });

    let mut adopted = Vec::new();
    for character in reachable {
        if host.key_of(&character).is_some() {
            continue;
        }
        let key = host.free_key(donor.key_of(&character).unwrap_or("character"));
        host.insert_character(key.clone(), character)?;
        adopted.push(key);
    }

    for font in collect_fonts(std::slice::from_ref(sprite)) {
        let is_font = |c: &CharacterRef| c.borrow().as_font().is_some_and(|f| f.ptr_eq(&font));
        if host.characters().any(|(_, c)| is_font(c)) {
            continue;
        }
        let prefix = donor
            .characters()
            .find(|&(_, c)| is_font(c))
            .map_or("font", |(k, _)| k);
        let key = host.free_key(prefix);
        host.insert_character(key.clone(), CharacterRef::new(Character::Font(font)))?;
        adopted.push(key);
    }
    Ok(adopted)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/importer.rs"]
mod tests;
