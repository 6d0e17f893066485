//! frameweave models vector-animation documents and composes them.
//!
//! A [`Document`] holds a root [`Timeline`] (frames of display-list instructions over layers), a
//! dictionary of shared [`Character`]s and bytecode blocks. On top of that model the crate
//! provides:
//!
//! - timeline cloning with collision-free instance renaming ([`clone_timeline`])
//! - font glyph merging across documents ([`remap_fonts`])
//! - bytecode class merge and rename ([`merge_programs`], [`rename_class`])
//! - sprite import from a donor document into a host ([`Composer`])
//!
//! Binary container and bytecode formats stay outside the crate behind [`DocumentCodec`] and
//! [`BytecodeCodec`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod bytecode;
pub(crate) mod character;
pub(crate) mod compose;
pub(crate) mod document;
/// Plain-text dumps.
pub mod dump;
pub(crate) mod storage;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    Affine, BezPath, ColorTransform, Fixed8, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{DocContext, ErrorKind, WeaveError, WeaveResult};
pub use crate::foundation::ids::TimelineId;

pub use crate::bytecode::block::{AbcBlock, BytecodeCodec, JsonBytecodeCodec};
pub use crate::bytecode::generate::{BASE_MOVIE_CLIP, base_movie_clip, generate_default_class};
pub use crate::bytecode::merge::{MergeReport, find_class_collision, merge_blocks, merge_programs};
pub use crate::bytecode::name::{
    Name, Namespace, NamespaceKind, NamespaceSet, QName, protected_namespace_name,
};
pub use crate::bytecode::program::{
    Class, ClassFlags, ClassIdx, ConstValue, ExceptionHandler, Instruction, Method, MethodBody,
    MethodIdx, Opcode, Operand, Program, Script, Trait, TraitKind,
};
pub use crate::bytecode::rename::{RenameReport, rename_class};

pub use crate::character::font::{
    Font, FontMergeKey, FontRef, GlyphLayout, KerningPair, PixelAlignment,
};
pub use crate::character::model::{
    Character, CharacterKind, CharacterRef, EditText, EditTextFlags, GlyphEntry, Image,
    MorphShape, Shape, Sprite, StaticText, TextRecord,
};
pub use crate::character::walk::{
    collect_fonts, for_each_character, for_each_font, for_each_font_ref_mut,
};

pub use crate::timeline::clone::{clone_timeline, clone_timeline_into};
pub use crate::timeline::display::{DisplayListItem, PlaceObject, RemoveObject};
pub use crate::timeline::frame::Frame;
pub use crate::timeline::layer::{Layer, LayerHandle, LayerPosition};
pub use crate::timeline::model::{Timeline, TimelineOwner};

pub use crate::document::codec::DocumentCodec;
pub use crate::document::dsl::{DocumentBuilder, SpriteBuilder};
pub use crate::document::model::Document;

pub use crate::compose::fonts::{FontRemapReport, remap_fonts};
pub use crate::compose::importer::{Composer, ImportOpts, ImportedSprite};
pub use crate::compose::job::{ImportJob, JobOutcome, run_import_job};

pub use crate::storage::cache::{FsCache, ImportCache, MemoryCache};
pub use crate::storage::store::{DocumentStore, FsStore, MemoryStore};
