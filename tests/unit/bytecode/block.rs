use super::*;
use std::cell::Cell;

use crate::bytecode::name::QName;
use crate::bytecode::program::Class;

#[derive(Default)]
struct CountingCodec {
    parses: Cell<usize>,
    assembles: Cell<usize>,
}

impl BytecodeCodec for CountingCodec {
    fn disassemble(&self, bytes: &[u8]) -> WeaveResult<Program> {
        self.parses.set(self.parses.get() + 1);
        JsonBytecodeCodec.disassemble(bytes)
    }

    fn assemble(&self, program: &Program) -> WeaveResult<Vec<u8>> {
        self.assembles.set(self.assembles.get() + 1);
        JsonBytecodeCodec.assemble(program)
    }
}

fn sample_bytes() -> Vec<u8> {
    let mut p = Program::default();
    let m = p.add_method(Default::default());
    p.add_class(Class {
        name: QName::parse_dotted("pkg.Hero"),
        super_name: None,
        flags: Default::default(),
        protected_ns: None,
        interfaces: Vec::new(),
        iinit: m,
        cinit: m,
        instance_traits: Vec::new(),
        static_traits: Vec::new(),
    });
    JsonBytecodeCodec.assemble(&p).unwrap()
}

#[test]
fn untouched_block_is_blitted() {
    let bytes = sample_bytes();
    let codec = CountingCodec::default();
    let mut block = AbcBlock::from_bytes("main", bytes.clone());

    assert!(!block.is_parsed());
    assert_eq!(block.parse(&codec).unwrap().classes.len(), 1);
    assert!(block.is_parsed());
    assert!(!block.is_tampered());

    let out = block.encode(&codec).unwrap();
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(&*out, bytes.as_slice());
    assert_eq!(codec.assembles.get(), 0);
}

#[test]
fn edited_block_is_reassembled() {
    let codec = CountingCodec::default();
    let mut block = AbcBlock::from_bytes("main", sample_bytes());
    block.edit(&codec).unwrap().classes.clear();
    block.edit(&codec).unwrap();
    assert_eq!(codec.parses.get(), 1);
    assert!(block.is_tampered());

    let out = block.encode(&codec).unwrap();
    assert!(matches!(out, Cow::Owned(_)));
    let back = JsonBytecodeCodec.disassemble(&out).unwrap();
    assert!(back.classes.is_empty());
}

#[test]
fn resolved_program_leaves_raw_blocks_raw() {
    let codec = CountingCodec::default();
    let block = AbcBlock::from_bytes("main", sample_bytes());
    let program = block.resolved_program(&codec).unwrap();
    assert_eq!(program.classes.len(), 1);
    assert!(!block.is_parsed());
}

#[test]
fn empty_blocks_are_always_assembled() {
    let block = AbcBlock::empty("frame1");
    assert!(block.is_tampered());
    let out = block.encode(&JsonBytecodeCodec).unwrap();
    assert!(matches!(out, Cow::Owned(_)));
}

#[test]
fn garbage_surfaces_as_codec_error() {
    let mut block = AbcBlock::from_bytes("main", b"not json".to_vec());
    let err = block.parse(&JsonBytecodeCodec).unwrap_err();
    assert_eq!(err.kind(), crate::foundation::error::ErrorKind::Codec);
}
