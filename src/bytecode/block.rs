use std::borrow::Cow;
use std::sync::Arc;

use crate::{
    bytecode::program::Program,
    foundation::error::{WeaveError, WeaveResult},
};

/// Converts between the binary bytecode format and [`Program`].
pub trait BytecodeCodec {
    /// Parse `bytes` into a program.
    fn disassemble(&self, bytes: &[u8]) -> WeaveResult<Program>;
    /// Serialize `program`.
    fn assemble(&self, program: &Program) -> WeaveResult<Vec<u8>>;
}

/// Codec storing programs as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonBytecodeCodec;

impl BytecodeCodec for JsonBytecodeCodec {
    fn disassemble(&self, bytes: &[u8]) -> WeaveResult<Program> {
        serde_json::from_slice(bytes)
            .map_err(|e| WeaveError::codec(format!("invalid bytecode json: {e}")))
    }

    fn assemble(&self, program: &Program) -> WeaveResult<Vec<u8>> {
        serde_json::to_vec(program)
            .map_err(|e| WeaveError::codec(format!("failed to serialize bytecode json: {e}")))
    }
}

/// One bytecode block of a document.
///
/// A block starts either raw (bytes as read) or parsed. Parsing is lazy and happens the first
/// time the block is edited. A block that was never tampered with is written back verbatim.
#[derive(Clone, Debug)]
pub struct AbcBlock {
    name: String,
    lazy_init: bool,
    original: Option<Arc<[u8]>>,
    program: Option<Program>,
    tampered: bool,
}

impl AbcBlock {
    /// Raw block as read from a file.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            lazy_init: true,
            original: Some(bytes.into()),
            program: None,
            tampered: false,
        }
    }

    /// Block built in memory; always re-assembled on output.
    pub fn from_program(name: impl Into<String>, program: Program) -> Self {
        Self {
            name: name.into(),
            lazy_init: true,
            original: None,
            program: Some(program),
            tampered: true,
        }
    }

    /// Block holding an empty program.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::from_program(name, Program::default())
    }

    /// Block name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether initialization is deferred until the block's classes are first used.
    pub fn lazy_init(&self) -> bool {
        self.lazy_init
    }

    /// Set the deferred-initialization flag.
    pub fn set_lazy_init(&mut self, lazy: bool) {
        self.lazy_init = lazy;
    }

    /// Return `true` once the parsed form exists.
    pub fn is_parsed(&self) -> bool {
        self.program.is_some()
    }

    /// Return `true` if output must be re-assembled.
    pub fn is_tampered(&self) -> bool {
        self.tampered
    }

    /// Force re-assembly on output.
    pub fn mark_tampered(&mut self) {
        self.tampered = true;
    }

    /// Parsed program, if parsed.
    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// Parse the raw bytes if needed and return the program without marking the block tampered.
    pub fn parse(&mut self, codec: &dyn BytecodeCodec) -> WeaveResult<&Program> {
        self.ensure_parsed(codec)?;
        self.program
            .as_ref()
            .ok_or_else(|| WeaveError::internal("abc.unparsed", "block has no program after parse"))
    }

    /// Parse if needed and return the program for editing; the block becomes tampered.
    pub fn edit(&mut self, codec: &dyn BytecodeCodec) -> WeaveResult<&mut Program> {
        self.ensure_parsed(codec)?;
        self.tampered = true;
        self.program
            .as_mut()
            .ok_or_else(|| WeaveError::internal("abc.unparsed", "block has no program after parse"))
    }

    /// Parsed program without touching the block.
    ///
    /// Borrowed when already parsed, otherwise decoded on the side.
    pub fn resolved_program(&self, codec: &dyn BytecodeCodec) -> WeaveResult<Cow<'_, Program>> {
        if let Some(program) = &self.program {
            return Ok(Cow::Borrowed(program));
        }
        match &self.original {
            Some(bytes) => Ok(Cow::Owned(codec.disassemble(bytes)?)),
            None => Err(WeaveError::internal(
                "abc.empty",
                format!("block '{}' has neither bytes nor a program", self.name),
            )),
        }
    }

    fn ensure_parsed(&mut self, codec: &dyn BytecodeCodec) -> WeaveResult<()> {
        if self.program.is_some() {
            return Ok(());
        }
        let Some(bytes) = &self.original else {
            return Err(WeaveError::internal(
                "abc.empty",
                format!("block '{}' has neither bytes nor a program", self.name),
            ));
        };
        let program = codec.disassemble(bytes)?;
        tracing::debug!(
            block = %self.name,
            classes = program.classes.len(),
            "parsed bytecode block"
        );
        self.program = Some(program);
        Ok(())
    }

    /// Output bytes: the original bytes when untouched, otherwise a fresh assembly.
    pub fn encode(&self, codec: &dyn BytecodeCodec) -> WeaveResult<Cow<'_, [u8]>> {
        if !self.tampered
            && let Some(bytes) = &self.original
        {
            return Ok(Cow::Borrowed(bytes));
        }
        match &self.program {
            Some(program) => Ok(Cow::Owned(codec.assemble(program)?)),
            None => Err(WeaveError::internal(
                "abc.empty",
                format!("block '{}' has neither bytes nor a program", self.name),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bytecode/block.rs"]
mod tests;
