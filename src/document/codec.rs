use crate::{document::model::Document, foundation::error::WeaveResult};

/// Reads and writes whole documents in the binary container format.
///
/// Implementations hand bytecode blocks over raw, see
/// [`AbcBlock::from_bytes`](crate::AbcBlock::from_bytes), so untouched blocks can be written back
/// verbatim.
pub trait DocumentCodec {
    /// Decode a document named `name`.
    fn decode(&self, name: &str, bytes: &[u8]) -> WeaveResult<Document>;
    /// Encode `document`.
    fn encode(&self, document: &Document) -> WeaveResult<Vec<u8>>;
}
