use std::fmt;

/// Convenience result type used across frameweave.
pub type WeaveResult<T> = Result<T, WeaveError>;

/// Identifying context of the document an error was raised against.
///
/// Attached while the error unwinds through document-level APIs; the innermost document wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocContext(Option<String>);

impl DocContext {
    /// Name of the offending document, if known.
    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Display for DocContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(name) => write!(f, " (document '{name}')"),
            None => Ok(()),
        }
    }
}

/// Coarse classification of [`WeaveError`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Contract violation inside the model.
    Internal,
    /// A lookup or display-list reference points at something missing.
    ReferenceNotFound,
    /// Bytecode merge or rename refused the input.
    CodeMerge,
    /// A recognized input shape that is deliberately not handled.
    UnimplementedFeature,
    /// Failure reported by an external codec.
    Codec,
    /// Wrapped lower-level failure.
    Other,
}

/// Top-level error taxonomy used by engine APIs.
///
/// Every engine error carries a static diagnostic `tag` naming the code path that raised it, so
/// callers (and tests) can tell apart two failures of the same kind.
#[derive(thiserror::Error, Debug)]
pub enum WeaveError {
    /// Contract violation: duplicate keys, foreign layers, impossible states.
    #[error("internal error: [{tag}] {message}{document}")]
    Internal {
        /// Diagnostic tag.
        tag: &'static str,
        /// Human-readable detail.
        message: String,
        /// Offending document.
        document: DocContext,
    },

    /// A display-list or lookup path points to a missing character or instance.
    #[error("reference not found: [{tag}] {message}{document}")]
    ReferenceNotFound {
        /// Diagnostic tag.
        tag: &'static str,
        /// Human-readable detail.
        message: String,
        /// Offending document.
        document: DocContext,
    },

    /// Class collision on merge, or an unsupported namespace/operand shape during rename.
    #[error("code merge error: [{tag}] {message}{document}")]
    CodeMerge {
        /// Diagnostic tag.
        tag: &'static str,
        /// Human-readable detail.
        message: String,
        /// Offending document.
        document: DocContext,
    },

    /// Recognized but unhandled input.
    #[error("unimplemented feature: [{tag}] {message}{document}")]
    UnimplementedFeature {
        /// Diagnostic tag.
        tag: &'static str,
        /// Human-readable detail.
        message: String,
        /// Offending document.
        document: DocContext,
    },

    /// Errors surfaced unchanged from an external codec.
    #[error("codec error: {0}")]
    Codec(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WeaveError {
    /// Build a [`WeaveError::Internal`] value.
    pub fn internal(tag: &'static str, msg: impl Into<String>) -> Self {
        Self::Internal {
            tag,
            message: msg.into(),
            document: DocContext::default(),
        }
    }

    /// Build a [`WeaveError::ReferenceNotFound`] value.
    pub fn reference_not_found(tag: &'static str, msg: impl Into<String>) -> Self {
        Self::ReferenceNotFound {
            tag,
            message: msg.into(),
            document: DocContext::default(),
        }
    }

    /// Build a [`WeaveError::CodeMerge`] value.
    pub fn code_merge(tag: &'static str, msg: impl Into<String>) -> Self {
        Self::CodeMerge {
            tag,
            message: msg.into(),
            document: DocContext::default(),
        }
    }

    /// Build a [`WeaveError::UnimplementedFeature`] value.
    pub fn unimplemented(tag: &'static str, msg: impl Into<String>) -> Self {
        Self::UnimplementedFeature {
            tag,
            message: msg.into(),
            document: DocContext::default(),
        }
    }

    /// Build a [`WeaveError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Internal { .. } => ErrorKind::Internal,
            Self::ReferenceNotFound { .. } => ErrorKind::ReferenceNotFound,
            Self::CodeMerge { .. } => ErrorKind::CodeMerge,
            Self::UnimplementedFeature { .. } => ErrorKind::UnimplementedFeature,
            Self::Codec(_) => ErrorKind::Codec,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Diagnostic tag of engine errors.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Self::Internal { tag, .. }
            | Self::ReferenceNotFound { tag, .. }
            | Self::CodeMerge { tag, .. }
            | Self::UnimplementedFeature { tag, .. } => Some(*tag),
            Self::Codec(_) | Self::Other(_) => None,
        }
    }

    /// Name of the document the error was raised against, if attached.
    pub fn document(&self) -> Option<&str> {
        match self {
            Self::Internal { document, .. }
            | Self::ReferenceNotFound { document, .. }
            | Self::CodeMerge { document, .. }
            | Self::UnimplementedFeature { document, .. } => document.name(),
            Self::Codec(_) | Self::Other(_) => None,
        }
    }

    /// Attach document context unless a more specific one is already present.
    pub fn in_document(mut self, name: &str) -> Self {
        match &mut self {
            Self::Internal { document, .. }
            | Self::ReferenceNotFound { document, .. }
            | Self::CodeMerge { document, .. }
            | Self::UnimplementedFeature { document, .. } => {
                if document.0.is_none() {
                    document.0 = Some(name.to_owned());
                }
            }
            Self::Codec(_) | Self::Other(_) => {}
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
