#![forbid(unsafe_code)]

use std::collections::BTreeMap;

/// Generates a concrete exercise instance from a parameterized template
/// blob. Implementations live outside this crate; the transport wires in
/// whatever engine it has.
pub trait TemplateEngine {
    /// `make_derivative` is reserved: an engine may record derivation
    /// metadata on the generated instance or ignore the flag entirely.
    fn instantiate(
        &self,
        data: &[u8],
        random_seed: i64,
        make_derivative: bool,
    ) -> Result<GeneratedInstance, InstantiateError>;
}

/// A freshly generated instance: the main document plus auxiliary files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedInstance {
    pub xml: String,
    pub files: BTreeMap<String, Vec<u8>>,
}

/// Pipeline stage an instantiation failed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstantiatePhase {
    Generation,
    Validation,
    StructureChecks,
    CorrectResponse,
    HtmlTransform,
}

impl InstantiatePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::Validation => "validation",
            Self::StructureChecks => "structure-checks",
            Self::CorrectResponse => "correct-response",
            Self::HtmlTransform => "html-transform",
        }
    }
}

#[derive(Clone, Debug)]
pub struct InstantiateError {
    pub phase: InstantiatePhase,
    pub message: String,
}

impl std::fmt::Display for InstantiateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "instantiation failed at {}: {}",
            self.phase.as_str(),
            self.message
        )
    }
}

impl std::error::Error for InstantiateError {}
