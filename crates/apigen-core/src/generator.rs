use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::GenerationError;
use crate::ir::SpecDocument;
use crate::language::Language;

/// Per-run generation options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Name for the generated package; backends derive class and module
    /// names from it.
    pub package_name: String,
    /// Emit a test scaffold alongside the client.
    pub include_tests: bool,
    /// Emit a README describing the generated client.
    pub include_docs: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            package_name: "api_client".to_string(),
            include_tests: false,
            include_docs: true,
        }
    }
}

/// The complete set of generated files, keyed by relative output path.
///
/// Insertion order is preserved so repeated runs produce byte-identical
/// archives. Ownership transfers entirely to the caller; the core never
/// touches disk.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileManifest {
    files: IndexMap<String, String>,
}

impl FileManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }
}

/// Trait implemented by every language backend.
///
/// Implementations are pure: same (ir, options) in, byte-identical manifest
/// out, no filesystem or network access. Every backend's `generate` output
/// contains exactly one client-definition file and, when `include_docs` is
/// set, exactly one README; all paths are relative with no `..` segments.
pub trait CodeGenerator: Sync {
    /// The language this backend renders.
    fn language(&self) -> Language;

    /// Full output: dependency descriptor, client skeleton, models file,
    /// retry/timeout policy code, optional README and test scaffold.
    fn generate(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<FileManifest, GenerationError>;

    /// The main client source file, with the client type named after
    /// `options.package_name` in PascalCase.
    fn generate_client(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError>;

    /// The models/types module.
    fn generate_models(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError>;
}
