//! The backend registry and generation orchestrator.
//!
//! The registry is a static table built at program initialization: pure,
//! read-only, process-wide configuration with no filesystem side effects.

use std::path::{Component, Path};

use rayon::prelude::*;

use apigen_core::{
    CodeGenerator, FileManifest, GenerateError, GenerateOptions, GenerationError, Language,
    SpecDocument,
};

use crate::backends::{
    CsharpGenerator, GoGenerator, JavaGenerator, JavascriptGenerator, PhpGenerator,
    PythonGenerator, RustGenerator,
};

static GENERATORS: &[&dyn CodeGenerator] = &[
    &PythonGenerator,
    &JavascriptGenerator,
    &GoGenerator,
    &RustGenerator,
    &CsharpGenerator,
    &JavaGenerator,
    &PhpGenerator,
];

/// Look up the backend registered for a language.
pub fn generator_for(language: Language) -> Option<&'static dyn CodeGenerator> {
    GENERATORS
        .iter()
        .copied()
        .find(|generator| generator.language() == language)
}

/// Generate a client for one language.
///
/// The manifest is checked for path safety before being handed back: its
/// paths are trusted as write targets by external writers.
pub fn generate(
    language: &str,
    ir: &SpecDocument,
    options: &GenerateOptions,
) -> Result<FileManifest, GenerateError> {
    let lang = Language::from_id(language).ok_or_else(|| GenerateError::unsupported(language))?;
    let backend = generator_for(lang).ok_or_else(|| GenerateError::unsupported(language))?;

    log::debug!(
        "generating {} client ({} operations)",
        lang,
        ir.operations.len()
    );
    let manifest = backend.generate(ir, options)?;
    check_manifest_paths(lang, &manifest)?;
    Ok(manifest)
}

/// Fan a batch of languages out in parallel.
///
/// The IR is shared read-only; each language succeeds or fails
/// independently of the others.
pub fn generate_all(
    languages: &[String],
    ir: &SpecDocument,
    options: &GenerateOptions,
) -> Vec<(String, Result<FileManifest, GenerateError>)> {
    languages
        .par_iter()
        .map(|language| (language.clone(), generate(language, ir, options)))
        .collect()
}

fn check_manifest_paths(
    language: Language,
    manifest: &FileManifest,
) -> Result<(), GenerationError> {
    for path in manifest.paths() {
        let escapes = path.starts_with('/')
            || Path::new(path)
                .components()
                .any(|component| matches!(component, Component::ParentDir));
        if escapes {
            return Err(GenerationError::new(
                language,
                format!("unsafe manifest path: {path}"),
            ));
        }
    }
    Ok(())
}
