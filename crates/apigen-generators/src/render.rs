use apigen_core::{GenerationError, Language};
use minijinja::Environment;

/// Render an embedded backend template, mapping any template fault to a
/// [`GenerationError`] carrying the failing language.
pub(crate) fn template(
    language: Language,
    name: &'static str,
    source: &'static str,
    ctx: minijinja::Value,
) -> Result<String, GenerationError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(name, source)
        .map_err(|err| GenerationError::new(language, format!("invalid template {name}: {err}")))?;
    let tmpl = env
        .get_template(name)
        .map_err(|err| GenerationError::new(language, format!("missing template {name}: {err}")))?;
    tmpl.render(ctx)
        .map_err(|err| GenerationError::new(language, format!("failed to render {name}: {err}")))
}
