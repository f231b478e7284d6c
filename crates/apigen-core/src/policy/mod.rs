//! Cross-cutting policy generators.
//!
//! A policy object is plain configuration extracted from spec extension
//! fields; it can render itself as an idiomatic module for any registered
//! target language.

pub mod retry;
pub mod timeout;

pub use retry::RetryConfig;
pub use timeout::TimeoutConfig;

use minijinja::Environment;

/// Render an embedded policy template. The templates ship with the crate
/// and are exercised for every language in tests, so a failure here is a
/// bug rather than bad input.
fn render(name: &str, source: &str, ctx: minijinja::Value) -> String {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(name, source)
        .expect("template should be valid");
    let tmpl = env.get_template(name).expect("template was just added");
    tmpl.render(ctx).expect("render should succeed")
}
