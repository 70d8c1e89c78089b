//! Effect document template environment.
//!
//! The overall document skeleton (header, camera uniforms, section order,
//! technique wrapper) lives in a minijinja template; the feature-dependent
//! sections are rendered in Rust and injected as plain strings. The template
//! is embedded in the binary; debug builds prefer the on-disk file so the
//! skeleton can be edited without recompiling.

use minijinja::{syntax::SyntaxConfig, Environment, Error, ErrorKind};
use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::sync::OnceLock;

pub static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(RustEmbed)]
#[folder = "src/generator/templates"]
struct TemplateAssets;

pub fn get_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| {
        let mut env = Environment::new();

        let syntax = SyntaxConfig::builder()
            .block_delimiters("{$", "$}")
            .variable_delimiters("{{", "}}")
            .line_statement_prefix("$$")
            .build()
            .expect("Failed to configure template syntax");

        env.set_syntax(syntax);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(minijinja::UndefinedBehavior::SemiStrict);

        env.set_loader(template_loader);

        env
    })
}

fn template_loader(name: &str) -> Result<Option<String>, Error> {
    let filename = if std::path::Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("fx"))
    {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}.fx"))
    };

    #[cfg(debug_assertions)]
    {
        let path = std::path::Path::new("src/generator/templates").join(filename.as_ref());
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(source) => return Ok(Some(source)),
                Err(e) => {
                    return Err(Error::new(
                        ErrorKind::TemplateNotFound,
                        format!("Failed to read file: {e}"),
                    ));
                }
            }
        }
    }

    if let Some(file) = TemplateAssets::get(&filename)
        && let Ok(source) = std::str::from_utf8(file.data.as_ref())
    {
        return Ok(Some(source.to_string()));
    }

    Ok(None)
}
