//! Variable substitution with minijinja.

use std::path::PathBuf;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, syntax::SyntaxConfig};
use sprout_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::Metadata,
    error::{SproutError, SproutResult},
};
use tracing::{instrument, trace};

/// Tag delimiters no template file is expected to contain.
///
/// Only `{{ }}` is template syntax. Shell, Liquid and Jinja text using
/// `{%` or `{#` passes through untouched.
const BLOCK_DELIMITERS: (&str, &str) = ("{%sprout", "sprout%}");
const COMMENT_DELIMITERS: (&str, &str) = ("{#sprout", "sprout#}");

/// Renders `{{ variable }}` placeholders from the scaffold metadata.
///
/// Undefined variables are errors and output is never HTML-escaped, since
/// templates hold source code rather than markup.
#[derive(Debug)]
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> SproutResult<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters(BLOCK_DELIMITERS.0, BLOCK_DELIMITERS.1)
            .variable_delimiters("{{", "}}")
            .comment_delimiters(COMMENT_DELIMITERS.0, COMMENT_DELIMITERS.1)
            .build()
            .map_err(|e| SproutError::Internal {
                message: format!("invalid template syntax: {e}"),
            })?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Ok(Self { env })
    }
}

impl TemplateRenderer for JinjaRenderer {
    #[instrument(skip(self, source, metadata))]
    fn render(&self, name: &str, source: &str, metadata: &Metadata) -> SproutResult<String> {
        let template_error = |e: minijinja::Error| ApplicationError::TemplateError {
            file: PathBuf::from(name),
            reason: e.to_string(),
        };

        let template = self
            .env
            .template_from_named_str(name, source)
            .map_err(template_error)?;
        let rendered = template.render(metadata).map_err(template_error)?;

        trace!(bytes = rendered.len(), "Rendered");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> JinjaRenderer {
        JinjaRenderer::new().unwrap()
    }

    fn meta() -> Metadata {
        Metadata::new()
            .with("projectName", "demo")
            .with("projectDes", "A <small> & simple app")
    }

    #[test]
    fn substitutes_and_preserves_the_rest() {
        let source = "{\n  \"name\": \"{{ projectName }}\",\n  \"version\": \"0.1.0\"\n}\n";
        let out = renderer().render("package.json", source, &meta()).unwrap();
        assert_eq!(out, "{\n  \"name\": \"demo\",\n  \"version\": \"0.1.0\"\n}\n");
    }

    #[test]
    fn does_not_escape_markup() {
        let out = renderer()
            .render("index.html", "<p>{{ projectDes }}</p>", &meta())
            .unwrap();
        assert_eq!(out, "<p>A <small> & simple app</p>");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let err = renderer()
            .render("src/App.js", "{{ author }}", &meta())
            .unwrap_err();

        match err {
            SproutError::Application(ApplicationError::TemplateError { file, .. }) => {
                assert_eq!(file, PathBuf::from("src/App.js"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn syntax_error_names_the_file() {
        let err = renderer()
            .render("README.md", "{{ projectName ", &meta())
            .unwrap_err();
        assert!(err.to_string().contains("README.md"));
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let source = "no placeholders here\r\nsecond line";
        let out = renderer().render("plain.txt", source, &Metadata::new()).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn shell_length_expansion_is_left_alone() {
        let source = "#!/bin/sh\nn=${#items[@]}\necho {{ projectName }}\n";
        let out = renderer().render("scripts/count.sh", source, &meta()).unwrap();
        assert_eq!(out, "#!/bin/sh\nn=${#items[@]}\necho demo\n");
    }

    #[test]
    fn jinja_style_tags_are_plain_text() {
        let source = "{% raw %}{{ projectName }}{% endraw %} {# note #} {%- if x -%}";
        let out = renderer().render("layout.liquid", source, &meta()).unwrap();
        assert_eq!(out, "{% raw %}demo{% endraw %} {# note #} {%- if x -%}");
    }
}
