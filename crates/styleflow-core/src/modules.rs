//! Scoped class-name extraction for module-style stylesheets.
//!
//! Backed by lightningcss CSS Modules: class selectors are rewritten to
//! globally-unique names (`[hash]_[local]`) and the original-to-generated
//! mapping is captured as a side effect of the transform chain.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};

use crate::transform::CssTransform;

/// Mapping from original local class name to generated class name.
///
/// Ordered so its JSON serialization is deterministic.
pub type ClassMap = BTreeMap<String, String>;

/// Single-use output cell for one pipeline invocation: the extractor sets it
/// exactly once, the pipeline consumes it after the chain completes.
pub(crate) type MappingCell = Arc<OnceLock<ClassMap>>;

/// Transform-chain adapter that scopes class names and captures the mapping.
pub(crate) struct ModulesExtractor {
    out: MappingCell,
}

impl ModulesExtractor {
    pub(crate) fn new(out: MappingCell) -> Self {
        Self { out }
    }
}

impl CssTransform for ModulesExtractor {
    fn name(&self) -> &str {
        "css-modules"
    }

    fn transform(&self, css: &str, from: &Path) -> Result<String, String> {
        let (code, mapping) = scope_classes(css, from)?;
        let _ = self.out.set(mapping);
        Ok(code)
    }
}

/// Rewrite class selectors to scoped names and collect the export mapping.
fn scope_classes(css: &str, from: &Path) -> Result<(String, ClassMap), String> {
    let parser_options = ParserOptions {
        filename: from.display().to_string(),
        css_modules: Some(lightningcss::css_modules::Config {
            pattern: lightningcss::css_modules::Pattern::parse("[hash]_[local]")
                .map_err(|e| format!("CSS Modules pattern error: {e}"))?,
            dashed_idents: false,
            animation: Default::default(),
            grid: Default::default(),
            container: Default::default(),
            custom_idents: Default::default(),
            pure: false,
        }),
        ..ParserOptions::default()
    };

    let stylesheet = StyleSheet::parse(css, parser_options)
        .map_err(|e| format!("CSS parse error in {}: {e}", from.display()))?;

    let output = stylesheet
        .to_css(PrinterOptions::default())
        .map_err(|e| format!("CSS print error: {e}"))?;

    let mapping = output
        .exports
        .map(|exports| {
            exports
                .iter()
                .map(|(k, v)| (k.to_string(), v.name.to_string()))
                .collect()
        })
        .unwrap_or_default();

    Ok((output.code, mapping))
}
