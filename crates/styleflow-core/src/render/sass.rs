//! Sass/SCSS rendering using grass.
//!
//! Handles both `.scss` (Sassy CSS) and `.sass` (indented syntax). The source
//! file's parent directory is always a load path, so relative `@use` and
//! `@import` resolve against the true source location.

use std::path::Path;

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::render::{RenderEngine, RenderOptions};

/// grass-backed engine for the Sass dialects.
pub struct SassEngine;

impl RenderEngine for SassEngine {
    fn render(&self, source_path: &Path, options: &RenderOptions) -> Result<String> {
        let dialect = if source_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("sass"))
        {
            Dialect::Sass
        } else {
            Dialect::Scss
        };

        let mut grass_options = grass::Options::default().input_syntax(match dialect {
            Dialect::Sass => grass::InputSyntax::Sass,
            _ => grass::InputSyntax::Scss,
        });

        grass_options = if options.compressed {
            grass_options.style(grass::OutputStyle::Compressed)
        } else {
            grass_options.style(grass::OutputStyle::Expanded)
        };

        for path in &options.include_paths {
            grass_options = grass_options.load_path(path);
        }
        if let Some(parent) = source_path.parent() {
            grass_options = grass_options.load_path(parent);
        }

        let source = styleflow_util::fs::read_to_string_lossy(source_path)?;
        grass::from_string(source, &grass_options).map_err(|e| Error::Render {
            dialect,
            message: e.to_string(),
        })
    }
}
