//! The ordered transform chain applied to rendered stylesheet text.
//!
//! For module-style assets the chain is prepended with the class-name
//! extractor (`modules::ModulesExtractor`); caller-supplied transforms run
//! after it, each receiving the previous transform's output. An empty
//! effective chain is skipped entirely.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::error::{Error, Result};
use crate::modules::{ClassMap, MappingCell, ModulesExtractor};

/// A text-to-text transform over rendered CSS.
///
/// `from` is the original source path, so diagnostics and URL rewriting
/// resolve against the true source location. Errors are plain messages; the
/// pipeline attaches the transform's name.
pub trait CssTransform: Send + Sync {
    /// Transform name, used in error reporting.
    fn name(&self) -> &str;

    fn transform(&self, css: &str, from: &Path) -> std::result::Result<String, String>;
}

/// Runs the transform chain for one load invocation.
#[derive(Default)]
pub struct TransformPipeline {
    transforms: Vec<Box<dyn CssTransform>>,
}

impl TransformPipeline {
    #[must_use]
    pub fn new(transforms: Vec<Box<dyn CssTransform>>) -> Self {
        Self { transforms }
    }

    /// Append a transform to the end of the chain.
    pub fn push(&mut self, transform: Box<dyn CssTransform>) {
        self.transforms.push(transform);
    }

    /// Process rendered text through the chain.
    ///
    /// When `is_module` is true the class-name extractor runs first and its
    /// captured mapping is returned alongside the final text. The mapping
    /// cell lives only for the duration of this call; nothing is shared
    /// across invocations.
    pub fn process(
        &self,
        rendered: String,
        source_path: &Path,
        is_module: bool,
    ) -> Result<(String, Option<ClassMap>)> {
        if !is_module && self.transforms.is_empty() {
            return Ok((rendered, None));
        }

        tracing::debug!(
            path = %source_path.display(),
            transforms = self.transforms.len(),
            is_module,
            "running transform chain"
        );

        let cell: MappingCell = Arc::new(OnceLock::new());
        let mut current = rendered;

        if is_module {
            let extractor = ModulesExtractor::new(Arc::clone(&cell));
            current = Self::apply(&extractor, current, source_path)?;
        }
        for transform in &self.transforms {
            current = Self::apply(transform.as_ref(), current, source_path)?;
        }

        let mapping = Arc::try_unwrap(cell).ok().and_then(OnceLock::into_inner);
        Ok((current, mapping))
    }

    fn apply(transform: &dyn CssTransform, css: String, from: &Path) -> Result<String> {
        transform
            .transform(&css, from)
            .map_err(|message| Error::Transform {
                plugin: transform.name().to_string(),
                message,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct Append(&'static str);

    impl CssTransform for Append {
        fn name(&self) -> &str {
            "append"
        }

        fn transform(&self, css: &str, _from: &Path) -> std::result::Result<String, String> {
            Ok(format!("{css}{}", self.0))
        }
    }

    struct Failing;

    impl CssTransform for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn transform(&self, _css: &str, _from: &Path) -> std::result::Result<String, String> {
            Err("boom".to_string())
        }
    }

    fn src() -> PathBuf {
        PathBuf::from("/src/a.css")
    }

    #[test]
    fn test_empty_chain_returns_input_unchanged() {
        let pipeline = TransformPipeline::default();
        let (text, mapping) = pipeline
            .process(".x{color:red}".to_string(), &src(), false)
            .unwrap();
        assert_eq!(text, ".x{color:red}");
        assert!(mapping.is_none());
    }

    #[test]
    fn test_transforms_run_in_order() {
        let pipeline = TransformPipeline::new(vec![Box::new(Append("/*1*/")), Box::new(Append("/*2*/"))]);
        let (text, _) = pipeline.process("a{}".to_string(), &src(), false).unwrap();
        assert_eq!(text, "a{}/*1*//*2*/");
    }

    #[test]
    fn test_module_asset_produces_mapping() {
        let pipeline = TransformPipeline::default();
        let (text, mapping) = pipeline
            .process(
                ".button { color: red; } .label { color: blue; }".to_string(),
                &PathBuf::from("/src/button.module.css"),
                true,
            )
            .unwrap();

        let mapping = mapping.unwrap();
        assert!(mapping.contains_key("button"));
        assert!(mapping.contains_key("label"));
        assert_ne!(mapping["button"], mapping["label"]);
        // The rewritten text uses the generated names.
        assert!(text.contains(&mapping["button"]));
    }

    #[test]
    fn test_extractor_runs_before_user_transforms() {
        let pipeline = TransformPipeline::new(vec![Box::new(Append("/*tail*/"))]);
        let (text, mapping) = pipeline
            .process(
                ".x { color: red; }".to_string(),
                &PathBuf::from("/src/x.module.css"),
                true,
            )
            .unwrap();
        assert!(mapping.is_some());
        assert!(text.ends_with("/*tail*/"));
    }

    #[test]
    fn test_failure_names_the_transform() {
        let pipeline = TransformPipeline::new(vec![Box::new(Failing)]);
        let err = pipeline.process("a{}".to_string(), &src(), false).unwrap_err();
        match err {
            Error::Transform { plugin, message } => {
                assert_eq!(plugin, "failing");
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
