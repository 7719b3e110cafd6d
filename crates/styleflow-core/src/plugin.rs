//! The resolve/load protocol for stylesheet assets.
//!
//! Each asset passes through a two-phase state machine driven by the host
//! bundler's hooks. The first resolve tags the source path with
//! [`Namespace::Style`]; its load renders, transforms, and (when extraction
//! is enabled) materializes an artifact, returning synthetic module text
//! whose import re-enters the resolve hook. That second resolve tags the
//! artifact with [`Namespace::Temp`] and carries the original resolution
//! directory through to the final read-through load.
//!
//! ## Usage
//!
//! ```ignore
//! use styleflow_core::StylePlugin;
//!
//! let plugin = StylePlugin::builder().extract(true).build()?;
//! // Host adapter wires plugin.resolve / plugin.load into its hook runtime.
//! ```

use std::path::{Path, PathBuf};

use regex_lite::Regex;
use rustc_hash::FxHashMap as HashMap;

use crate::artifact::Materializer;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::render::{EngineLoader, RenderOptions, Renderer};
use crate::transform::{CssTransform, TransformPipeline};

/// Default module-style classification: a `.module.` infix before the final
/// extension, e.g. `button.module.scss`.
pub const DEFAULT_MODULE_PATTERN: &str = r"\.module\.[^.]+$";

/// Which load handler processes a resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// A source stylesheet awaiting render/transform.
    Style,
    /// A materialized artifact awaiting plain read-through.
    Temp,
}

/// Arguments of a resolve hook invocation.
#[derive(Debug, Clone, Copy)]
pub struct ResolveArgs<'a> {
    /// The import specifier as written.
    pub specifier: &'a str,
    /// The importing module, when known.
    pub importer: Option<&'a Path>,
    /// Directory for relative lookups.
    pub resolve_dir: &'a Path,
    /// Namespace the specifier was imported from; `None` outside this
    /// plugin's namespaces (the host's default module graph).
    pub namespace: Option<Namespace>,
}

/// A claimed resolution: path plus namespace tag, with the original
/// resolution directory carried into `Temp` loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: PathBuf,
    pub namespace: Namespace,
    /// Set only for `Temp`: the source asset's resolution directory, so
    /// relative references inside the artifact still resolve against the
    /// true source directory rather than the artifact's.
    pub pinned_resolve_dir: Option<PathBuf>,
}

/// Arguments of a load hook invocation for one of this plugin's namespaces.
#[derive(Debug, Clone, Copy)]
pub struct LoadArgs<'a> {
    pub path: &'a Path,
    pub namespace: Namespace,
    /// Carried state from the matching [`Resolution`].
    pub pinned_resolve_dir: Option<&'a Path>,
}

/// How the host should interpret loaded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Plain stylesheet text.
    Css,
    /// Synthetic JavaScript module text.
    Js,
}

/// Result of a load hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub content: String,
    pub kind: ContentKind,
    /// Effective resolution directory for anything this content imports.
    pub resolve_dir: PathBuf,
}

/// Path-resolution collaborator: turns a specifier into an absolute path.
///
/// The plugin falls back to a directory-relative lookup when the resolver
/// declines, and fails with `ResolutionFailure` when both miss.
pub trait PathResolver: Send + Sync {
    fn resolve(&self, specifier: &str, base_dir: &Path) -> Option<PathBuf>;
}

/// Default resolver: plain filesystem lookup, absolute or relative to the
/// base directory, canonicalized without UNC artifacts.
#[derive(Debug, Default)]
pub struct FsResolver;

impl PathResolver for FsResolver {
    fn resolve(&self, specifier: &str, base_dir: &Path) -> Option<PathBuf> {
        let candidate = if Path::new(specifier).is_absolute() {
            PathBuf::from(specifier)
        } else {
            base_dir.join(specifier)
        };
        if candidate.is_file() {
            dunce::canonicalize(&candidate).ok()
        } else {
            None
        }
    }
}

/// Builder for [`StylePlugin`].
pub struct StylePluginBuilder {
    extract: bool,
    module_pattern: Option<String>,
    transforms: Vec<Box<dyn CssTransform>>,
    render_options: HashMap<Dialect, RenderOptions>,
    engines: Vec<(Dialect, EngineLoader)>,
    resolver: Box<dyn PathResolver>,
    artifact_dir: Option<PathBuf>,
}

impl StylePluginBuilder {
    /// Enable or disable artifact extraction (default: enabled). When
    /// disabled, module mappings are still computed but no artifact is
    /// written and no import statement is emitted.
    #[must_use]
    pub fn extract(mut self, extract: bool) -> Self {
        self.extract = extract;
        self
    }

    /// Regex (matched against the asset's full path) deciding module-style
    /// classification.
    #[must_use]
    pub fn module_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.module_pattern = Some(pattern.into());
        self
    }

    /// Append a transform to the chain (runs after the class-name extractor).
    #[must_use]
    pub fn transform(mut self, transform: Box<dyn CssTransform>) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Per-dialect options forwarded to the rendering engine.
    #[must_use]
    pub fn render_options(mut self, dialect: Dialect, options: RenderOptions) -> Self {
        self.render_options.insert(dialect, options);
        self
    }

    /// Register (or replace) a preprocessor engine loader for a dialect.
    #[must_use]
    pub fn engine(mut self, dialect: Dialect, loader: EngineLoader) -> Self {
        self.engines.push((dialect, loader));
        self
    }

    /// Replace the path-resolution collaborator.
    #[must_use]
    pub fn resolver(mut self, resolver: Box<dyn PathResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Directory for materialized artifacts (default: the OS temp dir).
    #[must_use]
    pub fn artifact_dir(mut self, dir: PathBuf) -> Self {
        self.artifact_dir = Some(dir);
        self
    }

    /// Build the plugin, compiling the module pattern.
    pub fn build(self) -> Result<StylePlugin> {
        let pattern = self
            .module_pattern
            .unwrap_or_else(|| DEFAULT_MODULE_PATTERN.to_string());
        let module_pattern = Regex::new(&pattern).map_err(|e| Error::InvalidPattern {
            pattern,
            message: e.to_string(),
        })?;

        let mut renderer = Renderer::new();
        for (dialect, options) in self.render_options {
            renderer.set_options(dialect, options);
        }
        for (dialect, loader) in self.engines {
            renderer.register(dialect, loader);
        }

        Ok(StylePlugin {
            extract: self.extract,
            module_pattern,
            renderer,
            pipeline: TransformPipeline::new(self.transforms),
            resolver: self.resolver,
            materializer: Materializer::new(self.artifact_dir),
        })
    }
}

impl Default for StylePluginBuilder {
    fn default() -> Self {
        Self {
            extract: true,
            module_pattern: None,
            transforms: Vec::new(),
            render_options: HashMap::default(),
            engines: Vec::new(),
            resolver: Box::new(FsResolver),
            artifact_dir: None,
        }
    }
}

/// The stylesheet asset plugin: owns the renderer, the transform pipeline,
/// and the artifact materializer, and drives the two-namespace protocol.
///
/// All state is immutable after construction; hooks take `&self` and
/// independent assets may be processed from parallel tasks without
/// coordination. Nothing is cached across loads.
pub struct StylePlugin {
    extract: bool,
    module_pattern: Regex,
    renderer: Renderer,
    pipeline: TransformPipeline,
    resolver: Box<dyn PathResolver>,
    materializer: Materializer,
}

impl StylePlugin {
    #[must_use]
    pub fn builder() -> StylePluginBuilder {
        StylePluginBuilder::default()
    }

    /// Resolve hook. Returns `Ok(None)` for specifiers this plugin does not
    /// claim (non-style extensions), letting the host's default resolution
    /// continue.
    pub fn resolve(&self, args: &ResolveArgs<'_>) -> Result<Option<Resolution>> {
        if !Dialect::matches(args.specifier) {
            return Ok(None);
        }

        let path = self.locate(args)?;
        let resolution = if args.namespace == Some(Namespace::Style) {
            // Re-entry from the synthetic import: the incoming resolve_dir is
            // the source asset's directory, pin it for the Temp load.
            Resolution {
                path,
                namespace: Namespace::Temp,
                pinned_resolve_dir: Some(args.resolve_dir.to_path_buf()),
            }
        } else {
            Resolution {
                path,
                namespace: Namespace::Style,
                pinned_resolve_dir: None,
            }
        };

        tracing::debug!(
            specifier = args.specifier,
            namespace = ?resolution.namespace,
            path = %resolution.path.display(),
            "resolved style asset"
        );
        Ok(Some(resolution))
    }

    /// Load hook for both namespaces.
    pub fn load(&self, args: &LoadArgs<'_>) -> Result<Loaded> {
        match args.namespace {
            Namespace::Temp => self.load_artifact(args),
            Namespace::Style => self.load_style(args.path),
        }
    }

    /// Whether a path is classified as a module-style asset.
    #[must_use]
    pub fn is_module_asset(&self, path: &Path) -> bool {
        self.module_pattern.is_match(&path.to_string_lossy())
    }

    fn locate(&self, args: &ResolveArgs<'_>) -> Result<PathBuf> {
        if let Some(path) = self.resolver.resolve(args.specifier, args.resolve_dir) {
            return Ok(path);
        }
        // Directory-relative fallback when the collaborator declines.
        let fallback = args.resolve_dir.join(args.specifier);
        if fallback.is_file() {
            return Ok(dunce::canonicalize(&fallback).unwrap_or(fallback));
        }
        Err(Error::ResolutionFailure {
            specifier: args.specifier.to_string(),
            from: args.resolve_dir.to_path_buf(),
        })
    }

    /// Terminal load: raw read of the artifact, resolution directory
    /// reinstated from the carried state.
    fn load_artifact(&self, args: &LoadArgs<'_>) -> Result<Loaded> {
        let content = styleflow_util::fs::read_to_string_lossy(args.path)?;
        let resolve_dir = args
            .pinned_resolve_dir
            .map_or_else(|| parent_dir(args.path), Path::to_path_buf);
        Ok(Loaded {
            content,
            kind: ContentKind::Css,
            resolve_dir,
        })
    }

    /// Render → transform → materialize, producing the synthetic module text.
    fn load_style(&self, source_path: &Path) -> Result<Loaded> {
        let rendered = self.renderer.render(source_path)?;
        let is_module = self.is_module_asset(source_path);
        let (final_text, mapping) = self.pipeline.process(rendered, source_path, is_module)?;

        let mut content = String::new();
        if let Some(mapping) = mapping {
            content.push_str("export default ");
            content.push_str(&serde_json::to_string(&mapping)?);
            content.push_str(";\n");
        }
        if self.extract {
            let artifact = self.materializer.materialize(&final_text, source_path)?;
            content.push_str(&artifact.import_statement()?);
            content.push('\n');
        }

        Ok(Loaded {
            content,
            kind: ContentKind::Js,
            resolve_dir: parent_dir(source_path),
        })
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().unwrap_or(Path::new(".")).to_path_buf()
}
