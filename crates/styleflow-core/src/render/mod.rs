//! Rendering of stylesheet sources to plain CSS.
//!
//! Dispatches a source file by its extension to the matching preprocessor
//! engine. Plain `.css` is read verbatim; `.sass`/`.scss` are compiled with
//! the built-in grass engine; `.less`/`.styl` engines are supplied by the
//! embedder. Engines are loaded lazily, on the first asset of that dialect.

pub mod sass;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rustc_hash::FxHashMap as HashMap;

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use sass::SassEngine;

/// Per-dialect render options, forwarded to the engine together with the
/// source path (the path itself is mandatory so the engine can resolve
/// relative imports/URLs against the true source location).
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Extra lookup paths for the dialect's own import mechanism.
    pub include_paths: Vec<PathBuf>,
    /// Emit compressed output.
    pub compressed: bool,
}

/// A preprocessor engine: renders one source file to plain CSS text.
///
/// Every call is independent and repeatable; engines hold no per-asset state.
pub trait RenderEngine: Send + Sync {
    fn render(&self, source_path: &Path, options: &RenderOptions) -> Result<String>;
}

/// Loader invoked lazily, when its dialect is first encountered. A failing
/// loader surfaces as `Error::EngineUnavailable` and is retried on the next
/// asset of that dialect; only a successful load is cached.
pub type EngineLoader =
    Box<dyn Fn() -> std::result::Result<Box<dyn RenderEngine>, String> + Send + Sync>;

struct EngineSlot {
    loader: EngineLoader,
    engine: OnceLock<Box<dyn RenderEngine>>,
}

/// Extension-dispatched renderer backed by a lazy engine registry.
pub struct Renderer {
    slots: HashMap<Dialect, EngineSlot>,
    options: HashMap<Dialect, RenderOptions>,
}

impl Renderer {
    /// Create a renderer with the built-in engines registered: verbatim CSS
    /// and grass-backed Sass/SCSS. Less and Stylus slots report
    /// `EngineUnavailable` until an engine is registered for them.
    #[must_use]
    pub fn new() -> Self {
        let mut renderer = Self {
            slots: HashMap::default(),
            options: HashMap::default(),
        };
        renderer.register(Dialect::Css, Box::new(|| Ok(Box::new(PassthroughEngine))));
        renderer.register(Dialect::Sass, Box::new(|| Ok(Box::new(SassEngine))));
        renderer.register(Dialect::Scss, Box::new(|| Ok(Box::new(SassEngine))));
        renderer.register(
            Dialect::Less,
            Box::new(|| Err("no less engine registered".to_string())),
        );
        renderer.register(
            Dialect::Stylus,
            Box::new(|| Err("no stylus engine registered".to_string())),
        );
        renderer
    }

    /// Register (or replace) the engine loader for a dialect.
    pub fn register(&mut self, dialect: Dialect, loader: EngineLoader) {
        self.slots.insert(
            dialect,
            EngineSlot {
                loader,
                engine: OnceLock::new(),
            },
        );
    }

    /// Set the render options forwarded to a dialect's engine.
    pub fn set_options(&mut self, dialect: Dialect, options: RenderOptions) {
        self.options.insert(dialect, options);
    }

    /// Render a source file to plain CSS.
    ///
    /// Fails with `UnsupportedExtension` if the path's extension is not a
    /// recognized dialect, and with `EngineUnavailable` if the dialect has
    /// no working engine.
    pub fn render(&self, source_path: &Path) -> Result<String> {
        let dialect = Dialect::from_path(source_path).ok_or_else(|| {
            Error::UnsupportedExtension {
                path: source_path.to_path_buf(),
            }
        })?;

        tracing::debug!(path = %source_path.display(), %dialect, "rendering stylesheet");

        let engine = self.engine(dialect, source_path)?;
        let default_options = RenderOptions::default();
        let options = self.options.get(&dialect).unwrap_or(&default_options);
        engine.render(source_path, options)
    }

    fn engine(&self, dialect: Dialect, source_path: &Path) -> Result<&dyn RenderEngine> {
        let slot = self
            .slots
            .get(&dialect)
            .ok_or_else(|| Error::UnsupportedExtension {
                path: source_path.to_path_buf(),
            })?;

        match slot.engine.get() {
            Some(engine) => Ok(engine.as_ref()),
            None => {
                let loaded = (slot.loader)().map_err(|reason| Error::EngineUnavailable {
                    dialect,
                    reason,
                })?;
                Ok(slot.engine.get_or_init(move || loaded).as_ref())
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Verbatim read for plain `.css` sources.
struct PassthroughEngine;

impl RenderEngine for PassthroughEngine {
    fn render(&self, source_path: &Path, _options: &RenderOptions) -> Result<String> {
        Ok(styleflow_util::fs::read_to_string_lossy(source_path)?)
    }
}
