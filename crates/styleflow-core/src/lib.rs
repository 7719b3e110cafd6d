#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unused_self)]

//! Stylesheet asset pipeline for bundlers.
//!
//! Lets a host bundler treat `.css`, `.sass`, `.scss`, `.less`, and `.styl`
//! files as importable assets. Source files are rendered to plain CSS, run
//! through an ordered transform chain (with scoped class-name extraction for
//! `*.module.*` files), persisted to a uniquely named artifact, and re-injected
//! into the module graph through a synthetic import.
//!
//! ## Architecture
//!
//! 1. **Resolve** - Tag style specifiers with a namespace ([`plugin`])
//! 2. **Render** - Preprocessor dialect to plain CSS ([`render`])
//! 3. **Transform** - Ordered transform chain + CSS Modules ([`transform`], [`modules`])
//! 4. **Materialize** - Persist the artifact, emit the synthetic import ([`artifact`])

pub mod artifact;
pub mod dialect;
pub mod error;
pub mod modules;
pub mod plugin;
pub mod render;
pub mod transform;

pub use artifact::{Artifact, Materializer};
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use modules::ClassMap;
pub use plugin::{
    ContentKind, FsResolver, LoadArgs, Loaded, Namespace, PathResolver, Resolution, ResolveArgs,
    StylePlugin, StylePluginBuilder, DEFAULT_MODULE_PATTERN,
};
pub use render::{EngineLoader, RenderEngine, RenderOptions, Renderer};
pub use transform::{CssTransform, TransformPipeline};
