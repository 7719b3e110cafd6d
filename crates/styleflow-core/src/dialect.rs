//! Stylesheet dialect detection.
//!
//! Recognized source extensions: `.css` (pass-through), `.sass`, `.scss`,
//! `.less`, `.styl`. Anything else is not a style asset.

use std::fmt;
use std::path::Path;

/// A stylesheet source dialect, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain CSS, read verbatim.
    Css,
    /// Sass indented syntax.
    Sass,
    /// Sassy CSS.
    Scss,
    /// Less.
    Less,
    /// Stylus.
    Stylus,
}

impl Dialect {
    /// Determine the dialect from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "css" => Some(Dialect::Css),
            "sass" => Some(Dialect::Sass),
            "scss" => Some(Dialect::Scss),
            "less" => Some(Dialect::Less),
            "styl" => Some(Dialect::Stylus),
            _ => None,
        }
    }

    /// Determine the dialect from a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Check whether a specifier names a style asset.
    #[must_use]
    pub fn matches(specifier: &str) -> bool {
        Self::from_path(Path::new(specifier)).is_some()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Css => "css",
            Dialect::Sass => "sass",
            Dialect::Scss => "scss",
            Dialect::Less => "less",
            Dialect::Stylus => "stylus",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_extension() {
        assert_eq!(Dialect::from_extension("css"), Some(Dialect::Css));
        assert_eq!(Dialect::from_extension("SCSS"), Some(Dialect::Scss));
        assert_eq!(Dialect::from_extension("styl"), Some(Dialect::Stylus));
        assert_eq!(Dialect::from_extension("js"), None);
        assert_eq!(Dialect::from_extension("xyz"), None);
    }

    #[test]
    fn test_dialect_from_path() {
        assert_eq!(
            Dialect::from_path(Path::new("/src/button.module.scss")),
            Some(Dialect::Scss)
        );
        assert_eq!(Dialect::from_path(Path::new("theme.sass")), Some(Dialect::Sass));
        assert_eq!(Dialect::from_path(Path::new("app.ts")), None);
        assert_eq!(Dialect::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_matches_specifier() {
        assert!(Dialect::matches("./styles/app.less"));
        assert!(Dialect::matches("widget.styl"));
        assert!(!Dialect::matches("./utils"));
        assert!(!Dialect::matches("lodash"));
    }
}
