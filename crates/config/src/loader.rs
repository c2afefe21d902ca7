//! Parse and load settings layers from disk.

use std::{ffi::OsStr, fs, path::Path};

use crate::{Error, RawSettings, error::excerpt_at};

/// Serialization format of a settings layer document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFormat {
    /// `.json`
    Json,
    /// `.ron`
    Ron,
}

impl LayerFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("json") => Some(Self::Json),
            Some("ron") => Some(Self::Ron),
            _ => None,
        }
    }
}

/// Parse a partial settings layer from source text.
pub fn parse_layer(source: &str, format: LayerFormat) -> Result<RawSettings, Error> {
    match format {
        LayerFormat::Json => serde_json::from_str(source).map_err(|e| {
            if e.is_syntax() || e.is_eof() {
                let (line, col) = (e.line(), e.column());
                Error::Parse {
                    path: None,
                    line,
                    col,
                    message: e.to_string(),
                    excerpt: excerpt_at(source, line, col),
                }
            } else {
                Error::validation(e.to_string())
            }
        }),
        LayerFormat::Ron => ron::from_str(source).map_err(|e| Error::validation(e.to_string())),
    }
}

/// Load a partial settings layer from a `.json` or `.ron` file.
pub fn load_layer_from_path(path: &Path) -> Result<RawSettings, Error> {
    let Some(format) = LayerFormat::from_path(path) else {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported settings format (expected a .json or .ron file)".to_string(),
        });
    };
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    parse_layer(&source, format).map_err(|e| e.with_path(path))
}
