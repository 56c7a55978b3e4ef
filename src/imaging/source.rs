//! Where an image comes from.

use std::path::PathBuf;

/// An image resource to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk.
    Path(PathBuf),
    /// A remote `http(s)` URL.
    Url(String),
    /// Bytes already in memory, e.g. an upload. `name` is only for display.
    Bytes { name: String, data: Vec<u8> },
}

impl ImageSource {
    /// Interpret a command-line argument: `http://` / `https://` prefixes
    /// are URLs, anything else is a path.
    pub fn parse(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Url(arg.to_string())
        } else {
            ImageSource::Path(PathBuf::from(arg))
        }
    }

    /// Human-readable name for reports and logs.
    pub fn label(&self) -> String {
        match self {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Url(url) => url.clone(),
            ImageSource::Bytes { name, .. } => name.clone(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Url(_))
    }
}
