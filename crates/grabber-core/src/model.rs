//! Shared data types.

/// One file to download and where to put it under the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDescriptor {
    pub url: String,
    /// Relative directory under the output root; empty means the root itself.
    pub subdirectory: String,
}

impl LinkDescriptor {
    pub fn new(url: impl Into<String>, subdirectory: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            subdirectory: subdirectory.into(),
        }
    }

    /// Descriptor placed directly in the output root.
    pub fn at_root(url: impl Into<String>) -> Self {
        Self::new(url, String::new())
    }
}
