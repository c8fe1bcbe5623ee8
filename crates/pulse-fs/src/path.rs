//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Relative paths reported in metrics, run logs and the status document are
/// always rendered from this form so the output is identical across platforms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Backslashes become forward slashes and empty interior segments are
    /// dropped, so `a//b` and `a\b` both normalize to `a/b`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let absolute = raw.starts_with('/');
        let joined = raw
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        let inner = if absolute { format!("/{joined}") } else { joined };
        Self { inner }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::new(segment);
        }
        Self::new(format!("{}/{}", self.inner, segment))
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(0) if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) if idx > 0 => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// A path with the same parent and a different file name.
    pub fn with_file_name(&self, name: &str) -> Self {
        match self.parent() {
            Some(parent) => parent.join(name),
            None => Self::new(name),
        }
    }

    /// Express this path relative to `base`, if it lies underneath it.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<Self> {
        if base.inner.is_empty() {
            return Some(self.clone());
        }
        let rest = self.inner.strip_prefix(&base.inner)?;
        if rest.is_empty() {
            return Some(Self {
                inner: String::new(),
            });
        }
        if base.inner.ends_with('/') {
            return Some(Self::new(rest));
        }
        rest.strip_prefix('/').map(Self::new)
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_duplicate_separators() {
        assert_eq!(NormalizedPath::new("a//b///c").as_str(), "a/b/c");
        assert_eq!(NormalizedPath::new("/root//x/").as_str(), "/root/x");
    }

    #[test]
    fn relative_to_strips_base() {
        let base = NormalizedPath::new("/work/repo");
        let file = NormalizedPath::new("/work/repo/pkg/mod.py");
        assert_eq!(file.relative_to(&base).unwrap().as_str(), "pkg/mod.py");
    }

    #[test]
    fn relative_to_rejects_sibling_prefix() {
        let base = NormalizedPath::new("/work/repo");
        let file = NormalizedPath::new("/work/repository/mod.py");
        assert!(file.relative_to(&base).is_none());
    }

    #[test]
    fn with_file_name_keeps_parent() {
        let doc = NormalizedPath::new("/srv/site/README.md");
        assert_eq!(
            doc.with_file_name(".README.md.tmp").as_str(),
            "/srv/site/.README.md.tmp"
        );
    }
}
