use std::path::{Path, PathBuf};

/// Local file reader rooted at an asset directory.
#[derive(Debug, Clone)]
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Resolves a descriptor path against the root. Leading slashes are
    /// treated as root-relative, the way web asset paths are written.
    #[must_use]
    pub fn resolve(&self, uri: &str) -> PathBuf {
        self.root_path.join(uri.trim_start_matches('/'))
    }

    /// Reads the whole file.
    pub async fn read_bytes(&self, uri: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.resolve(uri);
        tokio::fs::read(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))
    }
}
