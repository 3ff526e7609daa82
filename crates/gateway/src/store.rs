use std::path::PathBuf;

/// The persistent-storage collaborator: put bytes at a key, get a public URL
/// back. The pipeline never depends on storage identity beyond the returned
/// URL.
pub trait ArtifactStore: Send + Sync {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> anyhow::Result<String>;
}

/// Filesystem store: writes beneath a root directory and returns the path the
/// static file route serves the artifact under.
pub struct FsStore {
    root: PathBuf,
    public_base: String,
}

impl FsStore {
    pub fn new(root: PathBuf, public_base: impl Into<String>) -> Self {
        Self {
            root,
            public_base: public_base.into(),
        }
    }
}

impl ArtifactStore for FsStore {
    // content_type is part of the trait contract for blob-store
    // implementations; the filesystem infers it from the extension.
    fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> anyhow::Result<String> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;
        Ok(format!(
            "{}/{}",
            self.public_base.trim_end_matches('/'),
            key
        ))
    }
}
