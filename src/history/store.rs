use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait BlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), String>;
}

#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|err| format!("failed to read history: {}", err))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)
            .map_err(|err| format!("failed to write history: {}", err))?;
        std::fs::rename(&tmp_path, &path)
            .map_err(|err| format!("failed to finalize history: {}", err))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|err| format!("failed to create history dir: {}", err))
}
