//! Port adapters
//!
//! Filesystem adapters back the console binary. The in-memory ones keep
//! everything in the process and are what the controller tests run against.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use core_kernel::{
    DocumentSink, DomainPort, ExportDocument, ExportReceipt, ImageId, ImageRef, ImageStore,
    ImageUpload, PortError,
};

fn require_file_name(file_name: &str) -> Result<(), PortError> {
    if file_name.trim().is_empty() {
        return Err(PortError::validation_field("file name is empty", "file_name"));
    }
    Ok(())
}

/// Last path component, so an export can never escape its directory
fn base_name(file_name: &str) -> Result<String, PortError> {
    Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| PortError::validation_field("file name has no final component", "file_name"))
}

/// Writes exported documents into a directory
#[derive(Debug, Clone)]
pub struct FileExportSink {
    dir: PathBuf,
}

impl FileExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DomainPort for FileExportSink {}

#[async_trait]
impl DocumentSink for FileExportSink {
    async fn export(&self, document: ExportDocument) -> Result<ExportReceipt, PortError> {
        require_file_name(&document.file_name)?;
        let path = self.dir.join(base_name(&document.file_name)?);

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            tracing::warn!(dir = %self.dir.display(), error = %e, "cannot create export directory");
            PortError::io(format!("cannot create {}", self.dir.display()), e)
        })?;
        tokio::fs::write(&path, document.body.as_bytes())
            .await
            .map_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "document export failed");
                PortError::io(format!("cannot write {}", path.display()), e)
            })?;

        tracing::info!(path = %path.display(), bytes = document.body.len(), "document exported");
        Ok(ExportReceipt {
            location: path.display().to_string(),
            bytes_written: document.body.len(),
        })
    }
}

/// Resolves uploads to `file://` references on the local disk
///
/// Uploads given by name must already exist. Uploads carrying bytes are
/// written into `upload_dir` first.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    upload_dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    async fn write_bytes(&self, id: ImageId, file_name: &str, bytes: &[u8]) -> Result<PathBuf, PortError> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| PortError::io(format!("cannot create {}", self.upload_dir.display()), e))?;
        let path = self
            .upload_dir
            .join(format!("{}_{}", id.as_uuid().simple(), base_name(file_name)?));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PortError::io(format!("cannot write {}", path.display()), e))?;
        Ok(path)
    }
}

impl DomainPort for LocalImageStore {}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<ImageRef, PortError> {
        require_file_name(&upload.file_name)?;
        let id = ImageId::new();

        let path = match &upload.bytes {
            Some(bytes) => self.write_bytes(id, &upload.file_name, bytes).await?,
            None => PathBuf::from(&upload.file_name),
        };

        let metadata = tokio::fs::metadata(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => PortError::not_found("image", path.display()),
            _ => PortError::io(format!("cannot read {}", path.display()), e),
        })?;
        if !metadata.is_file() {
            return Err(PortError::validation_field(
                format!("{} is not a file", path.display()),
                "file_name",
            ));
        }
        let resolved = tokio::fs::canonicalize(&path)
            .await
            .map_err(|e| PortError::io(format!("cannot resolve {}", path.display()), e))?;

        tracing::debug!(image_id = %id, path = %resolved.display(), "image stored");
        Ok(ImageRef {
            id,
            file_name: upload.file_name,
            uri: format!("file://{}", resolved.display()),
        })
    }
}

/// Keeps exported documents in memory
#[derive(Debug, Default)]
pub struct InMemoryExportSink {
    documents: Mutex<Vec<ExportDocument>>,
}

impl InMemoryExportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything exported so far, oldest first
    pub fn documents(&self) -> Vec<ExportDocument> {
        self.documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }
}

impl DomainPort for InMemoryExportSink {}

#[async_trait]
impl DocumentSink for InMemoryExportSink {
    async fn export(&self, document: ExportDocument) -> Result<ExportReceipt, PortError> {
        require_file_name(&document.file_name)?;
        let receipt = ExportReceipt {
            location: format!("memory://{}", document.file_name),
            bytes_written: document.body.len(),
        };
        self.documents
            .lock()
            .map_err(|_| PortError::internal("export buffer poisoned"))?
            .push(document);
        Ok(receipt)
    }
}

/// Accepts any named upload and hands back `memory://` references
#[derive(Debug, Default)]
pub struct InMemoryImageStore {
    stored: Mutex<Vec<ImageRef>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Vec<ImageRef> {
        self.stored.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl DomainPort for InMemoryImageStore {}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<ImageRef, PortError> {
        require_file_name(&upload.file_name)?;
        let image = ImageRef {
            id: ImageId::new(),
            uri: format!("memory://{}", upload.file_name),
            file_name: upload.file_name,
        };
        self.stored
            .lock()
            .map_err(|_| PortError::internal("image buffer poisoned"))?
            .push(image.clone());
        Ok(image)
    }
}
