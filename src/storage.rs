// 🗄️ Object Storage - where finished batches land
//
// The pipeline only ever needs one operation: put a whole object under a
// bucket/key. Cloud clients live outside this crate; they plug in through
// `ObjectStore`. Two implementations ship here:
// - LocalObjectStore: buckets are directories under a root
// - MemoryObjectStore: in-process map, for tests and embedding

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

// ============================================================================
// CORE TYPES
// ============================================================================

/// One whole-object write
#[derive(Debug, Clone, Copy)]
pub struct PutObject<'a> {
    pub bucket: &'a str,
    pub key: &'a str,
    pub body: &'a [u8],
    pub content_type: &'a str,
}

/// What the store reports back after a successful write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PutReceipt {
    pub bucket: String,
    pub key: String,
    pub size: usize,
    /// Hex SHA-256 of the body
    pub sha256: String,
}

impl PutReceipt {
    fn for_request(request: &PutObject<'_>) -> Self {
        PutReceipt {
            bucket: request.bucket.to_string(),
            key: request.key.to_string(),
            size: request.body.len(),
            sha256: format!("{:x}", Sha256::digest(request.body)),
        }
    }
}

/// Whole-object storage. A write either lands completely or not at all.
pub trait ObjectStore {
    fn put_object(&self, request: PutObject<'_>) -> Result<PutReceipt>;
}

/// Reject keys that could escape the bucket when mapped to a path
fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("object key is empty");
    }
    let path = Path::new(key);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => bail!("object key {:?} must be a relative path without '..'", key),
        }
    }
    Ok(())
}

// ============================================================================
// LOCAL FILESYSTEM STORE
// ============================================================================

/// Maps `bucket/key` to `<root>/<bucket>/<key>` on disk
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalObjectStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location for a bucket/key pair
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        check_key(bucket).context("invalid bucket name")?;
        check_key(key)?;
        Ok(self.root.join(bucket).join(key))
    }
}

impl ObjectStore for LocalObjectStore {
    fn put_object(&self, request: PutObject<'_>) -> Result<PutReceipt> {
        let path = self.object_path(request.bucket, request.key)?;
        let parent = path
            .parent()
            .with_context(|| format!("object path {} has no parent", path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;

        // Write next to the target, then rename over it so readers never see
        // a half-written object.
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("object path {} has no file name", path.display()))?;
        let tmp_path = parent.join(format!(".{}.partial", file_name));

        let write_result = (|| -> Result<()> {
            let mut file = fs::File::create(&tmp_path)
                .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
            file.write_all(request.body)
                .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
            file.sync_all()
                .with_context(|| format!("Failed to sync {}", tmp_path.display()))?;
            fs::rename(&tmp_path, &path).with_context(|| {
                format!("Failed to move {} into place", path.display())
            })?;
            Ok(())
        })();

        if let Err(err) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }

        log::debug!(
            "stored {}/{} at {} ({})",
            request.bucket,
            request.key,
            path.display(),
            request.content_type
        );
        Ok(PutReceipt::for_request(&request))
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Keeps objects in a map keyed by (bucket, key)
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<(String, String), StoredObject>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The map stays consistent across a panicking writer (inserts are a
    /// single call), so a poisoned lock is recovered rather than reported.
    fn objects(&self) -> MutexGuard<'_, BTreeMap<(String, String), StoredObject>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// All (bucket, key) pairs currently stored
    pub fn keys(&self) -> Vec<(String, String)> {
        self.objects().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put_object(&self, request: PutObject<'_>) -> Result<PutReceipt> {
        check_key(request.key)?;
        self.objects().insert(
            (request.bucket.to_string(), request.key.to_string()),
            StoredObject {
                body: request.body.to_vec(),
                content_type: request.content_type.to_string(),
            },
        );
        Ok(PutReceipt::for_request(&request))
    }
}

// ============================================================================
// TESTS
// ============================================================================
