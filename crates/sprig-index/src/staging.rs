//! The staging area: content captured at `add` time.
//!
//! Bytes are held here, not in the object store, until a commit turns them
//! into blobs. Filesystem I/O is the caller's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sprig_store::Blob;

use crate::error::{IndexError, IndexResult};

/// Staged files by name. Serialized with the content hex-encoded, so the
/// area can sit inside a JSON record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingArea {
    #[serde(with = "hex_content")]
    staged: BTreeMap<String, Vec<u8>>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.staged.contains_key(filename)
    }

    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.staged.get(filename).map(Vec::as_slice)
    }

    /// Staged filenames in sorted order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.staged.keys().map(String::as_str)
    }

    // ---------------------------------------------------------------
    // Stage operations
    // ---------------------------------------------------------------

    /// Capture `content` for `filename`, replacing any earlier capture.
    pub fn stage(&mut self, filename: &str, content: Vec<u8>) -> IndexResult<()> {
        if filename.is_empty() {
            return Err(IndexError::InvalidPath("empty path".to_string()));
        }
        tracing::debug!(file = filename, size = content.len(), "staged");
        self.staged.insert(filename.to_string(), content);
        Ok(())
    }

    /// Drop the capture for `filename`. Returns `true` if one existed.
    pub fn unstage(&mut self, filename: &str) -> bool {
        self.staged.remove(filename).is_some()
    }

    pub fn clear(&mut self) {
        self.staged.clear();
    }

    /// One blob per staged file, in filename order.
    pub fn to_blobs(&self) -> Vec<Blob> {
        self.staged
            .iter()
            .map(|(name, content)| Blob::new(content.clone(), name.clone()))
            .collect()
    }
}

mod hex_content {
    use std::collections::BTreeMap;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        staged: &BTreeMap<String, Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        staged
            .iter()
            .map(|(name, content)| (name, hex::encode(content)))
            .collect::<BTreeMap<_, _>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Vec<u8>>, D::Error> {
        BTreeMap::<String, String>::deserialize(deserializer)?
            .into_iter()
            .map(|(name, content)| {
                let bytes = hex::decode(&content)
                    .map_err(|e| D::Error::custom(format!("staged content of {name}: {e}")))?;
                Ok::<_, D::Error>((name, bytes))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_and_get() {
        let mut staging = StagingArea::new();
        staging.stage("a.txt", b"x".to_vec()).unwrap();
        assert_eq!(staging.get("a.txt"), Some(&b"x"[..]));
        assert!(staging.contains("a.txt"));
        assert_eq!(staging.len(), 1);
    }

    #[test]
    fn staging_twice_is_idempotent() {
        let mut once = StagingArea::new();
        once.stage("a.txt", b"x".to_vec()).unwrap();
        let mut twice = once.clone();
        twice.stage("a.txt", b"x".to_vec()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn restage_replaces_content() {
        let mut staging = StagingArea::new();
        staging.stage("a.txt", b"x".to_vec()).unwrap();
        staging.stage("a.txt", b"y".to_vec()).unwrap();
        assert_eq!(staging.get("a.txt"), Some(&b"y"[..]));
        assert_eq!(staging.len(), 1);
    }

    #[test]
    fn empty_path_is_rejected() {
        let mut staging = StagingArea::new();
        assert!(matches!(
            staging.stage("", Vec::new()),
            Err(IndexError::InvalidPath(_))
        ));
    }

    #[test]
    fn unstage_and_clear() {
        let mut staging = StagingArea::new();
        staging.stage("a.txt", b"x".to_vec()).unwrap();
        staging.stage("b.txt", b"y".to_vec()).unwrap();
        assert!(staging.unstage("a.txt"));
        assert!(!staging.unstage("a.txt"));
        staging.clear();
        assert!(staging.is_empty());
    }

    #[test]
    fn blobs_are_name_qualified() {
        let mut staging = StagingArea::new();
        staging.stage("b.txt", b"same".to_vec()).unwrap();
        staging.stage("a.txt", b"same".to_vec()).unwrap();
        let blobs = staging.to_blobs();
        assert_eq!(blobs[0].filename, "a.txt");
        assert_eq!(blobs[1].filename, "b.txt");
        assert_ne!(blobs[0].id().unwrap(), blobs[1].id().unwrap());
    }

    #[test]
    fn serde_keeps_binary_content() {
        let mut staging = StagingArea::new();
        staging.stage("a.bin", vec![0x00, 0xff, 0x10]).unwrap();
        let json = serde_json::to_string(&staging).unwrap();
        assert_eq!(json, r#"{"staged":{"a.bin":"00ff10"}}"#);
        let decoded: StagingArea = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, staging);
    }

    #[test]
    fn bad_hex_is_rejected() {
        let err = serde_json::from_str::<StagingArea>(r#"{"staged":{"a.bin":"zz"}}"#).unwrap_err();
        assert!(err.to_string().contains("a.bin"));
    }
}
