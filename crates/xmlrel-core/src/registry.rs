//! File registration

use crate::error::{XmlError, XmlResult};
use crate::storage::XmlStore;
use crate::types::FileRecord;
use std::sync::Arc;
use tracing::info;

/// Reject names the store should never see
pub fn validate_file_name(name: &str) -> XmlResult<()> {
    if name.trim().is_empty() {
        return Err(XmlError::InvalidFileName(
            "file name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Maps file names to durable file ids, once per name
#[derive(Clone)]
pub struct FileRegistry {
    store: Arc<dyn XmlStore>,
}

impl FileRegistry {
    pub fn new(store: Arc<dyn XmlStore>) -> Self {
        Self { store }
    }

    /// Register a new file.
    ///
    /// The lookup is only an early exit. Two concurrent registrations of the
    /// same name can both pass it; the store's unique constraint then
    /// rejects the loser with [`XmlError::DuplicateFile`].
    pub async fn register(&self, name: &str) -> XmlResult<FileRecord> {
        validate_file_name(name)?;

        if self.store.find_file(name).await?.is_some() {
            return Err(XmlError::DuplicateFile(name.to_string()));
        }

        let file = self.store.insert_file(name).await?;
        info!(file = %file.name, id = %file.id, "Registered file");
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_register_once() {
        let store = Arc::new(MemoryStore::new());
        let registry = FileRegistry::new(store.clone());

        let file = registry.register("f.xml").await.unwrap();
        assert_eq!(file.name, "f.xml");

        let err = registry.register("f.xml").await.unwrap_err();
        assert_eq!(err, XmlError::DuplicateFile("f.xml".into()));
        assert_eq!(store.stats().await.unwrap().files, 1);
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let registry = FileRegistry::new(Arc::new(MemoryStore::new()));
        for name in ["", "   "] {
            let err = registry.register(name).await.unwrap_err();
            assert!(matches!(err, XmlError::InvalidFileName(_)));
        }
    }

    #[tokio::test]
    async fn test_concurrent_registration_admits_one() {
        let store = Arc::new(MemoryStore::new());
        let registry = FileRegistry::new(store.clone());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.register("race.xml").await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(e) => assert!(matches!(e, XmlError::DuplicateFile(_))),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.stats().await.unwrap().files, 1);
    }
}
