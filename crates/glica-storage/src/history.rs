//! Append-only history store.
//!
//! One JSON document per saved evaluation, keyed `history/{uuid}.json`.
//! The only mutations are whole-entry insert, whole-entry delete, and an
//! atomic append to the adjustment array — there is no update/replace of
//! any other field.

use aws_sdk_s3::Client;
use tracing::{info, warn};
use uuid::Uuid;

use glica_core::models::adjustment::Adjustment;
use glica_core::models::history::HistoryEntry;

use crate::documents::{self, Loaded};
use crate::error::StorageError;
use crate::keys;

/// How many times an adjustment append re-reads after losing an ETag race.
const APPEND_RETRIES: u32 = 3;

/// Explicitly constructed, injected store client. Build one at startup and
/// hand it to consumers — nothing here is a global.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    client: Client,
    bucket: String,
}

impl HistoryStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// The most recent `limit` entries, newest save first.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, StorageError> {
        let mut entries = self.load_all().await?;
        entries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Persist a new entry. The id is assigned here, never by the caller;
    /// whatever `entry.id` held is ignored.
    pub async fn insert(&self, entry: &HistoryEntry) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();
        let mut doc = entry.clone();
        doc.id = None;
        documents::save(&self.client, &self.bucket, &keys::history_entry(id), &doc).await?;
        info!(%id, patient = %entry.patient.name, "history entry saved");
        Ok(id)
    }

    /// Append one adjustment to an existing entry.
    ///
    /// Read-modify-write under ETag optimistic locking: a concurrent writer
    /// fails the If-Match precondition, and the append is re-applied on a
    /// fresh read so no adjustment is ever lost or duplicated.
    pub async fn append_adjustment(
        &self,
        id: Uuid,
        adjustment: &Adjustment,
    ) -> Result<(), StorageError> {
        let key = keys::history_entry(id);
        let mut attempt = 0;
        loop {
            let Loaded { mut value, etag }: Loaded<HistoryEntry> =
                documents::load(&self.client, &self.bucket, &key).await?;
            value.adjustments.push(adjustment.clone());

            match documents::save_if_match(&self.client, &self.bucket, &key, &value, &etag).await
            {
                Ok(_) => {
                    info!(%id, count = value.adjustments.len(), "adjustment appended");
                    return Ok(());
                }
                Err(StorageError::PreconditionFailed { .. }) if attempt < APPEND_RETRIES => {
                    attempt += 1;
                    warn!(%id, attempt, "entry changed during append, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Exact-name existence check, used as the duplicate-save guard.
    pub async fn exists_by_patient_name(&self, name: &str) -> Result<bool, StorageError> {
        let entries = self.load_all().await?;
        Ok(entries.iter().any(|e| e.patient.name == name))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        documents::delete(&self.client, &self.bucket, &keys::history_entry(id)).await?;
        info!(%id, "history entry deleted");
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let object_keys =
            documents::list_keys(&self.client, &self.bucket, keys::HISTORY_PREFIX).await?;

        let mut entries = Vec::with_capacity(object_keys.len());
        for key in object_keys {
            let Some(id) = keys::parse_history_entry(&key) else {
                continue;
            };
            let Loaded { mut value, .. }: Loaded<HistoryEntry> =
                documents::load(&self.client, &self.bucket, &key).await?;
            value.id = Some(id);
            entries.push(value);
        }

        Ok(entries)
    }
}
