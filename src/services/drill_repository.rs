//! Drill repository: save, load, delete and copy drills against a
//! [`DrillStore`].
//!
//! This is the only place configurations cross the storage boundary. Rows
//! come back as text and leave here as fully typed [`Drill`]s, or as an error.
//!
//! The repository also keeps a snapshot of every drill, refreshed by a full
//! reload after each successful write. Writes are not serialized: two saves
//! to the same identifier race in the store and the last one wins.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::errors::{DecodeError, DeleteError, LoadError, NotFoundError, SaveError};
use crate::domain::models::{Drill, DrillConfiguration, DrillId};
use crate::domain::ports::{DrillRow, DrillStore};

/// A row that was left out of a full load.
#[derive(Debug)]
pub struct SkippedRow {
    pub id: DrillId,
    pub error: DecodeError,
}

/// Result of loading every drill.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub drills: Vec<Drill>,
    pub skipped: Vec<SkippedRow>,
}

pub struct DrillRepository<S: DrillStore> {
    store: Arc<S>,
    snapshot: RwLock<Vec<Drill>>,
}

impl<S: DrillStore> DrillRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Persist `configuration` and return the stored drill.
    ///
    /// A present `drill_id` replaces that row and keeps the identifier; an
    /// absent one inserts a new row. Afterwards the full drill list is
    /// reloaded. If only that reload fails the result is
    /// [`SaveError::Reload`], which still carries the saved drill.
    pub async fn save(&self, configuration: DrillConfiguration) -> Result<Drill, SaveError> {
        configuration.validate()?;

        let drill = match configuration.drill_id {
            Some(id) => {
                let text = configuration.to_storage_text().map_err(SaveError::Encode)?;
                self.store
                    .upsert(id, &configuration.drill_name, &text)
                    .await?;
                tracing::info!(drill_id = %id, name = %configuration.drill_name, "Replaced drill");
                into_drill(id, configuration)
            }
            None => {
                let text = configuration.to_storage_text().map_err(SaveError::Encode)?;
                let id = self.store.insert(&configuration.drill_name, &text).await?;
                tracing::info!(drill_id = %id, name = %configuration.drill_name, "Inserted drill");
                into_drill(id, configuration)
            }
        };

        self.reload_after_write(drill).await
    }

    /// Copy the drill at `id` into a new row named with a `" copy"` suffix.
    pub async fn duplicate(&self, id: DrillId) -> Result<Drill, SaveError> {
        let original = self.load_by_id(id).await?;
        let copy = self.save(original.configuration.copy_for_duplicate()).await?;
        tracing::info!(source_id = %id, drill_id = %copy.id, "Duplicated drill");
        Ok(copy)
    }

    /// Every drill that rehydrates cleanly. Rows that do not are logged and
    /// left out; see [`Self::load_all_with_report`] to inspect them.
    pub async fn load_all(&self) -> Result<Vec<Drill>, LoadError> {
        Ok(self.load_all_with_report().await?.drills)
    }

    /// Load every row, skipping the ones whose configuration is malformed,
    /// and refresh the snapshot.
    pub async fn load_all_with_report(&self) -> Result<LoadReport, LoadError> {
        let rows = self.store.fetch_all().await?;
        let mut report = LoadReport::default();

        for row in rows {
            let id = row.id;
            match decode_row(row) {
                Ok(drill) => report.drills.push(drill),
                Err(error) => {
                    tracing::warn!(drill_id = %id, error = %error, "Skipping drill with malformed configuration");
                    report.skipped.push(SkippedRow { id, error });
                }
            }
        }

        tracing::debug!(
            loaded = report.drills.len(),
            skipped = report.skipped.len(),
            "Loaded drills"
        );
        *self.snapshot.write().await = report.drills.clone();
        Ok(report)
    }

    pub async fn load_by_id(&self, id: DrillId) -> Result<Drill, LoadError> {
        let row = self
            .store
            .fetch(id)
            .await?
            .ok_or(NotFoundError { id })?;

        decode_row(row).map_err(|source| LoadError::Decode { id, source })
    }

    /// Delete the drill at `id`. Missing identifiers are reported as
    /// [`NotFoundError`], checked before the delete runs.
    pub async fn delete_by_id(&self, id: DrillId) -> Result<(), DeleteError> {
        if !self.store.exists(id).await? {
            return Err(NotFoundError { id }.into());
        }

        let removed = self.store.delete(id).await?;
        tracing::info!(drill_id = %id, removed, "Deleted drill");

        self.snapshot.write().await.retain(|drill| drill.id != id);
        Ok(())
    }

    /// Drills as of the last reload.
    pub async fn cached_drills(&self) -> Vec<Drill> {
        self.snapshot.read().await.clone()
    }

    async fn reload_after_write(&self, drill: Drill) -> Result<Drill, SaveError> {
        match self.load_all_with_report().await {
            Ok(_) => Ok(drill),
            Err(source) => {
                tracing::warn!(drill_id = %drill.id, error = %source, "Drill saved but reload failed");
                Err(SaveError::Reload {
                    drill: Box::new(drill),
                    source: Box::new(source),
                })
            }
        }
    }
}

fn into_drill(id: DrillId, mut configuration: DrillConfiguration) -> Drill {
    configuration.drill_id = Some(id);
    Drill {
        id,
        name: configuration.drill_name.clone(),
        configuration,
    }
}

/// The row's identifier is authoritative over any `drillId` in the text.
fn decode_row(row: DrillRow) -> Result<Drill, DecodeError> {
    let mut configuration = DrillConfiguration::from_storage_text(&row.configuration)?;
    configuration.drill_id = Some(row.id);
    Ok(Drill {
        id: row.id,
        name: row.name,
        configuration,
    })
}
