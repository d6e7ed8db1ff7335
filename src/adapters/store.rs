use crate::domain::model::{ExistingDates, ExistingSlotDate};
use crate::domain::ports::{ExistingSlotDatesProvider, SlotWriter};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

type SlotMap = BTreeMap<String, BTreeSet<NaiveDate>>;

#[derive(Debug, Clone, Default)]
pub struct InMemorySlotStore {
    slots: Arc<RwLock<SlotMap>>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: impl IntoIterator<Item = ExistingSlotDate>) -> Self {
        let mut map = SlotMap::new();
        for slot in slots {
            map.entry(slot.template_id).or_default().insert(slot.date);
        }
        Self {
            slots: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns false if the template already had a slot on `date`.
    pub async fn insert(&self, template_id: &str, date: NaiveDate) -> bool {
        let mut slots = self.slots.write().await;
        slots.entry(template_id.to_string()).or_default().insert(date)
    }

    pub async fn all(&self, template_id: &str) -> Vec<NaiveDate> {
        let slots = self.slots.read().await;
        slots
            .get(template_id)
            .map(|dates| dates.iter().copied().collect())
            .unwrap_or_default()
    }

    pub async fn snapshot(&self) -> Vec<ExistingSlotDate> {
        let slots = self.slots.read().await;
        slots
            .iter()
            .flat_map(|(template_id, dates)| {
                dates.iter().map(move |date| ExistingSlotDate {
                    template_id: template_id.clone(),
                    date: *date,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ExistingSlotDatesProvider for InMemorySlotStore {
    async fn existing_dates(
        &self,
        template_id: &str,
        year: i32,
        month: u32,
    ) -> Result<ExistingDates> {
        let slots = self.slots.read().await;
        Ok(slots
            .get(template_id)
            .map(|dates| {
                dates
                    .iter()
                    .filter(|d| d.year() == year && d.month() == month)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl SlotWriter for InMemorySlotStore {
    async fn create_slots(&self, template_id: &str, dates: &[NaiveDate]) -> Result<usize> {
        let mut slots = self.slots.write().await;
        let entry = slots.entry(template_id.to_string()).or_default();
        Ok(dates.iter().filter(|date| entry.insert(**date)).count())
    }
}

/// Slot store backed by a JSON array of `{ "template_id", "date" }` records.
/// The file is read once on open and rewritten after every write.
#[derive(Debug, Clone)]
pub struct JsonFileSlotStore {
    path: PathBuf,
    inner: InMemorySlotStore,
}

impl JsonFileSlotStore {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let slots: Vec<ExistingSlotDate> = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read(&path).await?;
            serde_json::from_slice(&content)?
        } else {
            Vec::new()
        };

        tracing::debug!("Loaded {} existing slot(s) from {}", slots.len(), path.display());

        Ok(Self {
            path,
            inner: InMemorySlotStore::from_slots(slots),
        })
    }

    pub fn store(&self) -> &InMemorySlotStore {
        &self.inner
    }

    async fn persist(&self) -> Result<()> {
        let data = serde_json::to_vec_pretty(&self.inner.snapshot().await)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl ExistingSlotDatesProvider for JsonFileSlotStore {
    async fn existing_dates(
        &self,
        template_id: &str,
        year: i32,
        month: u32,
    ) -> Result<ExistingDates> {
        self.inner.existing_dates(template_id, year, month).await
    }
}

#[async_trait]
impl SlotWriter for JsonFileSlotStore {
    async fn create_slots(&self, template_id: &str, dates: &[NaiveDate]) -> Result<usize> {
        let created = self.inner.create_slots(template_id, dates).await?;
        if created > 0 {
            self.persist().await?;
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_existing_dates_are_scoped_by_template_and_month() {
        let store = InMemorySlotStore::from_slots(vec![
            ExistingSlotDate {
                template_id: "a".to_string(),
                date: ymd(2025, 1, 4),
            },
            ExistingSlotDate {
                template_id: "a".to_string(),
                date: ymd(2025, 2, 1),
            },
            ExistingSlotDate {
                template_id: "b".to_string(),
                date: ymd(2025, 1, 5),
            },
        ]);

        let dates = store.existing_dates("a", 2025, 1).await.unwrap();
        assert_eq!(dates.into_iter().collect::<Vec<_>>(), vec![ymd(2025, 1, 4)]);
        assert!(store.existing_dates("c", 2025, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_slots_counts_new_dates_only() {
        let store = InMemorySlotStore::new();
        assert!(store.insert("a", ymd(2025, 1, 4)).await);

        let created = store
            .create_slots("a", &[ymd(2025, 1, 4), ymd(2025, 1, 11)])
            .await
            .unwrap();
        assert_eq!(created, 1);
        assert_eq!(store.all("a").await, vec![ymd(2025, 1, 4), ymd(2025, 1, 11)]);
    }

    #[tokio::test]
    async fn test_json_store_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slots").join("existing.json");

        let store = JsonFileSlotStore::open(&path).await.unwrap();
        store.create_slots("a", &[ymd(2025, 3, 1)]).await.unwrap();
        assert!(path.exists());

        let reopened = JsonFileSlotStore::open(&path).await.unwrap();
        let dates = reopened.existing_dates("a", 2025, 3).await.unwrap();
        assert!(dates.contains(&ymd(2025, 3, 1)));
    }
}
