//! Keyed plan storage
//!
//! Plans live in memory for the life of the process, keyed by a generated id.
//! Each plan sits behind its own lock, so concurrent updates to one plan are
//! applied one at a time while different plans proceed independently. When a
//! snapshot path is set, the whole store is written to disk after every
//! change and read back on open. Nothing is ever evicted.

use crate::config::EnrichPolicy;
use crate::error::{QueueError, StoreError};
use crate::planner::{DailyTask, Plan, Progress, Task, TaskRef};
use crate::runner::{EnrichReport, Enricher};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub plan: Plan,
}

/// One line of `navi list`
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub goal: String,
    pub progress: Progress,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    plans: BTreeMap<String, PlanRecord>,
}

pub struct PlanStore {
    plans: RwLock<HashMap<String, Arc<Mutex<PlanRecord>>>>,
    snapshot: Option<PathBuf>,
    /// Contents of the last successful snapshot write; also serializes writers
    persisted: Mutex<BTreeMap<String, PlanRecord>>,
}

impl PlanStore {
    /// A store that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            plans: RwLock::new(HashMap::new()),
            snapshot: None,
            persisted: Mutex::new(BTreeMap::new()),
        }
    }

    /// Open a snapshot-backed store, loading existing plans if the file exists
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let snapshot = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| StoreError::ReadSnapshot {
                path: path.to_path_buf(),
                source: e,
            })?;
            if content.trim().is_empty() {
                Snapshot::default()
            } else {
                serde_json::from_str(&content).map_err(|e| StoreError::ParseSnapshot {
                    path: path.to_path_buf(),
                    source: e,
                })?
            }
        } else {
            Snapshot::default()
        };

        debug!("Loaded {} plans from {:?}", snapshot.plans.len(), path);

        let persisted = snapshot.plans.clone();
        let plans = snapshot
            .plans
            .into_iter()
            .map(|(id, record)| (id, Arc::new(Mutex::new(record))))
            .collect();

        Ok(Self {
            plans: RwLock::new(plans),
            snapshot: Some(path.to_path_buf()),
            persisted: Mutex::new(persisted),
        })
    }

    /// Store a plan under a fresh id and return the id
    pub async fn insert(&self, plan: Plan) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let record = PlanRecord {
            id: id.clone(),
            created_at: Utc::now(),
            plan,
        };

        self.persist(&record).await?;
        self.plans
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(record)));
        debug!("Stored plan {}", id);

        Ok(id)
    }

    pub async fn get(&self, id: &str) -> Result<PlanRecord, StoreError> {
        let entry = self.entry(id).await?;
        let record = entry.lock().await;
        Ok(record.clone())
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.plans.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    /// Every stored plan, oldest first
    pub async fn list(&self) -> Vec<PlanSummary> {
        let entries: Vec<_> = self.plans.read().await.values().cloned().collect();

        let mut summaries = Vec::with_capacity(entries.len());
        for entry in entries {
            let record = entry.lock().await;
            summaries.push(PlanSummary {
                id: record.id.clone(),
                created_at: record.created_at,
                goal: record.plan.goal.clone(),
                progress: record.plan.progress(),
            });
        }
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        summaries
    }

    pub async fn peek_next(&self, id: &str) -> Result<DailyTask, StoreError> {
        let entry = self.entry(id).await?;
        let record = entry.lock().await;
        Ok(record.plan.peek_next().ok_or(QueueError::NoPendingTask)?)
    }

    pub async fn mark_next_done(&self, id: &str) -> Result<Task, StoreError> {
        self.update(id, Plan::mark_next_done).await
    }

    pub async fn mark_done_at(&self, id: &str, at: TaskRef) -> Result<Task, StoreError> {
        self.update(id, |plan| plan.mark_done_at(at)).await
    }

    /// Apply a queue operation to one plan while holding that plan's lock.
    ///
    /// The operation runs on a copy. The copy replaces the stored plan only
    /// once the snapshot holding it has been written, so a failed write
    /// leaves the plan exactly as it was.
    async fn update<F, T>(&self, id: &str, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Plan) -> Result<T, QueueError>,
    {
        let entry = self.entry(id).await?;
        let mut record = entry.lock().await;
        let mut candidate = record.clone();
        let result = op(&mut candidate.plan)?;
        self.persist(&candidate).await?;
        *record = candidate;
        Ok(result)
    }

    /// Run the enrichment pass on a stored plan.
    ///
    /// The plan's lock is held for the whole pass, so a concurrent mark-done
    /// waits rather than being overwritten. Results are committed only after
    /// the snapshot write succeeds.
    pub async fn enrich(
        &self,
        id: &str,
        enricher: &Enricher,
        policy: EnrichPolicy,
    ) -> Result<EnrichReport, StoreError> {
        let entry = self.entry(id).await?;
        let mut record = entry.lock().await;
        let mut candidate = record.clone();
        let report = enricher.enrich(&mut candidate.plan, policy).await;
        self.persist(&candidate).await?;
        *record = candidate;
        Ok(report)
    }

    /// Write a snapshot with `record` replacing its stored version.
    ///
    /// Never takes a plan lock: the other plans come from the last written
    /// snapshot, which already holds every committed change.
    async fn persist(&self, record: &PlanRecord) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };

        let mut persisted = self.persisted.lock().await;
        let mut next = Snapshot {
            plans: persisted.clone(),
        };
        next.plans.insert(record.id.clone(), record.clone());

        let json = serde_json::to_string_pretty(&next)?;
        write_atomic(path, &json).map_err(|e| StoreError::WriteSnapshot {
            path: path.clone(),
            source: e,
        })?;

        debug!("Saved {} plans to {:?}", next.plans.len(), path);
        *persisted = next.plans;
        Ok(())
    }

    async fn entry(&self, id: &str) -> Result<Arc<Mutex<PlanRecord>>, StoreError> {
        self.plans
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{Month, PlanRequest, Week};
    use crate::provider::DisabledSearch;

    fn plan_with_tasks(n: usize) -> Plan {
        let mut plan = crate::planner::fallback_plan(&PlanRequest::new("g", "w", "t"));
        plan.roadmap = vec![Month {
            month: 1,
            focus: None,
            weeks: vec![Week {
                week: 1,
                focus: None,
                tasks: (1..=n)
                    .map(|i| Task::new(format!("Task {}", i), "d", "1 hour"))
                    .collect(),
            }],
        }];
        plan
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = PlanStore::in_memory();
        let id = store.insert(plan_with_tasks(2)).await.unwrap();

        let record = store.get(&id).await.unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.plan.task_count(), 2);
        assert!(store.contains(&id).await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = PlanStore::in_memory();
        assert!(matches!(
            store.peek_next("nope").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.mark_next_done("nope").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_mark_next_done_walks_the_queue() {
        let store = PlanStore::in_memory();
        let id = store.insert(plan_with_tasks(2)).await.unwrap();

        assert_eq!(store.peek_next(&id).await.unwrap().title, "Task 1");
        assert_eq!(store.mark_next_done(&id).await.unwrap().title, "Task 1");
        assert_eq!(store.peek_next(&id).await.unwrap().title, "Task 2");
        assert_eq!(store.mark_next_done(&id).await.unwrap().title, "Task 2");

        assert!(matches!(
            store.peek_next(&id).await,
            Err(StoreError::Queue(QueueError::NoPendingTask))
        ));
        assert!(matches!(
            store.mark_next_done(&id).await,
            Err(StoreError::Queue(QueueError::NoPendingTask))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_mark_done_marks_each_task_once() {
        let store = Arc::new(PlanStore::in_memory());
        let id = store.insert(plan_with_tasks(8)).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let id = id.clone();
                tokio::spawn(async move { store.mark_next_done(&id).await })
            })
            .collect();

        let mut titles = Vec::new();
        for handle in handles {
            titles.push(handle.await.unwrap().unwrap().title);
        }
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), 8);

        let progress = store.get(&id).await.unwrap().plan.progress();
        assert!(progress.is_complete());
    }

    #[tokio::test]
    async fn test_mark_done_at_out_of_order() {
        let store = PlanStore::in_memory();
        let id = store.insert(plan_with_tasks(3)).await.unwrap();
        let at = TaskRef {
            month: 1,
            week: 1,
            task: 2,
        };

        assert_eq!(store.mark_done_at(&id, at).await.unwrap().title, "Task 2");
        assert!(matches!(
            store.mark_done_at(&id, at).await,
            Err(StoreError::Queue(QueueError::AlreadyDone(_)))
        ));
        assert_eq!(store.peek_next(&id).await.unwrap().title, "Task 1");
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state/plans.json");

        let id = {
            let store = PlanStore::open(&path).unwrap();
            let id = store.insert(plan_with_tasks(2)).await.unwrap();
            store.mark_next_done(&id).await.unwrap();
            id
        };

        let reopened = PlanStore::open(&path).unwrap();
        let record = reopened.get(&id).await.unwrap();
        assert_eq!(record.plan.progress().done, 1);
        assert_eq!(reopened.peek_next(&id).await.unwrap().title, "Task 2");
    }

    #[tokio::test]
    async fn test_list_reports_progress() {
        let store = PlanStore::in_memory();
        let id = store.insert(plan_with_tasks(4)).await.unwrap();
        store.mark_next_done(&id).await.unwrap();

        let list = store.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].progress.done, 1);
        assert_eq!(list[0].progress.total, 4);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_plan_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plans.json");
        let store = PlanStore::open(&path).unwrap();
        let id = store.insert(plan_with_tasks(2)).await.unwrap();

        // A directory where the temp file goes makes every write fail
        let blocker = path.with_extension("json.tmp");
        fs::create_dir(&blocker).unwrap();

        assert!(matches!(
            store.mark_next_done(&id).await,
            Err(StoreError::WriteSnapshot { .. })
        ));
        assert_eq!(store.peek_next(&id).await.unwrap().title, "Task 1");

        let enricher = Enricher::new(Arc::new(DisabledSearch::default()), 1, 3);
        assert!(store
            .enrich(&id, &enricher, EnrichPolicy::SkipIfPresent)
            .await
            .is_err());
        let plan = store.get(&id).await.unwrap().plan;
        assert!(plan.tasks().all(|t| t.videos.is_none()));

        fs::remove_dir(&blocker).unwrap();
        assert_eq!(store.mark_next_done(&id).await.unwrap().title, "Task 1");
        assert_eq!(store.peek_next(&id).await.unwrap().title, "Task 2");
    }

    #[tokio::test]
    async fn test_failed_insert_is_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plans.json");
        let store = PlanStore::open(&path).unwrap();
        fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(store.insert(plan_with_tasks(1)).await.is_err());
        assert_eq!(store.len().await, 0);
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plans.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            PlanStore::open(&path),
            Err(StoreError::ParseSnapshot { .. })
        ));
    }
}
