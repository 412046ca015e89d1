//! In-Memory Link Store
//!
//! [`LinkDataService`] backed by process memory. Each pair write checks
//! everything first and then applies both halves under a single write guard,
//! with no await in between, so a dropped future never leaves half a pair.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{ExerciseId, ExerciseLink, ExerciseLinkId, ExerciseLinkType, ExerciseTypeInfo};
use crate::error::{Error, Result};
use crate::links::LinkDataService;

#[derive(Debug, Default)]
struct State {
    exercises: HashMap<ExerciseId, ExerciseTypeInfo>,
    links: HashMap<ExerciseLinkId, ExerciseLink>,
}

fn same_slot(link: &ExerciseLink, candidate: &ExerciseLink) -> bool {
    link.source_exercise_id == candidate.source_exercise_id
        && link.target_exercise_id == candidate.target_exercise_id
        && link.link_type == candidate.link_type
}

impl State {
    fn has_active_link(&self, candidate: &ExerciseLink) -> bool {
        self.links
            .values()
            .any(|link| link.is_active && same_slot(link, candidate))
    }

    /// Drops deactivated rows that `candidate` takes the place of.
    fn remove_inactive(&mut self, candidate: &ExerciseLink) {
        self.links
            .retain(|_, link| link.is_active || !same_slot(link, candidate));
    }
}

// == In-Memory Link Store ==
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    state: RwLock<State>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces an exercise.
    pub async fn add_exercise(&self, info: ExerciseTypeInfo) {
        self.state.write().await.exercises.insert(info.exercise_id, info);
    }

    /// Inserts a single link as-is, bypassing pair handling.
    pub async fn insert_link(&self, link: ExerciseLink) {
        self.state.write().await.links.insert(link.id, link);
    }

    /// Snapshot of every stored link.
    pub async fn all_links(&self) -> Vec<ExerciseLink> {
        self.state.read().await.links.values().cloned().collect()
    }

    pub async fn link_count(&self) -> usize {
        self.state.read().await.links.len()
    }

    /// Makes every subsequent write fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of read calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of write calls attempted so far, failed ones included.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn begin_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn begin_write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage("link store is unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LinkDataService for InMemoryLinkStore {
    async fn find_exercise(&self, id: ExerciseId) -> Result<Option<ExerciseTypeInfo>> {
        self.begin_read();
        Ok(self.state.read().await.exercises.get(&id).cloned())
    }

    async fn count_links(&self, source: ExerciseId, link_type: ExerciseLinkType) -> Result<usize> {
        self.begin_read();
        let state = self.state.read().await;
        Ok(state
            .links
            .values()
            .filter(|link| {
                link.is_active && link.source_exercise_id == source && link.link_type == link_type
            })
            .count())
    }

    async fn find_link(
        &self,
        source: ExerciseId,
        target: ExerciseId,
        link_type: ExerciseLinkType,
    ) -> Result<Option<ExerciseLink>> {
        self.begin_read();
        let state = self.state.read().await;
        let slot: Vec<&ExerciseLink> = state
            .links
            .values()
            .filter(|link| {
                link.source_exercise_id == source
                    && link.target_exercise_id == target
                    && link.link_type == link_type
            })
            .collect();
        Ok(slot
            .iter()
            .find(|link| link.is_active)
            .or_else(|| slot.first())
            .map(|link| (*link).clone()))
    }

    async fn get_link(&self, id: ExerciseLinkId) -> Result<Option<ExerciseLink>> {
        self.begin_read();
        Ok(self.state.read().await.links.get(&id).cloned())
    }

    async fn links_from(&self, source: ExerciseId) -> Result<Vec<ExerciseLink>> {
        self.begin_read();
        let state = self.state.read().await;
        Ok(state
            .links
            .values()
            .filter(|link| link.source_exercise_id == source)
            .cloned()
            .collect())
    }

    async fn save_link_pair(&self, primary: ExerciseLink, reverse: Option<ExerciseLink>) -> Result<()> {
        self.begin_write()?;
        let mut state = self.state.write().await;

        // Unique active (source, target, type), checked for both halves before any insert
        let conflict = std::iter::once(&primary)
            .chain(reverse.as_ref())
            .any(|link| state.has_active_link(link));
        if conflict {
            return Err(Error::Storage(format!(
                "link {} -> {} ({}) already exists",
                primary.source_exercise_id, primary.target_exercise_id, primary.link_type
            )));
        }

        state.remove_inactive(&primary);
        state.links.insert(primary.id, primary);
        if let Some(reverse) = reverse {
            state.remove_inactive(&reverse);
            state.links.insert(reverse.id, reverse);
        }
        Ok(())
    }

    async fn update_link(&self, link: ExerciseLink) -> Result<()> {
        self.begin_write()?;
        let mut state = self.state.write().await;
        match state.links.get_mut(&link.id) {
            Some(stored) => {
                *stored = link;
                Ok(())
            }
            None => Err(Error::Storage(format!("link {} does not exist", link.id))),
        }
    }

    async fn delete_link_pair(&self, primary: ExerciseLinkId, reverses: Vec<ExerciseLinkId>) -> Result<()> {
        self.begin_write()?;
        let mut state = self.state.write().await;

        if let Some(missing) = std::iter::once(&primary)
            .chain(reverses.iter())
            .find(|id| !state.links.contains_key(*id))
        {
            return Err(Error::Storage(format!("link {} does not exist", missing)));
        }

        state.links.remove(&primary);
        for id in &reverses {
            state.links.remove(id);
        }
        Ok(())
    }
}
