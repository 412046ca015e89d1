//! Link Data Service
//!
//! Persistence seen from the link engine. Pair writes must be atomic: either
//! both links land (or go) or neither does.

use async_trait::async_trait;

use crate::domain::{ExerciseId, ExerciseLink, ExerciseLinkId, ExerciseLinkType, ExerciseTypeInfo};
use crate::error::Result;

#[async_trait]
pub trait LinkDataService: Send + Sync {
    /// Kinds of an exercise, None if it does not exist.
    async fn find_exercise(&self, id: ExerciseId) -> Result<Option<ExerciseTypeInfo>>;

    /// Active links of `link_type` leaving `source`.
    async fn count_links(&self, source: ExerciseId, link_type: ExerciseLinkType) -> Result<usize>;

    /// Link in the (source, target, type) slot, the active one if present.
    async fn find_link(
        &self,
        source: ExerciseId,
        target: ExerciseId,
        link_type: ExerciseLinkType,
    ) -> Result<Option<ExerciseLink>>;

    async fn get_link(&self, id: ExerciseLinkId) -> Result<Option<ExerciseLink>>;

    /// Every link leaving `source`, active or not.
    async fn links_from(&self, source: ExerciseId) -> Result<Vec<ExerciseLink>>;

    /// Persists `primary` and, in the same transaction, `reverse`.
    ///
    /// A deactivated link in the same slot as either half is replaced. An
    /// active one is a conflict and nothing is written.
    async fn save_link_pair(&self, primary: ExerciseLink, reverse: Option<ExerciseLink>) -> Result<()>;

    async fn update_link(&self, link: ExerciseLink) -> Result<()>;

    /// Deletes `primary` and, in the same transaction, every id in `reverses`.
    async fn delete_link_pair(&self, primary: ExerciseLinkId, reverses: Vec<ExerciseLinkId>) -> Result<()>;
}
