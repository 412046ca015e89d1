//! Exercise Link Engine
//!
//! Validates and applies link operations. Every link is stored with its
//! reverse:
//!
//! - WARMUP / COOLDOWN A→B pairs with WORKOUT B→A
//! - ALTERNATIVE A→B pairs with ALTERNATIVE B→A
//!
//! Validation runs in phases and stops at the first phase that fails,
//! reporting every violation found in that phase:
//!
//! 1. request shape (no reads)
//! 2. exercise lookup
//! 3. exercise kinds
//! 4. existing link state
//!
//! The engine keeps no state between calls; everything is read fresh from the
//! [`LinkDataService`].

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::config::LinkConfig;
use crate::domain::{ExerciseId, ExerciseLink, ExerciseLinkId, ExerciseLinkType, ExerciseTypeInfo};
use crate::error::Result;
use crate::links::{
    CreatedLinks, DeletedLinks, IncompatibleReason, LinkDataService, LinkOutcome, LinkViolation,
    Missing,
};

// == Exercise Link Engine ==
#[derive(Clone)]
pub struct ExerciseLinkEngine {
    data: Arc<dyn LinkDataService>,
    max_links_per_type: usize,
}

impl ExerciseLinkEngine {
    pub fn new(data: Arc<dyn LinkDataService>, config: &LinkConfig) -> Self {
        Self {
            data,
            max_links_per_type: config.max_links_per_type,
        }
    }

    // == Create Link ==
    /// Creates `source → target` of `link_type` together with its reverse.
    ///
    /// The reverse is only written when it does not exist yet, so a warmup and
    /// a cooldown from the same source share one WORKOUT reverse.
    ///
    /// # Arguments
    /// * `source` - Exercise the link leaves from
    /// * `target` - Exercise the link points at
    /// * `link_type` - WARMUP, COOLDOWN or ALTERNATIVE
    pub async fn create_link(
        &self,
        source: ExerciseId,
        target: ExerciseId,
        link_type: ExerciseLinkType,
    ) -> Result<LinkOutcome<CreatedLinks>> {
        // Phase 1: request shape
        let violations = request_violations(source, target, link_type);
        if !violations.is_empty() {
            return Ok(self.reject(violations));
        }

        // Phase 2: both exercises exist
        let (source_info, target_info) = match self.load_exercises(source, target).await? {
            Ok(found) => found,
            Err(missing) => {
                debug!(?missing, "link create: exercise not found");
                return Ok(LinkOutcome::NotFound(missing));
            }
        };

        // Phase 3: exercise kinds
        let violations = kind_violations(&source_info, &target_info, link_type);
        if !violations.is_empty() {
            return Ok(self.reject(violations));
        }

        // Phase 4: existing links
        let mut violations = Vec::new();
        if self.active_link(source, target, link_type).await?.is_some() {
            violations.push(LinkViolation::DuplicateLink { link_type });
        }
        let existing = self.data.count_links(source, link_type).await?;
        if has_limit(link_type) && existing >= self.max_links_per_type {
            violations.push(LinkViolation::MaximumLinksExceeded {
                link_type,
                max: self.max_links_per_type,
            });
        }
        if !violations.is_empty() {
            return Ok(self.reject(violations));
        }

        let link = ExerciseLink::new(source, target, link_type, display_order_after(existing));
        let reverse = match link_type.minted_reverse() {
            Some(reverse_type) => self.mint_reverse(target, source, reverse_type).await?,
            None => None,
        };

        self.data.save_link_pair(link.clone(), reverse.clone()).await?;

        info!(
            link_id = %link.id,
            %source,
            %target,
            %link_type,
            reverse_created = reverse.is_some(),
            "Exercise link created"
        );
        Ok(LinkOutcome::Success(CreatedLinks { link, reverse }))
    }

    // == Delete Link ==
    /// Deletes a link owned by `exercise_id` together with its reverse.
    ///
    /// A WORKOUT reverse is shared by the warmup and the cooldown of the same
    /// pair of exercises and stays while either of them remains.
    pub async fn delete_link(
        &self,
        exercise_id: ExerciseId,
        link_id: ExerciseLinkId,
    ) -> Result<LinkOutcome<DeletedLinks>> {
        let violations = id_violations(exercise_id, link_id);
        if !violations.is_empty() {
            return Ok(self.reject(violations));
        }

        let link = match self.owned_link(exercise_id, link_id).await? {
            Ok(link) => link,
            Err(outcome) => return Ok(outcome),
        };

        let reverse_ids = self.reverses_to_delete(&link).await?;
        self.data
            .delete_link_pair(link.id, reverse_ids.clone())
            .await?;

        info!(
            %link_id,
            %exercise_id,
            link_type = %link.link_type,
            reverses_deleted = reverse_ids.len(),
            "Exercise link deleted"
        );
        Ok(LinkOutcome::Success(DeletedLinks { link_id, reverse_ids }))
    }

    // == Update Link ==
    /// Changes the display order and active flag of a link owned by `exercise_id`.
    pub async fn update_link(
        &self,
        exercise_id: ExerciseId,
        link_id: ExerciseLinkId,
        display_order: i32,
        is_active: bool,
    ) -> Result<LinkOutcome<ExerciseLink>> {
        let mut violations = id_violations(exercise_id, link_id);
        if display_order < 0 {
            violations.push(LinkViolation::NegativeDisplayOrder(display_order));
        }
        if !violations.is_empty() {
            return Ok(self.reject(violations));
        }

        let mut link = match self.owned_link(exercise_id, link_id).await? {
            Ok(link) => link,
            Err(outcome) => return Ok(outcome),
        };

        link.display_order = display_order;
        link.is_active = is_active;
        link.updated_at = Utc::now();
        self.data.update_link(link.clone()).await?;

        info!(%link_id, display_order, is_active, "Exercise link updated");
        Ok(LinkOutcome::Success(link))
    }

    // == Links For ==
    /// Active links leaving `exercise_id`, optionally of one type, by display order.
    pub async fn links_for(
        &self,
        exercise_id: ExerciseId,
        link_type: Option<ExerciseLinkType>,
    ) -> Result<LinkOutcome<Vec<ExerciseLink>>> {
        if exercise_id.is_empty() {
            return Ok(self.reject(vec![LinkViolation::EmptySourceId]));
        }

        let mut links: Vec<ExerciseLink> = self
            .data
            .links_from(exercise_id)
            .await?
            .into_iter()
            .filter(|link| link.is_active)
            .filter(|link| link_type.map_or(true, |wanted| link.link_type == wanted))
            .collect();
        links.sort_by_key(|link| (link.display_order, link.created_at));

        Ok(LinkOutcome::Success(links))
    }

    // == Helpers ==
    fn reject<T>(&self, violations: Vec<LinkViolation>) -> LinkOutcome<T> {
        debug!(?violations, "link request rejected");
        LinkOutcome::Rejected(violations)
    }

    /// Looks up both exercises, reporting every one that is missing or inactive.
    async fn load_exercises(
        &self,
        source: ExerciseId,
        target: ExerciseId,
    ) -> Result<std::result::Result<(ExerciseTypeInfo, ExerciseTypeInfo), Vec<Missing>>> {
        let source_info = self.data.find_exercise(source).await?.filter(|info| info.is_active);
        let target_info = self.data.find_exercise(target).await?.filter(|info| info.is_active);

        Ok(match (source_info, target_info) {
            (Some(source_info), Some(target_info)) => Ok((source_info, target_info)),
            (source_info, target_info) => {
                let mut missing = Vec::new();
                if source_info.is_none() {
                    missing.push(Missing::Exercise(source));
                }
                if target_info.is_none() {
                    missing.push(Missing::Exercise(target));
                }
                Err(missing)
            }
        })
    }

    /// Deactivated links do not block a new link of the same slot.
    async fn active_link(
        &self,
        source: ExerciseId,
        target: ExerciseId,
        link_type: ExerciseLinkType,
    ) -> Result<Option<ExerciseLink>> {
        Ok(self
            .data
            .find_link(source, target, link_type)
            .await?
            .filter(|link| link.is_active))
    }

    /// Reverse link to write alongside a new link, None if an active one exists.
    async fn mint_reverse(
        &self,
        source: ExerciseId,
        target: ExerciseId,
        link_type: ExerciseLinkType,
    ) -> Result<Option<ExerciseLink>> {
        if self.active_link(source, target, link_type).await?.is_some() {
            return Ok(None);
        }
        let existing = self.data.count_links(source, link_type).await?;
        Ok(Some(ExerciseLink::new(
            source,
            target,
            link_type,
            display_order_after(existing),
        )))
    }

    /// Fetches a link and checks it leaves `exercise_id`.
    async fn owned_link<T>(
        &self,
        exercise_id: ExerciseId,
        link_id: ExerciseLinkId,
    ) -> Result<std::result::Result<ExerciseLink, LinkOutcome<T>>> {
        let link = match self.data.get_link(link_id).await? {
            Some(link) => link,
            None => return Ok(Err(LinkOutcome::NotFound(vec![Missing::Link(link_id)]))),
        };

        if link.source_exercise_id != exercise_id {
            return Ok(Err(self.reject(vec![LinkViolation::LinkDoesNotBelongToExercise {
                link_id,
                exercise_id,
            }])));
        }
        Ok(Ok(link))
    }

    /// Ids of the reverse links that go away with `link`.
    async fn reverses_to_delete(&self, link: &ExerciseLink) -> Result<Vec<ExerciseLinkId>> {
        let (source, target) = (link.source_exercise_id, link.target_exercise_id);
        let mut reverse_ids = Vec::new();

        match link.link_type {
            ExerciseLinkType::Warmup | ExerciseLinkType::Cooldown => {
                let sibling_type = if link.link_type == ExerciseLinkType::Warmup {
                    ExerciseLinkType::Cooldown
                } else {
                    ExerciseLinkType::Warmup
                };
                let sibling = self.data.find_link(source, target, sibling_type).await?;
                if sibling.is_none() {
                    if let Some(reverse) = self
                        .data
                        .find_link(target, source, ExerciseLinkType::Workout)
                        .await?
                    {
                        reverse_ids.push(reverse.id);
                    }
                }
            }
            // The workout side takes every warmup/cooldown pointing at it
            ExerciseLinkType::Workout | ExerciseLinkType::Alternative => {
                for &reverse_type in link.link_type.reverse_types() {
                    if let Some(reverse) = self.data.find_link(target, source, reverse_type).await? {
                        reverse_ids.push(reverse.id);
                    }
                }
            }
        }
        Ok(reverse_ids)
    }
}

// == Rules ==
fn request_violations(
    source: ExerciseId,
    target: ExerciseId,
    link_type: ExerciseLinkType,
) -> Vec<LinkViolation> {
    let mut violations = Vec::new();
    if source.is_empty() {
        violations.push(LinkViolation::EmptySourceId);
    }
    if target.is_empty() {
        violations.push(LinkViolation::EmptyTargetId);
    }
    if !source.is_empty() && source == target {
        violations.push(LinkViolation::SelfLink);
    }
    if !link_type.is_direct_creatable() {
        violations.push(LinkViolation::InvalidLinkTypeForDirectCreation(link_type));
    }
    violations
}

fn kind_violations(
    source: &ExerciseTypeInfo,
    target: &ExerciseTypeInfo,
    link_type: ExerciseLinkType,
) -> Vec<LinkViolation> {
    let mut violations = Vec::new();
    if source.is_rest() {
        violations.push(LinkViolation::IncompatibleExerciseType(
            IncompatibleReason::SourceIsRest,
        ));
    }
    if target.is_rest() {
        violations.push(LinkViolation::IncompatibleExerciseType(
            IncompatibleReason::TargetIsRest,
        ));
    } else if has_limit(link_type) && !target.is_workout() {
        violations.push(LinkViolation::IncompatibleExerciseType(
            IncompatibleReason::TargetNotWorkout,
        ));
    }
    violations
}

fn id_violations(exercise_id: ExerciseId, link_id: ExerciseLinkId) -> Vec<LinkViolation> {
    let mut violations = Vec::new();
    if exercise_id.is_empty() {
        violations.push(LinkViolation::EmptySourceId);
    }
    if link_id.is_empty() {
        violations.push(LinkViolation::EmptyLinkId);
    }
    violations
}

/// Warmup and cooldown links are capped per source exercise.
fn has_limit(link_type: ExerciseLinkType) -> bool {
    matches!(link_type, ExerciseLinkType::Warmup | ExerciseLinkType::Cooldown)
}

fn display_order_after(existing: usize) -> i32 {
    i32::try_from(existing).map_or(i32::MAX, |count| count.saturating_add(1))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn info(kinds: Vec<crate::domain::ExerciseKind>) -> ExerciseTypeInfo {
        ExerciseTypeInfo::new(ExerciseId::new(), kinds)
    }

    #[test]
    fn test_request_violations_aggregate() {
        let violations = request_violations(
            ExerciseId::empty(),
            ExerciseId::empty(),
            ExerciseLinkType::Workout,
        );
        assert_eq!(
            violations,
            vec![
                LinkViolation::EmptySourceId,
                LinkViolation::EmptyTargetId,
                LinkViolation::InvalidLinkTypeForDirectCreation(ExerciseLinkType::Workout),
            ]
        );
    }

    #[test]
    fn test_self_link_violation() {
        let id = ExerciseId::new();
        assert_eq!(
            request_violations(id, id, ExerciseLinkType::Alternative),
            vec![LinkViolation::SelfLink]
        );
    }

    #[test]
    fn test_kind_violations() {
        use crate::domain::ExerciseKind::*;

        let rest = info(vec![Rest]);
        let workout = info(vec![Workout]);
        let warmup = info(vec![Warmup]);

        assert!(kind_violations(&warmup, &workout, ExerciseLinkType::Warmup).is_empty());
        assert_eq!(
            kind_violations(&warmup, &warmup, ExerciseLinkType::Cooldown),
            vec![LinkViolation::IncompatibleExerciseType(IncompatibleReason::TargetNotWorkout)]
        );
        // Alternatives do not require a workout target
        assert!(kind_violations(&warmup, &warmup, ExerciseLinkType::Alternative).is_empty());
        assert_eq!(kind_violations(&rest, &rest, ExerciseLinkType::Alternative).len(), 2);
    }

    #[test]
    fn test_display_order_after() {
        assert_eq!(display_order_after(0), 1);
        assert_eq!(display_order_after(9), 10);
        assert_eq!(display_order_after(usize::MAX), i32::MAX);
    }
}
