//! Startup seeding of sample notes.

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{NoteDraft, NoteDraftValidationError, OwnerId, OwnerIdValidationError};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while seeding sample notes.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// The configured owner identity is blank.
    #[error("invalid example data owner: {0}")]
    Owner(#[from] OwnerIdValidationError),
    /// A generated draft failed validation.
    #[error("invalid example note: {0}")]
    Draft(#[from] NoteDraftValidationError),
    /// The repository rejected a read or write.
    #[error("example data seeding failed: {0}")]
    Repository(#[from] NoteRepositoryError),
}

/// Result of a seeding attempt that was enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// This many notes were inserted.
    Applied(usize),
    /// The owner already had notes; nothing was written.
    AlreadySeeded,
}

/// Seed "Sample Note N" / "content N" for the configured owner.
///
/// Returns `Ok(None)` when seeding is disabled. Seeding is skipped when the
/// owner already has notes, so restarts do not duplicate data.
pub async fn seed_example_data_on_startup<R>(
    settings: &ExampleDataSettings,
    repository: &R,
) -> Result<Option<SeedOutcome>, StartupSeedingError>
where
    R: NoteRepository + ?Sized,
{
    if !settings.enabled {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let owner = OwnerId::new(settings.owner_id())?;
    if !repository.list_for_owner(&owner).await?.is_empty() {
        info!(owner_id = %owner, "example notes already present; skipping");
        return Ok(Some(SeedOutcome::AlreadySeeded));
    }

    let count = settings.count();
    for n in 1..=count {
        let draft = NoteDraft::new(format!("Sample Note {n}"), format!("content {n}"))?;
        repository.create(&owner, &draft).await?;
    }
    info!(owner_id = %owner, count, "example notes seeded");
    Ok(Some(SeedOutcome::Applied(count)))
}
