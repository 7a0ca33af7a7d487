//! Scenting use-case service.
//!
//! # Responsibility
//! - Gate scenting add/rename on the sibling-name rule.
//! - Refuse deleting a scenting that still owns medleys.
//!
//! # Invariants
//! - Names are stored exactly as entered; only blank and duplicate names are
//!   refused.
//! - Renaming a scenting to its current name is always accepted.

use crate::form::scenting_form::{can_add_scenting, can_rename_scenting};
use crate::model::scenting::{Scenting, ScentingId};
use crate::repo::scenting_repo::ScentingRepository;
use crate::repo::RepoError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from scenting service operations.
#[derive(Debug)]
pub enum ScentingServiceError {
    /// Name is blank or collides with another scenting.
    InvalidName,
    /// Scenting still owns medleys and cannot be deleted.
    HasMedleys { id: ScentingId, medley_count: u64 },
    /// Target scenting does not exist.
    NotFound(ScentingId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ScentingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "scenting name must be non-blank and unique"),
            Self::HasMedleys { id, medley_count } => write!(
                f,
                "scenting {id} still has {medley_count} medley(s); delete them first"
            ),
            Self::NotFound(id) => write!(f, "scenting not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScentingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ScentingServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound("scenting", id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Scenting service facade.
pub struct ScentingService<R: ScentingRepository> {
    repo: R,
}

impl<R: ScentingRepository> ScentingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a childless scenting after the name check passes.
    pub fn add_scenting(&self, name: impl Into<String>) -> Result<Scenting, ScentingServiceError> {
        let name = name.into();
        let existing = self.scenting_names()?;
        if !can_add_scenting(&name, &existing) {
            return Err(ScentingServiceError::InvalidName);
        }

        let scenting = Scenting::new(name);
        match self.repo.create_scenting(&scenting) {
            Ok(_) => {
                info!(
                    "event=scenting_add module=service status=ok scenting_id={}",
                    scenting.id
                );
                Ok(scenting)
            }
            Err(err) => {
                error!("event=scenting_add module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Renames a scenting; its current name is exempt from the duplicate rule.
    pub fn rename_scenting(
        &self,
        id: ScentingId,
        name: impl Into<String>,
    ) -> Result<Scenting, ScentingServiceError> {
        let name = name.into();
        let current = self.require_scenting(id)?;
        let existing = self.scenting_names()?;
        if !can_rename_scenting(&name, &existing, &current.name) {
            return Err(ScentingServiceError::InvalidName);
        }

        if let Err(err) = self.repo.rename_scenting(id, name.as_str()) {
            error!("event=scenting_rename module=service status=error scenting_id={id} error={err}");
            return Err(err.into());
        }
        info!("event=scenting_rename module=service status=ok scenting_id={id}");
        self.require_scenting(id)
    }

    /// Lists every scenting with its medley subtree, sorted by name.
    pub fn list_scentings(&self) -> Result<Vec<Scenting>, ScentingServiceError> {
        self.repo.list_scentings().map_err(Into::into)
    }

    pub fn get_scenting(&self, id: ScentingId) -> Result<Option<Scenting>, ScentingServiceError> {
        self.repo.get_scenting(id).map_err(Into::into)
    }

    /// Deletes a scenting that has no medleys.
    pub fn delete_scenting(&self, id: ScentingId) -> Result<(), ScentingServiceError> {
        let medley_count = self.repo.count_medleys(id)?;
        if medley_count > 0 {
            info!(
                "event=scenting_delete module=service status=refused scenting_id={id} medley_count={medley_count}"
            );
            return Err(ScentingServiceError::HasMedleys { id, medley_count });
        }

        if let Err(err) = self.repo.delete_scenting(id) {
            error!("event=scenting_delete module=service status=error scenting_id={id} error={err}");
            return Err(err.into());
        }
        info!("event=scenting_delete module=service status=ok scenting_id={id}");
        Ok(())
    }

    /// Existing scenting names, the sibling set for add and rename.
    pub fn scenting_names(&self) -> Result<Vec<String>, ScentingServiceError> {
        self.repo.list_scenting_names().map_err(Into::into)
    }

    fn require_scenting(&self, id: ScentingId) -> Result<Scenting, ScentingServiceError> {
        self.repo
            .get_scenting(id)?
            .ok_or(ScentingServiceError::NotFound(id))
    }
}
