//! Medley use-case service.
//!
//! # Responsibility
//! - Guard medley writes with the submission gate.
//! - Persist edits with the identity-keyed ingredient merge.
//!
//! # Invariants
//! - A draft that fails any gate rule is never written.
//! - Sibling names are the other medleys under the same scenting; the edit
//!   flow exempts the medley's current name.
//! - `save_medley` writes fields and ingredient changes in one transaction.

use crate::form::medley_form::{MedleyDraft, SubmissionCheck};
use crate::model::ingredient_merge::IngredientMergePlan;
use crate::model::medley::{Medley, MedleyId};
use crate::model::scenting::ScentingId;
use crate::repo::medley_repo::MedleyRepository;
use crate::repo::RepoError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from medley service operations.
#[derive(Debug)]
pub enum MedleyServiceError {
    /// Draft failed the submission gate; carries the per-rule report.
    NotSubmittable(SubmissionCheck),
    /// Target medley does not exist.
    NotFound(MedleyId),
    /// Parent scenting does not exist.
    ScentingNotFound(ScentingId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for MedleyServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSubmittable(check) => write!(f, "medley draft is not submittable: {check:?}"),
            Self::NotFound(id) => write!(f, "medley not found: {id}"),
            Self::ScentingNotFound(id) => write!(f, "scenting not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MedleyServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MedleyServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound("medley", id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Medley service facade.
pub struct MedleyService<R: MedleyRepository> {
    repo: R,
}

impl<R: MedleyRepository> MedleyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Names of every medley under `scenting_id`.
    pub fn sibling_names(&self, scenting_id: ScentingId) -> Result<Vec<String>, MedleyServiceError> {
        self.repo
            .list_medley_names(scenting_id)
            .map_err(Into::into)
    }

    /// Runs the gate for a draft under `scenting_id`.
    ///
    /// `editing` is the medley being edited, whose current name is exempt.
    /// A medley that lives under another scenting grants no exemption.
    pub fn check_draft(
        &self,
        scenting_id: ScentingId,
        draft: &MedleyDraft,
        editing: Option<&Medley>,
    ) -> Result<SubmissionCheck, MedleyServiceError> {
        let siblings = self.sibling_names(scenting_id)?;
        let exemption = editing
            .filter(|medley| medley.scenting_id == scenting_id)
            .map(|medley| medley.name.as_str());
        Ok(draft.check(&siblings, exemption))
    }

    /// Creates a medley from a submittable draft.
    pub fn add_medley(
        &self,
        scenting_id: ScentingId,
        draft: &MedleyDraft,
    ) -> Result<Medley, MedleyServiceError> {
        if !self.repo.scenting_exists(scenting_id)? {
            return Err(MedleyServiceError::ScentingNotFound(scenting_id));
        }
        let check = self.check_draft(scenting_id, draft, None)?;
        if !check.is_submittable() {
            return Err(MedleyServiceError::NotSubmittable(check));
        }

        let mut medley = Medley::new(scenting_id);
        draft.apply_fields(&mut medley);
        medley.ingredients = draft.ingredient_rows();

        if let Err(err) = self.repo.create_medley(&medley) {
            error!(
                "event=medley_add module=service status=error scenting_id={scenting_id} error={err}"
            );
            return Err(err.into());
        }
        info!(
            "event=medley_add module=service status=ok medley_id={} ingredient_count={}",
            medley.id,
            medley.ingredients.len()
        );
        self.require_medley(medley.id)
    }

    /// Saves an edited draft over the persisted medley `id`.
    ///
    /// Ingredients are reconciled by id: matching rows are updated, new ids
    /// inserted, missing ids deleted.
    pub fn save_medley(
        &self,
        id: MedleyId,
        draft: &MedleyDraft,
    ) -> Result<Medley, MedleyServiceError> {
        let persisted = self.require_medley(id)?;
        let check = self.check_draft(persisted.scenting_id, draft, Some(&persisted))?;
        if !check.is_submittable() {
            return Err(MedleyServiceError::NotSubmittable(check));
        }

        let plan = IngredientMergePlan::build(&persisted.ingredients, &draft.ingredient_rows());
        let mut medley = persisted.clone();
        draft.apply_fields(&mut medley);
        medley.ingredients = plan.apply(&persisted.ingredients);

        if let Err(err) = self.repo.update_medley(&medley, &plan) {
            error!("event=medley_save module=service status=error medley_id={id} error={err}");
            return Err(err.into());
        }
        info!(
            "event=medley_save module=service status=ok medley_id={id} updated={} inserted={} deleted={}",
            plan.updates.len(),
            plan.inserts.len(),
            plan.deletes.len()
        );
        self.require_medley(id)
    }

    pub fn get_medley(&self, id: MedleyId) -> Result<Option<Medley>, MedleyServiceError> {
        self.repo.get_medley(id).map_err(Into::into)
    }

    /// Lists medleys sorted by name, optionally under one scenting.
    pub fn list_medleys(
        &self,
        scenting_id: Option<ScentingId>,
    ) -> Result<Vec<Medley>, MedleyServiceError> {
        self.repo.list_medleys(scenting_id).map_err(Into::into)
    }

    /// Deletes a medley together with its ingredients.
    pub fn delete_medley(&self, id: MedleyId) -> Result<(), MedleyServiceError> {
        if let Err(err) = self.repo.delete_medley(id) {
            error!("event=medley_delete module=service status=error medley_id={id} error={err}");
            return Err(err.into());
        }
        info!("event=medley_delete module=service status=ok medley_id={id}");
        Ok(())
    }

    fn require_medley(&self, id: MedleyId) -> Result<Medley, MedleyServiceError> {
        self.repo
            .get_medley(id)?
            .ok_or(MedleyServiceError::NotFound(id))
    }
}
