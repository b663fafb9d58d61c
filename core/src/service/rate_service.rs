use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::model::collaborator::{Collaborator, EffectiveRates};
use crate::repository::CollaboratorRepository;

/// The rate side of the subsystem: owns the collaborator registry and
/// resolves the effective rates the calculator runs with. Lookup is a
/// plain synchronous read against the repository.
pub struct RateService<C: CollaboratorRepository> {
    repo: C,
}

impl<C: CollaboratorRepository> RateService<C> {
    pub fn new(repo: C) -> Self {
        Self { repo }
    }

    pub fn register(
        &self,
        name: String,
        role: Option<String>,
        daily_rate: Option<f64>,
        overnight_rate: Option<f64>,
    ) -> Result<Collaborator> {
        if name.trim().is_empty() {
            return Err(anyhow!("Collaborator name is required"));
        }
        let mut collaborator = Collaborator::new(name);
        collaborator.role = role;
        collaborator.daily_rate = daily_rate;
        collaborator.overnight_rate = overnight_rate;
        self.repo.create(collaborator)
    }

    pub fn list(&self) -> Result<Vec<Collaborator>> {
        self.repo.list()
    }

    pub fn get(&self, id: &Uuid) -> Result<Collaborator> {
        self.repo.get(id)
    }

    pub fn set_rates(
        &self,
        id: &Uuid,
        daily_rate: Option<f64>,
        overnight_rate: Option<f64>,
    ) -> Result<Collaborator> {
        let mut collaborator = self.repo.get(id)?;
        collaborator.daily_rate = daily_rate;
        collaborator.overnight_rate = overnight_rate;
        self.repo.update(&collaborator)?;
        Ok(collaborator)
    }

    pub fn remove(&self, id: &Uuid) -> Result<()> {
        self.repo.delete(id)
    }

    /// Per-person override or nothing: a collaborator with no positive
    /// daily rate resolves to zero and accrues no per-diem at all.
    pub fn effective_rates(&self, id: &Uuid) -> Result<EffectiveRates> {
        Ok(self.repo.get(id)?.effective_rates())
    }

    /// Resolve a user-typed reference: case-insensitive name match first,
    /// then id prefix. Ambiguity is an error, not a guess.
    pub fn find(&self, needle: &str) -> Result<Collaborator> {
        let needle = needle.trim();
        if needle.is_empty() {
            return Err(anyhow!("Collaborator name or id is required"));
        }

        let collaborators = self.repo.list()?;

        let by_name: Vec<&Collaborator> = collaborators
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(needle))
            .collect();
        if by_name.len() == 1 {
            return Ok(by_name[0].clone());
        }
        if by_name.len() > 1 {
            return Err(anyhow!("Multiple collaborators named '{}', use the id", needle));
        }

        let prefix = needle.to_lowercase();
        let by_id: Vec<&Collaborator> = collaborators
            .iter()
            .filter(|c| c.id.to_string().starts_with(&prefix))
            .collect();
        match by_id.len() {
            1 => Ok(by_id[0].clone()),
            0 => Err(anyhow!("No collaborator matches '{}'", needle)),
            _ => Err(anyhow!("Id prefix '{}' is ambiguous", needle)),
        }
    }
}
