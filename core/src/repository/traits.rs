use anyhow::Result;
use uuid::Uuid;

use crate::model::collaborator::Collaborator;
use crate::model::request::PerDiemRequest;

pub trait PerDiemRepository {
    fn create(&self, request: PerDiemRequest) -> Result<PerDiemRequest>;
    fn list(&self) -> Result<Vec<PerDiemRequest>>;
    fn get(&self, id: &Uuid) -> Result<PerDiemRequest>;
    fn update(&self, request: &PerDiemRequest) -> Result<()>;
    fn delete(&self, id: &Uuid) -> Result<()>;
}

pub trait CollaboratorRepository {
    fn create(&self, collaborator: Collaborator) -> Result<Collaborator>;
    fn list(&self) -> Result<Vec<Collaborator>>;
    fn get(&self, id: &Uuid) -> Result<Collaborator>;
    fn update(&self, collaborator: &Collaborator) -> Result<()>;
    fn delete(&self, id: &Uuid) -> Result<()>;
}

/// Delivered to subscribers after each successful mutation of the request
/// registry, carrying the id of the record that changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegistryEvent {
    Created(Uuid),
    Updated(Uuid),
    Deleted(Uuid),
}
