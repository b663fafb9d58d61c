use std::collections::HashMap;

use anyhow::{anyhow, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::accrual;
use crate::model::request::{PerDiemAccrual, PerDiemRequest};
use crate::model::stay::StayInterval;
use crate::repository::{CollaboratorRepository, PerDiemRepository, RegistryEvent};
use crate::service::dto::RequestDto;

/// Orchestrates the request registry: every write path resolves the
/// collaborator's current rates and recomputes the accrual before the
/// record is persisted, so the stored snapshot always reflects the stay
/// and rates as of the save. Subscribers are notified synchronously after
/// each successful mutation.
pub struct RequestService<R: PerDiemRepository, C: CollaboratorRepository> {
    requests: R,
    collaborators: C,
    subscribers: Vec<Box<dyn Fn(&RegistryEvent)>>,
}

impl<R: PerDiemRepository, C: CollaboratorRepository> RequestService<R, C> {
    pub fn new(requests: R, collaborators: C) -> Self {
        Self {
            requests,
            collaborators,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: impl Fn(&RegistryEvent) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    fn notify(&self, event: RegistryEvent) {
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }

    /// Compute what a stay would accrue without persisting anything.
    pub fn quote(&self, collaborator_id: &Uuid, stay: &StayInterval) -> Result<PerDiemAccrual> {
        let collaborator = self.collaborators.get(collaborator_id)?;
        Ok(accrual::calculate(stay, &collaborator.effective_rates()))
    }

    pub fn create(&self, mut request: PerDiemRequest) -> Result<PerDiemRequest> {
        if request.requester.trim().is_empty() {
            return Err(anyhow!("Requester name is required"));
        }
        if request.destination.trim().is_empty() {
            return Err(anyhow!("Destination is required"));
        }

        request.accrual = self.quote(&request.collaborator_id, &request.stay)?;
        let created = self.requests.create(request)?;
        self.notify(RegistryEvent::Created(created.id));
        Ok(created)
    }

    /// Overwrite an edited record. The accrual snapshot is recomputed
    /// from the rates in force now, not the ones frozen at creation.
    pub fn update(&self, request: &mut PerDiemRequest) -> Result<()> {
        request.accrual = self.quote(&request.collaborator_id, &request.stay)?;
        request.updated_at = Some(Utc::now());
        self.requests.update(request)?;
        self.notify(RegistryEvent::Updated(request.id));
        Ok(())
    }

    pub fn delete(&self, id: &Uuid) -> Result<()> {
        self.requests.delete(id)?;
        self.notify(RegistryEvent::Deleted(*id));
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Result<PerDiemRequest> {
        self.requests.get(id)
    }

    /// Resolve a user-typed id prefix to a single record.
    pub fn find(&self, id_prefix: &str) -> Result<PerDiemRequest> {
        let prefix = id_prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(anyhow!("Request id is required"));
        }

        let matches: Vec<PerDiemRequest> = self
            .requests
            .list()?
            .into_iter()
            .filter(|r| r.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            1 => Ok(matches.into_iter().next().unwrap()),
            0 => Err(anyhow!("No request matches '{}'", id_prefix)),
            _ => Err(anyhow!("Id prefix '{}' is ambiguous", id_prefix)),
        }
    }

    pub fn list(&self) -> Result<Vec<RequestDto>> {
        let names: HashMap<Uuid, String> = self
            .collaborators
            .list()?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let dtos = self
            .requests
            .list()?
            .into_iter()
            .map(|request| {
                let name = names
                    .get(&request.collaborator_id)
                    .cloned()
                    .unwrap_or_else(|| "(unknown)".to_string());
                RequestDto::from_entity(request, name)
            })
            .collect();
        Ok(dtos)
    }

    pub fn get_dto(&self, id: &Uuid) -> Result<RequestDto> {
        let request = self.requests.get(id)?;
        let name = self
            .collaborators
            .get(&request.collaborator_id)
            .map(|c| c.name)
            .unwrap_or_else(|_| "(unknown)".to_string());
        Ok(RequestDto::from_entity(request, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::collaborator::Collaborator;
    use chrono::{NaiveDate, NaiveTime};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct MockRequestRepo {
        requests: Rc<RefCell<Vec<PerDiemRequest>>>,
    }

    impl PerDiemRepository for MockRequestRepo {
        fn create(&self, request: PerDiemRequest) -> Result<PerDiemRequest> {
            self.requests.borrow_mut().push(request.clone());
            Ok(request)
        }
        fn list(&self) -> Result<Vec<PerDiemRequest>> {
            Ok(self.requests.borrow().clone())
        }
        fn get(&self, id: &Uuid) -> Result<PerDiemRequest> {
            self.requests
                .borrow()
                .iter()
                .find(|r| r.id == *id)
                .cloned()
                .ok_or_else(|| anyhow!("Request with ID {} not found", id))
        }
        fn update(&self, request: &PerDiemRequest) -> Result<()> {
            let mut requests = self.requests.borrow_mut();
            let pos = requests
                .iter()
                .position(|r| r.id == request.id)
                .ok_or_else(|| anyhow!("Request with ID {} not found", request.id))?;
            requests[pos] = request.clone();
            Ok(())
        }
        fn delete(&self, id: &Uuid) -> Result<()> {
            let mut requests = self.requests.borrow_mut();
            let initial_len = requests.len();
            requests.retain(|r| r.id != *id);
            if requests.len() == initial_len {
                return Err(anyhow!("Request with ID {} not found", id));
            }
            Ok(())
        }
    }

    struct MockCollabRepo {
        collaborators: Rc<RefCell<Vec<Collaborator>>>,
    }

    impl CollaboratorRepository for MockCollabRepo {
        fn create(&self, collaborator: Collaborator) -> Result<Collaborator> {
            self.collaborators.borrow_mut().push(collaborator.clone());
            Ok(collaborator)
        }
        fn list(&self) -> Result<Vec<Collaborator>> {
            Ok(self.collaborators.borrow().clone())
        }
        fn get(&self, id: &Uuid) -> Result<Collaborator> {
            self.collaborators
                .borrow()
                .iter()
                .find(|c| c.id == *id)
                .cloned()
                .ok_or_else(|| anyhow!("Collaborator with ID {} not found", id))
        }
        fn update(&self, collaborator: &Collaborator) -> Result<()> {
            let mut collaborators = self.collaborators.borrow_mut();
            let pos = collaborators
                .iter()
                .position(|c| c.id == collaborator.id)
                .ok_or_else(|| anyhow!("Collaborator with ID {} not found", collaborator.id))?;
            collaborators[pos] = collaborator.clone();
            Ok(())
        }
        fn delete(&self, id: &Uuid) -> Result<()> {
            self.collaborators.borrow_mut().retain(|c| c.id != *id);
            Ok(())
        }
    }

    fn setup() -> (
        RequestService<MockRequestRepo, MockCollabRepo>,
        Collaborator,
        Rc<RefCell<Vec<Collaborator>>>,
    ) {
        let collaborators = Rc::new(RefCell::new(Vec::new()));
        let requests = Rc::new(RefCell::new(Vec::new()));

        let mut ana = Collaborator::new("Ana".to_string());
        ana.daily_rate = Some(150.0);
        ana.overnight_rate = Some(50.0);
        collaborators.borrow_mut().push(ana.clone());

        let service = RequestService::new(
            MockRequestRepo { requests },
            MockCollabRepo { collaborators: Rc::clone(&collaborators) },
        );
        (service, ana, collaborators)
    }

    fn sample_stay() -> StayInterval {
        StayInterval::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_create_freezes_accrual_snapshot() {
        let (service, ana, _) = setup();
        let request = PerDiemRequest::new(
            "Carlos".to_string(),
            ana.id,
            sample_stay(),
            "Salvador".to_string(),
        );

        let created = service.create(request).unwrap();
        assert_eq!(created.accrual.overnights, 2);
        assert_eq!(created.accrual.total_value, 550.0);

        let stored = service.get(&created.id).unwrap();
        assert_eq!(stored.accrual, created.accrual);
    }

    #[test]
    fn test_create_requires_business_fields() {
        let (service, ana, _) = setup();

        let request =
            PerDiemRequest::new("".to_string(), ana.id, sample_stay(), "Salvador".to_string());
        assert!(service.create(request).is_err());

        let request =
            PerDiemRequest::new("Carlos".to_string(), ana.id, sample_stay(), " ".to_string());
        assert!(service.create(request).is_err());

        // Unknown collaborator is a persistence-boundary error, not a zero accrual.
        let request = PerDiemRequest::new(
            "Carlos".to_string(),
            Uuid::new_v4(),
            sample_stay(),
            "Salvador".to_string(),
        );
        assert!(service.create(request).is_err());
    }

    #[test]
    fn test_update_recomputes_from_current_rates() {
        let (service, ana, collaborators) = setup();
        let created = service
            .create(PerDiemRequest::new(
                "Carlos".to_string(),
                ana.id,
                sample_stay(),
                "Salvador".to_string(),
            ))
            .unwrap();
        assert_eq!(created.accrual.meals_value, 450.0);

        // The rate changes after creation; an edit must pick it up.
        collaborators.borrow_mut()[0].daily_rate = Some(300.0);

        let mut edited = created.clone();
        service.update(&mut edited).unwrap();
        assert_eq!(edited.accrual.meals_value, 900.0);
        assert!(edited.updated_at.is_some());

        let stored = service.get(&created.id).unwrap();
        assert_eq!(stored.accrual.meals_value, 900.0);
    }

    #[test]
    fn test_quote_for_ineligible_collaborator_is_zero() {
        let (service, _, collaborators) = setup();
        let mut bia = Collaborator::new("Bia".to_string());
        bia.daily_rate = None;
        collaborators.borrow_mut().push(bia.clone());

        let accrual = service.quote(&bia.id, &sample_stay()).unwrap();
        assert!(accrual.is_zero());
    }

    #[test]
    fn test_mutations_notify_subscribers() {
        let (mut service, ana, _) = setup();
        let events: Rc<RefCell<Vec<RegistryEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        service.subscribe(move |event| sink.borrow_mut().push(*event));

        let created = service
            .create(PerDiemRequest::new(
                "Carlos".to_string(),
                ana.id,
                sample_stay(),
                "Salvador".to_string(),
            ))
            .unwrap();
        let mut edited = created.clone();
        service.update(&mut edited).unwrap();
        service.delete(&created.id).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                RegistryEvent::Created(created.id),
                RegistryEvent::Updated(created.id),
                RegistryEvent::Deleted(created.id),
            ]
        );
    }

    #[test]
    fn test_failed_mutation_does_not_notify() {
        let (mut service, _, _) = setup();
        let events: Rc<RefCell<Vec<RegistryEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        service.subscribe(move |event| sink.borrow_mut().push(*event));

        assert!(service.delete(&Uuid::new_v4()).is_err());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_find_by_id_prefix_and_list_dtos() {
        let (service, ana, _) = setup();
        let created = service
            .create(PerDiemRequest::new(
                "Carlos".to_string(),
                ana.id,
                sample_stay(),
                "Salvador".to_string(),
            ))
            .unwrap();

        let prefix = &created.id.to_string()[..8];
        assert_eq!(service.find(prefix).unwrap().id, created.id);
        assert!(service.find("zzzzzzzz").is_err());

        let dtos = service.list().unwrap();
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].collaborator, "Ana");
        assert_eq!(dtos[0].total_value, "550.00");
    }
}
