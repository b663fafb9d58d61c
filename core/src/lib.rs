pub mod accrual;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use input::{expand_key, normalize_fields, parse_args, ParsedInput};
pub use model::collaborator::{Collaborator, EffectiveRates};
pub use model::request::{PerDiemAccrual, PerDiemRequest};
pub use model::stay::StayInterval;
pub use repository::{
    CollaboratorRepository, FileCollaboratorRepository, FilePerDiemRepository, PerDiemRepository,
    RegistryEvent,
};
pub use service::dto::RequestDto;
pub use service::rate_service::RateService;
pub use service::request_service::RequestService;
pub use time::{parse_clock_time, parse_stay_date};
