pub mod reschedule_request;
pub mod visit;

pub use reschedule_request::{RequestStatus, RescheduleRequest, RescheduleRequestDetail};
pub use visit::{Visit, VisitStatus, VisitType, VisitWithStaff};
