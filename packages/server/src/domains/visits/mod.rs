//! Visits domain - home visits, follow-ups and parent reschedule requests

pub mod actions;
pub mod models;

pub use actions::{
    request_reschedule, review_reschedule, schedule_visit, NewRescheduleRequest,
    RescheduleDecision, ScheduleVisit,
};
pub use models::{
    RequestStatus, RescheduleRequest, RescheduleRequestDetail, Visit, VisitStatus, VisitType,
    VisitWithStaff,
};
