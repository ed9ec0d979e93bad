//! Visits domain actions

mod request_reschedule;
mod review_reschedule;
mod schedule_visit;

pub use request_reschedule::{request_reschedule, NewRescheduleRequest};
pub use review_reschedule::{review_reschedule, RescheduleDecision};
pub use schedule_visit::{schedule_visit, ScheduleVisit};
