mod create_staff;

pub use create_staff::{create_staff, NewStaffMember};
