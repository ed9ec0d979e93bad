pub mod staff_member;

pub use staff_member::StaffMember;
