mod assign_child;
mod set_adoption_status;

pub use assign_child::{assign_child, AssignChild};
pub use set_adoption_status::set_adoption_status;
