/// Authorization for AdoptLink
///
/// Handlers state what they need and let the actor's role decide:
///
/// ```rust
/// use adoptlink_core::common::auth::{Actor, Capability, Role};
/// use uuid::Uuid;
///
/// let actor = Actor::new(Uuid::now_v7(), Role::Staff);
/// assert!(actor.can(Capability::ManageAdoptions).check().is_ok());
/// assert!(actor.can(Capability::ManageStaff).check().is_err());
/// ```

mod builder;
mod errors;
mod role;

pub use builder::{Actor, CapabilityBuilder};
pub use errors::AuthError;
pub use role::{Capability, Role};
