use super::{AuthError, Capability, Role};
use uuid::Uuid;

/// Entry point for authorization checks
///
/// Usage:
/// ```
/// # use adoptlink_core::common::auth::{Actor, Capability, Role};
/// # let subject = uuid::Uuid::now_v7();
/// Actor::new(subject, Role::Admin)
///     .can(Capability::ManageChildren)
///     .check()?;
/// # Ok::<(), adoptlink_core::common::AuthError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    subject: Uuid,
    role: Role,
}

impl Actor {
    /// `role` comes from a verified JWT, so it is trusted as-is
    pub fn new(subject: Uuid, role: Role) -> Self {
        Self { subject, role }
    }

    pub fn subject(&self) -> Uuid {
        self.subject
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor: Actor,
    capability: Capability,
}

impl CapabilityBuilder {
    /// Perform the authorization check
    pub fn check(self) -> Result<Actor, AuthError> {
        if self.capability.allowed_roles().contains(&self.actor.role) {
            Ok(self.actor)
        } else {
            tracing::debug!(
                subject = %self.actor.subject,
                role = %self.actor.role,
                capability = ?self.capability,
                "Capability check failed"
            );
            Err(AuthError::PermissionDenied(format!(
                "{} accounts cannot perform this action",
                self.actor.role
            )))
        }
    }
}
