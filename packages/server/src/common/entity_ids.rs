//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use adoptlink_core::common::{ChildId, ParentId};
//!
//! let parent_id: ParentId = ParentId::new();
//! let child_id: ChildId = ChildId::new();
//!
//! // This would be a compile error:
//! // let wrong: ChildId = parent_id;
//! ```

pub use super::id::Id;

/// Marker type for Parent entities (registered adoptive parents).
pub struct Parent;

/// Marker type for Child entities.
pub struct Child;

/// Marker type for StaffMember entities (case workers).
pub struct StaffMember;

/// Marker type for Admin entities.
pub struct Admin;

/// Marker type for Document entities (parent uploads).
pub struct Document;

/// Marker type for Visit entities.
pub struct Visit;

/// Marker type for RescheduleRequest entities.
pub struct RescheduleRequest;

pub type ParentId = Id<Parent>;
pub type ChildId = Id<Child>;
pub type StaffId = Id<StaffMember>;
pub type AdminId = Id<Admin>;
pub type DocumentId = Id<Document>;
pub type VisitId = Id<Visit>;
pub type RescheduleRequestId = Id<RescheduleRequest>;
