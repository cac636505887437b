//! Entity structs mirroring the backend's REST records.
//!
//! These are plain serde records: the backend owns their invariants, and
//! unknown timestamps arrive as backend-formatted strings rather than parsed
//! datetimes. Fields the backend may omit are `Option`.

mod client;
mod comment;
mod estimate;
mod line_item;
mod outreach;
mod resource;
mod signature;
mod user;

pub use client::{ContractorClient, SubClient};
pub use comment::SingleComment;
pub use estimate::{Estimate, EstimateEnrichment};
pub use line_item::EstimateLineItem;
pub use outreach::OutreachMessage;
pub use resource::EstimateResource;
pub use signature::Signature;
pub use user::User;
