//! # jobsuite-core
//!
//! Core types shared across all JobSuite crates.
//!
//! This crate provides the foundational types for the contractor business
//! domain:
//! - Entity structs mirroring the backend's REST records (estimates, clients,
//!   line items, comments, resources, outreach messages)
//! - Status enums, including the estimate pipeline with its terminal states
//! - Cross-cutting error types
//! - Shared wire shapes (`{Items: […]}` envelopes, presigned POST tickets,
//!   multipart part descriptors)

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;

pub use entities::{
    ContractorClient, Estimate, EstimateEnrichment, EstimateLineItem, EstimateResource,
    OutreachMessage, Signature, SingleComment, SubClient, User,
};
pub use enums::{EstimateStatus, EstimateType, ResourceType, SignatureType, UploadStatus};
pub use errors::CoreError;
