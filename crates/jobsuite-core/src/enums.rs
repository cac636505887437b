//! Status enums for the contractor business domain.
//!
//! All enums serialize as `SCREAMING_SNAKE_CASE` to match the backend's wire
//! values. [`EstimateStatus`] carries the terminal-state predicate used by the
//! cache layer to drop records that left the active pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EstimateStatus
// ---------------------------------------------------------------------------

/// Pipeline status of an estimate, from first lead contact through project
/// completion.
///
/// ```text
/// NEW_LEAD → … estimate phase … → ESTIMATE_ACCEPTED
///          → … project phase …  → PROJECT_COMPLETED | PROJECT_CANCELLED
/// any      → ARCHIVED
/// ```
///
/// `ARCHIVED`, `PROJECT_COMPLETED`, and `PROJECT_CANCELLED` are terminal:
/// cache slices filter them out on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstimateStatus {
    NewLead,
    EstimateNotScheduled,
    EstimateScheduled,
    EstimateInProgress,
    NeedsFollowUp,
    EstimateSent,
    EstimateOpened,
    EstimateDeclined,
    EstimateAccepted,
    StaleEstimate,
    ContractorOpened,
    ContractorDeclined,
    ContractorSigned,
    AccountingNeeded,
    ProjectNotScheduled,
    ProjectScheduled,
    ProjectInProgress,
    ProjectBillingNeeded,
    ProjectAccountsReceivable,
    ProjectPaymentsReceived,
    ProjectCompleted,
    ProjectCancelled,
    Archived,
}

impl EstimateStatus {
    /// Statuses removed from the active cache slices on write.
    pub const TERMINAL: [Self; 3] = [Self::Archived, Self::ProjectCompleted, Self::ProjectCancelled];

    /// Whether the status ends the estimate's life in the active pipeline.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Archived | Self::ProjectCompleted | Self::ProjectCancelled
        )
    }

    /// Whether the estimate has entered the project phase.
    #[must_use]
    pub const fn is_project_phase(self) -> bool {
        matches!(
            self,
            Self::ProjectNotScheduled
                | Self::ProjectScheduled
                | Self::ProjectInProgress
                | Self::ProjectBillingNeeded
                | Self::ProjectAccountsReceivable
                | Self::ProjectPaymentsReceived
                | Self::ProjectCompleted
                | Self::ProjectCancelled
        )
    }

    /// Return the backend wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewLead => "NEW_LEAD",
            Self::EstimateNotScheduled => "ESTIMATE_NOT_SCHEDULED",
            Self::EstimateScheduled => "ESTIMATE_SCHEDULED",
            Self::EstimateInProgress => "ESTIMATE_IN_PROGRESS",
            Self::NeedsFollowUp => "NEEDS_FOLLOW_UP",
            Self::EstimateSent => "ESTIMATE_SENT",
            Self::EstimateOpened => "ESTIMATE_OPENED",
            Self::EstimateDeclined => "ESTIMATE_DECLINED",
            Self::EstimateAccepted => "ESTIMATE_ACCEPTED",
            Self::StaleEstimate => "STALE_ESTIMATE",
            Self::ContractorOpened => "CONTRACTOR_OPENED",
            Self::ContractorDeclined => "CONTRACTOR_DECLINED",
            Self::ContractorSigned => "CONTRACTOR_SIGNED",
            Self::AccountingNeeded => "ACCOUNTING_NEEDED",
            Self::ProjectNotScheduled => "PROJECT_NOT_SCHEDULED",
            Self::ProjectScheduled => "PROJECT_SCHEDULED",
            Self::ProjectInProgress => "PROJECT_IN_PROGRESS",
            Self::ProjectBillingNeeded => "PROJECT_BILLING_NEEDED",
            Self::ProjectAccountsReceivable => "PROJECT_ACCOUNTS_RECEIVABLE",
            Self::ProjectPaymentsReceived => "PROJECT_PAYMENTS_RECEIVED",
            Self::ProjectCompleted => "PROJECT_COMPLETED",
            Self::ProjectCancelled => "PROJECT_CANCELLED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for EstimateStatus {
    fn default() -> Self {
        Self::NewLead
    }
}

impl FromStr for EstimateStatus {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| crate::CoreError::Validation(format!("unknown estimate status: {s}")))
    }
}

// ---------------------------------------------------------------------------
// EstimateType
// ---------------------------------------------------------------------------

/// Scope of the work being bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstimateType {
    Interior,
    Exterior,
    Both,
}

impl EstimateType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interior => "INTERIOR",
            Self::Exterior => "EXTERIOR",
            Self::Both => "BOTH",
        }
    }
}

impl fmt::Display for EstimateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ResourceType
// ---------------------------------------------------------------------------

/// Kind of uploaded media attached to an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Image,
    Video,
    Document,
    Audio,
    Other,
}

impl ResourceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
            Self::Document => "DOCUMENT",
            Self::Audio => "AUDIO",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UploadStatus
// ---------------------------------------------------------------------------

/// Progress of a resource upload as tracked by the backend.
///
/// ```text
/// PENDING → UPLOADING → COMPLETED
///                     → FAILED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Completed,
    Failed,
}

impl UploadStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Uploading],
            Self::Uploading => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Uploading => "UPLOADING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SignatureType
// ---------------------------------------------------------------------------

/// Which party a captured signature belongs to.
///
/// Template `<signature-field>` roles map onto these: `Service Provider`
/// is the contractor, `Property Owner` is the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureType {
    Contractor,
    Client,
}

impl SignatureType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contractor => "CONTRACTOR",
            Self::Client => "CLIENT",
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
