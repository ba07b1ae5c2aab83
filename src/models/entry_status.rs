use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl EntryStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryStatus::Draft => "draft",
            EntryStatus::Submitted => "submitted",
            EntryStatus::Approved => "approved",
            EntryStatus::Rejected => "rejected",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(EntryStatus::Draft),
            "submitted" => Some(EntryStatus::Submitted),
            "approved" => Some(EntryStatus::Approved),
            "rejected" => Some(EntryStatus::Rejected),
            _ => None,
        }
    }

    /// Helper: convert input from CLI (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&code.trim().to_lowercase())
    }

    /// Allowed transitions of the review workflow.
    pub fn can_move_to(&self, next: EntryStatus) -> bool {
        matches!(
            (self, next),
            (EntryStatus::Draft, EntryStatus::Submitted)
                | (EntryStatus::Submitted, EntryStatus::Approved)
                | (EntryStatus::Submitted, EntryStatus::Rejected)
                | (EntryStatus::Rejected, EntryStatus::Submitted)
        )
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, EntryStatus::Approved)
    }
}
