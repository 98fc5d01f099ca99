//! Selection of a single timeline interval for detail display.

use serde::{Deserialize, Serialize};

use super::event::EventId;

/// At most one interval is selected at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Idle,
    Active(EventId),
}

impl Selection {
    pub fn selected_id(&self) -> Option<&EventId> {
        match self {
            Self::Idle => None,
            Self::Active(id) => Some(id),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}
