use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identity of a user account.
    UserId
);
entity_id!(
    /// Identity of a listed book.
    BookId
);
entity_id!(
    /// Identity of a borrow request.
    RequestId
);
entity_id!(
    /// Identity of a chat between two users.
    ChatId
);
entity_id!(
    /// Identity of a single chat message.
    MessageId
);

impl UserId {
    /// Synthetic sender of auto-generated chat-opening messages.
    pub const SYSTEM: UserId = UserId(Uuid::nil());

    pub fn is_system(&self) -> bool {
        *self == Self::SYSTEM
    }
}

/// Physical medium of a listed book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BookFormat {
    /// Digital copy shared as a PDF.
    #[serde(rename = "PDF")]
    Pdf,
    /// Physical copy handed over in person.
    Physical,
}

impl std::fmt::Display for BookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookFormat::Pdf => write!(f, "PDF"),
            BookFormat::Physical => write!(f, "Physical"),
        }
    }
}

/// Lifecycle of a borrow request. Transitions only move forward:
/// `Pending` may become `Accepted` or `Rejected`; `Accepted` may become
/// `Completed`. Nothing in the application currently produces
/// `Completed` — it is a declared terminal state for a future
/// exchange-completion step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl RequestStatus {
    /// Whether a transition from `self` to `next` moves forward.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Accepted)
                | (RequestStatus::Pending, RequestStatus::Rejected)
                | (RequestStatus::Accepted, RequestStatus::Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Completed)
    }
}

/// How the owner answers a pending request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Accepted,
    Rejected,
}

impl From<RequestDecision> for RequestStatus {
    fn from(d: RequestDecision) -> Self {
        match d {
            RequestDecision::Accepted => RequestStatus::Accepted,
            RequestDecision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// Kind of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    File,
    System,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_transitions_are_monotonic() {
        use RequestStatus::*;

        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Accepted.can_transition_to(Completed));

        // No way back, no skipping.
        assert!(!Accepted.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Accepted));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Pending));
    }

    #[test]
    fn system_user_id_is_nil() {
        assert!(UserId::SYSTEM.is_system());
        assert!(!UserId::new().is_system());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&RequestStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
