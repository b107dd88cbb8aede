//! What a settled action tells the merchant

/// Transient notification shown after an action settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Result of invoking a form action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A request for this form is still outstanding; nothing was sent
    Busy,
    /// Input failed local checks or the action is not available; nothing was sent
    Rejected(String),
    /// The request settled. Carries the notification to show, if any.
    Settled(Option<Notice>),
}

impl Submission {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Submission::Settled(notice) => notice.as_ref(),
            Submission::Busy | Submission::Rejected(_) => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Submission::Busy)
    }
}

/// A failure already reduced to the text the merchant sees
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DisplayError(pub String);

impl DisplayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for DisplayError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}
