//! Observable application state types.
//!
//! These serve as the "View Model": the small pieces of state a frontend
//! needs beyond the strings held directly on [`crate::App`].

/// Readout shown when a link was opened that carries no message of ours.
pub const NO_MESSAGE_FOUND: &str = "No message found";

/// The two screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Compose a message and write it to a tag.
    #[default]
    Write,
    /// Show the last message read.
    Read,
}

impl Screen {
    /// The other screen.
    pub fn toggled(self) -> Self {
        match self {
            Self::Write => Self::Read,
            Self::Read => Self::Write,
        }
    }
}

/// Dismissible user-visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An operation succeeded.
    Success(String),
    /// An operation failed; the text carries the reason.
    Failure(String),
}

impl Notice {
    /// Notice text.
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }

    /// True for failures.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}
