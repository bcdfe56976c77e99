//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific
//! frontends. Each frontend implements the trait to provide input and
//! rendering, while the generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, AppAction};

/// Abstracts frontend I/O for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal and in simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, ratatui for drawing
/// - **Simulation**: Replays a scripted list of user inputs
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next user input and apply it to the App.
    ///
    /// Returns the actions the input produced, possibly none. The future
    /// must be cancel-safe: the runtime drops it whenever a link or tag
    /// event arrives first.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails.
    fn poll_event(
        &mut self,
        app: &mut App,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Clean up frontend resources.
    fn stop(&mut self);
}
