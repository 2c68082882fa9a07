use crate::ScreenSize;

/// Events the frame loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Exit the application
    Exit,

    /// The screen changed size
    Resize { cols: ScreenSize, rows: ScreenSize },
}
