//! Physical Input Codes
//!
//! Generic key and button codes, independent of any windowing system.

/// Generic codes for the physical inputs the controller can be bound to.
///
/// These map to standard keyboard keys and mouse buttons but are not tied to
/// a platform crate; the platform layer translates its own events into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ControlLeft,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Action keys
    R,
    E,
    F,
    Escape,

    // Mouse buttons
    MouseLeft,
    MouseRight,

    /// Catch-all for unhandled keys
    Unknown,
}
