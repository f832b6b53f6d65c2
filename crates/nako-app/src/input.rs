//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries so the same key
/// handling runs under simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key (scroll up one line).
    Up,
    /// Down arrow key (scroll down one line).
    Down,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
    /// Page Up key (scroll up one page).
    PageUp,
    /// Page Down key (scroll down one page).
    PageDown,
    /// Ctrl-C (quit).
    Interrupt,
    /// Ctrl-U (clear input line).
    ClearLine,
}
