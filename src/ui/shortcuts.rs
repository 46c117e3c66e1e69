//! Keyboard shortcut constants for consistent documentation.

pub const HELP: &str = "F1";
pub const THEME: &str = "F2";
pub const QUIT: &str = "Esc/F10";
pub const DISMISS: &str = "Enter/Esc";

// Browsing
pub const EDIT: &str = "Ctrl+E";
pub const OPEN_PROFILE: &str = "Ctrl+O";

// Editing
pub const TOGGLE_SELECT: &str = "Space";
pub const SELECT_ALL: &str = "Ctrl+A";
pub const DUPLICATE: &str = "Ctrl+D";
pub const DELETE: &str = "Del";
pub const DONE: &str = "Enter";

// Navigation
pub const MOVE: &str = "Up/Down";
pub const JUMP_TOP: &str = "Home";
pub const JUMP_BOTTOM: &str = "End";
