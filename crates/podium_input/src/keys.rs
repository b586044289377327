//! Keyboard navigation map
//!
//! Discrete keys map straight to navigation commands with no thresholding;
//! suppression while animating or while a modal/preloader owns input is the
//! arbiter's job.

use podium_core::KeyCode;

/// A resolved keyboard navigation command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    Step(i32),
    First,
    Last,
}

/// Map a key to its navigation command, if it has one.
pub fn map_key(key: KeyCode) -> Option<NavCommand> {
    match key {
        KeyCode::DOWN | KeyCode::PAGE_DOWN | KeyCode::SPACE => Some(NavCommand::Step(1)),
        KeyCode::UP | KeyCode::PAGE_UP => Some(NavCommand::Step(-1)),
        KeyCode::HOME => Some(NavCommand::First),
        KeyCode::END => Some(NavCommand::Last),
        _ => None,
    }
}
