//! Puzzle controls
//!
//! Controls while playing:
//! - Left/Right: Move the piece sideways
//! - Down: Move the piece down one row
//! - Up: Rotate
//!
//! Controls while choosing the next piece:
//! - Up/Down: Change the highlighted option
//! - Enter: Take the highlighted option

use toybox_puzzle::{Phase, PuzzleAction};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Maps arrow keys to [`PuzzleAction`]s depending on the game phase
#[derive(Debug, Default, Clone, Copy)]
pub struct PuzzleController;

impl PuzzleController {
    /// Translate a key event; only presses produce actions
    pub fn map_key(key: KeyCode, state: ElementState, phase: &Phase) -> Option<PuzzleAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match phase {
            Phase::Playing => match key {
                KeyCode::ArrowLeft => Some(PuzzleAction::MoveLeft),
                KeyCode::ArrowRight => Some(PuzzleAction::MoveRight),
                KeyCode::ArrowDown => Some(PuzzleAction::SoftDrop),
                KeyCode::ArrowUp => Some(PuzzleAction::Rotate),
                _ => None,
            },
            Phase::Choosing(_) => match key {
                KeyCode::ArrowUp => Some(PuzzleAction::ChoicePrev),
                KeyCode::ArrowDown => Some(PuzzleAction::ChoiceNext),
                KeyCode::Enter | KeyCode::NumpadEnter => Some(PuzzleAction::ConfirmChoice),
                _ => None,
            },
            Phase::Lost => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toybox_puzzle::PieceChooser;

    fn choosing() -> Phase {
        Phase::Choosing(PieceChooser::new(vec!["I".to_string()]))
    }

    #[test]
    fn test_playing_arrows() {
        let phase = Phase::Playing;
        let map = |key| PuzzleController::map_key(key, ElementState::Pressed, &phase);
        assert_eq!(map(KeyCode::ArrowLeft), Some(PuzzleAction::MoveLeft));
        assert_eq!(map(KeyCode::ArrowRight), Some(PuzzleAction::MoveRight));
        assert_eq!(map(KeyCode::ArrowDown), Some(PuzzleAction::SoftDrop));
        assert_eq!(map(KeyCode::ArrowUp), Some(PuzzleAction::Rotate));
        assert_eq!(map(KeyCode::Enter), None);
    }

    #[test]
    fn test_choosing_arrows() {
        let phase = choosing();
        let map = |key| PuzzleController::map_key(key, ElementState::Pressed, &phase);
        assert_eq!(map(KeyCode::ArrowUp), Some(PuzzleAction::ChoicePrev));
        assert_eq!(map(KeyCode::ArrowDown), Some(PuzzleAction::ChoiceNext));
        assert_eq!(map(KeyCode::Enter), Some(PuzzleAction::ConfirmChoice));
        assert_eq!(map(KeyCode::ArrowLeft), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let action =
            PuzzleController::map_key(KeyCode::ArrowLeft, ElementState::Released, &Phase::Playing);
        assert_eq!(action, None);
    }

    #[test]
    fn test_lost_ignores_everything() {
        for key in [KeyCode::ArrowLeft, KeyCode::ArrowUp, KeyCode::Enter] {
            assert_eq!(PuzzleController::map_key(key, ElementState::Pressed, &Phase::Lost), None);
        }
    }

    #[test]
    fn test_same_key_follows_phase() {
        let up = |phase: &Phase| PuzzleController::map_key(KeyCode::ArrowUp, ElementState::Pressed, phase);
        assert_eq!(up(&Phase::Playing), Some(PuzzleAction::Rotate));
        assert_eq!(up(&choosing()), Some(PuzzleAction::ChoicePrev));
        assert_eq!(up(&Phase::Lost), None);
    }
}
