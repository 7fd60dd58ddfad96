// input.rs - Keyboard bindings
//
//   W A S D / arrows  move marker      Space  toggle cell
//   Enter             pause/resume     R / T  slower / faster
//   Z                 save             X      load

use std::path::Path;

use conway::{Command, Direction};
use egui::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Toggle,
    PauseToggle,
    SlowDown,
    SpeedUp,
    Save,
    Load,
}

pub const BINDINGS: &[(Key, KeyAction)] = &[
    (Key::W, KeyAction::Move(Direction::Up)),
    (Key::ArrowUp, KeyAction::Move(Direction::Up)),
    (Key::S, KeyAction::Move(Direction::Down)),
    (Key::ArrowDown, KeyAction::Move(Direction::Down)),
    (Key::A, KeyAction::Move(Direction::Left)),
    (Key::ArrowLeft, KeyAction::Move(Direction::Left)),
    (Key::D, KeyAction::Move(Direction::Right)),
    (Key::ArrowRight, KeyAction::Move(Direction::Right)),
    (Key::Space, KeyAction::Toggle),
    (Key::Enter, KeyAction::PauseToggle),
    (Key::R, KeyAction::SlowDown),
    (Key::T, KeyAction::SpeedUp),
    (Key::Z, KeyAction::Save),
    (Key::X, KeyAction::Load),
];

pub const HELP: &str =
    "WASD - move marker. Space - mark cell. Enter - pause. R - speed(-), T - speed(+), Z - save, X - load";

pub fn action_for_key(key: Key) -> Option<KeyAction> {
    BINDINGS.iter().find(|(k, _)| *k == key).map(|&(_, action)| action)
}

impl KeyAction {
    /// Controller commands for this key. Save and load pause the board first.
    pub fn commands(self, save_file: &Path) -> Vec<Command> {
        match self {
            KeyAction::Move(direction) => vec![Command::MoveCursor(direction)],
            KeyAction::Toggle => vec![Command::ToggleCell],
            KeyAction::PauseToggle => vec![Command::PauseToggle],
            KeyAction::SlowDown => vec![Command::SlowDown],
            KeyAction::SpeedUp => vec![Command::SpeedUp],
            KeyAction::Save => vec![Command::SetPaused(true), Command::Save(save_file.to_owned())],
            KeyAction::Load => vec![Command::SetPaused(true), Command::Load(save_file.to_owned())],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn wasd_and_arrows_move() {
        assert_eq!(action_for_key(Key::W), Some(KeyAction::Move(Direction::Up)));
        assert_eq!(action_for_key(Key::ArrowLeft), Some(KeyAction::Move(Direction::Left)));
        assert_eq!(action_for_key(Key::D), action_for_key(Key::ArrowRight));
        assert_eq!(action_for_key(Key::Q), None);
    }

    #[test]
    fn save_and_load_pause_first() {
        let path = Path::new("board.gol");
        assert_eq!(
            KeyAction::Save.commands(path),
            vec![Command::SetPaused(true), Command::Save(PathBuf::from("board.gol"))]
        );
        assert_eq!(
            KeyAction::Load.commands(path),
            vec![Command::SetPaused(true), Command::Load(PathBuf::from("board.gol"))]
        );
        assert_eq!(KeyAction::Toggle.commands(path), vec![Command::ToggleCell]);
    }

    #[test]
    fn commands_drive_controller() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("keys.gol");
        let config = conway::SimulationConfig { width: 4, height: 4, ..Default::default() };
        let controller = conway::Controller::new(&config).unwrap();

        for key in [Key::D, Key::S, Key::Space, Key::Enter, Key::Z] {
            for command in action_for_key(key).unwrap().commands(&file) {
                controller.execute(command).unwrap();
            }
        }
        assert!(controller.is_paused());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "4|4:0000010000000000");
    }
}
