use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;

use crate::session::{GameEvent, Phase, Session};
use crate::types::Canvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    Left,
    Right,
    Up,
    Down,
    Launch,
    Quit,
}

impl InputCommand {
    /// Decodes a key press or key repeat. Releases and unbound keys yield `None`.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        match event.code {
            KeyCode::Left => Some(InputCommand::Left),
            KeyCode::Right => Some(InputCommand::Right),
            KeyCode::Up => Some(InputCommand::Up),
            KeyCode::Down => Some(InputCommand::Down),
            KeyCode::Char(' ') => Some(InputCommand::Launch),
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(InputCommand::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(InputCommand::Quit),
            _ => None,
        }
    }
}

/// Applies one key press to the session. Arrows only steer a running ship; space
/// starts a new run from the start or game-over screen.
pub fn apply_input(
    mut session: Session,
    command: InputCommand,
    canvas: Canvas,
    rng: &mut impl Rng,
) -> (Session, Vec<GameEvent>) {
    match (command, session.phase) {
        (InputCommand::Left, Phase::Playing) => session.ship.move_left(),
        (InputCommand::Right, Phase::Playing) => session.ship.move_right(canvas),
        (InputCommand::Up, Phase::Playing) => session.ship.move_up(),
        (InputCommand::Down, Phase::Playing) => session.ship.move_down(canvas),
        (InputCommand::Launch, _) => return session.launch(rng, canvas),
        _ => {}
    }
    (session, Vec::new())
}
