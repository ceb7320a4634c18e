use std::collections::HashMap;
use std::io;
use crossterm::event::{Event, KeyCode, KeyEvent};

// --- SimulatedInput for headless runs ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    /// Launches, weaves the ship around for a while, then quits.
    pub fn scripted_demo() -> Self {
        let key = |code: KeyCode| Event::Key(KeyEvent::from(code));
        let mut events: HashMap<u64, Vec<Event>> = HashMap::new();
        events.insert(1, vec![key(KeyCode::Char(' '))]);
        for frame in 2..40 {
            events.insert(frame, vec![key(KeyCode::Up), key(KeyCode::Left)]);
        }
        for frame in 40..80 {
            events.insert(frame, vec![key(KeyCode::Right), key(KeyCode::Right)]);
        }
        for frame in 80..120 {
            events.insert(frame, vec![key(KeyCode::Down)]);
        }
        events.insert(180, vec![key(KeyCode::Char(' '))]);
        events.insert(240, vec![key(KeyCode::Char('q'))]);
        SimulatedInput::new(events)
    }

    /// Events scripted for `frame`, in order. Each frame's events are handed out once.
    pub fn take(&mut self, frame: u64) -> io::Result<Vec<Event>> {
        Ok(self.events.remove(&frame).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_delivered_once_per_frame() {
        let mut input = SimulatedInput::scripted_demo();
        let first = input.take(1).unwrap();
        assert_eq!(first, vec![Event::Key(KeyEvent::from(KeyCode::Char(' ')))]);
        assert!(input.take(1).unwrap().is_empty());
        assert!(input.take(0).unwrap().is_empty());
        assert_eq!(input.take(2).unwrap().len(), 2);
    }

    #[test]
    fn demo_script_ends_with_quit() {
        let mut input = SimulatedInput::scripted_demo();
        let last = input.take(240).unwrap();
        assert_eq!(last, vec![Event::Key(KeyEvent::from(KeyCode::Char('q')))]);
    }
}
