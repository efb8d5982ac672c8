use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Engine, Keys};

/// Driver-side state: the engine plus the keymask being collected for the
/// next tick.
pub struct App {
    pub engine: Engine,
    pub keys: Keys,
    pub paused: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
            keys: Keys::NONE,
            paused: false,
            should_quit: false,
        }
    }

    /// Runs one engine tick on the keymask accumulated since the last one.
    /// The accumulator always drains, so a pause does not replay stale
    /// presses on resume.
    pub fn on_tick(&mut self) {
        if !self.paused {
            self.engine.poll(self.keys);
        }
        self.keys = Keys::NONE;
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('p') | KeyCode::Char('P') => self.paused = !self.paused,
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.engine = Engine::new();
                self.paused = false;
            }
            code => self.keys |= key_bit(code),
        }
    }
}

/// Fixed bindings, arrows or vi keys; Space or Enter fires.
fn key_bit(code: KeyCode) -> Keys {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Keys::LEFT,
        KeyCode::Right | KeyCode::Char('l') => Keys::RIGHT,
        KeyCode::Up | KeyCode::Char('k') => Keys::UP,
        KeyCode::Down | KeyCode::Char('j') => Keys::DOWN,
        KeyCode::Enter | KeyCode::Char(' ') => Keys::FIRE,
        _ => Keys::NONE,
    }
}
