/// Terminal keyboard input.
///
/// A dedicated thread blocks on `crossterm::event::read` and forwards events
/// over a channel, so the game loop only ever drains it without blocking.
///
/// Held keys: every key's last press/repeat frame is recorded, and a key
/// counts as held while that frame is within `HOLD_WINDOW`. Terminals that
/// report key releases (kitty protocol: Ghostty, kitty, ...) drop the key on
/// release; classic terminals only send repeated presses, so keys expire after
/// a short silence that is shorter than the OS repeat interval.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use alien_invasion::error::GameError;
use alien_invasion::input::{HeldKeys, InputEvent, InputFrame, InputSource};

use crate::display;

/// Frames a key stays held after its last press/repeat event
/// (≈133 ms at 60 FPS; OS key repeat is ≥ 15 Hz once it kicks in).
const HOLD_WINDOW: u64 = 8;

/// Spawn the blocking reader thread.
pub fn spawn_reader() -> Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                warn!("terminal event read failed: {e}");
                break;
            }
        }
    });
    rx
}

pub struct KeyboardInput {
    rx: Receiver<Event>,
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyboardInput {
    pub fn new(rx: Receiver<Event>) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.is_held(k))
    }
}

/// Map one key press to a discrete game event, if it is one.
fn discrete_event(code: KeyCode, modifiers: KeyModifiers) -> Option<InputEvent> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(InputEvent::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(InputEvent::Down),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Char(' ') => Some(InputEvent::Fire),
        _ => None,
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> Result<InputFrame, GameError> {
        self.frame += 1;
        let mut events = Vec::new();

        loop {
            let ev = match self.rx.try_recv() {
                Ok(ev) => ev,
                Err(TryRecvError::Empty) => break,
                // Reader thread is gone; nothing more will ever arrive.
                Err(TryRecvError::Disconnected) => {
                    events.push(InputEvent::Quit);
                    break;
                }
            };
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        self.key_frame.insert(code, self.frame);
                        if let Some(event) = discrete_event(code, modifiers) {
                            events.push(event);
                        }
                    }
                    // Repeat: refresh timestamp so the key stays held
                    KeyEventKind::Repeat => {
                        self.key_frame.insert(code, self.frame);
                        if code == KeyCode::Char(' ') {
                            events.push(InputEvent::Fire);
                        }
                    }
                    KeyEventKind::Release => {
                        self.key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => {
                    let viewport = display::viewport_for(cols, rows);
                    events.push(InputEvent::Resize {
                        width: viewport.width,
                        height: viewport.height,
                    });
                }
                _ => {}
            }
        }

        let held = HeldKeys {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        };
        Ok(InputFrame { events, held })
    }
}
