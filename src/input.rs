use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::GameState;

/// The five logical controls the simulation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Held-control flags consumed by the player update. Each flag belongs to
/// exactly one control and they never interfere with each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl ControlState {
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Up => self.up = pressed,
            Control::Down => self.down = pressed,
            Control::Left => self.left = pressed,
            Control::Right => self.right = pressed,
            Control::Fire => self.fire = pressed,
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Up => self.up,
            Control::Down => self.down,
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Fire => self.fire,
        }
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

/// Session commands triggered by a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Start,
    Restart,
    Quit,
}

/// Manages input polling and translates raw key events into control flags
/// and session commands
pub struct InputManager {
    controls: ControlState,
    oneshot_actions: Vec<InputAction>,
    /// False when the terminal cannot report key releases.
    reports_release: bool,
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            controls: ControlState::default(),
            oneshot_actions: Vec::new(),
            reports_release,
        }
    }

    /// Polls for all pending events without blocking.
    /// Should be called once per frame before reading controls or actions.
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state);
            }
        }

        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state),
            // Repeats only arrive for keys that are already held.
            KeyEventKind::Repeat if game_state.is_running() => {
                if let Some(control) = control_for(key_event.code) {
                    self.controls.set(control, true);
                }
            }
            KeyEventKind::Release => {
                if let Some(control) = control_for(key_event.code) {
                    self.controls.set(control, false);
                }
            }
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match game_state {
            GameState::Idle => {
                if matches!(key_event.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.oneshot_actions.push(InputAction::Start);
                }
            }
            GameState::Over => {
                if matches!(
                    key_event.code,
                    KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter
                ) {
                    self.oneshot_actions.push(InputAction::Restart);
                }
            }
            GameState::Running => {
                if let Some(control) = control_for(key_event.code) {
                    self.controls.set(control, true);
                }
            }
        }
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// Session commands received since the last poll.
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Called after the frame has consumed the controls. Terminals without
    /// release events only ever send presses and repeats, so held flags are
    /// dropped here and refreshed by the next repeat.
    pub fn end_frame(&mut self) {
        if !self.reports_release {
            self.controls.release_all();
        }
    }

    /// Forget every held control, used when the session changes state.
    pub fn reset(&mut self) {
        self.controls.release_all();
    }
}

fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Control::Up),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Control::Down),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Control::Left),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Control::Right),
        KeyCode::Char(' ') => Some(Control::Fire),
        _ => None,
    }
}
