/// Session lifecycle. `Idle` only exists before the first start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Running,
    Over,
}

impl GameState {
    pub fn is_running(&self) -> bool {
        *self == GameState::Running
    }
}
