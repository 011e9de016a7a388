/// Coarse phase of a session, derived from the two lifecycle flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Over,
}

/// Owns the `playing` and `paused` flags; transitions are the only way to change them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameManager {
    playing: bool,
    paused: bool,
    finished: bool,
}

impl GameManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the running state. Also clears `paused` so a restart is never born paused.
    pub fn start(&mut self) {
        self.playing = true;
        self.paused = false;
        self.finished = false;
    }

    /// Toggle the pause flag; repeated calls alternate
    pub fn pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Stop playing. `paused` is left as it was.
    pub fn game_over(&mut self) {
        self.playing = false;
        self.finished = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a tick should have any effect
    pub fn is_active(&self) -> bool {
        self.playing && !self.paused
    }

    pub fn status(&self) -> GameStatus {
        match (self.playing, self.paused, self.finished) {
            (true, false, _) => GameStatus::Running,
            (true, true, _) => GameStatus::Paused,
            (false, _, true) => GameStatus::Over,
            (false, _, false) => GameStatus::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let manager = GameManager::new();
        assert_eq!(manager.status(), GameStatus::Idle);
        assert!(!manager.is_active());
    }

    #[test]
    fn test_pause_toggles() {
        let mut manager = GameManager::new();
        manager.start();
        assert_eq!(manager.status(), GameStatus::Running);

        manager.pause();
        assert_eq!(manager.status(), GameStatus::Paused);
        assert!(!manager.is_active());

        manager.pause();
        assert_eq!(manager.status(), GameStatus::Running);
        assert!(manager.is_active());
    }

    #[test]
    fn test_game_over_keeps_pause_flag() {
        let mut manager = GameManager::new();
        manager.start();
        manager.pause();
        manager.game_over();
        assert_eq!(manager.status(), GameStatus::Over);
        assert!(manager.is_paused());
        assert!(!manager.is_playing());
    }

    #[test]
    fn test_restart_clears_pause() {
        let mut manager = GameManager::new();
        manager.start();
        manager.pause();
        manager.game_over();

        manager.start();
        assert!(!manager.is_paused());
        assert_eq!(manager.status(), GameStatus::Running);
    }
}
