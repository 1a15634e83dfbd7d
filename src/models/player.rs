use serde::{Deserialize, Serialize};

/// Transport state of the watch page's embedded player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub playing: bool,
    pub muted: bool,
    pub fullscreen: bool,
    /// 0-100
    pub progress_percent: f64,
    pub duration_secs: f64,
    pub current_secs: f64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            playing: true,
            muted: false,
            fullscreen: false,
            progress_percent: 0.0,
            duration_secs: 0.0,
            current_secs: 0.0,
        }
    }
}

impl PlayerState {
    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Progress callback from the player: `played` is the fraction in 0..=1
    pub fn on_progress(&mut self, played: f64, played_secs: f64) {
        self.progress_percent = (played * 100.0).clamp(0.0, 100.0);
        self.current_secs = played_secs.max(0.0);
    }

    pub fn on_duration(&mut self, duration_secs: f64) {
        self.duration_secs = duration_secs.max(0.0);
    }

    /// Moves the scrubber and returns the absolute position to seek the player to
    pub fn seek(&mut self, percent: f64) -> f64 {
        let percent = percent.clamp(0.0, 100.0);
        self.progress_percent = percent;
        percent / 100.0 * self.duration_secs
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.current_secs)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.duration_secs)
    }
}

/// `h:mm:ss` when the value reaches an hour, `mm:ss` otherwise
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;

    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_playing() {
        let player = PlayerState::default();
        assert!(player.playing);
        assert!(!player.muted);
        assert!(!player.fullscreen);
    }

    #[test]
    fn test_toggles() {
        let mut player = PlayerState::default();
        player.toggle_play();
        player.toggle_mute();
        player.toggle_fullscreen();
        assert!(!player.playing);
        assert!(player.muted);
        assert!(player.fullscreen);
        player.toggle_play();
        assert!(player.playing);
    }

    #[test]
    fn test_seek_uses_duration() {
        let mut player = PlayerState::default();
        player.on_duration(200.0);
        assert_eq!(player.seek(25.0), 50.0);
        assert_eq!(player.progress_percent, 25.0);
        assert_eq!(player.seek(150.0), 200.0);
    }

    #[test]
    fn test_seek_before_duration_known() {
        let mut player = PlayerState::default();
        assert_eq!(player.seek(50.0), 0.0);
    }

    #[test]
    fn test_on_progress() {
        let mut player = PlayerState::default();
        player.on_progress(0.5, 61.9);
        assert_eq!(player.progress_percent, 50.0);
        assert_eq!(player.elapsed_label(), "01:01");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(3725.0), "1:02:05");
        assert_eq!(format_time(-3.0), "00:00");
    }
}
