//! Hand-off of the selected video to the system media player

use super::ViewerMode;

/// Remembers which video selection was already handed to the player, so
/// autoplay fires once when a video is selected rather than on every frame.
#[derive(Debug, Default)]
pub struct PlayerHandoff {
    launched: Option<String>,
}

impl PlayerHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Url to launch this frame, if `mode` shows an autoplaying video that has
    /// not been launched for the current selection. Closing the viewer or
    /// moving to a photo resets the hand-off.
    pub fn sync<'a>(&mut self, mode: &ViewerMode<'a>) -> Option<&'a str> {
        match mode {
            ViewerMode::Video {
                url,
                autoplay: true,
                ..
            } => {
                if self.launched.as_deref() == Some(*url) {
                    None
                } else {
                    self.launched = Some(url.to_string());
                    Some(*url)
                }
            }
            ViewerMode::Video { autoplay: false, .. } => None,
            ViewerMode::Photo { .. } | ViewerMode::Closed => {
                self.launched = None;
                None
            }
        }
    }

    /// Url most recently handed to the player for the open selection
    pub fn launched(&self) -> Option<&str> {
        self.launched.as_deref()
    }
}
