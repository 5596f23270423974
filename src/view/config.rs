//! View configuration

use std::time::Duration;

/// Configuration for the view loop and grid layout
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Number of grid columns
    pub columns: usize,

    /// Thumbnail width for grid tiles, in pixels
    pub thumb_width: u32,

    /// Thumbnail height for grid tiles, in pixels
    pub thumb_height: u32,

    /// Render tick cadence
    pub tick_interval: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            thumb_width: 320,
            thumb_height: 240,
            tick_interval: Duration::from_millis(30),
        }
    }
}

impl ViewConfig {
    /// Set the grid column count (clamped to at least 1)
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Set the thumbnail size
    pub fn thumbnail_size(mut self, width: u32, height: u32) -> Self {
        self.thumb_width = width;
        self.thumb_height = height;
        self
    }

    /// Set the render tick cadence
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}
