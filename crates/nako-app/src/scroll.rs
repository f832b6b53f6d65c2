//! Scrollback log.
//!
//! [`ScrollBuffer`] holds every rendered line and a viewport over them. While
//! autoscroll is on the viewport follows the newest line; scrolling up turns
//! it off and scrolling back down to the bottom turns it on again.

/// One line. Used for arrow keys.
pub const SMALL_STEP: isize = 1;

/// Ten lines. Used for page keys.
pub const LARGE_STEP: isize = 10;

/// Viewport position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    /// Index of the topmost visible line.
    pub origin_offset: usize,
    /// Viewport follows newly appended lines.
    pub autoscroll: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self { origin_offset: 0, autoscroll: true }
    }
}

/// Append-only line log with a scrollable viewport.
#[derive(Debug, Clone, Default)]
pub struct ScrollBuffer {
    lines: Vec<String>,
    state: ScrollState,
    viewport_height: usize,
}

impl ScrollBuffer {
    /// Empty buffer showing `viewport_height` lines at a time.
    pub fn new(viewport_height: usize) -> Self {
        Self { lines: Vec::new(), state: ScrollState::default(), viewport_height }
    }

    /// Append a line. Follows it when autoscroll is on.
    pub fn append(&mut self, line: String) {
        self.lines.push(line);
        if self.state.autoscroll {
            self.state.origin_offset = self.bottom_origin();
        }
    }

    /// Move the viewport by `delta` lines; positive moves toward newer lines.
    pub fn scroll_by(&mut self, delta: isize) {
        let Some(target) = self.state.origin_offset.checked_add_signed(delta) else {
            return;
        };

        if self.lines.len() <= self.viewport_height {
            return;
        }

        if target + self.viewport_height >= self.lines.len() {
            self.state = ScrollState { origin_offset: self.bottom_origin(), autoscroll: true };
            return;
        }

        self.state = ScrollState { origin_offset: target, autoscroll: false };
    }

    /// Resize the viewport.
    ///
    /// A manual position that would now show the newest line re-enables
    /// autoscroll.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        let bottom = self.bottom_origin();
        if self.state.autoscroll || self.state.origin_offset >= bottom {
            self.state = ScrollState { origin_offset: bottom, autoscroll: true };
        }
    }

    /// Drop every line and return to the initial state.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.state = ScrollState::default();
    }

    /// Lines currently inside the viewport.
    pub fn visible(&self) -> &[String] {
        let start = self.state.origin_offset.min(self.lines.len());
        let end = start.saturating_add(self.viewport_height).min(self.lines.len());
        &self.lines[start..end]
    }

    /// All buffered lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Viewport position.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Lines shown at a time.
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Number of buffered lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// No lines buffered.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn bottom_origin(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_height)
    }
}
