//! Text status panel.
//!
//! Renders the published status as a fixed set of short lines, sized for a
//! 128 px wide monochrome panel in the default 6 px font.  Lines are built
//! in `heapless` buffers so a refresh never allocates; each refresh is
//! written to the debug log.

use core::fmt::Write;

use heapless::String;
use log::debug;

use crate::app::events::StatusData;
use crate::app::ports::StatusDisplay;
use crate::error::DisplayError;

/// Characters per line.
pub const PANEL_COLS: usize = 21;
/// Lines per refresh.
pub const PANEL_ROWS: usize = 4;

pub type PanelLine = String<PANEL_COLS>;

/// Status panel adapter.
pub struct TextStatusPanel {
    ready: bool,
    lines: [PanelLine; PANEL_ROWS],
    refreshes: u32,
}

impl Default for TextStatusPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStatusPanel {
    pub fn new() -> Self {
        Self {
            ready: false,
            lines: Default::default(),
            refreshes: 0,
        }
    }

    /// Bring the panel up.  Must succeed before [`show_splash`](Self::show_splash)
    /// or any render.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.ready = true;
        debug!("Status panel ready ({}x{})", PANEL_COLS, PANEL_ROWS);
        Ok(())
    }

    /// Boot banner.  The caller holds it on screen for the configured
    /// splash duration.
    pub fn show_splash(&mut self) -> Result<(), DisplayError> {
        self.require_ready()?;
        self.lines = Default::default();
        set_line(&mut self.lines[0], format_args!("SENTINEL"))?;
        set_line(&mut self.lines[1], format_args!("Security system"))?;
        set_line(&mut self.lines[2], format_args!("v{}", env!("CARGO_PKG_VERSION")))?;
        self.flush();
        Ok(())
    }

    /// Lines shown by the last successful refresh.
    pub fn lines(&self) -> &[PanelLine; PANEL_ROWS] {
        &self.lines
    }

    pub fn refresh_count(&self) -> u32 {
        self.refreshes
    }

    fn require_ready(&self) -> Result<(), DisplayError> {
        if self.ready {
            Ok(())
        } else {
            Err(DisplayError::NotResponding)
        }
    }

    fn flush(&mut self) {
        self.refreshes = self.refreshes.wrapping_add(1);
        for line in self.lines.iter().filter(|l| !l.is_empty()) {
            debug!("PANEL | {}", line);
        }
    }
}

fn set_line(line: &mut PanelLine, args: core::fmt::Arguments<'_>) -> Result<(), DisplayError> {
    line.clear();
    line.write_fmt(args).map_err(|_| DisplayError::LineOverflow)
}

impl StatusDisplay for TextStatusPanel {
    fn render(&mut self, status: &StatusData) -> Result<(), DisplayError> {
        self.require_ready()?;

        let mut next: [PanelLine; PANEL_ROWS] = Default::default();
        set_line(
            &mut next[0],
            format_args!("Motion: {}", if status.motion_active { "YES" } else { "NO" }),
        )?;
        set_line(
            &mut next[1],
            format_args!("Door: {}", if status.door_open { "OPEN" } else { "CLOSED" }),
        )?;
        set_line(&mut next[2], format_args!("Light: {}", status.ambient_light_raw))?;
        if status.siren.sounding {
            set_line(&mut next[3], format_args!("ALARM {} Hz", status.siren.frequency_hz))?;
        }

        self.lines = next;
        self.flush();
        Ok(())
    }
}
