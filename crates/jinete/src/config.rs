//! Runtime configuration of a [`Ui`](crate::Ui).

use std::time::Duration;

use jinete_core::Size;

use crate::draw::{FontMetrics, Theme};

/// Configuration for creating a [`Ui`](crate::Ui).
///
/// # Example
///
/// ```
/// use jinete::UiConfig;
///
/// let config = UiConfig::new()
///     .with_screen_size(320, 200)
///     .with_double_click_ticks(250)
///     .with_widget_limit(1024)
///     .with_idle_messages(false);
/// assert_eq!(config.double_click_ticks(), 250);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Screen size; the root manager covers it.
    screen_size: Size,
    /// Maximum ticks between two clicks of a double click.
    double_click_ticks: u64,
    /// Maximum number of live widgets.
    widget_limit: Option<usize>,
    /// Whether idle messages are generated when no input arrives.
    idle_messages: bool,
    /// How long `run` sleeps when a pump produced nothing.
    idle_sleep: Duration,
    /// Ticks the mouse must rest on a widget before its tooltip opens.
    tooltip_delay_ticks: u64,
    /// How often background job monitors poll their reporter.
    job_poll_ticks: u64,
    font: FontMetrics,
    theme: Theme,
}

impl UiConfig {
    /// Default double-click window in ticks.
    pub const DEFAULT_DOUBLE_CLICK_TICKS: u64 = 400;

    /// Create a configuration for a 640x480 screen.
    pub fn new() -> Self {
        Self {
            screen_size: Size::new(640, 480),
            double_click_ticks: Self::DEFAULT_DOUBLE_CLICK_TICKS,
            widget_limit: None,
            idle_messages: true,
            idle_sleep: Duration::from_millis(1),
            tooltip_delay_ticks: 300,
            job_poll_ticks: 50,
            font: FontMetrics::default(),
            theme: Theme::default(),
        }
    }

    /// Set the screen size.
    pub fn with_screen_size(mut self, width: i32, height: i32) -> Self {
        self.screen_size = Size::new(width, height);
        self
    }

    /// Set the double-click window.
    pub fn with_double_click_ticks(mut self, ticks: u64) -> Self {
        self.double_click_ticks = ticks;
        self
    }

    /// Cap the number of live widgets.
    pub fn with_widget_limit(mut self, limit: usize) -> Self {
        self.widget_limit = Some(limit);
        self
    }

    /// Enable or disable idle messages.
    pub fn with_idle_messages(mut self, enabled: bool) -> Self {
        self.idle_messages = enabled;
        self
    }

    /// Set how long `run` sleeps between empty pumps.
    pub fn with_idle_sleep(mut self, sleep: Duration) -> Self {
        self.idle_sleep = sleep;
        self
    }

    /// Set the tooltip delay.
    pub fn with_tooltip_delay_ticks(mut self, ticks: u64) -> Self {
        self.tooltip_delay_ticks = ticks;
        self
    }

    /// Set the job monitor polling interval.
    pub fn with_job_poll_ticks(mut self, ticks: u64) -> Self {
        self.job_poll_ticks = ticks;
        self
    }

    /// Set the font metrics used to measure text.
    pub fn with_font(mut self, font: FontMetrics) -> Self {
        self.font = font;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    pub fn double_click_ticks(&self) -> u64 {
        self.double_click_ticks
    }

    pub fn widget_limit(&self) -> Option<usize> {
        self.widget_limit
    }

    pub fn idle_messages(&self) -> bool {
        self.idle_messages
    }

    pub fn idle_sleep(&self) -> Duration {
        self.idle_sleep
    }

    pub fn tooltip_delay_ticks(&self) -> u64 {
        self.tooltip_delay_ticks
    }

    pub fn job_poll_ticks(&self) -> u64 {
        self.job_poll_ticks
    }

    pub fn font(&self) -> &FontMetrics {
        &self.font
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::new()
    }
}
