//! Passport panel layer
//!
//! The viewer core produces backend-agnostic [`PanelView`] models; a front-end
//! implements [`PanelSink`] and [`TitleSink`] to show them.

pub mod panel;

pub use panel::{build_panels, PanelView, ScoreBar, DIMENSIONS_LABEL};

/// Backend that displays passport panels
pub trait PanelSink {
    /// Show the full list of panels, replacing anything shown before
    fn render_panels(&mut self, panels: &[PanelView]) -> Result<(), Box<dyn std::error::Error>>;
}

/// Backend that displays the model title
pub trait TitleSink {
    /// Show the model name
    fn set_title(&mut self, title: &str);
}
