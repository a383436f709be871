//! Per-session state machine for image acquisition, analysis, and follow-up.
//!
//! One [`Session`] lives for one continuous user interaction. It tracks which
//! image source is selected, whether analysis has already run for a bundled
//! example (the duplicate-call guard), and the most recent extracted ingredient
//! text. It never performs I/O itself; the orchestrator drives it.

use tracing::debug;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    SourceSelected,
    Analyzing,
    Analyzed,
}

/// The kind of image source the user selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A bundled example, identified by its catalog name.
    Example(String),
    /// A file uploaded by the user.
    Upload,
    /// A photo captured from the camera.
    Capture,
}

/// State for one user session. Created on first interaction, dropped when the
/// hosting driver ends; never persisted.
#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
    selected: Option<SourceKind>,
    analyze_triggered: bool,
    extracted_ingredients: Option<String>,
    camera_visible: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            selected: None,
            analyze_triggered: false,
            extracted_ingredients: None,
            camera_visible: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn selected_source(&self) -> Option<&SourceKind> {
        self.selected.as_ref()
    }

    /// Ingredient text from the most recent successful analysis.
    pub fn extracted_ingredients(&self) -> Option<&str> {
        self.extracted_ingredients.as_deref()
    }

    pub fn camera_visible(&self) -> bool {
        self.camera_visible
    }

    /// Record a source selection.
    ///
    /// Re-selecting the identical bundled example keeps the duplicate-analysis
    /// guard; any other selection resets it, so switching examples always allows
    /// a fresh analysis.
    pub fn select_source(&mut self, source: SourceKind) {
        let same_example = matches!(
            (&self.selected, &source),
            (Some(SourceKind::Example(prev)), SourceKind::Example(next)) if prev == next
        );

        if !same_example {
            self.analyze_triggered = false;
        }

        debug!(?source, same_example, "Source selected");

        self.selected = Some(source);
        self.phase = SessionPhase::SourceSelected;
    }

    /// Attempt to start analysis. Returns `false` when the transition is
    /// suppressed: nothing selected, analysis already in flight, or a bundled
    /// example that was already analyzed (repeated renders must not re-invoke
    /// the agent). Upload and capture sources always proceed, since each click
    /// is a deliberate user action.
    pub fn begin_analysis(&mut self) -> bool {
        if !matches!(self.phase, SessionPhase::SourceSelected | SessionPhase::Analyzed) {
            return false;
        }

        let Some(selected) = &self.selected else {
            return false;
        };

        if matches!(selected, SourceKind::Example(_)) && self.analyze_triggered {
            debug!("Analysis suppressed: example already analyzed");
            return false;
        }

        self.phase = SessionPhase::Analyzing;
        true
    }

    /// Record a successful analysis. The previous result, if any, is overwritten;
    /// at most one result is retained.
    pub fn complete_analysis(&mut self, ingredients: impl Into<String>) {
        self.extracted_ingredients = Some(ingredients.into());
        self.analyze_triggered = true;
        self.phase = SessionPhase::Analyzed;
    }

    /// Record a failed analysis. The guard and any previously extracted
    /// ingredients are left unchanged, so the user can retry.
    pub fn fail_analysis(&mut self) {
        self.phase = SessionPhase::SourceSelected;
    }

    /// Reveal the camera widget (click-to-reveal flow).
    pub fn show_camera(&mut self) {
        self.camera_visible = true;
    }

    /// Hide the camera widget again.
    pub fn hide_camera(&mut self) {
        self.camera_visible = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
