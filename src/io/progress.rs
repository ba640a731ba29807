//! Per-stage progress bars for a mosaic run

use crate::io::configuration::{PROGRESS_CHARS, STAGE_TEMPLATE};
use crate::mosaic::pipeline::{Stage, StageObserver};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(STAGE_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(PROGRESS_CHARS)
});

/// Coordinates progress display across pipeline stages
///
/// Each stage gets its own bar, stacked in the order the stages run. Finished
/// bars stay visible until [`ProgressManager::finish`] clears the display.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    stage_bars: Vec<(Stage, ProgressBar)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            stage_bars: Vec::new(),
        }
    }

    /// Stages started so far, in order
    pub fn stages(&self) -> Vec<Stage> {
        self.stage_bars.iter().map(|(stage, _)| *stage).collect()
    }

    /// Position and length of the bar for `stage`
    pub fn stage_position(&self, stage: Stage) -> Option<(u64, u64)> {
        self.stage_bars
            .iter()
            .rev()
            .find(|(started, _)| *started == stage)
            .map(|(_, bar)| (bar.position(), bar.length().unwrap_or(0)))
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }

    fn current_bar(&self) -> Option<&ProgressBar> {
        self.stage_bars.last().map(|(_, bar)| bar)
    }
}

impl StageObserver for ProgressManager {
    fn stage_started(&mut self, stage: Stage, total: usize) {
        let bar = self.multi_progress.add(ProgressBar::new(total as u64));
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(stage.label());
        self.stage_bars.push((stage, bar));
    }

    fn item_completed(&mut self) {
        if let Some(bar) = self.current_bar() {
            bar.inc(1);
        }
    }

    fn stage_finished(&mut self) {
        if let Some(bar) = self.current_bar() {
            bar.finish_with_message("✓");
        }
    }
}
