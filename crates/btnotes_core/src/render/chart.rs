//! Complete-vs-pending doughnut chart.

use super::pad;
use crate::service::task_service::ProgressCounts;

pub const CHART_LABELS: [&str; 2] = ["Complete", "Pending"];
pub const CHART_COLORS: [&str; 2] = ["#66D887", "#EE7D35"];
const BAR_WIDTH: usize = 24;

/// Chart instance whose single dataset is replaced on every update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressChart {
    data: [usize; 2],
    updates: usize,
}

impl ProgressChart {
    pub fn new(counts: ProgressCounts) -> Self {
        Self {
            data: [counts.complete, counts.pending],
            updates: 0,
        }
    }

    /// Replaces the dataset values.
    pub fn update(&mut self, counts: ProgressCounts) {
        self.data = [counts.complete, counts.pending];
        self.updates += 1;
    }

    pub fn counts(&self) -> ProgressCounts {
        ProgressCounts {
            complete: self.data[0],
            pending: self.data[1],
        }
    }

    /// Dataset values in label order.
    pub fn data(&self) -> [usize; 2] {
        self.data
    }

    pub fn update_count(&self) -> usize {
        self.updates
    }

    /// Legend-style rendering: one proportional bar per label.
    pub fn render(&self) -> String {
        let total: usize = self.data.iter().sum();
        let mut out = String::new();
        for ((label, color), value) in CHART_LABELS.iter().zip(CHART_COLORS).zip(self.data) {
            let (filled, percent) = if total == 0 {
                (0, 0)
            } else {
                (value * BAR_WIDTH / total, value * 100 / total)
            };
            out.push_str(&format!(
                "{} {}{} {value} ({percent}%) {color}\n",
                pad(label, 8),
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled),
            ));
        }
        out
    }
}
