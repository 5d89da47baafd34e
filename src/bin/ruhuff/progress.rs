//! Progress display for one run of the CLI.
//!
//! A single bar follows the job through its phases: a byte counter while the
//! input is read, a spinner while the codec runs, and a summary line with the
//! size change once the output is written.

use std::fmt;
use std::io::Read;
use std::time::Duration;

use indicatif::{
    HumanBytes, HumanDuration, ProgressBar, ProgressBarIter, ProgressDrawTarget, ProgressFinish,
    ProgressStyle,
};
use tracing::info;

const READ_TEMPLATE: &str = "{prefix:>13} {wide_bar} {binary_bytes}/{binary_total_bytes} [{eta}]";
const SPINNER_TEMPLATE: &str = "{prefix:>13} {spinner} {elapsed}";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Reading,
    Compressing,
    Decompressing,
    Writing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Reading => "reading",
            Phase::Compressing => "compressing",
            Phase::Decompressing => "decompressing",
            Phase::Writing => "writing",
        })
    }
}

pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    pub fn new() -> Self {
        // Dropped on an error path, the bar just disappears
        let bar = ProgressBar::no_length().with_finish(ProgressFinish::AndClear);
        bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
        Progress { bar }
    }

    /// Wrap `reader` so the bar counts the bytes pulled through it.
    pub fn read<R: Read>(&self, reader: R, size: u64) -> ProgressBarIter<R> {
        self.bar.set_style(style(READ_TEMPLATE));
        self.bar.set_length(size);
        self.bar.set_prefix(Phase::Reading.to_string());
        self.bar.wrap_read(reader)
    }

    /// Switch to a spinner for a phase without a byte count.
    pub fn enter(&self, phase: Phase) {
        self.bar.set_style(style(SPINNER_TEMPLATE));
        self.bar.set_prefix(phase.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(120));
    }

    /// Remove the bar without a summary.
    pub fn clear(self) {
        self.bar.finish_and_clear();
    }

    /// Remove the bar and log what the job did to the data.
    pub fn finish(self, done: &str, input_len: usize, output_len: usize) {
        self.bar.finish_and_clear();
        info!(
            "{done} {} -> {} ({}) in {}",
            HumanBytes(input_len as u64),
            HumanBytes(output_len as u64),
            size_ratio(input_len, output_len),
            HumanDuration(self.bar.elapsed()),
        );
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Output size as a percentage of the input size.
fn size_ratio(input_len: usize, output_len: usize) -> String {
    if input_len == 0 {
        return "empty input".to_string();
    }
    format!("{:.1}%", output_len as f64 / input_len as f64 * 100.0)
}
