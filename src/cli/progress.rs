//! A progress bar for reading the input file.
//!
//! This implementation relies heavily on the `indicatif` crate, see <https://docs.rs/indicatif>

use std::io::Read;

use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

/// Wraps a reader and advances a progress bar by every byte read through it.
/// The bar clears itself once `total` bytes were read.
pub struct ProgressMonitor<R: Read> {
    /// The total amount that the reader will read
    pub total: usize,
    /// Amount read so far
    pub read: usize,
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressMonitor<R> {
    /// Create a new progress monitor drawing to stderr
    pub fn new(reader: R, size: usize) -> Self {
        // The default is 20hz, this reduces rendering overhead
        Self::with_draw_target(reader, size, ProgressDrawTarget::stderr_with_hz(8))
    }

    pub fn with_draw_target(reader: R, size: usize, target: ProgressDrawTarget) -> Self {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template(
            "{wide_bar} {binary_bytes}/{binary_total_bytes}  \n[est. {eta} remaining]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        let progress_bar = ProgressBar::with_draw_target(Some(size as u64), target).with_style(style);
        Self {
            reader,
            total: size,
            read: 0,
            progress_bar,
        }
    }

    fn update(&mut self, delta: u64) {
        self.progress_bar.inc(delta);
        if self.read >= self.total && !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
            let elapsed = self.progress_bar.elapsed();
            let secs = elapsed.as_secs_f64();
            let rate = if secs > 0.0 {
                (self.total as f64 / secs) as u64
            } else {
                self.total as u64
            };
            info!(
                "read {} in {} ({}/s avg)",
                HumanBytes(self.total as u64),
                HumanDuration(elapsed),
                HumanBytes(rate)
            );
        }
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.progress_bar.is_finished()
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        // Fall back on the internally stored reader, but filch the number of bytes read
        // along the way
        let out = self.reader.read(buf)?;
        self.read += out;
        self.update(out as u64);
        Ok(out)
    }
}
