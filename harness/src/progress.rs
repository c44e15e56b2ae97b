//! In-place terminal progress bar for the outer trial loop.

use std::io::Write;

const FILL: char = '█';
const EMPTY: char = '-';

#[derive(Debug, Clone)]
pub struct ProgressBar {
    prefix: String,
    suffix: String,
    length: usize,
}

impl ProgressBar {
    pub fn new(prefix: &str, suffix: &str, length: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            length,
        }
    }

    /// `Progress |█████-----| 50.0% Complete`
    pub fn render(&self, done: u32, total: u32) -> String {
        let fraction = if total == 0 {
            1.0
        } else {
            f64::from(done.min(total)) / f64::from(total)
        };
        let filled = (self.length as f64 * fraction) as usize;
        let bar: String = std::iter::repeat(FILL)
            .take(filled)
            .chain(std::iter::repeat(EMPTY).take(self.length - filled))
            .collect();
        format!(
            "{} |{}| {:.1}% {}",
            self.prefix,
            bar,
            fraction * 100.0,
            self.suffix
        )
    }

    /// Redraw on the current stderr line; moves to a new line once complete.
    pub fn update(&self, done: u32, total: u32) {
        let mut err = std::io::stderr().lock();
        let _ = write!(err, "\r{}", self.render(done, total));
        if done >= total {
            let _ = writeln!(err);
        }
        let _ = err.flush();
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new("Progress", "Complete", 50)
    }
}
