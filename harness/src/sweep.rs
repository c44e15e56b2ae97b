//! Sweep driver: enumerates trials and collects every parsed record.

use std::ops::RangeInclusive;

use membench_core::units::mib_to_bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::invoker::BenchmarkRunner;
use crate::parser::parse_output;
use crate::record::Record;
use crate::strategy::{strategy_label, MAX_STRATEGY_ID};

/// Parameters of a single benchmark invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialParams {
    pub strategy: u32,
    pub bytes: u64,
    pub advise: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Number of outer trials; each draws one allocation size.
    pub trials: u32,
    pub strategies: RangeInclusive<u32>,
    pub min_mib: u64,
    pub max_mib: u64,
    pub seed: u64,
}

impl SweepConfig {
    /// 100 trials over strategies 0..=39 with sizes of 20..4096 MiB, seed 42.
    pub fn reference() -> Self {
        Self {
            trials: 100,
            strategies: 0..=MAX_STRATEGY_ID,
            min_mib: 20,
            max_mib: 4096,
            seed: 42,
        }
    }

    /// Invocations per outer trial (every strategy, advise on and off).
    pub fn invocations_per_trial(&self) -> usize {
        self.strategies.clone().count() * 2
    }

    pub fn total_invocations(&self) -> usize {
        self.invocations_per_trial() * self.trials as usize
    }

    /// Invocations of one trial in execution order: for each strategy, advise
    /// on then advise off, both at the same byte count.
    pub fn trial_grid(&self, bytes: u64) -> impl Iterator<Item = TrialParams> {
        self.strategies.clone().flat_map(move |strategy| {
            [true, false].into_iter().map(move |advise| TrialParams {
                strategy,
                bytes,
                advise,
            })
        })
    }

    /// Largest byte count this config can draw, `None` if it overflows `u64`.
    pub fn max_bytes(&self) -> Option<u64> {
        mib_to_bytes(self.min_mib.max(self.max_mib))
    }

    /// Draw one allocation size in bytes, truncated to whole MiB.
    ///
    /// Saturates at `u64::MAX` for ranges that [`SweepConfig::max_bytes`]
    /// rejects; the harness refuses such configs at startup.
    pub fn draw_bytes(&self, rng: &mut StdRng) -> u64 {
        let mib = if self.min_mib >= self.max_mib {
            self.min_mib
        } else {
            rng.gen_range(self.min_mib as f64..self.max_mib as f64) as u64
        };
        mib_to_bytes(mib).unwrap_or(u64::MAX)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Every record of a sweep in invocation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepResults {
    pub records: Vec<Record>,
    pub invocations: usize,
}

impl SweepResults {
    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_error()).count()
    }
}

pub fn run_sweep(
    runner: &dyn BenchmarkRunner,
    config: &SweepConfig,
) -> std::io::Result<SweepResults> {
    run_sweep_with_progress(runner, config, |_, _| {})
}

/// Run the whole sweep sequentially, one benchmark process at a time.
///
/// `on_trial(done, total)` is called after each outer trial. The RNG is seeded
/// once, so equal configs against a deterministic runner give equal results.
pub fn run_sweep_with_progress<F>(
    runner: &dyn BenchmarkRunner,
    config: &SweepConfig,
    mut on_trial: F,
) -> std::io::Result<SweepResults>
where
    F: FnMut(u32, u32),
{
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut results = SweepResults {
        records: Vec::with_capacity(config.total_invocations()),
        invocations: 0,
    };

    on_trial(0, config.trials);
    for trial in 0..config.trials {
        let bytes = config.draw_bytes(&mut rng);
        log::debug!("trial {}/{}: {} bytes", trial + 1, config.trials, bytes);

        for params in config.trial_grid(bytes) {
            let output = runner.run(&params)?;
            let records = parse_output(&output);
            results.invocations += 1;

            log::debug!(
                "strategy {} ({}) advise={} -> {} record(s)",
                params.strategy,
                strategy_label(params.strategy),
                params.advise,
                records.len()
            );
            for record in &records {
                if let Record::Error(err) = record {
                    log::warn!(
                        "strategy {} with {} bytes failed: {}",
                        params.strategy,
                        params.bytes,
                        err.message
                    );
                }
            }

            results.records.extend(records);
        }

        on_trial(trial + 1, config.trials);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::RawOutput;
    use std::cell::RefCell;

    struct Recorder {
        calls: RefCell<Vec<TrialParams>>,
    }

    impl BenchmarkRunner for Recorder {
        fn run(&self, params: &TrialParams) -> std::io::Result<RawOutput> {
            self.calls.borrow_mut().push(*params);
            Ok(RawOutput::default())
        }
    }

    fn small_config() -> SweepConfig {
        SweepConfig {
            trials: 3,
            strategies: 0..=2,
            min_mib: 1,
            max_mib: 8,
            seed: 42,
        }
    }

    #[test]
    fn reference_config_matches_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.trials, 100);
        assert_eq!(config.strategies, 0..=39);
        assert_eq!(config.invocations_per_trial(), 80);
        assert_eq!(config.total_invocations(), 8000);
    }

    #[test]
    fn grid_alternates_advise_per_strategy() {
        let grid: Vec<_> = small_config().trial_grid(64).collect();
        let expected: Vec<_> = (0..=2)
            .flat_map(|s| {
                [
                    TrialParams { strategy: s, bytes: 64, advise: true },
                    TrialParams { strategy: s, bytes: 64, advise: false },
                ]
            })
            .collect();
        assert_eq!(grid, expected);
    }

    #[test]
    fn sizes_are_whole_mib_in_range() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(config.seed);
        for _ in 0..1000 {
            let bytes = config.draw_bytes(&mut rng);
            assert_eq!(bytes % (1 << 20), 0);
            assert!(bytes >= 1 << 20 && bytes < 8 << 20);
        }
    }

    #[test]
    fn degenerate_range_uses_min() {
        let config = SweepConfig { min_mib: 16, max_mib: 16, ..small_config() };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(config.draw_bytes(&mut rng), 16 << 20);
    }

    #[test]
    fn max_bytes_flags_overflowing_ranges() {
        assert_eq!(SweepConfig::reference().max_bytes(), Some(4096 << 20));
        let huge = SweepConfig { max_mib: u64::MAX / 2, ..small_config() };
        assert_eq!(huge.max_bytes(), None);
        let mut rng = StdRng::seed_from_u64(1);
        let pinned = SweepConfig { min_mib: u64::MAX, max_mib: u64::MAX, ..small_config() };
        assert_eq!(pinned.draw_bytes(&mut rng), u64::MAX);
    }

    #[test]
    fn one_size_per_trial_shared_by_all_invocations() {
        let runner = Recorder { calls: RefCell::new(Vec::new()) };
        let config = small_config();
        let results = run_sweep(&runner, &config).unwrap();
        assert_eq!(results.invocations, 18);
        assert!(results.records.is_empty());

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 18);
        for trial in calls.chunks(config.invocations_per_trial()) {
            assert!(trial.iter().all(|p| p.bytes == trial[0].bytes));
        }
    }

    #[test]
    fn progress_reports_every_trial() {
        let runner = Recorder { calls: RefCell::new(Vec::new()) };
        let mut seen = Vec::new();
        run_sweep_with_progress(&runner, &small_config(), |done, total| seen.push((done, total)))
            .unwrap();
        assert_eq!(seen, vec![(0, 3), (1, 3), (2, 3), (3, 3)]);
    }
}
