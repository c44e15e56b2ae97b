/// Descriptive statistics of one group of samples.
///
/// NaN samples (0/0 throughput of error rows) are left out of mean, median and
/// std but still counted in `count`. `std` is the sample standard deviation
/// (n - 1 denominator); it is NaN for fewer than two usable samples, as is
/// every statistic when no usable sample remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

impl Summary {
    pub fn from_samples(data: &[f64]) -> Self {
        let usable: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();
        Summary {
            count: data.len(),
            mean: mean(&usable).unwrap_or(f64::NAN),
            median: median(&usable).unwrap_or(f64::NAN),
            std: sample_std_deviation(&usable).unwrap_or(f64::NAN),
        }
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Middle value, averaging the two middle values for even lengths.
/// Expects NaN-free input; see [`Summary::from_samples`].
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

pub fn sample_std_deviation(data: &[f64]) -> Option<f64> {
    match (mean(data), data.len()) {
        (Some(data_mean), count) if count > 1 => {
            let variance = data
                .iter()
                .map(|value| {
                    let diff = data_mean - (*value);

                    diff * diff
                })
                .sum::<f64>()
                / (count - 1) as f64;

            Some(variance.sqrt())
        }
        _ => None,
    }
}
