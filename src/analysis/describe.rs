use serde::Serialize;
use std::fmt;

/// Descriptive statistics of a numeric sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); NaN for a single value.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Linear interpolation between closest ranks on an already sorted slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        }
    }
}

/// Summarise `values`; `None` when empty.
pub fn describe(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Some(Summary {
        count: n,
        mean,
        std,
        min: sorted[0],
        q25: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q75: quantile_sorted(&sorted, 0.75),
        max: sorted[n - 1],
    })
}

impl Summary {
    /// Copy with every statistic rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Summary {
        // half away from zero; exact .xx5 ties can differ from half-to-even
        let scale = 10f64.powi(decimals);
        let r = |v: f64| (v * scale).round() / scale;
        Summary {
            count: self.count,
            mean: r(self.mean),
            std: r(self.std),
            min: r(self.min),
            q25: r(self.q25),
            median: r(self.median),
            q75: r(self.q75),
            max: r(self.max),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ];
        for (label, value) in rows {
            writeln!(f, "{: <6} {:>14.2}", label, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn describes_small_sample() {
        let s = describe(&[4.0, 1.0, 3.0, 2.0]).expect("non-empty");
        assert_eq!(s.count, 4);
        assert!(close(s.mean, 2.5));
        // sample variance = 5/3
        assert!(close(s.std, (5.0f64 / 3.0).sqrt()));
        assert_eq!(s.min, 1.0);
        assert!(close(s.q25, 1.75));
        assert!(close(s.median, 2.5));
        assert!(close(s.q75, 3.25));
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn single_value_has_nan_std() {
        let s = describe(&[7.0]).expect("non-empty");
        assert_eq!(s.count, 1);
        assert!(s.std.is_nan());
        assert_eq!(s.q25, 7.0);
        assert_eq!(s.q75, 7.0);
    }

    #[test]
    fn empty_sample_has_no_summary() {
        assert!(describe(&[]).is_none());
    }

    #[test]
    fn rounding_takes_ties_away_from_zero() {
        let s = describe(&[0.125]).expect("non-empty").rounded(2);
        assert_eq!(s.mean, 0.13);
        assert_eq!(s.max, 0.13);
    }

    #[test]
    fn rounding_and_display() {
        let s = describe(&[1.0, 2.0, 2.0]).expect("non-empty").rounded(2);
        assert_eq!(s.mean, 1.67);
        let text = s.to_string();
        assert!(text.starts_with("count            3.00\n"), "got: {text}");
        assert!(text.contains("mean             1.67"));
        assert_eq!(text.lines().count(), 8);
    }
}
