//! Ordinary least squares with an intercept, solved through the normal equations
//! on standardized feature columns.

/// Pivots smaller than this (relative to the largest matrix entry) are treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LeastSquares {
    means: Vec<f64>,
    /// Standard deviation per feature; zero for a constant feature, which is then ignored.
    scales: Vec<f64>,
    intercept: f64,
    coefficients: Vec<f64>,
    r_squared: f64,
    samples: usize,
}

impl LeastSquares {
    /// Fits `targets ~ intercept + features`. Every row of `features` must have the
    /// same width. Collinear or constant features get a zero coefficient.
    pub(crate) fn fit(features: &[Vec<f64>], targets: &[f64]) -> Self {
        let samples = features.len().min(targets.len());
        let width = features.first().map_or(0, Vec::len);
        let (means, scales) = column_moments(&features[..samples], width);

        let design: Vec<Vec<f64>> = features[..samples]
            .iter()
            .map(|row| {
                std::iter::once(1.0)
                    .chain(standardize(row, &means, &scales))
                    .collect()
            })
            .collect();

        let mut normal = vec![vec![0.0; width + 1]; width + 1];
        let mut moment = vec![0.0; width + 1];
        for (row, &y) in design.iter().zip(targets) {
            for i in 0..=width {
                moment[i] += row[i] * y;
                for j in 0..=width {
                    normal[i][j] += row[i] * row[j];
                }
            }
        }

        let solution = solve(normal, moment);
        let mut fit = Self {
            means,
            scales,
            intercept: solution.first().copied().unwrap_or(0.0),
            coefficients: solution.into_iter().skip(1).collect(),
            r_squared: 0.0,
            samples,
        };
        fit.r_squared = fit.score(&features[..samples], &targets[..samples]);
        fit
    }

    pub(crate) fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + standardize(features, &self.means, &self.scales)
                .zip(&self.coefficients)
                .map(|(z, c)| z * c)
                .sum::<f64>()
    }

    /// Coefficient of determination on the training data.
    pub(crate) fn r_squared(&self) -> f64 {
        self.r_squared
    }

    pub(crate) fn samples(&self) -> usize {
        self.samples
    }

    fn score(&self, features: &[Vec<f64>], targets: &[f64]) -> f64 {
        if targets.is_empty() {
            return 0.0;
        }
        let mean = targets.iter().sum::<f64>() / targets.len() as f64;
        let total: f64 = targets.iter().map(|y| (y - mean).powi(2)).sum();
        let residual: f64 = features
            .iter()
            .zip(targets)
            .map(|(row, y)| (y - self.predict(row)).powi(2))
            .sum();

        let tolerance = f64::EPSILON * targets.len() as f64 * mean.abs().max(1.0);
        if total <= tolerance {
            if residual <= tolerance {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - residual / total
        }
    }
}

fn column_moments(features: &[Vec<f64>], width: usize) -> (Vec<f64>, Vec<f64>) {
    if features.is_empty() {
        return (vec![0.0; width], vec![0.0; width]);
    }
    let n = features.len() as f64;
    let means: Vec<f64> = (0..width)
        .map(|j| features.iter().map(|row| row[j]).sum::<f64>() / n)
        .collect();
    let scales = (0..width)
        .map(|j| {
            let variance = features
                .iter()
                .map(|row| (row[j] - means[j]).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();
            if std <= f64::EPSILON * means[j].abs().max(1.0) {
                0.0
            } else {
                std
            }
        })
        .collect();
    (means, scales)
}

fn standardize<'a>(
    row: &'a [f64],
    means: &'a [f64],
    scales: &'a [f64],
) -> impl Iterator<Item = f64> + 'a {
    row.iter()
        .zip(means.iter().zip(scales))
        .map(|(x, (mean, scale))| {
            if *scale == 0.0 {
                0.0
            } else {
                (x - mean) / scale
            }
        })
}

/// Solves `a * x = b` by Gaussian elimination with partial pivoting. Columns without
/// a usable pivot are free and set to zero, which yields one exact least-squares
/// solution when `a` is a singular normal matrix.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Vec<f64> {
    let n = b.len();
    let largest = a
        .iter()
        .flatten()
        .fold(0.0_f64, |m, v| m.max(v.abs()))
        .max(1.0);
    let tolerance = largest * PIVOT_TOLERANCE;

    let mut pivots = Vec::with_capacity(n);
    let mut row = 0;
    for col in 0..n {
        if row == n {
            break;
        }
        let Some(best) = (row..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
        else {
            break;
        };
        if a[best][col].abs() <= tolerance {
            continue;
        }
        a.swap(row, best);
        b.swap(row, best);

        let pivot_row = a[row].clone();
        let pivot_b = b[row];
        for i in (row + 1)..n {
            let factor = a[i][col] / pivot_row[col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[i][k] -= factor * pivot_row[k];
            }
            b[i] -= factor * pivot_b;
        }
        pivots.push((row, col));
        row += 1;
    }

    let mut x = vec![0.0; n];
    for &(r, c) in pivots.iter().rev() {
        let tail: f64 = ((c + 1)..n).map(|k| a[r][k] * x[k]).sum();
        x[c] = (b[r] - tail) / a[r][c];
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_recovers_exact_line() {
        let features: Vec<Vec<f64>> = (0..10).map(|x| vec![x as f64]).collect();
        let targets: Vec<f64> = (0..10).map(|x| 3.0 + 2.0 * x as f64).collect();

        let fit = LeastSquares::fit(&features, &targets);
        assert!((fit.predict(&[20.0]) - 43.0).abs() < TOLERANCE);
        assert!((fit.r_squared() - 1.0).abs() < TOLERANCE);
        assert_eq!(fit.samples(), 10);
    }

    #[test]
    fn test_recovers_exact_quadratic() {
        let features: Vec<Vec<f64>> = (0..15)
            .map(|x| vec![x as f64, (x * x) as f64])
            .collect();
        let targets: Vec<f64> = (0..15)
            .map(|x| 1.0 - 0.5 * x as f64 + 0.25 * (x * x) as f64)
            .collect();

        let fit = LeastSquares::fit(&features, &targets);
        let expected = 1.0 - 0.5 * 30.0 + 0.25 * 900.0;
        assert!((fit.predict(&[30.0, 900.0]) - expected).abs() < 1e-7);
    }

    #[test]
    fn test_constant_feature_gets_zero_weight() {
        let features: Vec<Vec<f64>> = (0..12).map(|x| vec![2020.0, x as f64]).collect();
        let targets: Vec<f64> = (0..12).map(|x| 10.0 + x as f64).collect();

        let fit = LeastSquares::fit(&features, &targets);
        assert!((fit.predict(&[2020.0, 12.0]) - 22.0).abs() < TOLERANCE);
        // The constant column carries no information, whatever value it takes later.
        assert!((fit.predict(&[2050.0, 12.0]) - 22.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_r_squared_of_noisy_fit_is_below_one() {
        let features: Vec<Vec<f64>> = (0..8).map(|x| vec![x as f64]).collect();
        let targets = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 8.0, 7.0];

        let fit = LeastSquares::fit(&features, &targets);
        assert!(fit.r_squared() > 0.0 && fit.r_squared() < 1.0);
    }

    #[test]
    fn test_constant_target() {
        let features: Vec<Vec<f64>> = (0..5).map(|x| vec![x as f64]).collect();
        let targets = vec![4.0; 5];

        let fit = LeastSquares::fit(&features, &targets);
        assert!((fit.predict(&[100.0]) - 4.0).abs() < TOLERANCE);
        assert_eq!(fit.r_squared(), 1.0);
    }
}
