use ndarray::{Array1, Array2};

use crate::errors::LeagueError;

/// Partition sorted 1-D values into `num_clusters` size-bounded clusters,
/// minimizing within-cluster variance.
///
/// For one-dimensional data the optimal variance-minimizing clusters are
/// contiguous runs of the sorted sequence, so the assignment reduces to
/// choosing cut points. Those are found by dynamic programming over prefix
/// sums, which makes the result exact and fully deterministic (ties between
/// equal-cost splits go to the earliest cut).
///
/// Returns one cluster label per value. Labels are assigned 0.. in input
/// order, so label boundaries mark where one cluster ends and the next begins.
pub fn cluster(
    values: &[f64],
    num_clusters: usize,
    min_size: usize,
    max_size: usize,
) -> Result<Vec<usize>, LeagueError> {
    let n = values.len();
    let k = num_clusters;
    // A cluster cannot be empty, whatever the lower bound says
    let lo = min_size.max(1);

    if k == 0 || k > n || k * lo > n || k * max_size < n || lo > max_size {
        return Err(LeagueError::constraint(format!(
            "cannot split {n} values into {k} clusters of {min_size}..={max_size}"
        )));
    }

    let (prefix_sum, prefix_sq) = build_prefix_sums(values);

    // best[[g, t]]: minimal cost of covering the first t values with g clusters
    let mut best = Array2::<f64>::from_elem((k + 1, n + 1), f64::INFINITY);
    let mut cut = Array2::<usize>::zeros((k + 1, n + 1));
    best[[0, 0]] = 0.0;

    for g in 1..=k {
        for end in 1..=n {
            if end < lo {
                continue;
            }
            let earliest = end.saturating_sub(max_size);
            let latest = end - lo;
            for start in earliest..=latest {
                if !best[[g - 1, start]].is_finite() {
                    continue;
                }
                let candidate =
                    best[[g - 1, start]] + segment_cost(&prefix_sum, &prefix_sq, start, end);
                if candidate < best[[g, end]] {
                    best[[g, end]] = candidate;
                    cut[[g, end]] = start;
                }
            }
        }
    }

    if !best[[k, n]].is_finite() {
        return Err(LeagueError::constraint(format!(
            "no contiguous split of {n} values into {k} clusters of {min_size}..={max_size}"
        )));
    }

    Ok(labels_from_cuts(&cut, k, n))
}

fn build_prefix_sums(values: &[f64]) -> (Array1<f64>, Array1<f64>) {
    let n = values.len();
    let mut prefix_sum = Array1::<f64>::zeros(n + 1);
    let mut prefix_sq = Array1::<f64>::zeros(n + 1);

    for (idx, &value) in values.iter().enumerate() {
        prefix_sum[idx + 1] = prefix_sum[idx] + value;
        prefix_sq[idx + 1] = prefix_sq[idx] + value * value;
    }

    (prefix_sum, prefix_sq)
}

/// Sum of squared deviations from the mean over values[start..end]
fn segment_cost(
    prefix_sum: &Array1<f64>,
    prefix_sq: &Array1<f64>,
    start: usize,
    end: usize,
) -> f64 {
    let len = (end - start) as f64;
    let sum = prefix_sum[end] - prefix_sum[start];
    let sq = prefix_sq[end] - prefix_sq[start];
    // Clamp tiny negative values from floating point cancellation
    (sq - sum * sum / len).max(0.0)
}

fn labels_from_cuts(cut: &Array2<usize>, k: usize, n: usize) -> Vec<usize> {
    let mut labels = vec![0usize; n];
    let mut end = n;
    for g in (1..=k).rev() {
        let start = cut[[g, end]];
        for label in labels.iter_mut().take(end).skip(start) {
            *label = g - 1;
        }
        end = start;
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_clearly_separated_values() {
        let values = [2100.0, 2050.0, 2000.0, 1200.0, 1150.0, 1100.0];
        let labels = cluster(&values, 2, 1, 6).unwrap();
        assert_eq!(labels, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn respects_size_bounds_over_variance() {
        // Unconstrained, the lone 1000 would sit in its own cluster;
        // a minimum size of 2 forces a neighbor in with it.
        let values = [2000.0, 1990.0, 1980.0, 1000.0];
        let labels = cluster(&values, 2, 2, 3).unwrap();
        assert_eq!(labels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn labels_are_contiguous_runs() {
        let values = [1900.0, 1700.0, 1650.0, 1500.0, 1480.0, 1470.0, 1200.0];
        let labels = cluster(&values, 3, 2, 3).unwrap();

        assert_eq!(labels.len(), values.len());
        for window in labels.windows(2) {
            assert!(window[1] == window[0] || window[1] == window[0] + 1);
        }
        for label in 0..3 {
            let size = labels.iter().filter(|&&l| l == label).count();
            assert!((2..=3).contains(&size), "cluster {label} has size {size}");
        }
    }

    #[test]
    fn identical_input_gives_identical_labels() {
        let values = [1800.0, 1750.0, 1600.0, 1600.0, 1400.0, 1380.0];
        let first = cluster(&values, 3, 1, 6).unwrap();
        let second = cluster(&values, 3, 1, 6).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn one_cluster_takes_everything() {
        let values = [1600.0, 1500.0, 1400.0];
        assert_eq!(cluster(&values, 1, 1, 3).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn singleton_clusters_when_count_matches() {
        let values = [1600.0, 1500.0, 1400.0];
        assert_eq!(cluster(&values, 3, 1, 1).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn unsatisfiable_bounds_are_rejected() {
        let values = [1600.0, 1500.0, 1400.0];
        assert!(matches!(
            cluster(&values, 2, 2, 4),
            Err(LeagueError::ConstraintUnsatisfiable { .. })
        ));
        assert!(matches!(
            cluster(&values, 2, 1, 1),
            Err(LeagueError::ConstraintUnsatisfiable { .. })
        ));
        assert!(matches!(
            cluster(&values, 4, 1, 4),
            Err(LeagueError::ConstraintUnsatisfiable { .. })
        ));
    }
}
