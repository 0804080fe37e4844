//! Non-dominated sorting, crowding distance and environmental selection.
//!
//! The sorting core is written against an arbitrary pairwise comparator so
//! the same O(n²) peeling serves both rankings used by the engine:
//!
//! - [`fitness_sort`]: scalar fitness, strictly greater fitness dominates.
//!   Fronts are fitness-equivalence classes in descending order.
//! - [`non_dominated_sort`]: Pareto dominance over minimized objective
//!   vectors.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the rank of the solution at the
/// same index. Rank 0 is the first (best) front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// Rank for each solution (0 = first front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Fast non-dominated sorting with a caller-supplied comparator.
///
/// `compare(i, j)` is called once for every pair `i < j`.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair, record who dominates whom and count, per solution,
///    how many solutions dominate it
/// 2. Solutions dominated by no other form front 0
/// 3. Peel fronts by decrementing the counts of solutions dominated by the
///    current front
///
/// # Complexity
///
/// O(n²) comparator calls.
pub fn non_dominated_sort_by<F>(n: usize, mut compare: F) -> NondominatedSortResult
where
    F: FnMut(usize, usize) -> Dominance,
{
    if n == 0 {
        return NondominatedSortResult {
            ranks: Vec::new(),
            fronts: Vec::new(),
        };
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];
    let mut front_0 = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            match compare(i, j) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }

        // every pair involving i has been seen by now
        if domination_count[i] == 0 {
            front_0.push(i);
        }
    }

    let mut fronts = vec![front_0];
    loop {
        let mut next_front = Vec::new();
        if let Some(current) = fronts.last() {
            for &i in current {
                for &j in &dominated_by[i] {
                    domination_count[j] -= 1;
                    if domination_count[j] == 0 {
                        ranks[j] = fronts.len();
                        next_front.push(j);
                    }
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

/// Ranks solutions by scalar fitness (maximized).
///
/// Strictly greater fitness dominates; equal fitness is mutually
/// non-dominated. With pairwise distinct values the result is `n`
/// singleton fronts in descending fitness order.
///
/// # Example
///
/// ```
/// use u_timetable::ga::multi_objective::fitness_sort;
///
/// let result = fitness_sort(&[0.2, 0.9, 0.5, 0.9]);
/// assert_eq!(result.fronts, vec![vec![1, 3], vec![2], vec![0]]);
/// ```
pub fn fitness_sort(fitness: &[f64]) -> NondominatedSortResult {
    non_dominated_sort_by(fitness.len(), |i, j| {
        if fitness[i] > fitness[j] {
            Dominance::Left
        } else if fitness[j] > fitness[i] {
            Dominance::Right
        } else {
            Dominance::Neither
        }
    })
}

/// Pareto non-dominated sorting. All objectives are **minimized**.
///
/// # Complexity
///
/// O(m · n²) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_timetable::ga::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // A
///     vec![3.0, 3.0],  // B
///     vec![5.0, 1.0],  // C
///     vec![4.0, 4.0],  // D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    debug_assert!(
        objectives.windows(2).all(|w| w[0].len() == w[1].len()),
        "all objective vectors must have the same length"
    );
    non_dominated_sort_by(objectives.len(), |i, j| {
        pareto_dominance(&objectives[i], &objectives[j])
    })
}

/// Compares two objective vectors for Pareto dominance (minimization).
pub fn pareto_dominance(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Crowding distance assignment for diversity preservation.
///
/// Boundary solutions (min/max for any objective) receive `f64::INFINITY`;
/// interior solutions accumulate the normalized gap between their sorted
/// neighbours. Objectives with zero range contribute nothing.
///
/// # Complexity
///
/// O(m · n · log n)
///
/// # Example
///
/// ```
/// use u_timetable::ga::multi_objective::crowding_distance;
///
/// let distances = crowding_distance(&[vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]]);
/// assert!(distances[0].is_infinite());
/// assert!(distances[1].is_finite());
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];

    #[allow(clippy::needless_range_loop)] // obj_idx is a column index into 2D data
    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            objectives[a][obj_idx]
                .partial_cmp(&objectives[b][obj_idx])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = objectives[indices[0]][obj_idx];
        let max_val = objectives[indices[n - 1]][obj_idx];
        let range = max_val - min_val;

        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// Picks `keep` members of `front` by descending crowding distance.
///
/// `objectives` is indexed by solution, `front` lists solution indices.
/// Ties keep front order, so the extreme members (infinite distance) are
/// always retained first.
pub fn truncate_by_crowding(front: &[usize], objectives: &[Vec<f64>], keep: usize) -> Vec<usize> {
    let front_objs: Vec<Vec<f64>> = front.iter().map(|&i| objectives[i].clone()).collect();
    let distances = crowding_distance(&front_objs);

    let mut order: Vec<usize> = (0..front.len()).collect();
    order.sort_by(|&a, &b| {
        distances[b]
            .partial_cmp(&distances[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    order.into_iter().take(keep).map(|k| front[k]).collect()
}

/// Picks `keep` members of `front` by descending nearest-neighbour distance.
///
/// `distance(i, j)` measures how far apart solutions `i` and `j` are (for
/// example the number of differing genes). A member's score is its
/// distance to the closest other member, so duplicates score 0 and are
/// dropped first. Ties keep front order.
///
/// Used when objective values cannot spread a front apart, e.g. when all
/// members share the same fitness.
///
/// # Complexity
///
/// O(f²) distance calls, f = front size
pub fn truncate_by_distance<F>(front: &[usize], keep: usize, mut distance: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> usize,
{
    if front.len() <= keep {
        return front.to_vec();
    }

    let mut nearest = vec![usize::MAX; front.len()];
    for a in 0..front.len() {
        for b in (a + 1)..front.len() {
            let d = distance(front[a], front[b]);
            nearest[a] = nearest[a].min(d);
            nearest[b] = nearest[b].min(d);
        }
    }

    let mut order: Vec<usize> = (0..front.len()).collect();
    order.sort_by(|&a, &b| nearest[b].cmp(&nearest[a]));
    order.into_iter().take(keep).map(|k| front[k]).collect()
}

/// NSGA-II environmental selection.
///
/// Takes whole fronts while they fit into `target`; the first front that
/// would overflow is truncated by crowding distance. Returns selected
/// indices, best front first.
pub fn environmental_selection(
    sorted: &NondominatedSortResult,
    objectives: &[Vec<f64>],
    target: usize,
) -> Vec<usize> {
    environmental_selection_by(sorted, target, |front, keep| {
        truncate_by_crowding(front, objectives, keep)
    })
}

/// Environmental selection with a caller-supplied truncation of the
/// overflowing front.
///
/// `truncate(front, keep)` must return `keep` members of `front`.
pub fn environmental_selection_by<F>(
    sorted: &NondominatedSortResult,
    target: usize,
    mut truncate: F,
) -> Vec<usize>
where
    F: FnMut(&[usize], usize) -> Vec<usize>,
{
    let mut selected = Vec::with_capacity(target);
    for front in &sorted.fronts {
        let room = target - selected.len();
        if room == 0 {
            break;
        }
        if front.len() <= room {
            selected.extend_from_slice(front);
        } else {
            selected.extend(truncate(front, room));
            break;
        }
    }
    selected
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ---- Non-dominated sort ----

    #[test]
    fn test_empty() {
        let result = fitness_sort(&[]);
        assert!(result.ranks.is_empty());
        assert!(result.fronts.is_empty());
    }

    #[test]
    fn test_single_solution() {
        let objs = vec![vec![1.0, 2.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0]);
        assert_eq!(result.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_two_non_dominated() {
        let objs = vec![vec![1.0, 3.0], vec![3.0, 1.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 0]);
        assert_eq!(result.fronts.len(), 1);
    }

    #[test]
    fn test_mixed_fronts() {
        let objs = vec![
            vec![1.0, 5.0], // front 0
            vec![3.0, 3.0], // front 0
            vec![5.0, 1.0], // front 0
            vec![4.0, 4.0], // dominated by [1]
            vec![6.0, 6.0], // dominated by [3]
        ];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_fitness_sort_distinct_values() {
        let fitness = [0.3, 0.9, 0.1, 0.5, 0.7];
        let result = fitness_sort(&fitness);
        assert_eq!(
            result.fronts,
            vec![vec![1], vec![4], vec![3], vec![0], vec![2]]
        );
        assert_eq!(result.ranks, vec![3, 0, 4, 2, 1]);
    }

    #[test]
    fn test_fitness_sort_ties_share_front() {
        let result = fitness_sort(&[0.5, 0.5, 0.5]);
        assert_eq!(result.fronts, vec![vec![0, 1, 2]]);
    }

    // ---- Crowding distance ----

    #[test]
    fn test_crowding_small_fronts_infinite() {
        assert!(crowding_distance(&[vec![1.0]]).iter().all(|d| d.is_infinite()));
        assert!(crowding_distance(&[vec![1.0], vec![2.0]])
            .iter()
            .all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let objs = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let dist = crowding_distance(&objs);
        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        assert!((dist[1] - 0.5).abs() < 1e-10);
        assert!((dist[2] - 0.5).abs() < 1e-10);
        assert!((dist[3] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_crowding_zero_range() {
        let objs = vec![vec![0.4], vec![0.4], vec![0.4], vec![0.4]];
        let dist = crowding_distance(&objs);
        assert_eq!(dist.iter().filter(|d| d.is_infinite()).count(), 2);
        assert_eq!(dist.iter().filter(|&&d| d == 0.0).count(), 2);
    }

    // ---- Selection ----

    #[test]
    fn test_truncate_keeps_extremes() {
        let objs = vec![
            vec![0.50],
            vec![0.10], // min
            vec![0.45],
            vec![0.90], // max
            vec![0.55],
        ];
        let front = vec![0, 1, 2, 3, 4];
        let kept = truncate_by_crowding(&front, &objs, 2);
        let mut sorted = kept.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 3]);

        let kept = truncate_by_crowding(&front, &objs, 3);
        assert!(kept.contains(&1) && kept.contains(&3));
    }

    #[test]
    fn test_environmental_selection_whole_fronts_then_crowding() {
        let fitness = [0.9, 0.9, 0.5, 0.5, 0.5, 0.5, 0.1];
        let objs: Vec<Vec<f64>> = fitness.iter().map(|&f| vec![-f]).collect();
        let sorted = fitness_sort(&fitness);
        let selected = environmental_selection(&sorted, &objs, 4);
        assert_eq!(selected.len(), 4);
        assert_eq!(&selected[..2], &[0, 1]);
        assert!(selected[2..].iter().all(|&i| (2..6).contains(&i)));
    }

    #[test]
    fn test_truncate_by_distance_drops_duplicates_first() {
        // genes per solution; 0 and 2 are identical
        let genes = [[0u8, 0, 0], [1, 1, 1], [0, 0, 0], [0, 1, 0]];
        let hamming = |i: usize, j: usize| {
            genes[i].iter().zip(&genes[j]).filter(|(a, b)| a != b).count()
        };
        let front = vec![0, 1, 2, 3];

        let kept = truncate_by_distance(&front, 2, hamming);
        assert!(kept.contains(&1));
        assert!(!(kept.contains(&0) && kept.contains(&2)));
        assert_eq!(truncate_by_distance(&front, 4, hamming), front);
    }

    #[test]
    fn test_environmental_selection_by_custom_truncation() {
        let sorted = fitness_sort(&[0.5, 0.5, 0.5, 0.9]);
        let selected = environmental_selection_by(&sorted, 2, |front, keep| {
            front.iter().rev().take(keep).copied().collect()
        });
        assert_eq!(selected, vec![3, 2]);
    }

    #[test]
    fn test_environmental_selection_exact_fit() {
        let fitness = [0.2, 0.8, 0.6];
        let objs: Vec<Vec<f64>> = fitness.iter().map(|&f| vec![-f]).collect();
        let sorted = fitness_sort(&fitness);
        assert_eq!(environmental_selection(&sorted, &objs, 3), vec![1, 2, 0]);
        assert_eq!(environmental_selection(&sorted, &objs, 1), vec![1]);
    }

    proptest! {
        #[test]
        fn prop_distinct_fitness_gives_singleton_fronts(
            values in proptest::collection::hash_set(0u32..10_000, 1..40)
        ) {
            let fitness: Vec<f64> = values.iter().map(|&v| v as f64 / 10_000.0).collect();
            let result = fitness_sort(&fitness);
            prop_assert_eq!(result.fronts.len(), fitness.len());
            let order: Vec<f64> = result.fronts.iter().map(|f| {
                assert_eq!(f.len(), 1);
                fitness[f[0]]
            }).collect();
            prop_assert!(order.windows(2).all(|w| w[0] > w[1]));
        }

        #[test]
        fn prop_every_solution_ranked_once(
            objs in proptest::collection::vec(proptest::collection::vec(0.0f64..10.0, 3), 1..30)
        ) {
            let result = non_dominated_sort(&objs);
            let mut seen: Vec<usize> = result.fronts.iter().flatten().copied().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..objs.len()).collect::<Vec<_>>());
            for (rank, front) in result.fronts.iter().enumerate() {
                for &i in front {
                    prop_assert_eq!(result.ranks[i], rank);
                }
            }
        }
    }
}
