//! Precomputed sample tables for the double-exponential transforms.
//!
//! Each transform is sampled on a uniform grid in the transformed
//! variable `t`; one [`WeightTable`] holds the `(abscissa, weight)`
//! pairs that are *new* to one refinement level, so refinement adds
//! terms to a running sum instead of recomputing it. Tables are built
//! once at kernel construction and never mutated.

use qde_core::{pairwise_sum, DeFloat, IntegrandOutput};

/// Precomputed `(abscissa, weight)` pairs for one refinement level of
/// one transform branch.
///
/// Entries are stored from the transform's asymptote inward: the first
/// entry has the largest `|t|` and the smallest contribution, so partial
/// sums accumulate the tiny terms early and the exp-sinh start-index
/// optimization skips a *leading* run of negligible entries.
#[derive(Debug, Clone)]
pub struct WeightTable<T> {
    entries: Vec<(T, T)>,
}

impl<T: DeFloat> WeightTable<T> {
    /// The stored `(abscissa, weight)` pairs.
    pub fn entries(&self) -> &[(T, T)] {
        &self.entries
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the level contributes no new samples.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the per-level tables for one transform branch.
///
/// `map` evaluates `t ↦ (ϕ(t), ϕ′(t))` and `stop` is the cutoff
/// predicate deciding that a mapped entry is no longer representable
/// (abscissa within one epsilon of its limit, or weight out of range).
/// `t_limit`, when present, clamps the sampled range; the exp-sinh
/// kernel passes its truncation point here.
///
/// Level 1 samples every positive integer multiple of `base_step`.
/// Each deeper level halves the step and keeps only the odd multiples,
/// since the even ones were already captured by the coarser levels; the
/// union of levels `1..=k` is exactly the uniform grid at level `k`'s
/// step.
pub(crate) fn generate_levels<T, M, C>(
    maxlevel: usize,
    base_step: T,
    t_limit: Option<T>,
    map: M,
    stop: C,
) -> Vec<WeightTable<T>>
where
    T: DeFloat,
    M: Fn(T) -> (T, T),
    C: Fn(T, T) -> bool,
{
    let two = T::of_usize(2);
    let mut tables = Vec::with_capacity(maxlevel);
    let mut h = base_step;
    for level in 0..maxlevel {
        let stride = if level == 0 { 1 } else { 2 };
        let mut entries = Vec::new();
        let mut k = 1usize;
        loop {
            let t = T::of_usize(k) * h;
            if let Some(limit) = t_limit {
                if t > limit {
                    break;
                }
            }
            let (x, w) = map(t);
            if stop(x, w) {
                break;
            }
            entries.push((x, w));
            k += stride;
        }
        // asymptote first
        entries.reverse();
        tables.push(WeightTable { entries });
        h = h / two;
    }
    tables
}

/// Accumulate `w · (f(x) + f(−x))` over a level table, pairwise.
pub(crate) fn sum_symmetric<T, Y, F>(f: &F, entries: &[(T, T)]) -> Option<Y>
where
    T: DeFloat,
    Y: IntegrandOutput<T>,
    F: Fn(T) -> Y,
{
    let terms: Vec<Y> = entries
        .iter()
        .map(|&(x, w)| f(x).add(&f(-x)).scale(w))
        .collect();
    pairwise_sum(&terms)
}

/// Accumulate `w · f(x)` over (part of) a level table, pairwise.
pub(crate) fn sum_one_sided<T, Y, F>(f: &F, entries: &[(T, T)]) -> Option<Y>
where
    T: DeFloat,
    Y: IntegrandOutput<T>,
    F: Fn(T) -> Y,
{
    let terms: Vec<Y> = entries.iter().map(|&(x, w)| f(x).scale(w)).collect();
    pairwise_sum(&terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_levels() -> Vec<WeightTable<f64>> {
        // a transform-like map with a strictly decaying weight
        let map = |t: f64| (t, (-t * t).exp());
        let stop = |_x: f64, w: f64| w < f64::MIN_POSITIVE;
        generate_levels(3, 0.5, None, map, stop)
    }

    #[test]
    fn level_one_samples_every_integer_offset() {
        let tables = sample_levels();
        let h = 0.5;
        // stored asymptote-first, so walk backwards for ascending t
        for (i, &(t, _)) in tables[0].entries().iter().rev().enumerate() {
            let k = (t / h).round();
            assert_eq!(k as usize, i + 1);
        }
    }

    #[test]
    fn deeper_levels_keep_only_odd_offsets() {
        let tables = sample_levels();
        for (level, table) in tables.iter().enumerate().skip(1) {
            let h = 0.5 / 2f64.powi(level as i32);
            assert!(!table.is_empty());
            for &(t, _) in table.entries() {
                let k = (t / h).round() as u64;
                assert_eq!(k % 2, 1, "level {level} stored even offset {k}");
            }
        }
    }

    #[test]
    fn entries_are_stored_asymptote_first() {
        let tables = sample_levels();
        for table in &tables {
            let e = table.entries();
            assert!(e.first().unwrap().0 > e.last().unwrap().0);
            // decaying weight means ascending as stored
            for pair in e.windows(2) {
                assert!(pair[0].1 <= pair[1].1);
            }
        }
    }

    #[test]
    fn no_weight_below_representable_minimum() {
        let tables = sample_levels();
        for table in &tables {
            for &(_, w) in table.entries() {
                assert!(w >= f64::MIN_POSITIVE);
            }
        }
    }

    #[test]
    fn t_limit_clamps_the_range() {
        let map = |t: f64| (t, 1.0);
        let tables = generate_levels(2, 0.5, Some(2.0), map, |_, _| false);
        for table in &tables {
            for &(t, _) in table.entries() {
                assert!(t <= 2.0);
            }
        }
    }

    #[test]
    fn symmetric_sum_cancels_odd_functions() {
        let entries: Vec<(f64, f64)> = (1..=8).map(|k| (k as f64, 0.25)).collect();
        let sum: Option<f64> = sum_symmetric(&|x: f64| x, &entries);
        assert_eq!(sum, Some(0.0));
    }
}
