//! In-place order-statistic selection.

/// Returns the `k`-th smallest value (1-based) of `values`.
///
/// Partition-based selection with a median-of-three pivot: the search window
/// shrinks to the side holding position `k` until it spans at most two
/// elements. Runs in expected linear time, quadratic in the worst case.
/// `values` is reordered arbitrarily.
///
/// # Panics
///
/// Panics if `k` is not in `1..=values.len()`.
pub fn select_kth(k: usize, values: &mut [f32]) -> f32 {
    assert!(
        k >= 1 && k <= values.len(),
        "select_kth: k = {k} outside 1..={}",
        values.len()
    );
    let k = k - 1;
    let mut l = 0usize;
    let mut ir = values.len() - 1;
    loop {
        if ir <= l + 1 {
            if ir == l + 1 && values[ir] < values[l] {
                values.swap(l, ir);
            }
            return values[k];
        }

        let mid = (l + ir) / 2;
        values.swap(mid, l + 1);
        if values[l + 1] > values[ir] {
            values.swap(l + 1, ir);
        }
        if values[l] > values[ir] {
            values.swap(l, ir);
        }
        if values[l + 1] > values[l] {
            values.swap(l + 1, l);
        }

        // values[l + 1] <= pivot <= values[ir] act as sentinels for both scans.
        let pivot = values[l];
        let mut i = l + 1;
        let mut j = ir;
        loop {
            i += 1;
            while values[i] < pivot {
                i += 1;
            }
            j -= 1;
            while values[j] > pivot {
                j -= 1;
            }
            if j < i {
                break;
            }
            values.swap(i, j);
        }
        values[l] = values[j];
        values[j] = pivot;

        if j >= k {
            ir = j - 1;
        }
        if j <= k {
            l = i;
        }
    }
}

/// Median of `values` as the element of rank `ceil(n / 2)`.
pub fn median_in_place(values: &mut [f32]) -> f32 {
    let k = values.len().div_ceil(2);
    select_kth(k, values)
}

#[cfg(test)]
mod tests {
    use super::{median_in_place, select_kth};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn single_element_is_returned() {
        let mut values = [3.5f32];
        assert_eq!(select_kth(1, &mut values), 3.5);
    }

    #[test]
    fn two_elements_are_ordered() {
        let mut values = [9.0f32, -1.0];
        assert_eq!(select_kth(1, &mut values), -1.0);
        let mut values = [9.0f32, -1.0];
        assert_eq!(select_kth(2, &mut values), 9.0);
    }

    #[test]
    fn every_rank_matches_sorted_order() {
        let base = [5.0f32, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0];
        let mut sorted = base;
        sorted.sort_by(f32::total_cmp);
        for k in 1..=base.len() {
            let mut values = base;
            assert_eq!(select_kth(k, &mut values), sorted[k - 1], "k = {k}");
        }
    }

    #[test]
    fn median_matches_sort_on_random_arrays() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in (1..=10_000).step_by(173) {
            let n = if n % 2 == 0 { n + 1 } else { n };
            let values: Vec<f32> = (0..n).map(|_| rng.random_range(-100.0..100.0)).collect();
            let mut sorted = values.clone();
            sorted.sort_by(f32::total_cmp);
            let mut work = values;
            assert_eq!(median_in_place(&mut work), sorted[n / 2], "n = {n}");
        }
    }

    #[test]
    fn duplicates_do_not_break_partitioning() {
        let mut values = vec![2.0f32; 101];
        values[50] = 1.0;
        assert_eq!(median_in_place(&mut values), 2.0);
    }

    #[test]
    #[should_panic]
    fn rank_zero_panics() {
        let mut values = [1.0f32, 2.0];
        select_kth(0, &mut values);
    }
}
