//! Property-based tests for arithmetic and solver invariants

mod common;

use common::mat;
use matr::prelude::*;
use proptest::prelude::*;

fn small_matrix(max_rows: usize, max_cols: usize) -> impl Strategy<Value = Matrix> {
    (1..=max_rows, 1..=max_cols).prop_flat_map(|(m, n)| {
        prop::collection::vec(-100.0f64..100.0, m * n)
            .prop_map(move |data| Matrix::from_slice(&data, m, n))
    })
}

/// Diagonally dominant square matrix, always well conditioned
fn well_conditioned(max_n: usize) -> impl Strategy<Value = Matrix> {
    (1..=max_n).prop_flat_map(|n| {
        prop::collection::vec(-1.0f64..1.0, n * n).prop_map(move |mut data| {
            for i in 0..n {
                data[i * n + i] += n as f64 + 1.0;
            }
            Matrix::from_slice(&data, n, n)
        })
    })
}

fn max_abs_diff(a: &Matrix, b: &Matrix) -> f64 {
    a.to_vec()
        .unwrap()
        .iter()
        .zip(b.to_vec().unwrap())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scalar_plus_minus_round_trips(a in small_matrix(5, 5), s in -1e3f64..1e3) {
        let back = a.plus(s).unwrap().minus(s).unwrap();
        prop_assert_eq!(back.shape(), a.shape());
        prop_assert!(max_abs_diff(&back, &a) <= 1e-12);
    }

    #[test]
    fn transpose_is_an_involution(a in small_matrix(6, 6)) {
        prop_assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn identity_is_neutral_for_product(a in small_matrix(5, 5)) {
        let left = identity(a.rows(), a.rows()).matrix_multiply(&a).unwrap();
        let right = a.matrix_multiply(&identity(a.columns(), a.columns())).unwrap();
        prop_assert_eq!(&left, &a);
        prop_assert_eq!(&right, &a);
    }

    #[test]
    fn solve_satisfies_system(a in well_conditioned(6), seed in any::<u64>()) {
        let b = random_seeded(a.rows(), 2, seed);
        let x = a.solve(&b).unwrap();
        prop_assert!(max_abs_diff(&a.matrix_multiply(&x).unwrap(), &b) <= 1e-10);
    }

    #[test]
    fn solve_transpose_matches_transposed_solve(a in well_conditioned(5), seed in any::<u64>()) {
        let b = random_seeded(3, a.columns(), seed);
        let x = a.solve_transpose(&b).unwrap();
        let direct = a.transpose().solve(&b.transpose()).unwrap().transpose();
        prop_assert!(max_abs_diff(&x, &direct) <= 1e-12);
        prop_assert!(max_abs_diff(&x.matrix_multiply(&a).unwrap(), &b) <= 1e-10);
    }

    #[test]
    fn row_swap_negates_determinant(a in well_conditioned(5)) {
        prop_assume!(a.rows() >= 2);
        let mut rows = a.to_rows().unwrap();
        rows.swap(0, 1);
        let swapped = mat(&rows);
        let d = a.det().unwrap();
        prop_assert!((swapped.det().unwrap() + d).abs() <= 1e-9 * d.abs().max(1.0));
    }

    #[test]
    fn cond_is_at_least_one(a in well_conditioned(5)) {
        prop_assert!(a.cond().unwrap() >= 1.0 - 1e-12);
    }
}
