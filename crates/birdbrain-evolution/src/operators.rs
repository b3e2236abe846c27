//! Per-weight crossover and mutation operators.
//!
//! Both operators treat every weight independently:
//!
//! - **Crossover** blends the two parents' weights with an interpolation
//!   factor drawn fresh for each weight, so one offspring matrix can lean
//!   toward either parent at different positions.
//! - **Mutation** replaces a weight with a fresh uniform `[-1, 1)` draw,
//!   the same distribution used for initialization.

use rand::Rng;

use birdbrain_nn::{Matrix, ShapeMismatchError, random_weight};

/// Produces an offspring weight matrix from two same-shaped parents.
///
/// Per weight at `(r, c)`: with probability `mutation_chance` the result is
/// a fresh [`random_weight`]; otherwise it is `a[r][c] * t + b[r][c] * (1 - t)`
/// with `t` drawn uniformly from `[0, 1)` independently for that weight.
///
/// # Panics
///
/// Panics if `mutation_chance` is not in `[0, 1]`.
pub fn breed_weights<R>(
    a: &Matrix,
    b: &Matrix,
    mutation_chance: f32,
    rng: &mut R,
) -> Result<Matrix, ShapeMismatchError>
where
    R: Rng + ?Sized,
{
    a.zip_map(b, |x, y| {
        if rng.random_bool(f64::from(mutation_chance)) {
            random_weight(rng)
        } else {
            let t = rng.random_range(0.0..1.0);
            x * t + y * (1.0 - t)
        }
    })
}

/// Replaces each weight with a fresh [`random_weight`] with probability
/// `mutation_chance`, leaving the rest unchanged.
///
/// # Panics
///
/// Panics if `mutation_chance` is not in `[0, 1]`.
#[must_use]
pub fn mutate_weights<R>(a: &Matrix, mutation_chance: f32, rng: &mut R) -> Matrix
where
    R: Rng + ?Sized,
{
    a.map(|value| {
        if rng.random_bool(f64::from(mutation_chance)) {
            random_weight(rng)
        } else {
            value
        }
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_breed_without_mutation_interpolates() {
        let mut rng = Pcg32::seed_from_u64(1);
        let a = Matrix::random(4, 5, &mut rng);
        let b = Matrix::random(4, 5, &mut rng);

        let child = breed_weights(&a, &b, 0.0, &mut rng).unwrap();
        for ((x, y), c) in a.iter().zip(b.iter()).zip(child.iter()) {
            let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
            assert!(
                (lo..=hi).contains(&c),
                "bred weight {c} outside parent interval [{lo}, {hi}]"
            );
        }
    }

    #[test]
    fn test_breed_blend_factor_varies_per_weight() {
        let mut rng = Pcg32::seed_from_u64(2);
        let a = Matrix::from_fn(3, 3, |_, _| 1.0);
        let b = Matrix::from_fn(3, 3, |_, _| 0.0);

        // with a = 1 and b = 0 each bred weight equals its blend factor
        let child = breed_weights(&a, &b, 0.0, &mut rng).unwrap();
        let factors: Vec<f32> = child.iter().collect();
        assert!(
            factors.windows(2).any(|pair| pair[0] != pair[1]),
            "every weight used the same blend factor"
        );
    }

    #[test]
    fn test_breed_shape_mismatch() {
        let mut rng = Pcg32::seed_from_u64(3);
        let a = Matrix::random(2, 3, &mut rng);
        let b = Matrix::random(3, 2, &mut rng);
        assert!(breed_weights(&a, &b, 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_mutate_with_full_chance_replaces_everything() {
        let mut rng = Pcg32::seed_from_u64(4);
        let a = Matrix::random(5, 5, &mut rng);
        let mutated = mutate_weights(&a, 1.0, &mut rng);
        // a fresh draw colliding with the original is negligible
        let unchanged = a.iter().zip(mutated.iter()).filter(|(x, y)| x == y).count();
        assert_eq!(unchanged, 0);
        assert!(mutated.iter().all(|v| (-1.0..1.0).contains(&v)));
    }

    #[test]
    fn test_mutate_with_zero_chance_is_identity() {
        let mut rng = Pcg32::seed_from_u64(5);
        let a = Matrix::random(5, 5, &mut rng);
        assert_eq!(mutate_weights(&a, 0.0, &mut rng), a);
    }

    #[test]
    fn test_mutate_partial_chance_changes_some_weights() {
        let mut rng = Pcg32::seed_from_u64(6);
        let a = Matrix::random(10, 10, &mut rng);
        let mutated = mutate_weights(&a, 0.3, &mut rng);
        let changed = a.iter().zip(mutated.iter()).filter(|(x, y)| x != y).count();
        assert!(changed > 0);
        assert!(changed < 100);
    }
}
