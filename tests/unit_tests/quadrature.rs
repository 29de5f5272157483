use fenris_bases::quadrature::{triangle, Quadrature, QuadratureError};
use matrixcompare::assert_scalar_eq;
use nalgebra::Point2;

/// Exact integral of x^a y^b over the reference triangle (-1, -1), (1, -1), (-1, 1).
///
/// Computed by substituting x = 2u - 1, y = 2v - 1 and expanding over the unit simplex,
/// where the integral of u^i v^j is i! j! / (i + j + 2)!.
fn reference_monomial_integral(a: u32, b: u32) -> f64 {
    fn factorial(n: u32) -> f64 {
        (1..=n).map(f64::from).product()
    }
    fn binomial(n: u32, k: u32) -> f64 {
        factorial(n) / (factorial(k) * factorial(n - k))
    }

    let mut integral = 0.0;
    for i in 0..=a {
        for j in 0..=b {
            let coeff = binomial(a, i) * binomial(b, j) * 2f64.powi((i + j) as i32) * (-1f64).powi((a - i + b - j) as i32);
            let simplex_integral = factorial(i) * factorial(j) / factorial(i + j + 2);
            integral += coeff * simplex_integral;
        }
    }
    // Jacobian determinant of the substitution
    4.0 * integral
}

#[test]
fn triangle_weights_sum_to_reference_area() {
    for strength in 0..=3 {
        let rule = triangle::<f64>(strength).unwrap();
        let sum: f64 = rule.weights().iter().sum();
        assert_scalar_eq!(sum, 2.0, comp = abs, tol = 1e-14);
        assert_eq!(rule.weights().len(), rule.points().len());
    }
}

#[test]
fn triangle_integrates_polynomials_of_its_strength_exactly() {
    for strength in 0..=3 {
        let rule = triangle::<f64>(strength).unwrap();
        for a in 0..=strength as u32 {
            for b in 0..=(strength as u32 - a) {
                let integral = rule.integrate(|p: &Point2<f64>| p.x.powi(a as i32) * p.y.powi(b as i32));
                let expected = reference_monomial_integral(a, b);
                assert_scalar_eq!(integral, expected, comp = abs, tol = 1e-13);
            }
        }
    }
}

#[test]
fn triangle_rejects_unsupported_strength() {
    assert_eq!(
        triangle::<f64>(4),
        Err(QuadratureError::UnsupportedStrength {
            strength: 4,
            max_strength: 3
        })
    );
}

#[test]
fn borrowed_quadrature_integrates() {
    let rule = triangle::<f64>(1).unwrap();
    let borrowed = (rule.0.as_slice(), rule.1.as_slice());
    assert_scalar_eq!((&borrowed).integrate(|_| 1.0), 2.0, comp = abs, tol = 1e-14);
}
