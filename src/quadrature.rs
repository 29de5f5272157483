//! Quadrature rules on the reference triangle.
use crate::Real;
use nalgebra::{Point2, Scalar};
use num::Zero;
use numeric_literals::replace_float_literals;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::ops::{AddAssign, Mul};

pub type QuadraturePair2d<T> = (Vec<T>, Vec<Point2<T>>);

/// Errors returned by quadrature methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuadratureError {
    /// No rule of the requested polynomial strength is available.
    UnsupportedStrength { strength: usize, max_strength: usize },
}

impl Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadratureError::UnsupportedStrength { strength, max_strength } => write!(
                f,
                "No triangle quadrature of strength {strength} is available (max strength is {max_strength})."
            ),
        }
    }
}

impl Error for QuadratureError {}

/// A quadrature rule consisting of weights and points.
pub trait Quadrature<T>
where
    T: Scalar,
{
    fn weights(&self) -> &[T];
    fn points(&self) -> &[Point2<T>];

    /// Approximates the integral of the given function using this quadrature rule.
    fn integrate<U, Function>(&self, f: Function) -> U
    where
        Function: Fn(&Point2<T>) -> U,
        U: Zero + Mul<T, Output = U> + AddAssign<U>,
    {
        let mut integral = U::zero();
        for (w, p) in self.weights().iter().zip(self.points()) {
            integral += f(p) * w.clone();
        }
        integral
    }
}

impl<T, A, B> Quadrature<T> for (A, B)
where
    T: Scalar,
    A: AsRef<[T]>,
    B: AsRef<[Point2<T>]>,
{
    fn weights(&self) -> &[T] {
        self.0.as_ref()
    }

    fn points(&self) -> &[Point2<T>] {
        self.1.as_ref()
    }
}

impl<T, X> Quadrature<T> for &X
where
    T: Scalar,
    X: Quadrature<T>,
{
    fn weights(&self) -> &[T] {
        X::weights(self)
    }

    fn points(&self) -> &[Point2<T>] {
        X::points(self)
    }
}

/// Returns a quadrature rule on the reference triangle (-1, -1), (1, -1), (-1, 1) that
/// integrates polynomials of total degree up to `strength` exactly.
///
/// The weights sum to the area of the reference triangle, which is 2.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn triangle<T>(strength: usize) -> Result<QuadraturePair2d<T>, QuadratureError>
where
    T: Real,
{
    match strength {
        0 | 1 => Ok((vec![2.0], vec![Point2::new(-1.0 / 3.0, -1.0 / 3.0)])),
        2 => {
            let w = 2.0 / 3.0;
            Ok((
                vec![w, w, w],
                vec![
                    Point2::new(-2.0 / 3.0, -2.0 / 3.0),
                    Point2::new(1.0 / 3.0, -2.0 / 3.0),
                    Point2::new(-2.0 / 3.0, 1.0 / 3.0),
                ],
            ))
        }
        3 => {
            let w = 25.0 / 24.0;
            Ok((
                vec![-9.0 / 8.0, w, w, w],
                vec![
                    Point2::new(-1.0 / 3.0, -1.0 / 3.0),
                    Point2::new(0.2, -0.6),
                    Point2::new(-0.6, 0.2),
                    Point2::new(-0.6, -0.6),
                ],
            ))
        }
        _ => Err(QuadratureError::UnsupportedStrength {
            strength,
            max_strength: 3,
        }),
    }
}
