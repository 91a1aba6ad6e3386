//! Double-precision complex numbers for the escape-time loop.

use std::{
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An immutable `(re, im)` pair. Every operation returns a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Magnitude `sqrt(re² + im²)`.
    pub fn modulus(self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Exact componentwise comparison, no epsilon. `NaN` never equals
    /// anything and `0.0 == -0.0`, as with plain `f64` comparison.
    pub fn exact_eq(&self, other: &Complex) -> bool {
        self.re == other.re && self.im == other.im
    }

    /// Complex division. Fails when the divisor's modulus is exactly zero.
    pub fn checked_div(self, rhs: Complex) -> Result<Complex> {
        let denom = rhs.norm_sqr();
        if denom == 0.0 {
            return Err(Error::DivisionByZero);
        }
        Ok(Complex {
            re: (self.re * rhs.re + self.im * rhs.im) / denom,
            im: (self.im * rhs.re - self.re * rhs.im) / denom,
        })
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, rhs: f64) -> Complex {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

impl Div<f64> for Complex {
    type Output = Complex;

    fn div(self, rhs: f64) -> Complex {
        Complex::new(self.re / rhs, self.im / rhs)
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}i", self.re, self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_operations() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        // (1 + 2i)(3 - i) = 3 - i + 6i + 2 = 5 + 5i
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(-a, Complex::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Complex::new(2.0, 4.0));
        assert_eq!(a / 2.0, Complex::new(0.5, 1.0));
    }

    #[test]
    fn division_inverts_multiplication() {
        let a = Complex::new(5.0, 5.0);
        let b = Complex::new(3.0, -1.0);
        let q = a.checked_div(b).unwrap();
        assert!(q.exact_eq(&Complex::new(1.0, 2.0)), "got {q}");
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let err = Complex::new(1.0, 1.0).checked_div(Complex::ZERO).unwrap_err();
        assert!(matches!(err, Error::DivisionByZero));
    }

    #[test]
    fn modulus_of_three_four() {
        assert_eq!(Complex::new(3.0, -4.0).modulus(), 5.0);
        assert_eq!(Complex::ZERO.modulus(), 0.0);
        assert!(Complex::new(f64::NAN, 0.0).modulus().is_nan());
    }

    #[test]
    fn equality_has_no_tolerance() {
        let a = Complex::new(0.1 + 0.2, 0.0);
        let b = Complex::new(0.3, 0.0);
        assert!(!a.exact_eq(&b));
        assert!(Complex::new(0.0, 0.0).exact_eq(&Complex::new(-0.0, 0.0)));
        let nan = Complex::new(f64::NAN, 0.0);
        assert!(!nan.exact_eq(&nan));
    }

    #[test]
    fn display_matches_text_form() {
        assert_eq!(Complex::new(1.5, -2.0).to_string(), "1.5 + -2i");
    }
}
