// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::cmp::Ordering;

use rug::Rational;

/// 2D orientation determinant `a.x·b.y − a.y·b.x` of the vectors `a` and `b`.
///
/// Returns:
/// - >0 if `b` is counter-clockwise from `a`
/// - <0 if clockwise
/// - =0 if collinear
///
/// The sign is exact for the given inputs. Rounding is monotonic, so the two rounded
/// products compare the same way as the exact ones or become equal, and the difference
/// of two floats never has the wrong sign. A floating point result is therefore trusted
/// whenever it is non-zero and finite. Zero (cancellation or underflow) and NaN
/// (overflowing products) are re-evaluated exactly.
#[inline]
pub fn orient2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let det = ax * by - ay * bx;
    if det != 0.0 && !det.is_nan() {
        return det;
    }
    orient2d_exact(ax, ay, bx, by)
}

/// Exact evaluation of [`orient2d`] on rationals.
///
/// The result is the nearest `f64` to the exact determinant, except that a non-zero
/// determinant too small to represent is returned as `±f64::MIN_POSITIVE`. Non-finite
/// inputs evaluate to `0.0`.
pub fn orient2d_exact(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let (Some(ax), Some(ay), Some(bx), Some(by)) = (
        Rational::from_f64(ax),
        Rational::from_f64(ay),
        Rational::from_f64(bx),
        Rational::from_f64(by),
    ) else {
        return 0.0;
    };

    let det = Rational::from(&ax * &by) - Rational::from(&ay * &bx);
    match det.cmp0() {
        Ordering::Equal => 0.0,
        sign => {
            let approx = det.to_f64();
            if approx != 0.0 {
                approx
            } else if sign == Ordering::Greater {
                f64::MIN_POSITIVE
            } else {
                -f64::MIN_POSITIVE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccw_test() {
        assert!(orient2d(1.0, 0.0, 0.0, 1.0) > 0.0);
        assert!(orient2d(0.0, 1.0, 1.0, 0.0) < 0.0);
    }

    #[test]
    fn collinear_is_zero() {
        assert_eq!(orient2d(1.0, 1.0, 2.0, 2.0), 0.0);
        assert_eq!(orient2d_exact(1.0, 1.0, 2.0, 2.0), 0.0);
    }

    #[test]
    fn underflowed_product_keeps_its_sign() {
        // both products underflow to zero in f64
        let tiny = 1e-200;
        assert_eq!(tiny * tiny, 0.0);
        assert!(orient2d(tiny, 0.0, 0.0, tiny) > 0.0);
        assert!(orient2d(0.0, tiny, tiny, 0.0) < 0.0);
    }

    #[test]
    fn overflowed_products_are_resolved_exactly() {
        let big: f64 = 1e200;
        assert!((big * big - big * big).is_nan());
        assert_eq!(orient2d(big, big, big, big), 0.0);
        assert!(orient2d(big, big, big, 2.0 * big) > 0.0);
        assert!(orient2d(big, 2.0 * big, big, big) < 0.0);
    }

    #[test]
    fn float_sign_agrees_with_exact_sign_near_collinear() {
        // vectors within a few ulps of each other's direction
        let mut x = 0.5f64;
        for i in 0..2000 {
            x = (x * 1.618_033_988_749_895).fract() + 0.5;
            let y = x * (1.0 + (i % 7) as f64 * f64::EPSILON);
            let (ax, ay, bx, by) = (x, y, 1.0 - x / 3.0, (1.0 - x / 3.0) * (1.0 + f64::EPSILON));
            let fast = orient2d(ax, ay, bx, by);
            let exact = orient2d_exact(ax, ay, bx, by);
            assert_eq!(fast.partial_cmp(&0.0), exact.partial_cmp(&0.0), "{ax} {ay} {bx} {by}");
        }
    }

    #[test]
    fn non_finite_input_is_zero_in_exact_path() {
        assert_eq!(orient2d_exact(f64::INFINITY, 0.0, 0.0, 1.0), 0.0);
    }
}
