/// Panics if two numbers are not approximately equal to each other
///
/// # Panics
///
/// 1. Will panic if NaN or Inf is found
/// 2. Will panic if the absolute difference is greater than the tolerance
pub fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!(a.is_finite(), "a = {:?} must be finite", a);
    assert!(b.is_finite(), "b = {:?} must be finite", b);
    let diff = f64::abs(a - b);
    if diff > tol {
        panic!("numbers are not approximately equal. diff = {:?}", diff);
    }
}

/// Panics if two arrays are not approximately equal to each other
///
/// # Panics
///
/// Will panic if the arrays have different lengths or [approx_eq] fails for any pair
pub fn array_approx_eq(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len(), "arrays must have the same length");
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = f64::abs(x - y);
        if !(diff <= tol) {
            panic!("arrays are not approximately equal @ [{}]. diff = {:?}", i, diff);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
