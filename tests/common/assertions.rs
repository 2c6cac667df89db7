//! Numeric assertion helpers.

/// Assert two floats are within `tol` of each other.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}

/// Assert that palette shares of a frequency table add up to 100%.
pub fn assert_shares_complete(shares: impl IntoIterator<Item = f64>) {
    let total: f64 = shares.into_iter().sum();
    assert_close(total, 100.0, 1e-9);
}
