//! Whole-image disagreement metric

use crate::diff::Mask;
use crate::error::{Error, Result};
use crate::types::Summary;

/// Count the disagreeing pixels of `mask` and their share of the image
pub fn summarize(mask: &Mask) -> Result<Summary> {
    let total_pixels = mask.width() as u64 * mask.height() as u64;
    if total_pixels == 0 {
        return Err(Error::EmptyInput);
    }

    let different_pixels = mask.count();
    Ok(Summary {
        total_pixels,
        different_pixels,
        difference_percentage: different_pixels as f64 / total_pixels as f64 * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_different() {
        let mask = Mask::from_fn(4, 4, |x, y| x < 2 && y < 2);
        let summary = summarize(&mask).unwrap();
        assert_eq!(summary.total_pixels, 16);
        assert_eq!(summary.different_pixels, 4);
        assert_eq!(summary.difference_percentage, 25.0);
    }

    #[test]
    fn test_zero_area_rejected() {
        let mask = Mask::from_fn(0, 5, |_, _| true);
        assert!(matches!(summarize(&mask), Err(Error::EmptyInput)));
    }
}
