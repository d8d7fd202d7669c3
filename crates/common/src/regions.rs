//! Connected-component extraction over a disagreement mask
//!
//! Labeling is delegated to `imageproc`'s union-find pass, which never
//! recurses.
//!
//! Labels are handed out in row-major order of each component's first pixel,
//! starting at 1; 0 means "not part of any component".

use image::{GrayImage, Luma};
use imageproc::region_labelling::connected_components;
use tracing::debug;

use crate::config::{AnalysisConfig, Connectivity};
use crate::diff::{DifferenceField, Mask};
use crate::error::{Error, Result};
use crate::types::{BoundingBox, Region};

/// Per-pixel component labels for one mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    count: u32,
}

impl Labels {
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.labels[y as usize * self.width as usize + x as usize]
    }

    /// Number of components found
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }
}

/// Label the connected components of `mask`
pub fn label_components(mask: &Mask, connectivity: Connectivity) -> Labels {
    let (width, height) = mask.dimensions();
    let image = GrayImage::from_fn(width, height, |x, y| {
        Luma([if mask.get(x, y) { u8::MAX } else { 0 }])
    });

    let labels = connected_components(&image, connectivity.into(), Luma([0u8])).into_raw();
    let count = labels.iter().copied().max().unwrap_or(0);

    Labels {
        width,
        height,
        labels,
        count,
    }
}

#[derive(Debug, Clone, Copy)]
struct ComponentStats {
    pixels: u64,
    diff_sum: u64,
    x_min: u32,
    y_min: u32,
    x_max: u32,
    y_max: u32,
}

impl Default for ComponentStats {
    fn default() -> Self {
        Self {
            pixels: 0,
            diff_sum: 0,
            x_min: u32::MAX,
            y_min: u32::MAX,
            x_max: 0,
            y_max: 0,
        }
    }
}

impl ComponentStats {
    fn add(&mut self, x: u32, y: u32, diff: u16) {
        self.pixels += 1;
        self.diff_sum += diff as u64;
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }
}

/// Group disagreeing pixels into classified regions.
///
/// Components smaller than `config.min_area` are dropped. The result is
/// sorted by area descending with ties in ascending label order.
pub fn extract_regions(
    field: &DifferenceField,
    mask: &Mask,
    config: &AnalysisConfig,
) -> Result<Vec<Region>> {
    config.validate()?;

    if field.dimensions() != mask.dimensions() {
        return Err(Error::InvalidInput(format!(
            "difference field is {}x{} but mask is {}x{}",
            field.width(),
            field.height(),
            mask.width(),
            mask.height()
        )));
    }

    let (width, height) = mask.dimensions();
    let labels = label_components(mask, config.connectivity);

    let mut stats = vec![ComponentStats::default(); labels.count() as usize];
    for (idx, (&label, &diff)) in labels.as_slice().iter().zip(field.values()).enumerate() {
        if label == 0 {
            continue;
        }
        let x = (idx % width as usize) as u32;
        let y = (idx / width as usize) as u32;
        stats[label as usize - 1].add(x, y, diff);
    }

    let min_area = config.min_area as u64;
    let mut regions: Vec<Region> = stats
        .iter()
        .enumerate()
        .filter(|(_, s)| s.pixels >= min_area)
        .map(|(i, s)| {
            let bbox = BoundingBox::from_corners(s.x_min, s.y_min, s.x_max, s.y_max);
            let center = bbox.center();
            // mean over every channel sample of the component
            let avg_diff = s.diff_sum as f64 / (3.0 * s.pixels as f64);
            Region {
                id: i as u32 + 1,
                bbox,
                area: s.pixels,
                center,
                avg_diff,
                severity: config.severity.classify(avg_diff),
                section: config.sections.classify(center.1, height).to_string(),
            }
        })
        .collect();

    regions.sort_by(|a, b| b.area.cmp(&a.area).then(a.id.cmp(&b.id)));

    debug!(
        components = labels.count(),
        kept = regions.len(),
        min_area,
        "Extracted regions"
    );

    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn mask_from_rows(rows: &[&str]) -> Mask {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        Mask::from_fn(width, height, |x, y| rows[y as usize].as_bytes()[x as usize] == b'#')
    }

    fn uniform_field(mask: &Mask, value: u16) -> DifferenceField {
        let values = mask.bits().iter().map(|b| if *b { value } else { 0 }).collect();
        DifferenceField::new(mask.width(), mask.height(), values).unwrap()
    }

    fn config(min_area: i64) -> AnalysisConfig {
        AnalysisConfig {
            min_area,
            ..Default::default()
        }
    }

    #[test]
    fn test_labels_in_scan_order() {
        let mask = mask_from_rows(&[
            "..#..",
            "#....",
            "...##",
        ]);
        let labels = label_components(&mask, Connectivity::Four);
        assert_eq!(labels.count(), 3);
        assert_eq!(labels.get(2, 0), 1);
        assert_eq!(labels.get(0, 1), 2);
        assert_eq!(labels.get(3, 2), 3);
        assert_eq!(labels.get(4, 2), 3);
        assert_eq!(labels.get(1, 1), 0);
    }

    #[test]
    fn test_diagonals_depend_on_connectivity() {
        let mask = mask_from_rows(&[
            "#..",
            ".#.",
            "..#",
        ]);
        assert_eq!(label_components(&mask, Connectivity::Four).count(), 3);
        assert_eq!(label_components(&mask, Connectivity::Eight).count(), 1);
    }

    #[test]
    fn test_merged_branches_keep_first_label() {
        // the two arms only join on the bottom row
        let mask = mask_from_rows(&[
            "#.#.#",
            "###..",
        ]);
        let labels = label_components(&mask, Connectivity::Four);
        assert_eq!(labels.count(), 2);
        assert_eq!(labels.get(0, 0), 1);
        assert_eq!(labels.get(2, 0), 1);
        assert_eq!(labels.get(1, 1), 1);
        assert_eq!(labels.get(4, 0), 2);
    }

    #[test]
    fn test_anti_diagonal_labels() {
        let mask = mask_from_rows(&[
            "..#",
            ".#.",
            "#..",
        ]);
        let four = label_components(&mask, Connectivity::Four);
        assert_eq!(four.count(), 3);
        assert_eq!(four.get(2, 0), 1);
        assert_eq!(four.get(1, 1), 2);
        assert_eq!(four.get(0, 2), 3);

        let eight = label_components(&mask, Connectivity::Eight);
        assert_eq!(eight.count(), 1);
        assert_eq!(eight.get(0, 2), 1);
    }

    #[test]
    fn test_large_component_does_not_recurse() {
        let mask = Mask::from_fn(1000, 1000, |_, _| true);
        let labels = label_components(&mask, Connectivity::Four);
        assert_eq!(labels.count(), 1);
    }

    #[test]
    fn test_average_excludes_false_pixels_in_bbox() {
        // an L shape: the bbox holds one unmasked pixel
        let mask = mask_from_rows(&[
            "##",
            "#.",
        ]);
        let values = vec![300, 300, 300, 765];
        let field = DifferenceField::new(2, 2, values).unwrap();
        let regions = extract_regions(&field, &mask, &config(0)).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area, 3);
        assert_eq!(regions[0].bbox, BoundingBox::from_corners(0, 0, 1, 1));
        assert!((regions[0].avg_diff - 100.0).abs() < 1e-9);
        assert_eq!(regions[0].severity, Severity::Medium);
    }

    #[test]
    fn test_small_components_filtered() {
        let mask = mask_from_rows(&[
            "##..#",
            "##...",
        ]);
        let field = uniform_field(&mask, 765);
        let regions = extract_regions(&field, &mask, &config(2)).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].id, 1);
        assert_eq!(regions[0].area, 4);
    }

    #[test]
    fn test_sorted_by_area_then_id() {
        let mask = mask_from_rows(&[
            "#.##.#",
            "..##..",
            "#.....",
        ]);
        let field = uniform_field(&mask, 90);
        let regions = extract_regions(&field, &mask, &config(1)).unwrap();
        let order: Vec<(u64, u32)> = regions.iter().map(|r| (r.area, r.id)).collect();
        assert_eq!(order, vec![(4, 2), (1, 1), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_mismatched_inputs_rejected() {
        let mask = Mask::from_fn(3, 3, |_, _| false);
        let field = DifferenceField::new(3, 2, vec![0; 6]).unwrap();
        assert!(matches!(
            extract_regions(&field, &mask, &config(0)),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_mask_yields_nothing() {
        let mask = Mask::from_fn(4, 4, |_, _| false);
        let field = uniform_field(&mask, 0);
        assert!(extract_regions(&field, &mask, &config(0)).unwrap().is_empty());
    }
}
