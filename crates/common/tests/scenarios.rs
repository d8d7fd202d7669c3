//! End-to-end analysis scenarios over synthetic screenshots

use image::{Rgb, RgbImage};
use pagediff_common::{
    analyze, difference, extract_regions, label_components, summarize, AnalysisConfig,
    BoundingBox, Connectivity, Mask, Severity,
};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn with_block(width: u32, height: u32, bbox: BoundingBox) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BLACK);
    for y in bbox.y..bbox.y + bbox.height {
        for x in bbox.x..bbox.x + bbox.width {
            img.put_pixel(x, y, WHITE);
        }
    }
    img
}

fn config(min_area: i64) -> AnalysisConfig {
    AnalysisConfig {
        threshold: 30,
        min_area,
        ..Default::default()
    }
}

#[test]
fn white_block_is_one_high_region() {
    let reference = RgbImage::from_pixel(100, 100, BLACK);
    let block = BoundingBox { x: 10, y: 10, width: 40, height: 40 };
    let candidate = with_block(100, 100, block);

    let analysis = analyze(&reference, &candidate, &config(100)).unwrap();

    assert_eq!(analysis.regions.len(), 1);
    let region = &analysis.regions[0];
    assert_eq!(region.bbox, block);
    assert_eq!(region.area, 1600);
    assert_eq!(region.severity, Severity::High);
    assert_eq!(region.avg_diff, 255.0);
    assert_eq!(analysis.summary.different_pixels, 1600);
    assert_eq!(analysis.summary.difference_percentage, 16.0);
}

#[test]
fn small_block_is_filtered_as_noise() {
    let reference = RgbImage::from_pixel(100, 100, BLACK);
    let candidate = with_block(100, 100, BoundingBox { x: 10, y: 10, width: 20, height: 20 });

    let analysis = analyze(&reference, &candidate, &config(1000)).unwrap();

    assert!(analysis.regions.is_empty());
    // the pixels still count toward the aggregate metric
    assert_eq!(analysis.summary.different_pixels, 400);
}

#[test]
fn bottom_rows_are_footer() {
    let reference = RgbImage::from_pixel(10, 200, BLACK);
    let candidate = with_block(10, 200, BoundingBox { x: 0, y: 180, width: 10, height: 20 });

    let analysis = analyze(&reference, &candidate, &config(100)).unwrap();

    assert_eq!(analysis.regions.len(), 1);
    assert_eq!(analysis.regions[0].section, "Footer");
}

#[test]
fn identical_images_have_no_regions() {
    let img = with_block(64, 48, BoundingBox { x: 5, y: 5, width: 30, height: 30 });

    let diff = difference(&img, &img, 30).unwrap();
    let regions = extract_regions(&diff.field, &diff.mask, &config(0)).unwrap();
    let summary = summarize(&diff.mask).unwrap();

    assert!(regions.is_empty());
    assert_eq!(summary.difference_percentage, 0.0);
}

#[test]
fn resized_candidate_is_compared_at_reference_size() {
    let reference = RgbImage::from_pixel(50, 50, BLACK);
    let candidate = RgbImage::from_pixel(100, 100, WHITE);

    let analysis = analyze(&reference, &candidate, &config(1000)).unwrap();

    assert_eq!((analysis.width, analysis.height), (50, 50));
    assert_eq!(analysis.summary.total_pixels, 2500);
    assert_eq!(analysis.regions.len(), 1);
    assert_eq!(analysis.regions[0].area, 2500);
}

#[test]
fn invalid_configuration_fails_before_work() {
    let img = RgbImage::from_pixel(4, 4, BLACK);
    let bad = AnalysisConfig {
        min_area: -1,
        ..Default::default()
    };
    assert!(matches!(
        analyze(&img, &img, &bad),
        Err(pagediff_common::Error::InvalidConfiguration(_))
    ));
}

/// Deterministic speckled mask: a cheap linear congruential generator
fn speckle(width: u32, height: u32, seed: u64) -> Mask {
    let mut state = seed;
    let mut bits = Vec::with_capacity((width * height) as usize);
    for _ in 0..width * height {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        bits.push((state >> 33) % 5 < 2);
    }
    Mask::new(width, height, bits).unwrap()
}

#[test]
fn regions_partition_mask_pixels_with_tight_boxes() {
    for (seed, connectivity) in [(1, Connectivity::Four), (7, Connectivity::Eight), (42, Connectivity::Four)] {
        let mask = speckle(60, 40, seed);
        let values = mask.bits().iter().map(|b| if *b { 200 } else { 0 }).collect();
        let field = pagediff_common::DifferenceField::new(60, 40, values).unwrap();
        let config = AnalysisConfig {
            min_area: 3,
            connectivity,
            ..Default::default()
        };

        let regions = extract_regions(&field, &mask, &config).unwrap();
        let labels = label_components(&mask, connectivity);

        for pair in regions.windows(2) {
            assert!(pair[0].area >= pair[1].area);
            if pair[0].area == pair[1].area {
                assert!(pair[0].id < pair[1].id);
            }
        }

        for region in &regions {
            assert!(region.area >= 3);
            let mut count = 0u64;
            let (mut left, mut right, mut top, mut bottom) = (false, false, false, false);
            for y in 0..40 {
                for x in 0..60 {
                    if labels.get(x, y) != region.id {
                        continue;
                    }
                    assert!(mask.get(x, y));
                    assert!(region.bbox.contains(x, y));
                    left |= x == region.bbox.x;
                    right |= x == region.bbox.x_max();
                    top |= y == region.bbox.y;
                    bottom |= y == region.bbox.y_max();
                    count += 1;
                }
            }
            assert_eq!(count, region.area);
            assert!(left && right && top && bottom);
        }

        let mut ids: Vec<u32> = regions.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), regions.len());
    }
}
