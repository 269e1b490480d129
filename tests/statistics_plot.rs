#![cfg(feature = "statistics")]

use cv_scanline::{prelude::*, statistics::plot_row_costs, stereo::{Params, ScanlineStereo}};
use image::{GrayImage, Luma};

#[test]
fn row_costs_are_plotted_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("cv_scanline_row_costs.png");
    let _ = std::fs::remove_file(&path);

    plot_row_costs(&path, &[12.0, 30.5, 8.0, f64::INFINITY, 21.0])?;

    assert!(path.exists());
    assert!(std::fs::metadata(&path)?.len() > 0);
    std::fs::remove_file(&path)?;

    Ok(())
}

#[test]
fn stereo_compute_writes_statistics_plot() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("cv_scanline_stereo_statistics.png");
    let _ = std::fs::remove_file(&path);

    let left = GrayImage::from_fn(16, 4, |x, y| Luma([(x * 13 + y * 7) as u8]));
    let right = GrayImage::from_fn(16, 4, |x, y| Luma([((x + 1) * 13 + y * 7) as u8]));
    let frame = StereoFrame::new(left, right)?;

    let params = Params {
        max_disparity: 4,
        correlation_window_size: (3, 3),
        statistics_path: Some(path.clone()),
        ..Params::default()
    };
    ScanlineStereo::new(params)?.compute(&frame)?;

    assert!(path.exists());
    std::fs::remove_file(&path)?;

    Ok(())
}
