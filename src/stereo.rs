//! # Scanline stereo
//!
//! Computes a disparity map by solving every row of a rectified stereo frame as an independent
//! scanline. The unary cost of disparity `d` at column `x` is the sum of absolute differences
//! between a window around `left(x, y)` and the same window around `right(x - d, y)`, and the
//! pairwise cost is a truncated linear penalty on the change in disparity between neighbouring
//! pixels.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::{Path, PathBuf};

use image::GrayImage;
use log::{debug, info};
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::diagnostics::LogSink;
use crate::disparity::{DisparityAlgorithm, DisparityMap, StereoFrame};
use crate::error::*;
use crate::solver::{ScanlineSolver, SolveOptions};
use crate::vectorized::ScanlineDpVectorized;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

pub struct ScanlineStereo<S = ScanlineDpVectorized> {
    params: Params,
    solver: S,
    pairwise: Array2<f64>,
    corr_window_x_range: std::ops::RangeInclusive<isize>,
    corr_window_y_range: std::ops::RangeInclusive<isize>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Params {
    /// Smallest disparity considered.
    pub min_disparity: usize,

    /// One past the largest disparity considered.
    pub max_disparity: usize,

    /// Width and height of the correlation window, both odd.
    pub correlation_window_size: (usize, usize),

    /// Pairwise cost per unit of disparity change between neighbouring pixels.
    pub smoothness_penalty: f64,

    /// Upper bound on the pairwise cost, so depth discontinuities are not over-penalised.
    pub max_penalty: f64,

    /// Standard deviation of a Gaussian pre-filter applied to both images, if any.
    pub blur_sigma: Option<f32>,

    /// Where to plot per-row statistics. Only used with the `statistics` feature.
    pub statistics_path: Option<PathBuf>
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            min_disparity: 0,
            max_disparity: 64,
            correlation_window_size: (5, 5),
            smoothness_penalty: 20.0,
            max_penalty: 200.0,
            blur_sigma: None,
            statistics_path: None
        }
    }
}

impl Params {
    /// Read parameters from a TOML file. Missing keys take their default value.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let params: Params = toml::from_str(&contents)?;
        params.validate()?;

        Ok(params)
    }

    /// Number of disparity labels per pixel.
    pub fn num_disparities(&self) -> usize {
        self.max_disparity.saturating_sub(self.min_disparity)
    }

    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_disparity <= self.min_disparity {
            return Err(Error::InvalidParams(format!(
                "max_disparity ({}) must be greater than min_disparity ({})",
                self.max_disparity, self.min_disparity
            )));
        }

        let (w, h) = self.correlation_window_size;
        if w % 2 == 0 || h % 2 == 0 {
            return Err(Error::InvalidParams(format!(
                "correlation window size must be odd in both directions, got {:?}",
                self.correlation_window_size
            )));
        }

        for (name, val) in [
            ("smoothness_penalty", self.smoothness_penalty),
            ("max_penalty", self.max_penalty)
        ].iter() {
            if !val.is_finite() || *val < 0.0 {
                return Err(Error::InvalidParams(format!(
                    "{} must be finite and non-negative, got {}", name, val
                )));
            }
        }

        if let Some(sigma) = self.blur_sigma {
            if !(sigma > 0.0) {
                return Err(Error::InvalidParams(format!(
                    "blur_sigma must be positive, got {}", sigma
                )));
            }
        }

        Ok(())
    }
}

impl ScanlineStereo<ScanlineDpVectorized> {
    /// Create a new instance of the algorithm with the given parameters, using the vectorized
    /// solver.
    pub fn new(params: Params) -> Result<Self> {
        Self::with_solver(params, ScanlineDpVectorized::new())
    }
}

impl<S> ScanlineStereo<S>
where
    S: ScanlineSolver + Sync
{
    /// Create a new instance of the algorithm with the given parameters and solver.
    pub fn with_solver(params: Params, solver: S) -> Result<Self> {
        params.validate()?;

        let semi_width = (params.correlation_window_size.0 as isize - 1) / 2;
        let corr_window_x_range = -semi_width..=semi_width;

        let semi_height = (params.correlation_window_size.1 as isize - 1) / 2;
        let corr_window_y_range = -semi_height..=semi_height;

        let pairwise = truncated_linear(
            params.num_disparities(),
            params.smoothness_penalty,
            params.max_penalty
        );

        Ok(Self {
            params,
            solver,
            pairwise,
            corr_window_x_range,
            corr_window_y_range
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Build the `[disparities x width]` unary cost matrix of row `y`.
    pub fn row_costs(&self, left: &GrayImage, right: &GrayImage, y: usize) -> Array2<f64> {
        let width = left.width() as usize;

        Array2::from_shape_fn((self.params.num_disparities(), width), |(label, x)| {
            self.get_criterion(left, right, x, y, self.params.min_disparity + label)
        })
    }

    /// Calculate the correlation criterion for the given position and disparity.
    ///
    /// Window samples falling outside the image are clamped to its border.
    fn get_criterion(
        &self,
        left: &GrayImage,
        right: &GrayImage,
        x: usize,
        y: usize,
        d: usize
    ) -> f64 {
        let max_x = left.width() as isize - 1;
        let max_y = left.height() as isize - 1;

        let mut acc = 0.0f64;

        for j in self.corr_window_y_range.clone() {
            let yj = (y as isize + j).max(0).min(max_y) as u32;

            for i in self.corr_window_x_range.clone() {
                let xl = (x as isize + i).max(0).min(max_x) as u32;
                let xr = (x as isize + i - d as isize).max(0).min(max_x) as u32;

                let l = left.get_pixel(xl, yj)[0] as f64;
                let r = right.get_pixel(xr, yj)[0] as f64;
                acc += (l - r).abs();
            }
        }

        acc
    }

    /// Solve a single row, returning its labels and total cost.
    fn solve_row(
        &self,
        left: &GrayImage,
        right: &GrayImage,
        y: usize
    ) -> Result<(Vec<usize>, f64)> {
        let unary = self.row_costs(left, right, y);
        let costs = CostModel::new(unary.view(), self.pairwise.view())?;

        let solution = self.solver.solve_with(&costs, &SolveOptions::default(), &mut LogSink)?;
        debug!("row {}: total cost {}", y, solution.total_cost);

        Ok((solution.best_path, solution.total_cost))
    }
}

impl<S> DisparityAlgorithm for ScanlineStereo<S>
where
    S: ScanlineSolver + Sync
{
    /// Compute the disparity map for the given frame.
    fn compute(&mut self, frame: &StereoFrame) -> Result<DisparityMap> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;

        info!(
            "Computing scanline disparity of {}x{} frame over disparities {}..{}",
            width, height, self.params.min_disparity, self.params.max_disparity
        );

        // Nothing to solve, and an empty scanline is not a valid cost model
        if width == 0 || height == 0 {
            return Ok(DisparityMap::new(width, height));
        }

        // ---- PRE FILTER ----

        let (left, right) = match self.params.blur_sigma {
            Some(sigma) => (
                imageproc::filter::gaussian_blur_f32(&frame.left, sigma),
                imageproc::filter::gaussian_blur_f32(&frame.right, sigma)
            ),
            None => (frame.left.clone(), frame.right.clone())
        };

        // ---- SCANLINE OPTIMISATION ----

        let this = &*self;
        let rows = (0..height)
            .into_par_iter()
            .map(|y| this.solve_row(&left, &right, y))
            .collect::<Result<Vec<_>>>()?;

        let mut disp_map = DisparityMap::new(width, height);

        // Initial values are swapped around so that they don't dominate the result
        let mut min_disp = self.params.max_disparity as f32;
        let mut max_disp = self.params.min_disparity as f32;

        for (y, (path, _)) in rows.iter().enumerate() {
            for (x, &label) in path.iter().enumerate() {
                let disp_val = (self.params.min_disparity + label) as f32;
                disp_map.put(x, y, disp_val);

                min_disp = min_disp.min(disp_val);
                max_disp = max_disp.max(disp_val);
            }
        }

        disp_map.min_disp = Some(min_disp);
        disp_map.max_disp = Some(max_disp);

        info!("Disparity range of map: {}..={}", min_disp, max_disp);

        // ---- PLOTTING ----
        #[cfg(feature = "statistics")]
        {
            if let Some(path) = &self.params.statistics_path {
                let row_costs = rows.iter().map(|(_, cost)| *cost).collect::<Vec<_>>();
                crate::statistics::plot_row_costs(path, &row_costs)?;
                info!("Stats plotting complete");
            }
        }

        Ok(disp_map)
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Pairwise matrix with cost `min(penalty * |a - b|, max_penalty)` for a change from label `a` to
/// label `b`.
pub fn truncated_linear(labels: usize, penalty: f64, max_penalty: f64) -> Array2<f64> {
    Array2::from_shape_fn((labels, labels), |(a, b)| {
        let step = if a > b { a - b } else { b - a };
        (penalty * step as f64).min(max_penalty)
    })
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn pairwise_is_truncated() {
        assert_eq!(
            truncated_linear(4, 2.0, 5.0),
            array![
                [0.0, 2.0, 4.0, 5.0],
                [2.0, 0.0, 2.0, 4.0],
                [4.0, 2.0, 0.0, 2.0],
                [5.0, 4.0, 2.0, 0.0]
            ]
        );
    }

    #[test]
    fn params_are_validated() {
        let mut params = Params::default();
        assert!(params.validate().is_ok());

        params.max_disparity = params.min_disparity;
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));

        let params = Params { correlation_window_size: (4, 5), ..Params::default() };
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));

        let params = Params { smoothness_penalty: -1.0, ..Params::default() };
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));

        let params = Params { blur_sigma: Some(0.0), ..Params::default() };
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn params_parse_from_toml_with_defaults() {
        let params: Params = toml::from_str(
            "min_disparity = 2\nmax_disparity = 10\ncorrelation_window_size = [3, 3]\n"
        ).unwrap();

        assert_eq!(params.min_disparity, 2);
        assert_eq!(params.max_disparity, 10);
        assert_eq!(params.correlation_window_size, (3, 3));
        assert_eq!(params.smoothness_penalty, Params::default().smoothness_penalty);
        assert_eq!(params.num_disparities(), 8);
    }

    #[test]
    fn criterion_is_zero_for_identical_shifted_rows() {
        let left = GrayImage::from_fn(8, 1, |x, _| image::Luma([(x * 20) as u8]));
        // right(x) == left(x + 2), i.e. a true disparity of 2
        let right = GrayImage::from_fn(8, 1, |x, _| image::Luma([((x + 2) * 20) as u8]));

        let stereo = ScanlineStereo::new(Params {
            min_disparity: 0,
            max_disparity: 4,
            correlation_window_size: (1, 1),
            ..Params::default()
        }).unwrap();

        let costs = stereo.row_costs(&left, &right, 0);
        assert_eq!(costs.dim(), (4, 8));
        for x in 2..8 {
            assert_eq!(costs[[2, x]], 0.0);
        }
    }
}
