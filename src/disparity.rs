//! # General disparity objects
//!
//! This module provides the stereo frame, disparity map and disparity algorithm trait used by the
//! scanline stereo front-end.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use image::GrayImage;
use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A rectified pair of greyscale images of identical size.
#[derive(Debug, Clone)]
pub struct StereoFrame {
    pub left: GrayImage,
    pub right: GrayImage
}

/// A generic floating point disparity map.
#[derive(Debug, Clone)]
pub struct DisparityMap {
    data: Vec<f32>,
    width: usize,
    height: usize,
    pub max_disp: Option<f32>,
    pub min_disp: Option<f32>
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

pub trait DisparityAlgorithm {
    /// Compute the disparity map of the given stereo frame.
    fn compute(&mut self, frame: &StereoFrame) -> Result<DisparityMap>;
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl StereoFrame {
    /// Build a frame from two images, which must be the same size.
    pub fn new(left: GrayImage, right: GrayImage) -> Result<Self> {
        if left.dimensions() != right.dimensions() {
            return Err(Error::InvalidParams(format!(
                "left image is {:?} but right image is {:?}",
                left.dimensions(), right.dimensions()
            )));
        }

        Ok(Self { left, right })
    }

    /// Load both images from disk, converting them to greyscale.
    pub fn open<P: AsRef<Path>>(left: P, right: P) -> Result<Self> {
        let left = image::open(left)?.to_luma8();
        let right = image::open(right)?.to_luma8();

        Self::new(left, right)
    }

    pub fn width(&self) -> u32 {
        self.left.width()
    }

    pub fn height(&self) -> u32 {
        self.left.height()
    }
}

impl DisparityMap {
    pub fn new(width: usize, height: usize) -> Self {
        DisparityMap {
            data: vec![0.0; width * height],
            width,
            height,
            min_disp: None,
            max_disp: None
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[x + y * self.width]
    }

    pub fn put(&mut self, x: usize, y: usize, val: f32) {
        self.data[x + y * self.width] = val;
    }

    /// Converts the map into a Luma8 image, clamping values to 0..=255.
    pub fn to_luma(&self) -> GrayImage {
        self.luma_scaled(1.0)
    }

    /// Converts the map to a normalised GrayImage.
    ///
    /// Normalises by the maximum observed disparity in the map. If the maximum disparity is not
    /// set, or is zero, then the function is equivalent to `.to_luma()`.
    pub fn to_luma_normalised(&self) -> GrayImage {
        let mult = match self.max_disp {
            Some(d) if d > 0.0 => 255.0 / d,
            _ => 1.0
        };

        self.luma_scaled(mult)
    }

    /// Save the normalised map as an image, the format is chosen from the extension.
    pub fn save_normalised<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_luma_normalised().save(path)?;
        Ok(())
    }

    fn luma_scaled(&self, mult: f32) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let val = (self.get(x as usize, y as usize) * mult).max(0.0).min(255.0);
            image::Luma([val as u8])
        })
    }
}
