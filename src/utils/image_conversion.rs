//! Image conversion utilities between OpenCV frames and model tensors.

use crate::{utils::safe_cast::usize_to_i32, Error, Result};
use ndarray::Array4;
use opencv::core::{Mat, Size, Vec3f, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;

/// Resize an RGB frame and pack it as a `[1, size, size, 3]` tensor in `[0, 1]`
///
/// # Errors
///
/// Returns an error if:
/// - The image is empty or does not have three channels
/// - Resizing or type conversion fails
#[allow(clippy::cast_sign_loss)] // Size is checked positive
pub fn rgb_to_nhwc_tensor(image: &Mat, size: i32) -> Result<Array4<f32>> {
    if image.empty() || image.channels() != 3 {
        return Err(Error::InvalidInput(format!(
            "Expected a non-empty 3-channel image, got {}x{}x{}",
            image.cols(),
            image.rows(),
            image.channels()
        )));
    }
    if size <= 0 {
        return Err(Error::InvalidInput(format!("Invalid tensor size: {size}")));
    }

    let mut resized = Mat::default();
    imgproc::resize(
        image,
        &mut resized,
        Size::new(size, size),
        0.0,
        0.0,
        InterpolationFlags::INTER_LINEAR as i32,
    )?;

    let mut float_image = Mat::default();
    resized.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

    let side = size as usize;
    let channels = 3;
    let mut data = vec![0.0f32; side * side * channels];

    for row in 0..side {
        for col in 0..side {
            let pixel = float_image.at_2d::<Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
            let base = (row * side + col) * channels;
            data[base..base + channels].copy_from_slice(&pixel.0);
        }
    }

    Array4::from_shape_vec((1, side, side, channels), data)
        .map_err(|e| Error::ModelDataFormatError(format!("Failed to create array: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC1, CV_8UC3};

    #[test]
    fn test_tensor_shape_and_range() {
        let image = Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::new(255.0, 0.0, 51.0, 0.0)).unwrap();
        let tensor = rgb_to_nhwc_tensor(&image, 32).unwrap();

        assert_eq!(tensor.shape(), &[1, 32, 32, 3]);
        assert!((tensor[[0, 10, 10, 0]] - 1.0).abs() < 1e-6);
        assert!(tensor[[0, 10, 10, 1]].abs() < 1e-6);
        assert!((tensor[[0, 10, 10, 2]] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_grayscale() {
        let image = Mat::new_rows_cols_with_default(8, 8, CV_8UC1, Scalar::all(0.0)).unwrap();
        assert!(rgb_to_nhwc_tensor(&image, 8).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(rgb_to_nhwc_tensor(&Mat::default(), 8).is_err());
    }
}
