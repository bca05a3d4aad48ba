//! Synthetic band data generators.
//!
//! These generators create predictable, verifiable raster patterns that can
//! be used to check resampling results pixel by pixel.

/// Creates a band with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// # Example
///
/// ```
/// use test_utils::create_index_band;
///
/// let data = create_index_band(10, 5);
/// assert_eq!(data.len(), 50);
/// assert_eq!(data[1], 1000.0);  // col=1, row=0
/// assert_eq!(data[10], 1.0);    // col=0, row=1
/// ```
pub fn create_index_band(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a constant band.
pub fn create_constant_band(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Replaces every `step`-th sample with `no_data`.
///
/// # Example
///
/// ```
/// use test_utils::with_no_data_holes;
///
/// let data = with_no_data_holes(vec![1.0; 6], 3, -999.0);
/// assert_eq!(data, vec![-999.0, 1.0, 1.0, -999.0, 1.0, 1.0]);
/// ```
pub fn with_no_data_holes(mut data: Vec<f32>, step: usize, no_data: f32) -> Vec<f32> {
    if step == 0 {
        return data;
    }
    for value in data.iter_mut().step_by(step) {
        *value = no_data;
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_band() {
        let data = create_index_band(3, 2);
        assert_eq!(data, vec![0.0, 1000.0, 2000.0, 1.0, 1001.0, 2001.0]);
    }

    #[test]
    fn test_constant_band() {
        assert!(create_constant_band(5, 5, 7.0).iter().all(|&v| v == 7.0));
    }

    #[test]
    fn test_no_data_holes_zero_step() {
        assert_eq!(with_no_data_holes(vec![1.0, 2.0], 0, -1.0), vec![1.0, 2.0]);
    }
}
