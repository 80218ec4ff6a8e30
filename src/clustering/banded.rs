//! The shared 1-D banded clustering algorithm.
//!
//! Used by the chronic, occurrence, resonance-hub, and dissonance-hub
//! passes: sort the values, take the mean consecutive gap as the
//! threshold, and cut a new band wherever a gap exceeds it. The band
//! radius is the largest gap observed inside the band.

/// One contiguous band of the sorted value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// Indices into the caller's value slice, in ascending value order.
    pub members: Vec<usize>,
    /// Maximum gap observed within the band, in `[0, 1]` for unit-interval
    /// inputs.
    pub radius: f64,
}

/// Band `values` by mean-gap thresholding. Fewer than two values produce
/// no bands.
///
/// The walk stops before the final sorted element, so that element is
/// dropped from the last band unless `include_trailing` is set; an
/// element whose following gap exceeds the threshold is likewise dropped
/// rather than closing its band. Both behaviours match the historical
/// algorithm that every downstream consumer is calibrated against.
pub fn band_values(values: &[f64], include_trailing: bool) -> Vec<Band> {
    let n = values.len();
    if n < 2 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let threshold = mean_consecutive_gap(values, &order);

    let mut bands = Vec::new();
    let mut current = Band {
        members: Vec::new(),
        radius: 0.0,
    };

    for i in 0..n - 1 {
        let gap = (values[order[i + 1]] - values[order[i]]).abs();
        if gap > threshold {
            if !current.members.is_empty() {
                bands.push(current);
            }
            current = Band {
                members: Vec::new(),
                radius: 0.0,
            };
        } else {
            current.members.push(order[i]);
            if gap > current.radius {
                current.radius = gap;
            }
        }
    }

    if include_trailing {
        let gap = (values[order[n - 1]] - values[order[n - 2]]).abs();
        if gap <= threshold && gap > current.radius {
            current.radius = gap;
        }
        current.members.push(order[n - 1]);
    }

    if !current.members.is_empty() {
        bands.push(current);
    }
    bands
}

fn mean_consecutive_gap(values: &[f64], order: &[usize]) -> f64 {
    let mut total = 0.0;
    for i in 0..order.len() - 1 {
        total += (values[order[i + 1]] - values[order[i]]).abs();
    }
    total / (order.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_two_values_yield_no_bands() {
        assert!(band_values(&[], false).is_empty());
        assert!(band_values(&[0.5], false).is_empty());
    }

    #[test]
    fn two_separated_groups_split_into_two_bands() {
        // Gaps: 0.1 0.1 0.6 0.1 0.1, threshold = 0.2.
        let values = [0.0, 0.1, 0.2, 0.8, 0.9, 1.0];
        let bands = band_values(&values, false);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].members, vec![0, 1]);
        assert_eq!(bands[1].members, vec![3, 4]);
        assert!((bands[0].radius - 0.1).abs() < 1e-12);
    }

    #[test]
    fn trailing_element_is_dropped_by_default() {
        let values = [0.0, 0.1, 0.2, 0.8, 0.9, 1.0];
        let bands = band_values(&values, false);
        let all: Vec<usize> = bands.iter().flat_map(|b| b.members.clone()).collect();
        assert!(!all.contains(&5));
    }

    #[test]
    fn trailing_element_joins_the_last_band_when_enabled() {
        let values = [0.0, 0.1, 0.2, 0.8, 0.9, 1.0];
        let bands = band_values(&values, true);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[1].members, vec![3, 4, 5]);
    }

    #[test]
    fn uniform_values_form_one_band() {
        // All gaps are zero, threshold is zero, nothing exceeds it.
        let values = [0.5, 0.5, 0.5, 0.5];
        let bands = band_values(&values, false);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].members.len(), 3);
        assert_eq!(bands[0].radius, 0.0);
    }

    #[test]
    fn ties_keep_input_order() {
        let values = [0.3, 0.3, 0.3];
        let bands = band_values(&values, false);
        assert_eq!(bands[0].members, vec![0, 1]);
    }

    #[test]
    fn radius_tracks_the_largest_in_band_gap() {
        // Gaps: 0.04 0.08 0.5; threshold = 0.62 / 3 ≈ 0.2067.
        let values = [0.10, 0.14, 0.22, 0.72];
        let bands = band_values(&values, false);
        assert_eq!(bands.len(), 1);
        assert!((bands[0].radius - 0.08).abs() < 1e-12);
    }
}
