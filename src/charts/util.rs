use plotters::style::RGBColor;

/// Bucket non-negative values into `bin_count` equal-width bins over
/// `[0, max]`. Returns the bin width and the counts.
pub(crate) fn histogram_bins(values: &[f64], bin_count: usize) -> (f64, Vec<u32>) {
    let max = values.iter().copied().fold(0.0f64, f64::max);
    let width = if max > 0.0 {
        max / bin_count as f64
    } else {
        1.0
    };
    let mut counts = vec![0u32; bin_count];
    for &value in values {
        let index = ((value / width) as usize).min(bin_count - 1);
        counts[index] += 1;
    }
    (width, counts)
}

/// Cool-to-warm ramp: blue at 0, red at 1.
pub(crate) fn heat_color(normalized: f64) -> RGBColor {
    let t = normalized.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    RGBColor(lerp(59, 180), lerp(76, 4), lerp(192, 38))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_the_range() {
        let (width, counts) = histogram_bins(&[0.0, 1.0, 2.0, 3.9, 4.0], 4);
        assert_eq!(width, 1.0);
        // Max value lands in the last bin, not one past it.
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(counts.iter().sum::<u32>(), 5);
    }

    #[test]
    fn empty_values_give_empty_bins() {
        let (width, counts) = histogram_bins(&[], 4);
        assert_eq!(width, 1.0);
        assert_eq!(counts.iter().sum::<u32>(), 0);
    }

    #[test]
    fn heat_color_endpoints() {
        assert_eq!(heat_color(0.0), RGBColor(59, 76, 192));
        assert_eq!(heat_color(1.0), RGBColor(180, 4, 38));
        assert_eq!(heat_color(-1.0), heat_color(0.0));
        assert_eq!(heat_color(2.0), heat_color(1.0));
    }
}
