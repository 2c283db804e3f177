use crate::types::SmoothWindow;

/// Sentrert glidende snitt.
///
/// For hver indeks snittes alle punkter i `[i-half, i+half]` som finnes i serien;
/// ved kantene krymper vinduet (ingen padding, ingen wrap). `window <= 1` er identitet.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.is_empty() {
        return values.to_vec();
    }
    let half = window / 2;
    let last = values.len() - 1;
    let mut smoothed = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let start = i.saturating_sub(half);
        let end = (i + half).min(last);
        let slice = &values[start..=end];
        let avg = slice.iter().copied().sum::<f64>() / slice.len() as f64;
        smoothed.push(avg);
    }

    smoothed
}

pub fn smooth(values: &[f64], window: SmoothWindow) -> Vec<f64> {
    moving_average(values, window.size())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_window_uses_floor_half() {
        // 4 → half=2, samme som vindu 5
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(moving_average(&xs, 4), moving_average(&xs, 5));
    }

    #[test]
    fn window_wider_than_series_is_global_mean() {
        let out = moving_average(&[2.0, 4.0], 7);
        assert_eq!(out, vec![3.0, 3.0]);
    }

    #[test]
    fn empty_stays_empty() {
        assert!(moving_average(&[], 3).is_empty());
    }
}
