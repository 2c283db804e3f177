use neonweight_core::smoothing::{moving_average, smooth};
use neonweight_core::types::SmoothWindow;
use proptest::prelude::*;

#[test]
fn boundary_shrink_window_3() {
    let out = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert_eq!(out, vec![1.5, 2.0, 3.0, 4.0, 4.5]);
}

#[test]
fn window_5_edges_use_fewer_points() {
    let out = smooth(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0], SmoothWindow::new(5).unwrap());
    // i=0: (10+20+30)/3, i=1: (10..40)/4, i=2: (10..50)/5
    assert_eq!(out[0], 20.0);
    assert_eq!(out[1], 25.0);
    assert_eq!(out[2], 30.0);
    assert_eq!(out[5], 50.0);
}

#[test]
fn outlier_is_damped() {
    let out = moving_average(&[200.0, 260.0, 200.0], 3);
    assert!(out[1] < 240.0);
}

proptest! {
    #[test]
    fn window_one_is_identity(xs in prop::collection::vec(-1e6f64..1e6, 0..64)) {
        prop_assert_eq!(smooth(&xs, SmoothWindow::OFF), xs);
    }

    #[test]
    fn smoothing_keeps_length(
        xs in prop::collection::vec(0.0f64..500.0, 0..64),
        w in prop::sample::select(vec![1u8, 3, 5, 7]),
    ) {
        let win = SmoothWindow::new(w).unwrap();
        prop_assert_eq!(smooth(&xs, win).len(), xs.len());
    }
}
