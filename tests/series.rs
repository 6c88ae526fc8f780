use resobox::geometry::Vec2;
use resobox::model::{BoxSequence, PriceBox};
use resobox::series::line_series;

#[test]
fn normalizes_both_bounds_to_one_scale() {
    let seq = BoxSequence::new(
        "2026-01-10T12:00:00Z",
        vec![
            PriceBox::new(4.0, 2.0, 1.0),
            PriceBox::new(3.0, 0.0, -1.0),
            PriceBox::new(2.0, 1.0, 0.5),
        ],
    );
    let s = line_series(&seq, 100.0, 40.0);
    assert_eq!(s.high, vec![Vec2::new(0.0, 0.0), Vec2::new(50.0, 10.0), Vec2::new(100.0, 20.0)]);
    assert_eq!(s.low, vec![Vec2::new(0.0, 20.0), Vec2::new(50.0, 40.0), Vec2::new(100.0, 30.0)]);
}

#[test]
fn degenerate_inputs_stay_finite() {
    assert!(line_series(&BoxSequence::default(), 10.0, 10.0).high.is_empty());

    let one = BoxSequence::new("t", vec![PriceBox::new(1.0, 1.0, 0.0)]);
    let s = line_series(&one, 80.0, 20.0);
    assert_eq!(s.high, vec![Vec2::new(0.0, 10.0)]);
    assert_eq!(s.low, vec![Vec2::new(0.0, 10.0)]);
}
