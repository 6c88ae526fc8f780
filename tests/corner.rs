use resobox::corner::{Corner, is_sign_flip, resolve_corner, resolve_corner_by_fallback};
use resobox::model::PriceBox;

fn b(v: f64) -> PriceBox {
    PriceBox::new(1.0, 0.0, v)
}

#[test]
fn root_is_upper_and_not_a_flip() {
    for v in [3.0, -3.0, 0.0] {
        let r = resolve_corner(&b(v), None);
        assert_eq!(r.corner, Corner::Upper);
        assert!(!r.is_first_different);
    }
}

#[test]
fn same_sign_follows_current() {
    let r = resolve_corner(&b(2.0), Some(&b(5.0)));
    assert_eq!(r.corner, Corner::Upper);
    assert!(!r.is_first_different);

    let r = resolve_corner(&b(-2.0), Some(&b(-5.0)));
    assert_eq!(r.corner, Corner::Lower);
    assert!(!r.is_first_different);
}

#[test]
fn flip_follows_predecessor() {
    let r = resolve_corner(&b(-2.0), Some(&b(5.0)));
    assert_eq!(r.corner, Corner::Upper);
    assert!(r.is_first_different);

    let r = resolve_corner(&b(2.0), Some(&b(-5.0)));
    assert_eq!(r.corner, Corner::Lower);
    assert!(r.is_first_different);
}

#[test]
fn zero_never_flips() {
    assert!(!is_sign_flip(0.0, 4.0));
    assert!(!is_sign_flip(-4.0, 0.0));
    let r = resolve_corner(&b(0.0), Some(&b(-4.0)));
    assert!(!r.is_first_different);
    assert_eq!(r.corner, Corner::Upper);
    let r = resolve_corner(&b(-1.0), Some(&b(0.0)));
    assert!(!r.is_first_different);
    assert_eq!(r.corner, Corner::Lower);
}

#[test]
fn both_phrasings_agree_on_every_sign_pair() {
    let samples = [-3.5, -1.0, -0.00001, 0.0, 0.00001, 1.0, 3.5];
    for _ in 0..3 {
        for &cur in &samples {
            assert_eq!(
                resolve_corner(&b(cur), None),
                resolve_corner_by_fallback(&b(cur), None)
            );
            for &prev in &samples {
                assert_eq!(
                    resolve_corner(&b(cur), Some(&b(prev))),
                    resolve_corner_by_fallback(&b(cur), Some(&b(prev))),
                    "cur={} prev={}",
                    cur,
                    prev
                );
            }
        }
    }
}
