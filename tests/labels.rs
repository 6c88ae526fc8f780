use resobox::labels::{LabelPolicy, LabelVisibility, format_price, label_visibility};
use resobox::layout::{LayoutParams, Projection, build_layout};
use resobox::model::{BoxSequence, InstrumentId, PriceBox};
use resobox::ranking::{RankedSequence, rank};

fn ranked(values: &[f64]) -> RankedSequence {
    rank(&BoxSequence::new(
        "2026-01-10T12:00:00Z",
        values.iter().map(|&v| PriceBox::new(1.2, 1.1, v)).collect(),
    ))
}

fn visibility(values: &[f64], matches: &[bool]) -> Vec<LabelVisibility> {
    let r = ranked(values);
    build_layout(&r, Projection::TwoD, &LayoutParams::default())
        .iter()
        .map(|n| {
            let m = matches.get(n.index).copied().unwrap_or(false);
            label_visibility(n, &r, m, &LabelPolicy::default())
        })
        .collect()
}

const BOTH: LabelVisibility = LabelVisibility {
    show_high: true,
    show_low: true,
};

#[test]
fn root_shows_both_labels() {
    assert_eq!(visibility(&[5.0], &[]), vec![BOTH]);
    assert_eq!(visibility(&[-5.0], &[]), vec![BOTH]);
}

#[test]
fn consecutive_positive_hides_high() {
    let v = visibility(&[5.0, 3.0], &[]);
    assert_eq!(
        v[1],
        LabelVisibility {
            show_high: false,
            show_low: true
        }
    );
}

#[test]
fn consecutive_negative_hides_low() {
    let v = visibility(&[-5.0, -3.0], &[]);
    assert_eq!(
        v[1],
        LabelVisibility {
            show_high: true,
            show_low: false
        }
    );
}

#[test]
fn flip_shows_only_its_own_side() {
    let v = visibility(&[5.0, -3.0, 2.0], &[]);
    assert_eq!(
        v[1],
        LabelVisibility {
            show_high: false,
            show_low: true
        }
    );
    assert_eq!(
        v[2],
        LabelVisibility {
            show_high: true,
            show_low: false
        }
    );
}

#[test]
fn consecutive_same_sign_never_share_a_side() {
    let values = [9.0, 8.0, 7.0, -6.0, -5.0, -4.0, 3.0, -2.0, -1.0];
    let r = ranked(&values);
    let v = visibility(&values, &[]);
    for i in 1..r.len() {
        let (a, b) = (r.boxes[i - 1].value, r.boxes[i].value);
        if a > 0.0 && b > 0.0 {
            assert!(!(v[i - 1].show_high && v[i].show_high), "high shared at {}", i);
        }
        if a < 0.0 && b < 0.0 {
            assert!(!(v[i - 1].show_low && v[i].show_low), "low shared at {}", i);
        }
    }
}

#[test]
fn long_sequences_label_only_root_and_flips() {
    // 19 boxes: above the default threshold of 18.
    let values: Vec<f64> = (0..19)
        .map(|i| {
            let m = 20.0 - i as f64;
            if i == 5 { -m } else { m }
        })
        .collect();
    let v = visibility(&values, &[]);
    assert_eq!(v[0], BOTH);
    for (i, vis) in v.iter().enumerate().skip(1) {
        let flip = i == 5 || i == 6;
        assert_eq!(vis.show_high || vis.show_low, flip, "index {}", i);
    }
}

#[test]
fn eighteen_boxes_are_not_limited() {
    let values: Vec<f64> = (0..18).map(|i| if i % 2 == 0 { 30.0 - i as f64 } else { -(30.0 - i as f64) }).collect();
    let v = visibility(&values, &[]);
    assert!(v.iter().all(|x| x.show_high || x.show_low));
}

#[test]
fn signal_match_overrides_every_suppression() {
    let values: Vec<f64> = (0..20).map(|i| 40.0 - i as f64).collect();
    let mut matches = vec![false; 20];
    matches[7] = true;
    let v = visibility(&values, &matches);
    assert_eq!(v[7], BOTH);
    assert!(!v[8].show_high && !v[8].show_low);
}

#[test]
fn price_text_follows_instrument() {
    let jpy = InstrumentId::new("usdjpy").unwrap();
    let eur = InstrumentId::new("EURUSD").unwrap();
    let btc = InstrumentId::new("BTCXAU").unwrap();
    assert_eq!(format_price(&jpy, 151.2345), "151.23");
    assert_eq!(format_price(&eur, 1.0842), "1.08420");
    assert_eq!(format_price(&btc, 0.5), "0.50000000");
}
