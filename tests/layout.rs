use resobox::corner::Corner;
use resobox::geometry::Vec3;
use resobox::layout::{LayoutParams, Position, Projection, build_layout, default_decay_3d};
use resobox::model::{BoxSequence, Polarity, PriceBox};
use resobox::ranking::rank;

const TOL: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOL
}

fn ranked(values: &[f64]) -> resobox::ranking::RankedSequence {
    rank(&BoxSequence::new(
        "2026-01-10T12:00:00Z",
        values.iter().map(|&v| PriceBox::new(1.1, 1.0, v)).collect(),
    ))
}

#[test]
fn empty_sequence_yields_no_nodes() {
    for p in [Projection::TwoD, Projection::ThreeD] {
        assert!(build_layout(&ranked(&[]), p, &LayoutParams::default()).is_empty());
    }
}

#[test]
fn single_box_is_root_at_origin() {
    for p in [Projection::TwoD, Projection::ThreeD] {
        let nodes = build_layout(&ranked(&[-4.0]), p, &LayoutParams::with_base_size(10.0));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].corner, Corner::Upper);
        assert!(nodes[0].position.is_origin());
        assert!(nodes[0].offset.is_origin());
        assert!(close(nodes[0].size, 10.0));
        assert_eq!(nodes[0].polarity, Polarity::Negative);
    }
}

#[test]
fn three_box_scenario_2d() {
    let nodes = build_layout(
        &ranked(&[5.0, 3.0, -2.0]),
        Projection::TwoD,
        &LayoutParams::with_base_size(12.0),
    );
    let vals: Vec<f64> = nodes.iter().map(|n| n.price_box.value).collect();
    assert_eq!(vals, vec![5.0, 3.0, -2.0]);

    assert!(close(nodes[0].size, 12.0));
    assert_eq!(nodes[0].corner, Corner::Upper);

    assert!(close(nodes[1].size, 12.0 * 0.86));
    assert_eq!(nodes[1].corner, Corner::Upper);
    assert!(!nodes[1].is_first_different);

    assert!(close(nodes[2].size, 12.0 * 0.86 * 0.86));
    assert_eq!(nodes[2].corner, Corner::Upper);
    assert!(nodes[2].is_first_different);
}

#[test]
fn sizes_decay_geometrically_and_stay_positive() {
    let params = LayoutParams::with_base_size(12.0);
    let values: Vec<f64> = (1..=40).map(|i| i as f64 * if i % 3 == 0 { -1.0 } else { 1.0 }).collect();
    for (p, decay) in [(Projection::TwoD, 0.86), (Projection::ThreeD, default_decay_3d())] {
        let nodes = build_layout(&ranked(&values), p, &params);
        for (i, n) in nodes.iter().enumerate() {
            assert!(close(n.size, 12.0 * decay.powi(i as i32)));
            assert!(n.size > 0.0);
            if i > 0 {
                assert!(n.size < nodes[i - 1].size);
            }
        }
    }
}

#[test]
fn planar_children_touch_the_chosen_parent_corner() {
    let values = [9.0, 8.0, -7.0, -6.0, 5.0, -4.0, 3.0, 2.0, -1.0];
    let nodes = build_layout(&ranked(&values), Projection::TwoD, &LayoutParams::default());
    for w in nodes.windows(2) {
        let (parent, child) = (&w[0], &w[1]);
        let pr = parent.rect().unwrap();
        let cr = child.rect().unwrap();
        assert!(pr.contains_rect(&cr));
        let (pc, cc) = match child.corner {
            Corner::Upper => (pr.top_right(), cr.top_right()),
            Corner::Lower => (pr.bottom_right(), cr.bottom_right()),
        };
        assert!(close(pc.x, cc.x) && close(pc.y, cc.y), "child {} not flush", child.index);
    }
}

#[test]
fn lower_corner_in_2d_is_bottom_right() {
    // -5 then -3: same negative run, so the child sits bottom-right.
    let nodes = build_layout(&ranked(&[-5.0, -3.0]), Projection::TwoD, &LayoutParams::with_base_size(10.0));
    assert_eq!(nodes[1].corner, Corner::Lower);
    let slack = 10.0 - 8.6;
    let off = nodes[1].offset.as_planar().unwrap();
    assert!(close(off.x, slack) && close(off.y, slack));
}

#[test]
fn spatial_children_touch_corner_within_epsilon() {
    let params = LayoutParams::default();
    let values = [9.0, -8.0, -7.0, 6.0, 5.0, -4.0];
    let nodes = build_layout(&ranked(&values), Projection::ThreeD, &params);
    for w in nodes.windows(2) {
        let (parent, child) = (&w[0], &w[1]);
        let pa = parent.aabb().unwrap();
        let ca = child.aabb().unwrap();
        let (pc, cc) = match child.corner {
            Corner::Upper => (pa.upper_corner(), ca.upper_corner()),
            Corner::Lower => (pa.lower_corner(), ca.lower_corner()),
        };
        let gap = Vec3::new(cc.x - pc.x, cc.y - pc.y, cc.z - pc.z).length();
        assert!((gap - params.epsilon_3d).abs() < 1e-9, "gap {} at {}", gap, child.index);
    }
}

#[test]
fn spatial_offset_direction_follows_corner() {
    let nodes = build_layout(&ranked(&[5.0, -3.0, -1.0]), Projection::ThreeD, &LayoutParams::default());
    // -3 after +5 is a flip driven by the positive predecessor.
    let up = nodes[1].offset.as_spatial().unwrap();
    assert_eq!(nodes[1].corner, Corner::Upper);
    assert!(up.x > 0.0 && up.y > 0.0 && up.z > 0.0);
    // -1 after -3 continues the negative run.
    let down = nodes[2].offset.as_spatial().unwrap();
    assert_eq!(nodes[2].corner, Corner::Lower);
    assert!(down.x > 0.0 && down.y < 0.0 && down.z > 0.0);
    // Absolute positions accumulate offsets.
    let p2 = nodes[2].position.as_spatial().unwrap();
    assert!(close(p2.x, up.x + down.x) && close(p2.y, up.y + down.y));
}

#[test]
fn zero_offset_skips_epsilon() {
    // Decay of 1 keeps every cube the same size: the raw offset is zero.
    let params = LayoutParams {
        decay_3d: 1.0,
        ..LayoutParams::default()
    };
    let nodes = build_layout(&ranked(&[2.0, 1.0]), Projection::ThreeD, &params);
    assert_eq!(nodes[1].offset, Position::Spatial(Vec3::ZERO));
    assert!(nodes[1].position.is_origin());
}

#[test]
fn both_projections_share_corner_decisions() {
    let values = [4.0, -3.5, 3.0, 2.5, -2.0, -1.5, 0.0, 1.0];
    let a = build_layout(&ranked(&values), Projection::TwoD, &LayoutParams::default());
    let b = build_layout(&ranked(&values), Projection::ThreeD, &LayoutParams::default());
    let flags = |v: &[resobox::layout::LayoutNode]| {
        v.iter().map(|n| (n.corner, n.is_first_different)).collect::<Vec<_>>()
    };
    assert_eq!(flags(&a), flags(&b));
}
