//! Integration tests for the shape table and second-hand cache

use embedded_graphics::{prelude::*, primitives::Rectangle};
use tickface::{
    cache::{build_second_cache, CLIP_MARGIN},
    config::{DisplayConfig, FaceConfig},
    geometry::{build_shape_table, Shape},
    layout::FaceLayout,
    rotation::{rotate, rotate_polygon, second_angle},
};

fn inside(area: &Rectangle, p: Point) -> bool {
    area.contains(p)
}

fn shrink(area: &Rectangle, by: u32) -> Rectangle {
    area.offset(-(by as i32))
}

#[test]
fn clip_contains_hand_and_circle_for_many_radii() {
    for radius in (24..=240).step_by(7) {
        let table = build_shape_table(radius);
        let center = Point::new(radius as i32, radius as i32);
        let cache = build_second_cache(&table, center);

        for (s, entry) in cache.entries().iter().enumerate() {
            let inner = shrink(&entry.clip, CLIP_MARGIN);
            let circle = entry.circle_bounds();

            assert!(
                inside(&inner, circle.top_left) && inside(&inner, circle.bottom_right().unwrap()),
                "circle escaped at radius {} second {}",
                radius,
                s
            );
            for p in &entry.polygon[..2] {
                assert!(inside(&inner, *p), "tail escaped at radius {} second {}", radius, s);
            }
            for p in &entry.polygon[2..] {
                assert!(inside(&entry.clip, *p), "tip escaped at radius {} second {}", radius, s);
            }
        }
    }
}

#[test]
fn noon_circle_is_offset_plus_center() {
    let layout = FaceLayout::from_config(&FaceConfig::default()).unwrap();
    let offset = layout.shapes().second_circle();

    assert_eq!(layout.radius(), 130);
    assert_eq!(offset, Point::new(0, -104));
    assert_eq!(layout.second(0).circle, offset + Point::new(130, 130));
    assert_eq!(layout.second(0).circle_radius, 8);
}

#[test]
fn cache_matches_live_rotation() {
    let table = build_shape_table(130);
    let center = Point::new(130, 130);
    let cache = build_second_cache(&table, center);

    for s in 0..60u8 {
        let angle = second_angle(s);
        let entry = cache.get(s);
        assert_eq!(entry.polygon, rotate_polygon(&table.corners(Shape::Second), angle, center));
        assert_eq!(entry.circle, rotate(table.second_circle(), angle, center));
    }
}

#[test]
fn non_square_screen_uses_smaller_side() {
    let config = FaceConfig::default().with_display(DisplayConfig::new(320, 240));
    let layout = FaceLayout::from_config(&config).unwrap();

    assert_eq!(layout.radius(), 120);
    assert_eq!(layout.center(), Point::new(160, 120));
    for entry in layout.seconds().entries() {
        assert!(layout.bounds().contains(entry.clip.top_left));
        assert!(layout.bounds().contains(entry.clip.bottom_right().unwrap()));
    }
}

#[test]
fn rebuilding_is_deterministic() {
    let a = FaceLayout::from_config(&FaceConfig::default()).unwrap();
    let b = FaceLayout::from_config(&FaceConfig::default()).unwrap();
    assert_eq!(a.seconds(), b.seconds());
    assert_eq!(a.shapes(), b.shapes());
}
