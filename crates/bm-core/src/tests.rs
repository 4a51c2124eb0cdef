//! Unit tests for bm-core primitives.

#[cfg(test)]
mod ids {
    use crate::NodeId;

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoBox, GeoPoint};

    #[test]
    fn planar_distance_ignores_latitude_scaling() {
        let a = GeoPoint::new(-122.0, 60.0);
        let b = GeoPoint::new(-121.0, 60.0);
        let c = GeoPoint::new(-122.0, 61.0);
        // One degree east and one degree north are equidistant in degree space.
        assert_eq!(a.planar_distance_2(b), a.planar_distance_2(c));
        assert_eq!(a.planar_distance_2(b), 1.0);
    }

    #[test]
    fn box_containment() {
        let outer = GeoBox::new(-1.0, 1.0, 1.0, -1.0);
        let inner = GeoBox::new(-0.5, 0.5, 0.5, -0.5);
        assert!(outer.contains_box(&inner));
        assert!(!inner.contains_box(&outer));
        assert!(outer.contains_box(&outer));
        assert!(outer.contains_point(GeoPoint::new(0.0, 0.0)));
        assert!(!outer.contains_point(GeoPoint::new(2.0, 0.0)));
    }

    #[test]
    fn box_intersection() {
        let a = GeoBox::new(0.0, 1.0, 1.0, 0.0);
        let touching = GeoBox::new(1.0, 1.0, 2.0, 0.0);
        let apart = GeoBox::new(1.5, 1.0, 2.0, 0.0);
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
        assert_eq!(a.width(), 1.0);
        assert_eq!(a.height(), 1.0);
    }
}

#[cfg(test)]
mod extent {
    use crate::{BmError, WorldExtent};

    #[test]
    fn berkeley_is_valid() {
        assert!(WorldExtent::BERKELEY.validate().is_ok());
        assert_eq!(WorldExtent::default(), WorldExtent::BERKELEY);
    }

    #[test]
    fn rejects_inverted_corners() {
        let e = WorldExtent::new(1.0, 1.0, 0.0, 0.0, 256, 7);
        assert!(matches!(e, Err(BmError::Config(_))));
        let e = WorldExtent::new(0.0, 0.0, 1.0, 1.0, 256, 7);
        assert!(matches!(e, Err(BmError::Config(_))));
    }

    #[test]
    fn rejects_zero_tile_and_deep_pyramid() {
        assert!(WorldExtent::new(0.0, 1.0, 1.0, 0.0, 0, 7).is_err());
        assert!(WorldExtent::new(0.0, 1.0, 1.0, 0.0, 256, 31).is_err());
        assert!(WorldExtent::new(0.0, 1.0, 1.0, 0.0, 256, 30).is_ok());
    }

    #[test]
    fn rejects_nan() {
        assert!(WorldExtent::new(f64::NAN, 1.0, 1.0, 0.0, 256, 7).is_err());
    }

    #[test]
    fn grid_lines_hit_world_corners_exactly() {
        let w = WorldExtent::BERKELEY;
        for depth in 0..=w.max_depth {
            let n = w.tiles_per_side(depth);
            assert_eq!(w.grid_lon(depth, 0), w.ul_lon);
            assert_eq!(w.grid_lon(depth, n), w.lr_lon);
            assert_eq!(w.grid_lat(depth, 0), w.ul_lat);
            assert_eq!(w.grid_lat(depth, n), w.lr_lat);
        }
    }

    #[test]
    fn dpp_halves_per_depth() {
        let w = WorldExtent::BERKELEY;
        for depth in 0..w.max_depth {
            let ratio = w.lon_dpp(depth) / w.lon_dpp(depth + 1);
            assert!((ratio - 2.0).abs() < 1e-12);
        }
        assert_eq!(w.tiles_per_side(7), 128);
    }
}
