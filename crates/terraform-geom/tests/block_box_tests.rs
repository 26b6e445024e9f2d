use terraform_geom::{Axis, AxisDirection, BlockBox, BlockPos, Direction};

#[test]
fn block_pos_constants_and_steps() {
    let p = BlockPos::new(3, 64, -2);
    assert_eq!(p.up(), BlockPos::new(3, 65, -2));
    assert_eq!(p.down(), BlockPos::new(3, 63, -2));
    assert_eq!(p.offset(Direction::East), BlockPos::new(4, 64, -2));
    assert_eq!(p.offset(Direction::North), BlockPos::new(3, 64, -3));
    assert_eq!(p.offset_by(Direction::West, 5), BlockPos::new(-2, 64, -2));
    assert_eq!(BlockPos::ORIGIN, BlockPos::default());
}

#[test]
fn direction_from_axis_covers_horizontal_plane() {
    let east = Direction::from_axis(Axis::X, AxisDirection::Positive);
    let north = Direction::from_axis(Axis::Z, AxisDirection::Negative);
    assert_eq!(east, Direction::East);
    assert_eq!(north, Direction::North);
    for d in Direction::HORIZONTAL {
        assert!(d.axis().is_horizontal());
        assert_eq!(d.vector().y, 0);
    }
    assert!(!Axis::Y.is_horizontal());
    assert_eq!(Axis::Z.as_str(), "z");
}

#[test]
fn empty_box_grows_to_first_point() {
    let mut b = BlockBox::EMPTY;
    assert!(b.is_empty());
    assert_eq!(b.size(), (0, 0, 0));
    let p = BlockPos::new(5, 6, 7);
    b.encompass(p);
    assert!(!b.is_empty());
    assert_eq!(b, BlockBox::single(p));
    b.encompass(BlockPos::new(1, 10, 7));
    assert_eq!(b.min, BlockPos::new(1, 6, 7));
    assert_eq!(b.max, BlockPos::new(5, 10, 7));
    assert_eq!(b.size(), (5, 5, 1));
}

#[test]
fn box_new_orders_corners() {
    let b = BlockBox::new(BlockPos::new(4, 0, -1), BlockPos::new(-4, 8, 3));
    assert_eq!(b.min, BlockPos::new(-4, 0, -1));
    assert_eq!(b.max, BlockPos::new(4, 8, 3));
    assert!(b.contains(BlockPos::new(0, 4, 0)));
    assert!(!b.contains(BlockPos::new(5, 4, 0)));
}

#[test]
fn union_and_intersection() {
    let a = BlockBox::new(BlockPos::new(0, 0, 0), BlockPos::new(3, 3, 3));
    let b = BlockBox::new(BlockPos::new(3, 3, 3), BlockPos::new(6, 6, 6));
    let c = BlockBox::new(BlockPos::new(7, 7, 7), BlockPos::new(8, 8, 8));
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
    assert!(!a.intersects(&BlockBox::EMPTY));
    let u = a.union(&c);
    assert_eq!(u.min, a.min);
    assert_eq!(u.max, c.max);
    assert_eq!(a.union(&BlockBox::EMPTY), a);
}
