//! Integer voxel geometry: block positions, axes, directions and boxes.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dir: Direction) -> BlockPos {
        self + dir.vector()
    }

    #[inline]
    pub fn offset_by(self, dir: Direction, n: i32) -> BlockPos {
        let v = dir.vector();
        BlockPos::new(self.x + v.x * n, self.y + v.y * n, self.z + v.z * n)
    }

    #[inline]
    pub fn up(self) -> BlockPos {
        self.offset(Direction::Up)
    }

    #[inline]
    pub fn down(self) -> BlockPos {
        self.offset(Direction::Down)
    }

    #[inline]
    pub fn up_by(self, n: i32) -> BlockPos {
        BlockPos::new(self.x, self.y + n, self.z)
    }

    /// Component along `axis`.
    #[inline]
    pub fn coord(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl Add for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn add(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for BlockPos {
    #[inline]
    fn add_assign(&mut self, rhs: BlockPos) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn sub(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for BlockPos {
    #[inline]
    fn sub_assign(&mut self, rhs: BlockPos) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

/// One of the three principal axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn is_horizontal(self) -> bool {
        !matches!(self, Axis::Y)
    }

    /// Value used for the `axis` block state property.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum AxisDirection {
    Positive,
    Negative,
}

impl AxisDirection {
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            AxisDirection::Positive => 1,
            AxisDirection::Negative => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn from_axis(axis: Axis, dir: AxisDirection) -> Direction {
        match (axis, dir) {
            (Axis::X, AxisDirection::Positive) => Direction::East,
            (Axis::X, AxisDirection::Negative) => Direction::West,
            (Axis::Y, AxisDirection::Positive) => Direction::Up,
            (Axis::Y, AxisDirection::Negative) => Direction::Down,
            (Axis::Z, AxisDirection::Positive) => Direction::South,
            (Axis::Z, AxisDirection::Negative) => Direction::North,
        }
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Direction::Down | Direction::Up => Axis::Y,
            Direction::North | Direction::South => Axis::Z,
            Direction::West | Direction::East => Axis::X,
        }
    }

    #[inline]
    pub fn axis_direction(self) -> AxisDirection {
        match self {
            Direction::Up | Direction::South | Direction::East => AxisDirection::Positive,
            Direction::Down | Direction::North | Direction::West => AxisDirection::Negative,
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Unit step for this direction.
    #[inline]
    pub fn vector(self) -> BlockPos {
        let s = self.axis_direction().sign();
        match self.axis() {
            Axis::X => BlockPos::new(s, 0, 0),
            Axis::Y => BlockPos::new(0, s, 0),
            Axis::Z => BlockPos::new(0, 0, s),
        }
    }
}

/// Inclusive integer box. `BlockBox::EMPTY` encompasses nothing and grows
/// to exactly the first position added to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockBox {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl Default for BlockBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BlockBox {
    pub const EMPTY: BlockBox = BlockBox {
        min: BlockPos::new(i32::MAX, i32::MAX, i32::MAX),
        max: BlockPos::new(i32::MIN, i32::MIN, i32::MIN),
    };

    /// Box spanning both corners regardless of their order.
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    #[inline]
    pub fn single(pos: BlockPos) -> Self {
        Self { min: pos, max: pos }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    #[inline]
    pub fn contains(&self, p: BlockPos) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn encompass(&mut self, p: BlockPos) {
        self.min = BlockPos::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = BlockPos::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn union(&self, other: &BlockBox) -> BlockBox {
        if other.is_empty() {
            return *self;
        }
        let mut out = *self;
        out.encompass(other.min);
        out.encompass(other.max);
        out
    }

    pub fn intersects(&self, other: &BlockBox) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Block count per axis; zero when empty.
    pub fn size(&self) -> (u32, u32, u32) {
        if self.is_empty() {
            return (0, 0, 0);
        }
        (
            (self.max.x - self.min.x) as u32 + 1,
            (self.max.y - self.min.y) as u32 + 1,
            (self.max.z - self.min.z) as u32 + 1,
        )
    }
}
