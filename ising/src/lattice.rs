use crate::error::IsingError;
use itertools::iproduct;
use serde::Deserialize;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// A single Ising spin: +1 (`Up`) or -1 (`Down`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum Spin {
    Up = 1,
    Down = -1,
}

impl Spin {
    /// Numeric value of the spin, +1 or -1
    #[inline]
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Character used when rendering a lattice
    pub fn symbol(self) -> char {
        match self {
            Spin::Up => '+',
            Spin::Down => '-',
        }
    }
}

impl Neg for Spin {
    type Output = Spin;

    #[inline]
    fn neg(self) -> Spin {
        match self {
            Spin::Up => Spin::Down,
            Spin::Down => Spin::Up,
        }
    }
}

impl FromStr for Spin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "+" | "+1" | "1" => Ok(Spin::Up),
            "down" | "-" | "-1" => Ok(Spin::Down),
            _ => Err(format!("unknown spin '{s}', expected 'up' or 'down'")),
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spin::Up => write!(f, "up"),
            Spin::Down => write!(f, "down"),
        }
    }
}

/// Rectangular grid of spins with periodic (toroidal) wrap-around.
///
/// Cells live in one flat row-major buffer: cell `(x, y)` is stored at
/// `y * width + x`. Any integer coordinate is valid; both axes are reduced
/// with a true modulo, so `(-1, 0)` is the last cell of the first row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    width: usize,
    height: usize,
    spins: Vec<Spin>,
}

impl Lattice {
    /// Allocate a `width x height` lattice with every spin `Up`.
    pub fn new(width: usize, height: usize) -> Result<Self, IsingError> {
        if width == 0 || height == 0 {
            return Err(IsingError::InvalidDimensions { width, height });
        }

        // Coordinates are reduced as isize, so both extents and the cell
        // count have to fit in one.
        let cells = width
            .checked_mul(height)
            .filter(|&cells| isize::try_from(cells).is_ok())
            .ok_or(IsingError::Allocation { width, height })?;

        let mut spins = Vec::new();
        spins
            .try_reserve_exact(cells)
            .map_err(|_| IsingError::Allocation { width, height })?;
        spins.resize(cells, Spin::Up);

        Ok(Self {
            width,
            height,
            spins,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`)
    pub fn len(&self) -> usize {
        self.spins.len()
    }

    /// Always false: a lattice has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    /// Row-major view of every spin
    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    /// Flat buffer index of `(x, y)` after periodic reduction.
    #[inline]
    pub fn index(&self, x: isize, y: isize) -> usize {
        let x = x.rem_euclid(self.width as isize) as usize;
        let y = y.rem_euclid(self.height as isize) as usize;
        y * self.width + x
    }

    /// Canonical coordinates of a flat buffer index.
    #[inline]
    pub fn coords(&self, index: usize) -> (isize, isize) {
        ((index % self.width) as isize, (index / self.width) as isize)
    }

    /// Canonical coordinates of every cell in row-major order.
    pub fn sites(&self) -> impl Iterator<Item = (isize, isize)> {
        iproduct!(0..self.height as isize, 0..self.width as isize).map(|(y, x)| (x, y))
    }

    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Spin {
        self.spins[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: isize, y: isize, spin: Spin) {
        let i = self.index(x, y);
        self.spins[i] = spin;
    }

    /// Negate the spin at `(x, y)`.
    #[inline]
    pub fn flip(&mut self, x: isize, y: isize) {
        let i = self.index(x, y);
        self.spins[i] = -self.spins[i];
    }

    /// Set every cell to `spin` (uniform ground state).
    pub fn fill(&mut self, spin: Spin) {
        self.spins.fill(spin);
    }

    /// Negate every spin at once.
    pub fn flip_all(&mut self) {
        for spin in &mut self.spins {
            *spin = -*spin;
        }
    }

    /// Sum of all spins
    pub fn magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s.value() as i64).sum()
    }
}
