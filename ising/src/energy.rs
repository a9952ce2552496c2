use crate::lattice::Lattice;

/// The four toroidal neighbors of `(x, y)`: right, left, down, up.
#[inline]
fn neighbors(x: isize, y: isize) -> [(isize, isize); 4] {
    [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
}

/// Total interaction energy of the lattice.
///
/// Every cell contributes the product of its spin with each of its four
/// neighbors, so each bond is counted once from both ends. A uniform `n x n`
/// lattice therefore has energy `4 * n^2`.
pub fn energy(lattice: &Lattice) -> i64 {
    lattice
        .sites()
        .map(|(x, y)| {
            let spin = lattice.get(x, y).value() as i64;
            neighbors(x, y)
                .iter()
                .map(|&(nx, ny)| spin * lattice.get(nx, ny).value() as i64)
                .sum::<i64>()
        })
        .sum()
}

/// Change of [`energy`] if only the spin at `(x, y)` were flipped.
///
/// Each bond touching the cell appears twice in the doubled sum, so flipping
/// the spin changes the energy by `-4 * s * h`, where `h` is the sum of the
/// neighbors. Neighbors that wrap onto the cell itself (extent 1 along an
/// axis) form `s * s` terms that never change and are left out of `h`.
pub fn flip_delta(lattice: &Lattice, x: isize, y: isize) -> i64 {
    let site = lattice.index(x, y);
    // Reduce before stepping to neighbors so `x + 1` cannot overflow.
    let (x, y) = lattice.coords(site);
    let spin = lattice.spins()[site].value() as i64;

    let field: i64 = neighbors(x, y)
        .iter()
        .filter(|&&(nx, ny)| lattice.index(nx, ny) != site)
        .map(|&(nx, ny)| lattice.get(nx, ny).value() as i64)
        .sum();

    -4 * spin * field
}

/// Unnormalized Boltzmann weight `exp(-beta * E)` of the current configuration.
///
/// Not guarded against overflow or underflow: large lattices or large
/// `|beta * E|` saturate to infinity or zero.
pub fn boltzmann_weight(lattice: &Lattice, beta: f64) -> f64 {
    (-beta * energy(lattice) as f64).exp()
}
