use crate::lattice::Lattice;
use std::fmt;
use std::io::{self, Write};

/// Write `lattice` as `height` lines of `width` characters, `+` for up and
/// `-` for down.
pub fn render<W: Write + ?Sized>(lattice: &Lattice, sink: &mut W) -> io::Result<()> {
    write!(sink, "{lattice}")
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.spins().chunks(self.width()) {
            let line: String = row.iter().map(|s| s.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
