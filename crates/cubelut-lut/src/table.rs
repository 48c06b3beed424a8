//! In-memory 3D lookup table.
//!
//! A [`LutTable`] is a cube of `size^3` RGB output values. It is built once,
//! by the cube parser or one of the constructors here, and never mutated
//! afterwards, so a single table can be shared by reference across threads.

use crate::{Domain, Interpolation, LutError, LutResult};

/// Smallest supported lattice resolution.
pub const MIN_SIZE: usize = 2;

/// Largest supported lattice resolution.
pub const MAX_SIZE: usize = 256;

/// An immutable 3D LUT.
///
/// # Layout
///
/// Entries are indexed `[r][g][b]` with blue varying fastest in memory:
/// `index = (r * size + g) * size + b`. Entry `(r, g, b)` is the output for
/// the lattice vertex at normalized input `(r, g, b) / (size - 1)`.
///
/// # Example
///
/// ```rust
/// use cubelut_lut::{Interpolation, LutTable};
///
/// let lut = LutTable::identity(17).unwrap();
/// let rgb = lut.apply([0.5, 0.25, 0.75], Interpolation::Trilinear);
/// assert!((rgb[1] - 0.25).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LutTable {
    size: usize,
    title: Option<String>,
    domain: Domain,
    data: Vec<[f32; 3]>,
}

impl LutTable {
    /// Creates a table from data already laid out as `[r][g][b]`.
    ///
    /// Fails if `size` is outside `[2, 256]`, `data` does not hold exactly
    /// `size^3` entries, or the domain is inverted.
    pub fn new(size: usize, data: Vec<[f32; 3]>, domain: Domain) -> LutResult<Self> {
        check_size(size)?;
        domain.validate()?;
        let expected = size * size * size;
        if data.len() != expected {
            return Err(LutError::RowCount {
                size,
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            size,
            title: None,
            domain,
            data,
        })
    }

    /// Creates an identity (pass-through) table over the unit domain.
    pub fn identity(size: usize) -> LutResult<Self> {
        check_size(size)?;
        let n = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for r in 0..size {
            for g in 0..size {
                for b in 0..size {
                    data.push([r as f32 / n, g as f32 / n, b as f32 / n]);
                }
            }
        }
        Self::new(size, data, Domain::UNIT)
    }

    /// Attaches a descriptive title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Lattice resolution per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Title declared in the file, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Declared input domain.
    #[inline]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Raw entries in `[r][g][b]` order.
    pub fn data(&self) -> &[[f32; 3]] {
        &self.data
    }

    /// Total number of lattice vertices (`size^3`).
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub(crate) fn index(&self, r: usize, g: usize, b: usize) -> usize {
        (r * self.size + g) * self.size + b
    }

    /// Value stored at lattice vertex `(r, g, b)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is `>= size`.
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.data[self.index(r, g, b)]
    }

    /// Clamps the stored values into the table's own domain.
    ///
    /// Returns the corrected table and the number of components changed.
    pub fn clipped(mut self) -> (Self, usize) {
        let changed = crate::domain::clip_table(&mut self.data, &self.domain);
        (self, changed)
    }

    /// Looks up a unit-cube input (already domain-normalized).
    #[inline]
    pub fn apply(&self, rgb: [f32; 3], interp: Interpolation) -> [f32; 3] {
        interp.apply(self, rgb)
    }
}

fn check_size(size: usize) -> LutResult<()> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(LutError::SizeOutOfRange(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_stores_lattice_coordinates() {
        let lut = LutTable::identity(5).unwrap();
        assert_eq!(lut.entry_count(), 125);
        assert_eq!(lut.get(0, 0, 0), [0.0, 0.0, 0.0]);
        assert_eq!(lut.get(4, 0, 2), [1.0, 0.0, 0.5]);
        assert_eq!(lut.get(1, 3, 4), [0.25, 0.75, 1.0]);
    }

    #[test]
    fn size_bounds() {
        assert!(matches!(LutTable::identity(1), Err(LutError::SizeOutOfRange(1))));
        assert!(matches!(LutTable::identity(257), Err(LutError::SizeOutOfRange(257))));
        assert!(LutTable::identity(2).is_ok());
    }

    #[test]
    fn new_checks_entry_count() {
        let err = LutTable::new(2, vec![[0.5; 3]; 7], Domain::UNIT).unwrap_err();
        assert!(matches!(err, LutError::RowCount { expected: 8, found: 7, .. }));
    }

    #[test]
    fn new_rejects_inverted_domain() {
        let domain = Domain::new([1.0; 3], [0.0; 3]);
        let err = LutTable::new(2, vec![[0.5; 3]; 8], domain).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Range);
    }

    #[test]
    fn clipped_respects_domain() {
        let mut data = vec![[0.5; 3]; 8];
        data[7] = [1.4, -0.2, 0.9];
        let lut = LutTable::new(2, data, Domain::UNIT).unwrap();
        let (lut, changed) = lut.clipped();
        assert_eq!(changed, 2);
        assert_eq!(lut.get(1, 1, 1), [1.0, 0.0, 0.9]);
    }

    #[test]
    fn shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LutTable>();
    }
}
