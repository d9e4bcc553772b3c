//! Dense square tables addressed by interval endpoints

use acontrario_core::{Error, Result};
use acontrario_histogram::Interval;

/// A `size x size` table with one cell per interval `(start, end)`
///
/// Cells are stored row-major (`start * size + end`). On a linear histogram
/// only cells with `start <= end` are ever written; on a circular one every
/// cell is meaningful, `start > end` being a wrap-around interval.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTable<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Copy> IntervalTable<T> {
    /// Allocate a table filled with `fill`
    ///
    /// Allocation is fallible: an overflowing `size * size` or a failed
    /// reservation is reported as [`Error::ResourceExhausted`].
    pub fn try_new(size: usize, fill: T, name: &str) -> Result<Self> {
        let len = size
            .checked_mul(size)
            .ok_or_else(|| Error::allocation_failed(usize::MAX, name))?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| Error::allocation_failed(len, name))?;
        cells.resize(len, fill);

        Ok(Self { size, cells })
    }

    /// Copy the table, failing instead of aborting when memory runs out
    pub fn try_clone(&self, name: &str) -> Result<Self> {
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(self.cells.len())
            .map_err(|_| Error::allocation_failed(self.cells.len(), name))?;
        cells.extend_from_slice(&self.cells);

        Ok(Self {
            size: self.size,
            cells,
        })
    }

    /// Number of bins on each side of the table
    pub fn size(&self) -> usize {
        self.size
    }

    /// Read the cell of an interval
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a bin of the histogram.
    pub fn get<I: Into<Interval>>(&self, interval: I) -> T {
        self.cells[self.offset(interval.into())]
    }

    /// Write the cell of an interval
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a bin of the histogram.
    pub fn set<I: Into<Interval>>(&mut self, interval: I, value: T) {
        let offset = self.offset(interval.into());
        self.cells[offset] = value;
    }

    fn offset(&self, interval: Interval) -> usize {
        assert!(
            interval.start < self.size && interval.end < self.size,
            "interval {interval} out of range for {} bins",
            self.size
        );
        interval.start * self.size + interval.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_addressing() {
        let mut table = IntervalTable::try_new(3, 0.0, "entropy").unwrap();
        table.set((0, 2), 1.5);
        table.set(Interval::new(2, 0), 2.5);
        assert_eq!(table.get((0, 2)), 1.5);
        assert_eq!(table.get((2, 0)), 2.5);
        assert_eq!(table.get((1, 1)), 0.0);
        assert_eq!(table.size(), 3);
        assert_eq!(table.cells[2], 1.5);
        assert_eq!(table.cells[6], 2.5);
    }

    #[test]
    fn test_try_clone_is_independent() {
        let mut table = IntervalTable::try_new(2, false, "modes").unwrap();
        table.set((0, 1), true);
        let mut copy = table.try_clone("maximal modes").unwrap();
        copy.set((0, 1), false);
        assert!(table.get((0, 1)));
        assert!(!copy.get((0, 1)));
    }

    #[test]
    fn test_overflowing_size_is_resource_exhausted() {
        let result = IntervalTable::try_new(usize::MAX, false, "gap table");
        assert!(matches!(result, Err(Error::ResourceExhausted { .. })));
    }

    #[test]
    fn test_huge_allocation_is_resource_exhausted() {
        // 2^31 squared cells of f64 cannot be reserved
        let result = IntervalTable::try_new(1usize << 31, 0.0f64, "entropy table");
        assert!(matches!(result, Err(Error::ResourceExhausted { .. })));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        let table = IntervalTable::try_new(2, 0u8, "test").unwrap();
        table.get((0, 2));
    }
}
