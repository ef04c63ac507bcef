//! Zero-cost checked access for hot grid paths
//!
//! Debug builds index normally (panics with a clear message on a bad index),
//! release builds skip the bounds check. Only use where the caller has already
//! validated the index, e.g. inside the row traversal.
//!
//! ```rust
//! use std::cell::Cell;
//! use grainfall_engine::fast;
//!
//! let cells: Vec<Cell<u8>> = (0..4).map(Cell::new).collect();
//! let value = fast!(cells, [2]).get();
//! assert_eq!(value, 2);
//! ```

/// Read `slice[index]` by reference.
///
/// - Debug: ordinary indexing
/// - Release: `get_unchecked`
#[macro_export]
macro_rules! fast {
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    #[test]
    fn fast_reads_cell_slice() {
        let cells: Vec<Cell<u32>> = (10..15).map(Cell::new).collect();
        assert_eq!(fast!(cells, [3]).get(), 13);
    }

    #[test]
    fn fast_reference_allows_cell_write() {
        let cells: Vec<Cell<u32>> = vec![Cell::new(0); 3];
        fast!(cells, [1]).set(7);
        assert_eq!(cells[1].get(), 7);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn fast_bounds_check_in_debug() {
        let cells: Vec<Cell<u8>> = vec![Cell::new(0); 2];
        let _ = fast!(cells, [5]).get();
    }
}
