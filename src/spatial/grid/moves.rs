use super::*;

impl Grid {
    /// Exchange two cells. Bounds are checked on the linear index only, so a
    /// negative x can wrap onto the previous row; callers that care validate
    /// per-axis first. Both particles end up flagged changed, with positions
    /// matching their new cells. Returns `false` (logged) when either index
    /// is outside the array.
    pub(crate) fn exchange(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        let (Some(idx0), Some(idx1)) = (self.linear_index(x0, y0), self.linear_index(x1, y1)) else {
            log::debug!("swap out of bounds: ({x0}, {y0}) <-> ({x1}, {y1})");
            return false;
        };
        self.exchange_idx(idx0, idx1);
        true
    }

    #[inline]
    pub(crate) fn exchange_idx(&self, idx0: usize, idx1: usize) {
        let first = self.get_idx(idx0);
        let second = self.get_idx(idx1);
        let (x0, y0) = self.coords(idx0);
        let (x1, y1) = self.coords(idx1);
        self.write_cell(x0, y0, second);
        self.write_cell(x1, y1, first);
    }

    /// Public swap; same checks as the in-tick primitive.
    pub fn swap(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.exchange(x0, y0, x1, y1);
    }
}
