use super::*;

impl Grid {
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize { self.size }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y)
    }

    /// Row-major index of an on-grid cell. Callers have already bounds-checked.
    #[inline(always)]
    pub(crate) fn cell_index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) outside {}x{}", self.width, self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Linear index of possibly negative coordinates; `None` when it falls
    /// outside the particle array. Rows wrap: (-1, 1) maps to (width-1, 0).
    #[inline]
    pub fn linear_index(&self, x: i32, y: i32) -> Option<usize> {
        let idx = y as i64 * self.width as i64 + x as i64;
        (idx >= 0 && idx < self.size as i64).then_some(idx as usize)
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((idx % w) as u32, (idx / w) as u32)
    }
}
