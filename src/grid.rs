/// Calls `logic(row, col)` for every cell of a `height` x `width` grid, row by row.
pub fn loop_2d<F>(height: usize, width: usize, mut logic: F)
where
    F: FnMut(usize, usize),
{
    for row in 0..height {
        for col in 0..width {
            logic(row, col);
        }
    }
}

/// The cells visited by [`loop_2d`], in the same order.
pub fn cells(height: usize, width: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..height).flat_map(move |row| (0..width).map(move |col| (row, col)))
}
