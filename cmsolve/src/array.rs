use std::ops;

use crate::dims::Coord;

/// Row-major 2D buffer indexed by [`Coord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2D<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dim_to_idx(&self, pos: Coord) -> Option<usize> {
        let Coord(row, col) = pos;
        if row < 0 || col < 0 {
            return None;
        }

        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }

        Some(row * self.cols + col)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Coord> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Coord((idx / self.cols) as i32, (idx % self.cols) as i32))
    }

    pub fn get(&self, pos: Coord) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Coord) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    /// Iterates the rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.buf.chunks(self.cols.max(1))
    }

    /// Builds an array from a flat row-major buffer, `None` if the lengths don't match.
    pub fn from_buf(buf: Vec<T>, rows: usize, cols: usize) -> Option<Self> {
        (rows.checked_mul(cols) == Some(buf.len())).then_some(Self { buf, rows, cols })
    }
}

impl<T: Clone> Array2D<T> {
    /// Panics if `rows * cols` overflows.
    pub fn new(item: T, rows: usize, cols: usize) -> Self {
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("Array size overflows: {}x{}", rows, cols));
        Self {
            buf: vec![item; len],
            rows,
            cols,
        }
    }
}

impl<T> ops::Index<Coord> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Coord) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {}", index))
    }
}

impl<T> ops::IndexMut<Coord> for Array2D<T> {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_conversion() {
        let arr = Array2D::new(0u8, 3, 4);
        assert_eq!(arr.dim_to_idx(Coord(0, 0)), Some(0));
        assert_eq!(arr.dim_to_idx(Coord(1, 2)), Some(6));
        assert_eq!(arr.dim_to_idx(Coord(2, 3)), Some(11));
        assert_eq!(arr.dim_to_idx(Coord(3, 0)), None);
        assert_eq!(arr.dim_to_idx(Coord(0, -1)), None);
        assert_eq!(arr.idx_to_dim(6), Some(Coord(1, 2)));
        assert_eq!(arr.idx_to_dim(12), None);
    }

    #[test]
    fn from_buf_checks_length() {
        assert!(Array2D::from_buf(vec![1, 2, 3, 4], 2, 2).is_some());
        assert!(Array2D::from_buf(vec![1, 2, 3], 2, 2).is_none());
        assert!(Array2D::<u8>::from_buf(vec![], usize::MAX, 2).is_none());
    }

    #[test]
    fn rows_are_slices() {
        let arr = Array2D::from_buf(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap();
        let rows: Vec<_> = arr.iter_rows().collect();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
    }
}
