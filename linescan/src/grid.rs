//! Row-major 2D grid used for scan stacks, scanline buffers, spectra and canvases.


use std::ops::{Index, IndexMut};

/// Integer raster as produced by the raster loader and consumed by registration.
pub type IntegerGrid = Grid<i32>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Grid<T> {
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "data length must equal rows * cols"
        );
        Self { data, rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[row * self.cols + col]
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

impl<T: Copy> Grid<T> {
    /// Copies `rows` full-width rows of `src`, starting at `src_row`, into `self`
    /// with the block's top-left corner at `(dst_row, dst_col)`.
    ///
    /// Panics if the block does not fit inside `self`.
    pub fn copy_block_from(
        &mut self,
        src: &Grid<T>,
        src_row: usize,
        rows: usize,
        dst_row: usize,
        dst_col: usize,
    ) {
        assert!(src_row + rows <= src.rows, "source block out of range");
        assert!(
            dst_row + rows <= self.rows && dst_col + src.cols <= self.cols,
            "destination block {}x{} at ({}, {}) does not fit in {}x{} grid",
            rows,
            src.cols,
            dst_row,
            dst_col,
            self.rows,
            self.cols
        );

        for r in 0..rows {
            let dst = &mut self.row_mut(dst_row + r)[dst_col..dst_col + src.cols];
            dst.copy_from_slice(src.row(src_row + r));
        }
    }
}

impl<T: Default + Clone> Grid<T> {
    pub fn new_default(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            rows,
            cols,
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.cols + col]
    }
}
