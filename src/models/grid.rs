//! Dense two-dimensional grids indexed by typed ids.
//!
//! Replaces nested `Vec<Vec<_>>` matrices (room × period, course × period,
//! curriculum × period, course × course). The row and column id types are
//! part of the grid's type, so `Grid<RoomId, PeriodId, bool>` cannot be
//! indexed with a `(CourseId, PeriodId)` pair.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use super::{CourseId, CurriculumId, PeriodId, RoomId};

/// An id usable as a grid axis.
pub trait GridIndex: Copy {
    /// 0-based position along the axis.
    fn grid_index(self) -> usize;
}

macro_rules! impl_grid_index {
    ($($id:ty),*) => {
        $(impl GridIndex for $id {
            #[inline]
            fn grid_index(self) -> usize {
                self.index()
            }
        })*
    };
}

impl_grid_index!(CourseId, RoomId, PeriodId, CurriculumId);

/// Row-major `rows × cols` grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<R, C, T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
    _axes: PhantomData<fn(R, C)>,
}

impl<R: GridIndex, C: GridIndex, T: Clone> Grid<R, C, T> {
    /// Creates a grid with every cell set to `value`.
    pub fn new(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
            _axes: PhantomData,
        }
    }
}

impl<R: GridIndex, C: GridIndex, T> Grid<R, C, T> {
    #[inline]
    fn offset(&self, row: R, col: C) -> usize {
        let (r, c) = (row.grid_index(), col.grid_index());
        assert!(r < self.rows && c < self.cols, "grid index ({r}, {c}) out of bounds");
        r * self.cols + c
    }
}

impl<R: GridIndex, C: GridIndex, T> Index<(R, C)> for Grid<R, C, T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (R, C)) -> &T {
        &self.cells[self.offset(row, col)]
    }
}

impl<R: GridIndex, C: GridIndex, T> IndexMut<(R, C)> for Grid<R, C, T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (R, C)) -> &mut T {
        let i = self.offset(row, col);
        &mut self.cells[i]
    }
}
