//! In-memory multi-page 8-bit image stack.

use cellvox_grid::{CompartmentGrid, GridDims};

use crate::error::{IoError, IoResult};

/// A stack of equally sized 8-bit grayscale pages.
///
/// This is the serialization shape of a [`CompartmentGrid`]: one page per
/// z-slice, rows along y, pixels along x.
///
/// # Example
///
/// ```
/// use cellvox_grid::{CompartmentGrid, GridDims};
/// use cellvox_io::ImageStack;
///
/// let grid = CompartmentGrid::new(GridDims::new(4, 3, 2));
/// let stack = ImageStack::from_compartments(&grid).unwrap();
/// assert_eq!(stack.width(), 4);
/// assert_eq!(stack.height(), 3);
/// assert_eq!(stack.page_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStack {
    width: u32,
    height: u32,
    pages: Vec<Vec<u8>>,
}

impl ImageStack {
    /// Creates an empty stack with the given page dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
        }
    }

    /// Page width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Page height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Bytes per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Grid extents of the stack: `(width, height, page_count)`.
    #[must_use]
    pub fn dims(&self) -> GridDims {
        GridDims::new(self.width as usize, self.height as usize, self.pages.len())
    }

    /// Appends one page.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::PageSize`] if the byte count is not
    /// `width * height`.
    pub fn push_page(&mut self, page: Vec<u8>) -> IoResult<()> {
        if page.len() != self.page_size() {
            return Err(IoError::PageSize {
                expected: self.page_size(),
                got: page.len(),
            });
        }
        self.pages.push(page);
        Ok(())
    }

    /// Borrows one page, rows along y.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&[u8]> {
        self.pages.get(index).map(Vec::as_slice)
    }

    /// Iterator over all pages.
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> {
        self.pages.iter().map(Vec::as_slice)
    }

    /// Builds a stack from a compartment grid, one page per z-slice.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::TooLarge`] if a slice dimension exceeds the
    /// 32-bit range of the image format.
    pub fn from_compartments(grid: &CompartmentGrid) -> IoResult<Self> {
        let dims = grid.dims();
        let width = dim_u32(dims.nx)?;
        let height = dim_u32(dims.ny)?;

        let mut stack = Self::new(width, height);
        let bytes = grid.to_bytes();
        let page_size = stack.page_size();
        if page_size > 0 {
            for page in bytes.chunks(page_size) {
                stack.push_page(page.to_vec())?;
            }
        }
        Ok(stack)
    }

    /// Decodes the stack back into a compartment grid.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Grid`] if any byte is not a valid compartment
    /// value.
    pub fn to_compartments(&self) -> IoResult<CompartmentGrid> {
        let mut bytes = Vec::with_capacity(self.page_size() * self.pages.len());
        for page in &self.pages {
            bytes.extend_from_slice(page);
        }
        Ok(CompartmentGrid::from_bytes(self.dims(), &bytes)?)
    }
}

fn dim_u32(value: usize) -> IoResult<u32> {
    u32::try_from(value).map_err(|_| IoError::TooLarge {
        bytes: value as u64,
    })
}
