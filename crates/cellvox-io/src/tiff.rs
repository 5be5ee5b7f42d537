//! Baseline multi-page TIFF encoding and decoding.
//!
//! The on-disk layout is the minimal baseline subset: little-endian byte
//! order, uncompressed 8-bit grayscale, one strip per page.
//!
//! ```text
//! offset 0   "II" 42 <first IFD offset>        8-byte header
//! offset 8   page 0 pixels, page 1 pixels, ... w*h bytes each
//!            optional pad byte                 keeps IFDs word-aligned
//!            IFD 0, IFD 1, ...                 114 bytes each, chained
//! ```
//!
//! Each IFD carries nine entries in ascending tag order: `ImageWidth`,
//! `ImageLength`, `BitsPerSample`, `Compression`,
//! `PhotometricInterpretation`, `StripOffsets`, `SamplesPerPixel`,
//! `RowsPerStrip` and `StripByteCounts`. The reader accepts exactly this
//! subset and reports anything else as [`IoError::Unsupported`].

// Offsets are checked against the 32-bit limit before any narrowing cast.
#![allow(clippy::cast_possible_truncation)]

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use cellvox_grid::CompartmentGrid;
use tracing::{debug, info};

use crate::error::{IoError, IoResult};
use crate::stack::ImageStack;

const BYTE_ORDER_LE: [u8; 2] = *b"II";
const MAGIC: u16 = 42;
const HEADER_LEN: u32 = 8;

const ENTRY_COUNT: u16 = 9;
const ENTRY_LEN: u32 = 12;
const IFD_LEN: u32 = 2 + ENTRY_COUNT as u32 * ENTRY_LEN + 4;

const TAG_IMAGE_WIDTH: u16 = 256;
const TAG_IMAGE_LENGTH: u16 = 257;
const TAG_BITS_PER_SAMPLE: u16 = 258;
const TAG_COMPRESSION: u16 = 259;
const TAG_PHOTOMETRIC: u16 = 262;
const TAG_STRIP_OFFSETS: u16 = 273;
const TAG_SAMPLES_PER_PIXEL: u16 = 277;
const TAG_ROWS_PER_STRIP: u16 = 278;
const TAG_STRIP_BYTE_COUNTS: u16 = 279;

const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;

const COMPRESSION_NONE: u16 = 1;
const PHOTOMETRIC_BLACK_IS_ZERO: u16 = 1;

/// Hard cap on the IFD chain length, so a corrupt next-IFD pointer cannot
/// loop forever.
const MAX_PAGES: usize = 1 << 16;

/// Writes a stack as a multi-page TIFF to an arbitrary writer.
///
/// # Errors
///
/// Returns [`IoError::InvalidContent`] for an empty stack or zero-sized
/// pages, [`IoError::TooLarge`] if the encoded file would exceed 32-bit
/// offsets, and [`IoError::Io`] on write failure.
pub fn write_stack<W: Write>(stack: &ImageStack, writer: &mut W) -> IoResult<()> {
    if stack.page_count() == 0 {
        return Err(IoError::invalid_content("stack has no pages"));
    }
    if stack.page_size() == 0 {
        return Err(IoError::invalid_content("page dimensions must be nonzero"));
    }

    let page_size = stack.page_size() as u64;
    let pages = stack.page_count() as u64;
    let data_len = pages * page_size;
    let pad = data_len % 2;
    let total = u64::from(HEADER_LEN) + data_len + pad + pages * u64::from(IFD_LEN);
    if u32::try_from(total).is_err() {
        return Err(IoError::TooLarge { bytes: total });
    }

    let first_ifd = HEADER_LEN + (data_len + pad) as u32;

    writer.write_all(&BYTE_ORDER_LE)?;
    writer.write_all(&MAGIC.to_le_bytes())?;
    writer.write_all(&first_ifd.to_le_bytes())?;

    for page in stack.pages() {
        writer.write_all(page)?;
    }
    if pad == 1 {
        writer.write_all(&[0])?;
    }

    for index in 0..stack.page_count() {
        let strip_offset = HEADER_LEN + (index as u64 * page_size) as u32;
        let next = if index + 1 == stack.page_count() {
            0
        } else {
            first_ifd + (index as u32 + 1) * IFD_LEN
        };
        write_ifd(writer, stack, strip_offset, next)?;
    }

    debug!(
        pages = stack.page_count(),
        width = stack.width(),
        height = stack.height(),
        bytes = total,
        "encoded TIFF stack"
    );
    Ok(())
}

fn write_ifd<W: Write>(
    writer: &mut W,
    stack: &ImageStack,
    strip_offset: u32,
    next_ifd: u32,
) -> IoResult<()> {
    let strip_bytes = stack.page_size() as u32;

    writer.write_all(&ENTRY_COUNT.to_le_bytes())?;
    write_entry(writer, TAG_IMAGE_WIDTH, TYPE_LONG, stack.width())?;
    write_entry(writer, TAG_IMAGE_LENGTH, TYPE_LONG, stack.height())?;
    write_entry(writer, TAG_BITS_PER_SAMPLE, TYPE_SHORT, 8)?;
    write_entry(writer, TAG_COMPRESSION, TYPE_SHORT, COMPRESSION_NONE.into())?;
    write_entry(
        writer,
        TAG_PHOTOMETRIC,
        TYPE_SHORT,
        PHOTOMETRIC_BLACK_IS_ZERO.into(),
    )?;
    write_entry(writer, TAG_STRIP_OFFSETS, TYPE_LONG, strip_offset)?;
    write_entry(writer, TAG_SAMPLES_PER_PIXEL, TYPE_SHORT, 1)?;
    write_entry(writer, TAG_ROWS_PER_STRIP, TYPE_LONG, stack.height())?;
    write_entry(writer, TAG_STRIP_BYTE_COUNTS, TYPE_LONG, strip_bytes)?;
    writer.write_all(&next_ifd.to_le_bytes())?;
    Ok(())
}

fn write_entry<W: Write>(writer: &mut W, tag: u16, ty: u16, value: u32) -> IoResult<()> {
    writer.write_all(&tag.to_le_bytes())?;
    writer.write_all(&ty.to_le_bytes())?;
    writer.write_all(&1u32.to_le_bytes())?;
    // Values shorter than four bytes are left-justified in the value field,
    // which for little-endian data is just the low bytes first.
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Reads a multi-page TIFF produced by [`write_stack`].
///
/// Only the written subset is accepted: little-endian byte order,
/// uncompressed 8-bit grayscale, a single strip per page, all pages the
/// same size.
///
/// # Errors
///
/// Returns [`IoError::InvalidHeader`] on a malformed header,
/// [`IoError::Unsupported`] on features outside the subset, and
/// [`IoError::InvalidContent`] on truncation or inconsistent pages.
pub fn read_stack<R: Read>(reader: &mut R) -> IoResult<ImageStack> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    decode(&buf)
}

fn decode(buf: &[u8]) -> IoResult<ImageStack> {
    if buf.len() < HEADER_LEN as usize {
        return Err(IoError::invalid_header("file shorter than 8 bytes"));
    }
    match &buf[0..2] {
        b"II" => {}
        b"MM" => {
            return Err(IoError::unsupported("big-endian byte order"));
        }
        _ => return Err(IoError::invalid_header("missing II byte-order mark")),
    }
    if read_u16(buf, 2)? != MAGIC {
        return Err(IoError::invalid_header("magic number is not 42"));
    }

    let mut stack: Option<ImageStack> = None;
    let mut ifd_offset = read_u32(buf, 4)? as usize;
    if ifd_offset == 0 {
        return Err(IoError::invalid_header("first IFD offset is zero"));
    }

    while ifd_offset != 0 {
        if stack.as_ref().is_some_and(|s| s.page_count() >= MAX_PAGES) {
            return Err(IoError::invalid_content("IFD chain too long"));
        }
        let page = read_ifd(buf, ifd_offset)?;

        let stack = stack.get_or_insert_with(|| ImageStack::new(page.width, page.height));
        if page.width != stack.width() || page.height != stack.height() {
            return Err(IoError::unsupported("pages with differing dimensions"));
        }
        stack.push_page(page.pixels)?;

        ifd_offset = page.next_ifd as usize;
    }

    // Unreachable while the first-IFD check above holds, but keeps the
    // return type honest.
    stack.ok_or_else(|| IoError::invalid_content("no pages decoded"))
}

struct DecodedPage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    next_ifd: u32,
}

fn read_ifd(buf: &[u8], offset: usize) -> IoResult<DecodedPage> {
    let entry_count = read_u16(buf, offset)? as usize;

    let mut width = None;
    let mut height = None;
    let mut bits = None;
    let mut compression = u32::from(COMPRESSION_NONE);
    let mut photometric = u32::from(PHOTOMETRIC_BLACK_IS_ZERO);
    let mut strip_offset = None;
    let mut strip_bytes = None;
    let mut samples = 1;

    for index in 0..entry_count {
        let at = offset + 2 + index * ENTRY_LEN as usize;
        let tag = read_u16(buf, at)?;
        let ty = read_u16(buf, at + 2)?;
        let count = read_u32(buf, at + 4)?;
        let value = read_entry_value(buf, at + 8, tag, ty, count)?;

        match tag {
            TAG_IMAGE_WIDTH => width = value,
            TAG_IMAGE_LENGTH => height = value,
            TAG_BITS_PER_SAMPLE => bits = value,
            TAG_COMPRESSION => compression = value.unwrap_or(compression),
            TAG_PHOTOMETRIC => photometric = value.unwrap_or(photometric),
            TAG_STRIP_OFFSETS => strip_offset = value,
            TAG_SAMPLES_PER_PIXEL => samples = value.unwrap_or(samples),
            TAG_STRIP_BYTE_COUNTS => strip_bytes = value,
            // RowsPerStrip and any stray tags carry no information we need.
            _ => {}
        }
    }

    let next_at = offset + 2 + entry_count * ENTRY_LEN as usize;
    let next_ifd = read_u32(buf, next_at)?;

    if compression != u32::from(COMPRESSION_NONE) {
        return Err(IoError::unsupported(format!(
            "compression scheme {compression}"
        )));
    }
    if bits != Some(8) {
        return Err(IoError::unsupported("bit depth other than 8"));
    }
    if samples != 1 {
        return Err(IoError::unsupported("more than one sample per pixel"));
    }
    if photometric > 1 {
        return Err(IoError::unsupported(format!(
            "photometric interpretation {photometric}"
        )));
    }

    let width = width.ok_or_else(|| IoError::invalid_content("IFD missing ImageWidth"))?;
    let height = height.ok_or_else(|| IoError::invalid_content("IFD missing ImageLength"))?;
    let strip_offset =
        strip_offset.ok_or_else(|| IoError::invalid_content("IFD missing StripOffsets"))?;
    let strip_bytes =
        strip_bytes.ok_or_else(|| IoError::invalid_content("IFD missing StripByteCounts"))?;

    let expected = u64::from(width) * u64::from(height);
    if u64::from(strip_bytes) != expected {
        return Err(IoError::invalid_content(format!(
            "strip holds {strip_bytes} bytes for a {width}x{height} page"
        )));
    }

    let start = strip_offset as usize;
    let end = start
        .checked_add(strip_bytes as usize)
        .ok_or_else(|| IoError::invalid_content("strip extends past 32-bit range"))?;
    let pixels = buf
        .get(start..end)
        .ok_or_else(|| IoError::invalid_content("strip extends past end of file"))?
        .to_vec();

    Ok(DecodedPage {
        width,
        height,
        pixels,
        next_ifd,
    })
}

/// Decodes a single-count entry value, or `None` for tags this reader can
/// read past without interpreting.
fn read_entry_value(
    buf: &[u8],
    at: usize,
    tag: u16,
    ty: u16,
    count: u32,
) -> IoResult<Option<u32>> {
    if count != 1 {
        // Multi-strip pages store offset arrays out of line; we only write
        // and read a single strip.
        if tag == TAG_STRIP_OFFSETS || tag == TAG_STRIP_BYTE_COUNTS {
            return Err(IoError::unsupported("more than one strip per page"));
        }
        return Ok(None);
    }
    match ty {
        TYPE_SHORT => Ok(Some(u32::from(read_u16(buf, at)?))),
        TYPE_LONG => Ok(Some(read_u32(buf, at)?)),
        _ => Ok(None),
    }
}

fn read_u16(buf: &[u8], at: usize) -> IoResult<u16> {
    let bytes = buf
        .get(at..at + 2)
        .ok_or_else(|| IoError::invalid_content("unexpected end of file"))?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(buf: &[u8], at: usize) -> IoResult<u32> {
    let bytes = buf
        .get(at..at + 4)
        .ok_or_else(|| IoError::invalid_content("unexpected end of file"))?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Saves a stack as a multi-page TIFF file.
///
/// # Errors
///
/// Same conditions as [`write_stack`], plus file creation failures.
pub fn save_stack(stack: &ImageStack, path: impl AsRef<Path>) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_stack(stack, &mut writer)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        pages = stack.page_count(),
        "saved TIFF stack"
    );
    Ok(())
}

/// Loads a multi-page TIFF file into a stack.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the path does not exist, plus the
/// conditions of [`read_stack`].
pub fn load_stack(path: impl AsRef<Path>) -> IoResult<ImageStack> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(err)
        }
    })?;
    let mut reader = BufReader::new(file);
    let stack = read_stack(&mut reader)?;
    info!(
        path = %path.display(),
        pages = stack.page_count(),
        "loaded TIFF stack"
    );
    Ok(stack)
}

/// Saves a compartment grid as a multi-page TIFF, one page per z-slice.
///
/// # Errors
///
/// Same conditions as [`save_stack`].
pub fn save_compartment_stack(grid: &CompartmentGrid, path: impl AsRef<Path>) -> IoResult<()> {
    let stack = ImageStack::from_compartments(grid)?;
    save_stack(&stack, path)
}

/// Loads a compartment grid from a multi-page TIFF written by
/// [`save_compartment_stack`].
///
/// # Errors
///
/// Same conditions as [`load_stack`], plus [`IoError::Grid`] if any pixel
/// is not a valid compartment value.
pub fn load_compartment_stack(path: impl AsRef<Path>) -> IoResult<CompartmentGrid> {
    load_stack(path)?.to_compartments()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellvox_grid::{Compartment, GridDims};
    use std::io::Cursor;

    fn sample_stack() -> ImageStack {
        let mut stack = ImageStack::new(3, 2);
        stack.push_page(vec![0, 1, 2, 2, 1, 0]).unwrap();
        stack.push_page(vec![1, 1, 1, 2, 2, 2]).unwrap();
        stack
    }

    fn encode(stack: &ImageStack) -> Vec<u8> {
        let mut buf = Vec::new();
        write_stack(stack, &mut buf).unwrap();
        buf
    }

    #[test]
    fn header_layout() {
        let buf = encode(&sample_stack());

        assert_eq!(&buf[0..2], b"II");
        assert_eq!(u16::from_le_bytes([buf[2], buf[3]]), 42);
        // 8-byte header plus two 6-byte pages, no padding needed.
        let first_ifd = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        assert_eq!(first_ifd, 20);
        assert_eq!(&buf[8..14], &[0, 1, 2, 2, 1, 0]);
        assert_eq!(buf.len(), 20 + 2 * IFD_LEN as usize);
    }

    #[test]
    fn ifd_chain_terminates() {
        let buf = encode(&sample_stack());

        let first_ifd = 20usize;
        let entry_count = u16::from_le_bytes([buf[first_ifd], buf[first_ifd + 1]]);
        assert_eq!(entry_count, 9);

        let next_at = first_ifd + IFD_LEN as usize - 4;
        let next = u32::from_le_bytes([
            buf[next_at],
            buf[next_at + 1],
            buf[next_at + 2],
            buf[next_at + 3],
        ]);
        assert_eq!(next as usize, first_ifd + IFD_LEN as usize);

        let last_next_at = buf.len() - 4;
        assert_eq!(&buf[last_next_at..], &[0, 0, 0, 0]);
    }

    #[test]
    fn roundtrip_in_memory() {
        let stack = sample_stack();
        let buf = encode(&stack);
        let decoded = read_stack(&mut Cursor::new(buf)).unwrap();
        assert_eq!(decoded, stack);
    }

    #[test]
    fn roundtrip_with_odd_page_size() {
        let mut stack = ImageStack::new(3, 1);
        stack.push_page(vec![5, 6, 7]).unwrap();
        stack.push_page(vec![8, 9, 10]).unwrap();
        stack.push_page(vec![11, 12, 13]).unwrap();

        // 18 data bytes would be even; drop to one page to force padding.
        let mut odd = ImageStack::new(3, 1);
        odd.push_page(vec![5, 6, 7]).unwrap();
        let buf = encode(&odd);
        let first_ifd = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        assert_eq!(first_ifd, 12);
        assert_eq!(read_stack(&mut Cursor::new(buf)).unwrap(), odd);

        let buf = encode(&stack);
        assert_eq!(read_stack(&mut Cursor::new(buf)).unwrap(), stack);
    }

    #[test]
    fn rejects_empty_stack() {
        let stack = ImageStack::new(4, 4);
        let mut buf = Vec::new();
        assert!(matches!(
            write_stack(&stack, &mut buf),
            Err(IoError::InvalidContent { .. })
        ));
    }

    #[test]
    fn rejects_bad_headers() {
        assert!(matches!(
            read_stack(&mut Cursor::new(b"II".to_vec())),
            Err(IoError::InvalidHeader { .. })
        ));

        let mut big_endian = encode(&sample_stack());
        big_endian[0..2].copy_from_slice(b"MM");
        assert!(matches!(
            read_stack(&mut Cursor::new(big_endian)),
            Err(IoError::Unsupported { .. })
        ));

        let mut bad_magic = encode(&sample_stack());
        bad_magic[2] = 43;
        assert!(matches!(
            read_stack(&mut Cursor::new(bad_magic)),
            Err(IoError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn rejects_truncated_strip() {
        let mut buf = encode(&sample_stack());
        // Point the first strip past the end of the file.
        let first_ifd = 20usize;
        let strip_offset_value = first_ifd + 2 + 5 * ENTRY_LEN as usize + 8;
        let past_end = buf.len() as u32;
        buf[strip_offset_value..strip_offset_value + 4].copy_from_slice(&past_end.to_le_bytes());
        assert!(matches!(
            read_stack(&mut Cursor::new(buf)),
            Err(IoError::InvalidContent { .. })
        ));
    }

    #[test]
    fn file_roundtrip() {
        let path = std::env::temp_dir().join(format!("cellvox-io-test-{}.tif", std::process::id()));

        let mut grid = CompartmentGrid::new(GridDims::new(4, 3, 2));
        grid.set(1, 1, 0, Compartment::Interior);
        grid.set(2, 2, 1, Compartment::Membrane);

        save_compartment_stack(&grid, &path).unwrap();
        let loaded = load_compartment_stack(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, grid);
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join("cellvox-io-no-such-file.tif");
        assert!(matches!(
            load_stack(&path),
            Err(IoError::FileNotFound { .. })
        ));
    }
}
