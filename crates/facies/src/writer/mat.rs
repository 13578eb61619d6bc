//! MAT-file (level 5) output for labelled facies records
//!
//! A level 5 MAT-file is a 128 byte header followed by a sequence of tagged
//! data elements, every element padded to an 8 byte boundary.
//!
//! ```text
//! <116 byte text> <8 byte subsystem offset> <version 0x0100> <endian "IM">
//! <miMATRIX> <byte length>
//!     <miUINT32> 8    <array class> <0>
//!     <miINT32>  n*4  <dimension 0> ... <dimension n-1> [padding]
//!     <miINT8>   len  <variable name> [padding]
//!     <type>     len  <column-major data> [padding]
//! ... one miMATRIX element per variable
//! ```
//!
//! Two variables are written, `Label` as a character array and `Facies` as
//! an int64 array of shape `(nz, ny, nx)`. Everything is little endian.

// crate modules
use crate::error::Result;
use crate::record::LabeledRecord;
use crate::writer::init_writer;

// ftools modules
use ftools_utils::f;

// standard library
use std::io::{self, Write};
use std::path::Path;

// data element types
const MI_INT8: u32 = 1;
const MI_UINT16: u32 = 4;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_INT64: u32 = 12;
const MI_MATRIX: u32 = 14;

// array classes
const MX_CHAR_CLASS: u32 = 4;
const MX_INT64_CLASS: u32 = 14;

/// Length of the descriptive text at the start of the header
const HEADER_TEXT_LENGTH: usize = 116;

/// Write a [LabeledRecord] to a `.mat` file
///
/// ```rust, no_run
/// # use ftools_facies::{write_mat, Dimensions, LabeledRecord, RawTable};
/// let table = RawTable::new((0..8).collect(), Dimensions::new(2, 2, 2)).unwrap();
/// let record = LabeledRecord::from_table("ti_001", &table);
/// write_mat(&record, "./ti_001.mat").unwrap();
/// ```
pub fn write_mat<P: AsRef<Path>>(record: &LabeledRecord, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;
    write_mat_to(record, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [LabeledRecord] in `.mat` format to any writer
pub fn write_mat_to<W: Write>(record: &LabeledRecord, mut writer: W) -> Result<()> {
    write_header(&mut writer)?;

    // Label, as a 1xN character array of UTF-16 code units
    let label = record.case_id.encode_utf16().collect::<Vec<u16>>();
    let label_dims = match label.len() {
        0 => [0, 0],
        n => [1, n],
    };
    write_matrix(
        &mut writer,
        "Label",
        MX_CHAR_CLASS,
        &label_dims,
        MI_UINT16,
        label.len() * std::mem::size_of::<u16>(),
        |w| {
            for unit in &label {
                w.write_all(&unit.to_le_bytes())?;
            }
            Ok(())
        },
    )?;

    // Facies, column-major int64
    write_matrix(
        &mut writer,
        "Facies",
        MX_INT64_CLASS,
        &record.shape(),
        MI_INT64,
        record.codes().len() * std::mem::size_of::<i64>(),
        |w| {
            for code in record.column_major() {
                w.write_all(&code.to_le_bytes())?;
            }
            Ok(())
        },
    )?;

    Ok(())
}

/// Fixed 128 byte file header
fn write_header<W: Write>(writer: &mut W) -> io::Result<()> {
    let text = f!(
        "MATLAB 5.0 MAT-file, Platform: {}, Created by: ftools {}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );
    let mut header = [b' '; HEADER_TEXT_LENGTH];
    let length = text.len().min(HEADER_TEXT_LENGTH);
    header[..length].copy_from_slice(&text.as_bytes()[..length]);

    writer.write_all(&header)?;
    writer.write_all(&[0u8; 8])?;
    writer.write_all(&0x0100u16.to_le_bytes())?;
    writer.write_all(b"IM")
}

/// One complete miMATRIX element
fn write_matrix<W, F>(
    writer: &mut W,
    name: &str,
    class: u32,
    dimensions: &[usize],
    data_type: u32,
    data_length: usize,
    write_data: F,
) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&mut W) -> io::Result<()>,
{
    let dims_length = dimensions.len() * std::mem::size_of::<i32>();
    let body_length = element_length(8)
        + element_length(dims_length)
        + element_length(name.len())
        + element_length(data_length);

    write_tag(writer, MI_MATRIX, body_length)?;

    // array flags, no complex/global/logical bits set
    write_tag(writer, MI_UINT32, 8)?;
    writer.write_all(&class.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?;

    // dimensions
    write_tag(writer, MI_INT32, dims_length)?;
    for dimension in dimensions {
        let dimension = i32::try_from(*dimension).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                f!("dimension {dimension} too large for a MAT-file"),
            )
        })?;
        writer.write_all(&dimension.to_le_bytes())?;
    }
    write_padding(writer, dims_length)?;

    // variable name
    write_tag(writer, MI_INT8, name.len())?;
    writer.write_all(name.as_bytes())?;
    write_padding(writer, name.len())?;

    // real part
    write_tag(writer, data_type, data_length)?;
    write_data(writer)?;
    write_padding(writer, data_length)
}

/// Element tag of data type and byte length
fn write_tag<W: Write>(writer: &mut W, data_type: u32, length: usize) -> io::Result<()> {
    let length = u32::try_from(length).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            f!("{length} bytes is too large for a MAT-file element"),
        )
    })?;
    writer.write_all(&data_type.to_le_bytes())?;
    writer.write_all(&length.to_le_bytes())
}

/// Zero bytes up to the next 8 byte boundary
fn write_padding<W: Write>(writer: &mut W, length: usize) -> io::Result<()> {
    let padding = padded(length) - length;
    writer.write_all(&[0u8; 8][..padding])
}

/// Length rounded up to a multiple of 8
fn padded(length: usize) -> usize {
    length.div_ceil(8) * 8
}

/// Tag plus padded data
fn element_length(data_length: usize) -> usize {
    8 + padded(data_length)
}
