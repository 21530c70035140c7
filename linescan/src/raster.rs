//! Binary graymap (`P5`) reading and writing.
//!
//! Samples are read exactly as stored: one byte each when `maxval` is at most
//! 255, otherwise two big-endian bytes. They are never rescaled to `maxval`.
//! Writing always produces an 8-bit file, keeping the low byte of each sample.


use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use image::codecs::pnm::{PnmDecoder, PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};

use crate::error::RasterError;
use crate::grid::IntegerGrid;

const GRAYMAP: PnmSubtype = PnmSubtype::Graymap(SampleEncoding::Binary);

/// Reads a grayscale raster into an integer grid.
pub fn load<P: AsRef<Path>>(path: P) -> Result<IntegerGrid, RasterError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| RasterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !has_pnm_signature(&bytes) {
        return Err(RasterError::UnrecognizedFormat {
            path: path.to_path_buf(),
        });
    }

    // The decoder only parses the header; the sample block is read raw below.
    let decoder = PnmDecoder::new(Cursor::new(bytes.as_slice())).map_err(|source| {
        RasterError::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let (cursor, header) = decoder.into_inner();

    if header.subtype() != GRAYMAP {
        return Err(RasterError::UnsupportedColorType {
            path: path.to_path_buf(),
            color: format!("{:?}", header.subtype()),
        });
    }

    let cols = header.width() as usize;
    let rows = header.height() as usize;
    let maxval = header.maximal_sample();
    let sample_bytes = if maxval > 255 { 2 } else { 1 };

    let block = &bytes[cursor.position() as usize..];
    let expected = rows * cols * sample_bytes;
    if block.len() < expected {
        return Err(RasterError::Truncated {
            path: path.to_path_buf(),
            expected,
            actual: block.len(),
        });
    }

    let data: Vec<i32> = if sample_bytes == 2 {
        block[..expected]
            .chunks_exact(2)
            .map(|pair| i32::from(u16::from_be_bytes([pair[0], pair[1]])))
            .collect()
    } else {
        block[..expected].iter().map(|&b| i32::from(b)).collect()
    };

    tracing::debug!(rows, cols, maxval, path = %path.display(), "loaded raster");

    Ok(IntegerGrid::new(rows, cols, data))
}

/// `P1` through `P7`.
fn has_pnm_signature(bytes: &[u8]) -> bool {
    matches!(bytes, [b'P', b'1'..=b'7', ..])
}

/// Writes `grid` as an 8-bit binary graymap (`maxval` 255).
///
/// Samples are truncated to their low 8 bits, not clamped.
pub fn store<P: AsRef<Path>>(path: P, grid: &IntegerGrid) -> Result<(), RasterError> {
    let path = path.as_ref();
    let too_large = || RasterError::DimensionsTooLarge {
        path: path.to_path_buf(),
        rows: grid.rows(),
        cols: grid.cols(),
    };
    let width = u32::try_from(grid.cols()).map_err(|_| too_large())?;
    let height = u32::try_from(grid.rows()).map_err(|_| too_large())?;

    let bytes: Vec<u8> = grid.data().iter().map(|&v| (v & 0xFF) as u8).collect();

    let io_err = |source| RasterError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);

    PnmEncoder::new(&mut writer)
        .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
        .write_image(&bytes, width, height, ExtendedColorType::L8)
        .map_err(|source| RasterError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(io_err)?;

    tracing::debug!(rows = grid.rows(), cols = grid.cols(), path = %path.display(), "stored raster");

    Ok(())
}
