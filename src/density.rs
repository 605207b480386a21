//! Minimal embedded-resolution (DPI) reader for JPEG, PNG, and TIFF files.
//!
//! Watermarked output should keep the source's print resolution, but the
//! decoding crates don't surface it. This module reads just enough metadata
//! to recover it:
//! - JPEG: APP0 `JFIF\0` density fields (units: dpi or dots/cm)
//! - PNG: `pHYs` chunk (pixels per meter)
//! - TIFF: IFD tags 282/283 (X/YResolution) + 296 (ResolutionUnit)
//!
//! Zero external dependencies — pure byte walking. Any parse failure reads
//! as "no density"; callers fall back to [`Density::default`] (72×72).
//!
//! For writing, PNG output goes through the `png` crate (which owns the pHYs
//! chunk), while JPEG output gets its JFIF header patched in place via
//! [`patch_jpeg_density`] — the `image` encoder always emits one.

use std::path::Path;

const INCHES_PER_METER: f64 = 39.370_078_740_157_48;
const CM_PER_INCH: f64 = 2.54;

/// Print resolution in dots per inch, horizontal and vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub x: u32,
    pub y: u32,
}

impl Default for Density {
    fn default() -> Self {
        Self { x: 72, y: 72 }
    }
}

impl Density {
    /// Convert to the PNG pHYs unit (pixels per meter).
    pub fn to_pixels_per_meter(self) -> (u32, u32) {
        (
            (self.x as f64 * INCHES_PER_METER).round() as u32,
            (self.y as f64 * INCHES_PER_METER).round() as u32,
        )
    }
}

/// Read the embedded resolution from a file, dispatching by extension.
/// Returns `None` when the file carries no usable density or cannot be
/// parsed.
pub fn read_density(path: &Path) -> Option<Density> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let bytes = std::fs::read(path).ok()?;

    match ext.as_str() {
        "jpg" | "jpeg" => density_from_jpeg(&bytes),
        "png" => density_from_png(&bytes),
        "tif" | "tiff" => density_from_tiff(&bytes),
        _ => None,
    }
}

/// Overwrite the JFIF density fields of an encoded JPEG in place.
/// Returns false (and leaves the bytes alone) when no JFIF APP0 is present.
pub fn patch_jpeg_density(data: &mut [u8], density: Density) -> bool {
    let Some(p) = find_jfif_payload(data) else {
        return false;
    };
    data[p + 7] = 1; // units: dots per inch
    data[p + 8..p + 10].copy_from_slice(&(density.x.min(65_535) as u16).to_be_bytes());
    data[p + 10..p + 12].copy_from_slice(&(density.y.min(65_535) as u16).to_be_bytes());
    true
}

// ---------------------------------------------------------------------------
// JPEG: APP0 / JFIF
// ---------------------------------------------------------------------------

/// JFIF APP0 payload, from the identifier:
///   Bytes 0-4:  "JFIF\0"
///   Bytes 5-6:  version
///   Byte 7:     density units (0 = aspect only, 1 = dpi, 2 = dots/cm)
///   Bytes 8-9:  X density (big-endian u16)
///   Bytes 10-11: Y density (big-endian u16)
fn find_jfif_payload(data: &[u8]) -> Option<usize> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        // SOS means entropy-coded data follows; EOI means we're done
        if marker == 0xDA || marker == 0xD9 {
            break;
        }
        // Markers without a length field
        if (0xD0..=0xD7).contains(&marker) || marker == 0x01 {
            pos += 2;
            continue;
        }
        let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if seg_len < 2 || pos + 2 + seg_len > data.len() {
            return None;
        }
        if marker == 0xE0 {
            let payload = pos + 4;
            if seg_len >= 14 && data[payload..payload + 5] == *b"JFIF\0" {
                return Some(payload);
            }
        }
        pos += 2 + seg_len;
    }
    None
}

fn density_from_jpeg(data: &[u8]) -> Option<Density> {
    let p = find_jfif_payload(data)?;
    let units = data[p + 7];
    let xd = u16::from_be_bytes([data[p + 8], data[p + 9]]) as f64;
    let yd = u16::from_be_bytes([data[p + 10], data[p + 11]]) as f64;
    if xd == 0.0 || yd == 0.0 {
        return None;
    }

    match units {
        1 => Some(Density {
            x: xd as u32,
            y: yd as u32,
        }),
        2 => Some(Density {
            x: (xd * CM_PER_INCH).round() as u32,
            y: (yd * CM_PER_INCH).round() as u32,
        }),
        // 0: density fields are an aspect ratio, not a resolution
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// PNG: pHYs chunk
// ---------------------------------------------------------------------------

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

fn density_from_png(data: &[u8]) -> Option<Density> {
    if !data.starts_with(PNG_SIGNATURE) {
        return None;
    }

    // Chunks: length (u32 BE) + type (4 bytes) + data + CRC (4 bytes)
    let mut pos = PNG_SIGNATURE.len();
    while pos + 8 <= data.len() {
        let len = u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
            as usize;
        let chunk_type = &data[pos + 4..pos + 8];
        let chunk_data = pos + 8;
        if chunk_data + len + 4 > data.len() {
            return None;
        }

        if chunk_type == b"pHYs" && len == 9 {
            let d = &data[chunk_data..chunk_data + 9];
            let xppu = u32::from_be_bytes([d[0], d[1], d[2], d[3]]);
            let yppu = u32::from_be_bytes([d[4], d[5], d[6], d[7]]);
            // Unit 1 = meter; 0 = aspect ratio only
            if d[8] != 1 || xppu == 0 || yppu == 0 {
                return None;
            }
            return Some(Density {
                x: (xppu as f64 / INCHES_PER_METER).round() as u32,
                y: (yppu as f64 / INCHES_PER_METER).round() as u32,
            });
        }
        // pHYs must precede IDAT; stop once pixel data starts
        if chunk_type == b"IDAT" || chunk_type == b"IEND" {
            break;
        }

        pos = chunk_data + len + 4;
    }
    None
}

// ---------------------------------------------------------------------------
// TIFF: IFD0 resolution tags
// ---------------------------------------------------------------------------

const TAG_X_RESOLUTION: u16 = 282;
const TAG_Y_RESOLUTION: u16 = 283;
const TAG_RESOLUTION_UNIT: u16 = 296;

fn density_from_tiff(data: &[u8]) -> Option<Density> {
    if data.len() < 8 {
        return None;
    }

    let big_endian = match &data[0..2] {
        b"MM" => true,
        b"II" => false,
        _ => return None,
    };

    let read_u16 = |offset: usize| -> Option<u16> {
        let b = data.get(offset..offset + 2)?;
        Some(if big_endian {
            u16::from_be_bytes([b[0], b[1]])
        } else {
            u16::from_le_bytes([b[0], b[1]])
        })
    };
    let read_u32 = |offset: usize| -> Option<u32> {
        let b = data.get(offset..offset + 4)?;
        Some(if big_endian {
            u32::from_be_bytes([b[0], b[1], b[2], b[3]])
        } else {
            u32::from_le_bytes([b[0], b[1], b[2], b[3]])
        })
    };
    // RATIONAL: two u32s (numerator, denominator) at the entry's value offset
    let read_rational = |entry_offset: usize| -> Option<f64> {
        let value_offset = read_u32(entry_offset + 8)? as usize;
        let num = read_u32(value_offset)?;
        let den = read_u32(value_offset + 4)?;
        if den == 0 {
            return None;
        }
        Some(num as f64 / den as f64)
    };

    if read_u16(2)? != 42 {
        return None;
    }

    let ifd_offset = read_u32(4)? as usize;
    let entry_count = read_u16(ifd_offset)? as usize;
    let entries_start = ifd_offset + 2;

    let mut x_res = None;
    let mut y_res = None;
    let mut unit = 2u16; // TIFF default when the tag is absent: inches

    for i in 0..entry_count {
        let entry = entries_start + i * 12;
        match read_u16(entry)? {
            TAG_X_RESOLUTION => x_res = read_rational(entry),
            TAG_Y_RESOLUTION => y_res = read_rational(entry),
            // SHORT values are inlined, left-justified in the value field
            TAG_RESOLUTION_UNIT => unit = read_u16(entry + 8)?,
            _ => {}
        }
    }

    let x = x_res?;
    let y = y_res.unwrap_or(x);
    let (x, y) = match unit {
        2 => (x, y),
        3 => (x * CM_PER_INCH, y * CM_PER_INCH),
        // 1 = no absolute unit
        _ => return None,
    };
    if x <= 0.0 || y <= 0.0 {
        return None;
    }
    Some(Density {
        x: x.round() as u32,
        y: y.round() as u32,
    })
}
