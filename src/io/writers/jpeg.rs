use jpeg_encoder::{ColorType, Encoder};
use std::io::Write;

use crate::error::{Error, Result};

pub fn write_rgb_jpeg<W: Write>(
    writer: &mut W,
    cols: u32,
    rows: u32,
    rgb_data: &[u8],
) -> Result<()> {
    // JPEG frame dimensions are 16-bit
    let (w, h) = match (u16::try_from(cols), u16::try_from(rows)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(Error::InvalidArgument {
                arg: "size",
                value: format!("{}x{} exceeds the JPEG limit of 65535", cols, rows),
            });
        }
    };
    let encoder = Encoder::new(writer, 100);
    encoder.encode(rgb_data, w, h, ColorType::Rgb)?;
    Ok(())
}
