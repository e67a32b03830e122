use std::io::{Seek, Write};

use image::{ImageFormat, RgbImage};

use crate::error::Result;

pub fn write_rgb_png<W: Write + Seek>(writer: &mut W, image: &RgbImage) -> Result<()> {
    image.write_to(writer, ImageFormat::Png)?;
    Ok(())
}
