use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use image::RgbImage;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::io::writers::jpeg::write_rgb_jpeg;
use crate::io::writers::png::write_rgb_png;
use crate::io::writers::tiff::write_rgb_tiff;
use crate::types::OutputFormat;

pub fn encode_image<W: Write + Seek>(
    writer: &mut W,
    image: &RgbImage,
    format: OutputFormat,
) -> Result<()> {
    let (cols, rows) = image.dimensions();
    match format {
        OutputFormat::Png => write_rgb_png(writer, image),
        OutputFormat::Jpeg => write_rgb_jpeg(writer, cols, rows, image.as_raw()),
        OutputFormat::Tiff => write_rgb_tiff(writer, cols, rows, image.as_raw()),
    }
}

/// Encode `image` and move it into place at `output`.
///
/// The encoder writes to a temporary file in the destination directory which
/// is then persisted over `output`. A failed encode leaves `output` untouched.
pub fn save_rendered_image(image: &RgbImage, output: &Path, format: OutputFormat) -> Result<()> {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    debug!("Encoding {} to temporary file {:?}", format, tmp.path());

    // temporary files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode_image(&mut writer, image, format)?;
        writer.flush()?;
    }
    tmp.persist(output).map_err(|e| Error::Io(e.error))?;

    let (w, h) = image.dimensions();
    info!("save_rendered_image: {}x{} {} saved to {:?}", w, h, format, output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checker() -> RgbImage {
        RgbImage::from_fn(16, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 128, 0])
            }
        })
    }

    #[test]
    fn writes_every_format() {
        let dir = tempfile::tempdir().unwrap();
        for format in [OutputFormat::Png, OutputFormat::Jpeg, OutputFormat::Tiff] {
            let out = dir.path().join(format!("plot.{}", format.extension()));
            save_rendered_image(&checker(), &out, format).unwrap();
            let len = std::fs::metadata(&out).unwrap().len();
            assert!(len > 0, "{} output is empty", format);
        }
    }

    #[test]
    fn png_output_decodes_back() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plot.png");
        save_rendered_image(&checker(), &out, OutputFormat::Png).unwrap();

        let decoded = image::open(&out).unwrap().to_rgb8();
        assert_eq!(decoded, checker());
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plot.png");
        std::fs::write(&out, b"stale").unwrap();
        save_rendered_image(&checker(), &out, OutputFormat::Png).unwrap();
        assert!(std::fs::metadata(&out).unwrap().len() > 5);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("no/such/dir/plot.png");
        assert!(matches!(
            save_rendered_image(&checker(), &out, OutputFormat::Png),
            Err(Error::Io(_))
        ));
    }
}
