//! `decompress <input> <output>`: restore a file written by `compress`.
mod common;
mod progress;

use std::io::Write;
use std::path::Path;

use color_eyre::eyre::{self, WrapErr};
use tracing::{debug, info};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = common::parse_args("Decompress a file written by `compress`");
    common::init_logging(&args);

    let data = common::read_input(&args.input, args.show_progress())?;
    debug!(bytes = data.len(), "read {}", args.input.display());

    let written = decompress_into(&data, &args.output)
        .wrap_err_with(|| format!("failed to decompress {}", args.input.display()))?;

    info!("decompressed {} bytes into {} bytes", data.len(), written);
    Ok(())
}

/// Decode `data` completely before `output` is created, so corrupt input leaves no file behind
fn decompress_into(data: &[u8], output: &Path) -> eyre::Result<usize> {
    let decoded = hctree::decompress_to_vec(data)?;

    let mut writer = common::create_output(output)?;
    writer
        .write_all(&decoded)
        .and_then(|()| writer.flush())
        .wrap_err_with(|| format!("failed to write output {}", output.display()))?;
    Ok(decoded.len())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::decompress_into;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hctree-{}-{}", std::process::id(), name))
    }

    #[test]
    fn corrupt_input_creates_no_output() {
        let path = scratch_path("corrupt.out");
        let _ = std::fs::remove_file(&path);

        // count of 5, header cut off after the first marker
        assert!(decompress_into(&[5, 0, 0, 0, 0], &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn writes_decoded_bytes() {
        let path = scratch_path("abcd.out");
        let compressed = hctree::compress_to_vec(b"AABCD").unwrap();

        assert_eq!(decompress_into(&compressed, &path).unwrap(), 5);
        assert_eq!(std::fs::read(&path).unwrap(), b"AABCD");
        std::fs::remove_file(&path).unwrap();
    }
}
