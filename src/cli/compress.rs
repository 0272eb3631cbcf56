//! `compress <input> <output>`: Huffman-compress a file.
mod common;
mod progress;

use color_eyre::eyre::{self, WrapErr};
use hctree::encoding::count_frequencies;
use tracing::{debug, info};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = common::parse_args("Compress a file with Huffman coding");
    common::init_logging(&args);

    let data = common::read_input(&args.input, args.show_progress())?;
    let distinct = count_frequencies(&data).iter().filter(|&&f| f > 0).count();
    debug!(bytes = data.len(), distinct, "read {}", args.input.display());

    let output = common::create_output(&args.output)?;
    hctree::compress(&data, output)
        .wrap_err_with(|| format!("failed to compress {}", args.input.display()))?;

    let compressed_size = std::fs::metadata(&args.output)
        .wrap_err_with(|| format!("failed to stat output {}", args.output.display()))?
        .len();
    info!(
        "compressed {} bytes into {} bytes ({:.1}%)",
        data.len(),
        compressed_size,
        ratio(compressed_size, data.len() as u64)
    );
    Ok(())
}

/// Size of `compressed` relative to `original` in percent
fn ratio(compressed: u64, original: u64) -> f64 {
    if original == 0 {
        100.0
    } else {
        compressed as f64 / original as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::ratio;

    #[test]
    fn ratios() {
        assert_eq!(ratio(50, 100), 50.0);
        assert_eq!(ratio(0, 0), 100.0);
    }
}
