//! Before/after size readout.

use std::fmt;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Size in megabytes (binary, 1 MB = 1024 * 1024 bytes).
pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MEGABYTE
}

/// Megabytes with two decimals, e.g. `"1.50"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}", megabytes(bytes))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeStats {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
}

impl SizeStats {
    pub fn new(original_bytes: u64, compressed_bytes: u64) -> Self {
        Self {
            original_bytes,
            compressed_bytes,
        }
    }

    /// Fraction of the original size that was saved. Negative when the
    /// compressed file came out larger.
    pub fn savings_ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        1.0 - self.compressed_bytes as f64 / self.original_bytes as f64
    }
}

impl std::ops::Add for SizeStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            original_bytes: self.original_bytes + other.original_bytes,
            compressed_bytes: self.compressed_bytes + other.compressed_bytes,
        }
    }
}

impl std::iter::Sum for SizeStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, s| acc + s)
    }
}

impl fmt::Display for SizeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = self.savings_ratio() * 100.0;
        write!(
            f,
            "{} MB -> {} MB ",
            format_megabytes(self.original_bytes),
            format_megabytes(self.compressed_bytes)
        )?;
        if pct >= 0.0 {
            write!(f, "({pct:.1}% smaller)")
        } else {
            write!(f, "({:.1}% larger)", -pct)
        }
    }
}
