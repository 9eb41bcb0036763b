use crate::media_type::OUTPUT_EXTENSION;

const OUTPUT_PREFIX: &str = "compressed_";
const DEFAULT_BASE_NAME: &str = "image";

/// Name for the compressed download: the source name with its last
/// extension removed, prefixed with `compressed_` and ending in `.jpg`.
///
/// `photo.png` becomes `compressed_photo.jpg`, `archive.tar.gz` becomes
/// `compressed_archive.tar.jpg`. A name with no extension is kept whole and
/// an empty base falls back to `image`.
pub fn compressed_file_name(source_name: &str) -> String {
    let base = match source_name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => source_name,
    };
    let base = if base.is_empty() { DEFAULT_BASE_NAME } else { base };
    format!("{OUTPUT_PREFIX}{base}.{OUTPUT_EXTENSION}")
}
