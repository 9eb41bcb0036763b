//! Media type handling for the transcoder's input and output.

use std::path::Path;

use image::ImageFormat;

/// Media type of every transcoded image.
pub const OUTPUT_MEDIA_TYPE: &str = "image/jpeg";

/// Extension used for derived output file names.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Fallback for files whose extension names no known image format.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Returns true if `media_type` declares an image (`image/*`).
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Decoder hint for a declared media type, if the `image` crate knows it.
pub fn format_hint(media_type: &str) -> Option<ImageFormat> {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    ImageFormat::from_mime_type(essence.to_ascii_lowercase())
}

/// Image types the decoder may not support but which must still be treated
/// as images, so they fail to decode rather than being rejected as non-image.
const OTHER_IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("svg", "image/svg+xml"),
    ("svgz", "image/svg+xml"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("jxl", "image/jxl"),
    ("jp2", "image/jp2"),
    ("psd", "image/vnd.adobe.photoshop"),
];

/// Media type for a file on disk, guessed from its extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type();
    }

    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return UNKNOWN_MEDIA_TYPE;
    };
    OTHER_IMAGE_EXTENSIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map_or(UNKNOWN_MEDIA_TYPE, |&(_, media_type)| media_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_media_type() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("image/jpeg"));
        assert!(is_image_media_type("Image/PNG"));
        assert!(is_image_media_type(" image/webp "));
        assert!(is_image_media_type("image/svg+xml"));

        assert!(!is_image_media_type("text/plain"));
        assert!(!is_image_media_type("application/pdf"));
        assert!(!is_image_media_type("image"));
        assert!(!is_image_media_type(""));
    }

    #[test]
    fn test_format_hint() {
        assert_eq!(format_hint("image/png"), Some(ImageFormat::Png));
        assert_eq!(format_hint("IMAGE/JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(format_hint("image/gif; charset=binary"), Some(ImageFormat::Gif));
        assert_eq!(format_hint("image/x-unknown"), None);
    }

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("a/photo.png")), "image/png");
        assert_eq!(media_type_for_path(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("notes.txt")), UNKNOWN_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("noext")), UNKNOWN_MEDIA_TYPE);
    }

    #[test]
    fn test_undecodable_image_extensions_are_still_images() {
        assert_eq!(media_type_for_path(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(media_type_for_path(Path::new("IMG_0001.HEIC")), "image/heic");
        assert!(is_image_media_type(media_type_for_path(Path::new("a.jxl"))));
        assert_eq!(format_hint(media_type_for_path(Path::new("logo.svg"))), None);
    }
}
