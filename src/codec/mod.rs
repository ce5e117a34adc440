//! Container sniffing and the PNG/JPEG codec boundary.

pub(crate) mod jpeg;
pub(crate) mod png;
pub(crate) mod reader;

pub(crate) use reader::ImageReader;

/// The 8-byte PNG file signature.
pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG start-of-image marker plus the leading byte of the first segment.
pub(crate) const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Container formats the blender accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SniffedFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG/JFIF.
    Jpeg,
}

/// Identify a buffer's container from its leading bytes.
pub fn sniff(bytes: &[u8]) -> Option<SniffedFormat> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        Some(SniffedFormat::Png)
    } else if bytes.starts_with(&JPEG_SOI) {
        Some(SniffedFormat::Jpeg)
    } else {
        None
    }
}
