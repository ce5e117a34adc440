use super::*;

#[test]
fn parses_rgba_entries() {
    let p = Palette::from_rgba(&[255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
    assert_eq!(p.len(), 2);
    assert!(p.is_valid());
    assert_eq!(p.entries()[0], 0xFF0000FF);
    assert_eq!(p.entries()[1], 0x80FF0000);
}

#[test]
fn parses_rgb_entries_as_opaque() {
    let p = Palette::from_rgb(&[0x33, 0x66, 0x99]).unwrap();
    assert_eq!(p.entries(), &[0xFF996633]);
}

#[test]
fn rejects_misaligned_or_empty_buffers() {
    assert!(Palette::from_rgba(&[]).is_err());
    assert!(Palette::from_rgba(&[1, 2, 3]).is_err());
    assert!(Palette::from_rgb(&[1, 2, 3, 4]).is_err());

    let err = Palette::from_rgba(&[1, 2, 3, 4, 5]).unwrap_err();
    assert_eq!(err.to_string(), "Invalid palette length");
}

#[test]
fn rejects_more_than_256_entries() {
    let bytes = vec![0u8; 257 * 4];
    assert!(Palette::from_rgba(&bytes).is_err());

    let bytes = vec![0u8; 256 * 4];
    assert!(Palette::from_rgba(&bytes).unwrap().is_valid());
}
