use super::*;

fn surface_of(pixels: Vec<u32>) -> Surface {
    let n = pixels.len() as u32;
    Surface::from_pixels(n, 1, pixels)
}

#[test]
fn few_colors_survive_exactly() {
    let surface = surface_of(vec![
        0xFF0000FF, 0xFF0000FF, 0xFFFF0000, 0xFF0000FF, 0xFFFF0000,
    ]);
    let q = quantize(&surface, 16);

    assert!(q.palette.len() <= 16);
    assert_eq!(q.indices.len(), 5);
    for (px, &idx) in surface.pixels.iter().zip(&q.indices) {
        assert_eq!(q.palette[idx as usize], *px);
    }
}

#[test]
fn palette_never_exceeds_budget() {
    // 64 distinct colors into an 8-entry palette.
    let pixels: Vec<u32> = (0..64u32)
        .map(|i| 0xFF000000 | (i * 4) | ((255 - i * 2) << 8) | ((i * 3) << 16))
        .collect();
    let surface = surface_of(pixels);
    let q = quantize(&surface, 8);

    assert!(!q.palette.is_empty());
    assert!(q.palette.len() <= 8);
    assert!(q.indices.iter().all(|&i| (i as usize) < q.palette.len()));
}

#[test]
fn quantized_colors_stay_close() {
    let pixels: Vec<u32> = (0..256u32).map(|i| 0xFF000000 | i | (i << 8) | (i << 16)).collect();
    let surface = surface_of(pixels.clone());
    let q = quantize(&surface, 32);

    for (&px, &idx) in pixels.iter().zip(&q.indices) {
        let entry = q.palette[idx as usize];
        let dr = (px & 0xff).abs_diff(entry & 0xff);
        assert!(dr <= 32, "gray {px:08x} mapped to {entry:08x}");
    }
}

#[test]
fn transparent_pixels_get_a_reserved_slot() {
    let surface = surface_of(vec![0x00000000, 0xFF0000FF, 0x00FFFFFF, 0xFFFF0000]);
    let q = quantize(&surface, 8);

    assert_eq!(q.palette[0], 0);
    assert_eq!(q.indices[0], 0);
    assert_eq!(q.indices[2], 0);
    assert_ne!(q.indices[1], 0);

    // Opaque entries keep full alpha.
    for &entry in &q.palette[1..] {
        assert_eq!(entry >> 24, 0xFF);
    }
}

#[test]
fn opaque_input_reserves_nothing() {
    let surface = surface_of(vec![0xFF0000FF, 0xFFFF0000]);
    let q = quantize(&surface, 4);
    assert!(q.palette.iter().all(|&e| e >> 24 == 0xFF));
}

#[test]
fn semi_transparent_pixels_quantize_on_rgb() {
    // Octree drops partial alpha; the entry is opaque with the same RGB.
    let surface = surface_of(vec![0x800000FF, 0x800000FF]);
    let q = quantize(&surface, 4);
    assert_eq!(q.palette[q.indices[0] as usize], 0xFF0000FF);
}

#[test]
fn tiny_budget_still_yields_an_indexable_image() {
    let pixels: Vec<u32> = (0..100u32).map(|i| 0xFF000000 | (i * 2)).collect();
    let surface = surface_of(pixels);
    let q = quantize(&surface, 2);
    assert!(!q.palette.is_empty());
    assert!(q.palette.len() <= 2);
    assert!(q.indices.iter().all(|&i| (i as usize) < q.palette.len()));
}
