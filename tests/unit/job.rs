use super::*;

#[test]
fn default_options_validate() {
    let mut opts = BlendOptions::default();
    opts.validate().unwrap();
    assert_eq!(opts.format, Format::Png);
    assert_eq!(opts.quality, 0);
    assert!(!opts.reencode);
}

#[test]
fn png_quality_one_and_above_256_are_rejected() {
    for quality in [1, 257, 1000] {
        let mut opts = BlendOptions {
            quality,
            ..Default::default()
        };
        let err = opts.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "PNG images must be quantized between 2 and 256 colors."
        );
    }

    for quality in [0, 2, 16, 256] {
        let mut opts = BlendOptions {
            quality,
            ..Default::default()
        };
        opts.validate().unwrap();
    }
}

#[test]
fn jpeg_quality_defaults_and_bounds() {
    let mut opts = BlendOptions {
        format: Format::Jpeg,
        ..Default::default()
    };
    opts.validate().unwrap();
    assert_eq!(opts.quality, 80);

    for quality in [-1, 101, 255] {
        let mut opts = BlendOptions {
            format: Format::Jpeg,
            quality,
            ..Default::default()
        };
        let err = opts.validate().unwrap_err();
        assert_eq!(err.to_string(), "JPEG quality is range 0-100.");
    }
}

#[test]
fn nonzero_matte_forces_reencode() {
    let mut opts = BlendOptions {
        matte: crate::foundation::color::hex_to_argb("#FF0000"),
        ..Default::default()
    };
    assert!(!opts.reencode);
    opts.validate().unwrap();
    assert!(opts.reencode);

    // A zero matte (unparseable or absent) does not.
    let mut opts = BlendOptions::default();
    opts.validate().unwrap();
    assert!(!opts.reencode);
}

#[test]
fn compression_is_capped_per_backend() {
    let mut opts = BlendOptions {
        compression: 9,
        ..Default::default()
    };
    opts.validate().unwrap();

    let mut opts = BlendOptions {
        compression: 10,
        ..Default::default()
    };
    let err = opts.validate().unwrap_err();
    assert_eq!(err.to_string(), "Compression level must be between 1 and 9");

    let mut opts = BlendOptions {
        encoder: Encoder::Miniz,
        compression: 10,
        ..Default::default()
    };
    opts.validate().unwrap();

    let mut opts = BlendOptions {
        encoder: Encoder::Miniz,
        compression: 11,
        ..Default::default()
    };
    let err = opts.validate().unwrap_err();
    assert_eq!(err.to_string(), "Compression level must be between 1 and 10");
}

#[test]
fn options_deserialize_from_the_json_shape() {
    let opts: BlendOptions = serde_json::from_str(
        r##"{
            "format": "jpg",
            "quality": 85,
            "reencode": true,
            "width": 256,
            "height": 256,
            "matte": "#336699",
            "mode": "h",
            "encoder": "miniz",
            "compression": 7,
            "tint": {"l": [0.2, 0.8]}
        }"##,
    )
    .unwrap();

    assert_eq!(opts.format, Format::Jpeg);
    assert_eq!(opts.quality, 85);
    assert!(opts.reencode);
    assert_eq!((opts.width, opts.height), (256, 256));
    assert_eq!(opts.matte, 0xFF996633);
    assert_eq!(opts.mode, QuantMode::Hextree);
    assert_eq!(opts.encoder, Encoder::Miniz);
    assert_eq!(opts.compression, 7);
    assert_eq!(opts.tint.unwrap().l, [0.2, 0.8]);
}

#[test]
fn unknown_mode_and_encoder_spellings_keep_defaults() {
    let opts: BlendOptions =
        serde_json::from_str(r#"{"mode":"fancy","encoder":"libdeflate"}"#).unwrap();
    assert_eq!(opts.mode, QuantMode::Octree);
    assert_eq!(opts.encoder, Encoder::Default);
}

#[test]
fn invalid_format_string_is_rejected() {
    let err = serde_json::from_str::<BlendOptions>(r#"{"format":"gif"}"#).unwrap_err();
    assert!(err.to_string().contains("Invalid output format."));
}

#[test]
fn bare_buffer_layer_defaults_to_origin() {
    let (buffer, x, y) = LayerInput::Buffer(vec![1, 2, 3]).into_parts();
    assert_eq!(buffer, vec![1, 2, 3]);
    assert_eq!((x, y), (0, 0));

    let (_, x, y) = LayerInput::Placed {
        buffer: Vec::new(),
        x: -4,
        y: 9,
    }
    .into_parts();
    assert_eq!((x, y), (-4, 9));
}
