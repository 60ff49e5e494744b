mod common;

use common::{gradient, png_bytes, scratch_path};
use images_tx::codec::{self, OutputFormat};
use images_tx::error::{CodecError, PipelineError};
use images_tx::pipeline::run_named;
use images_tx::{ParallelPipeline, Pipeline, PipelineConfig, Pixel, PixelBuffer, TransformationKind};

#[test]
fn decode_transform_encode_png() {
    let source = gradient(23, 17);
    let decoded = codec::decode(&png_bytes(&source)).unwrap();
    assert_eq!(decoded, source);

    let pipeline = Pipeline::from_names(&["-srb", "-l", "-gg"]).unwrap();
    let output = pipeline.run(decoded).unwrap();
    let reread = codec::decode(&png_bytes(&output)).unwrap();

    assert_eq!(reread.dimensions(), (23, 17));
    for (before, after) in source.pixels().iter().zip(reread.pixels()) {
        // swap red/blue, then shift left: (r, g, b) -> (b, g, r) -> (g, r, b)
        let shifted = Pixel::opaque(before.green, before.red, before.blue);
        let gray = shifted.grayscale_value();
        assert_eq!(*after, Pixel::opaque(gray, shifted.green, gray));
    }
}

#[test]
fn pixelation_survives_png_round_trip() {
    let source = PixelBuffer::from_rows(vec![
        vec![Pixel::WHITE, Pixel::WHITE],
        vec![Pixel::BLACK, Pixel::BLACK],
    ])
    .unwrap();
    let decoded = codec::decode(&png_bytes(&source)).unwrap();
    let output = Pipeline::new(vec![TransformationKind::Pixelate3]).run(decoded).unwrap();
    let reread = codec::decode(&png_bytes(&output)).unwrap();
    assert_eq!(reread, PixelBuffer::filled(2, 2, Pixel::opaque(127, 127, 127)));
}

#[test]
fn transparent_background_pixelates_to_black() {
    let straight = image::RgbaImage::from_raw(2, 1, vec![255, 255, 255, 0, 0, 0, 0, 255]).unwrap();
    let mut bytes = std::io::Cursor::new(Vec::new());
    straight.write_to(&mut bytes, image::ImageFormat::Png).unwrap();

    let decoded = codec::decode(bytes.get_ref()).unwrap();
    let output = Pipeline::new(vec![TransformationKind::Pixelate3]).run(decoded).unwrap();
    assert_eq!(output, PixelBuffer::filled(2, 1, Pixel::BLACK));

    let reread = codec::decode(&png_bytes(&output)).unwrap();
    assert_eq!(reread, output);
}

#[test]
fn failed_step_produces_no_image() {
    let decoded = codec::decode(&png_bytes(&gradient(4, 4))).unwrap();
    let err = run_named(decoded, &["-g", "-nope", "-p3"]).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownTransformation(ref name) if name == "-nope"));
}

#[tokio::test]
async fn parallel_and_sequential_write_identical_files() {
    let source = gradient(64, 45);
    let kinds = vec![
        TransformationKind::Pixelate10,
        TransformationKind::ShiftRight,
        TransformationKind::GrayscaleKeepBlue,
        TransformationKind::Pixelate3,
    ];
    let pipeline = Pipeline::new(kinds);
    let sequential = pipeline.run(source.clone()).unwrap();
    let parallel = ParallelPipeline::new(pipeline, PipelineConfig { workers: 5 })
        .run(source)
        .await
        .unwrap();
    assert_eq!(png_bytes(&parallel), png_bytes(&sequential));
}

#[test]
fn save_and_open_follow_the_extension() {
    let source = gradient(12, 10);

    let png = scratch_path("save_and_open", "out.png");
    codec::save(&source, &png).unwrap();
    assert_eq!(codec::open(&png).unwrap(), source);

    let jpg = scratch_path("save_and_open", "out.jpg");
    codec::save(&source, &jpg).unwrap();
    let bytes = std::fs::read(&jpg).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(codec::open(&jpg).unwrap().dimensions(), (12, 10));

    let unknown = scratch_path("save_and_open", "out.bin");
    assert_eq!(OutputFormat::from_path(&unknown), OutputFormat::Jpeg);
}

#[test]
fn empty_result_cannot_be_saved() {
    let output = Pipeline::new(TransformationKind::ALL.to_vec())
        .run(PixelBuffer::empty())
        .unwrap();
    let path = scratch_path("empty_result", "out.png");
    assert!(matches!(codec::save(&output, &path), Err(CodecError::EmptyBuffer)));
    assert!(!path.exists());
}
