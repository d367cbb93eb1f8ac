//! End-to-end generation over a synthetic skin package.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tempfile::tempdir;

use skingen::cli::generate::{generate, GenerateArgs};
use skingen::output::{Printer, Verbosity};
use skingen::validation::{validate_skin, CheckOptions};
use skingen::{PartKind, SkinDirectory};

const DIFFUSE: Rgba<u8> = Rgba([200, 180, 160, 255]);

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Build `CD_Siren_Skin_BlueB_SF` with a body part whose hard mask is `hard`
/// everywhere and whose soft mask is black.
fn skin_package(root: &Path, hard: Rgba<u8>) -> PathBuf {
    let dir = root.join("CD_Siren_Skin_BlueB_SF");
    let props = dir.join("MaterialInstanceConstant");
    let textures = dir.join("Texture2D");
    fs::create_dir_all(&props).unwrap();
    fs::create_dir_all(&textures).unwrap();

    fs::copy(fixture("Mati_BlueB_Body.props.txt"), props.join("Mati_BlueB_Body.props.txt")).unwrap();

    RgbaImage::from_pixel(8, 8, DIFFUSE)
        .save(textures.join("Siren_Body_Dif.tga"))
        .unwrap();
    RgbaImage::from_fn(8, 8, |x, _| if x < 4 { Rgba([0, 0, 0, 255]) } else { hard })
        .save(textures.join("Siren_Body_Msk.tga"))
        .unwrap();
    RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))
        .save(textures.join("Siren_Decal.tga"))
        .unwrap();

    dir
}

fn body_args(input: PathBuf, output: PathBuf) -> GenerateArgs {
    GenerateArgs {
        input: Some(input),
        output: Some(output),
        exclude_head: true,
        decalspec: Some("50% 50% 0 100%".to_string()),
        ..GenerateArgs::default()
    }
}

fn silent() -> Printer {
    Printer::with_verbosity(Verbosity::Silent)
}

#[test]
fn test_slot_colours_darken_the_diffuse() {
    let dir = tempdir().unwrap();
    let input = skin_package(dir.path(), Rgba([255, 0, 0, 255]));
    let out = dir.path().join("out");

    let summary = generate(&body_args(input, out.clone()), &silent()).unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(summary.failed, 0);

    let result = image::open(out.join("skin_body_Siren.png")).unwrap().to_rgba8();
    assert_eq!(result.dimensions(), (8, 8));
    for pixel in result.pixels() {
        // Slot A shadow is a dark blue; the decal area needs the blue channel.
        assert!(pixel[0] < 20 && pixel[1] < 20 && pixel[2] < 60, "{:?}", pixel);
        assert!(pixel[2] > pixel[0]);
        assert_eq!(pixel[3], 255);
    }
}

#[test]
fn test_decal_covers_its_area() {
    let dir = tempdir().unwrap();
    let input = skin_package(dir.path(), Rgba([255, 0, 255, 255]));
    let out = dir.path().join("out");

    generate(&body_args(input, out.clone()), &silent()).unwrap();

    let result = image::open(out.join("skin_body_Siren.png")).unwrap().to_rgba8();
    for pixel in result.pixels() {
        assert_eq!(pixel, &Rgba([0, 0, 0, 255]));
    }
}

#[test]
fn test_without_decalspec_the_decal_is_skipped() {
    let dir = tempdir().unwrap();
    let input = skin_package(dir.path(), Rgba([255, 0, 255, 255]));
    let out = dir.path().join("out");

    let args = GenerateArgs {
        decalspec: None,
        ..body_args(input, out.clone())
    };
    generate(&args, &silent()).unwrap();

    let result = image::open(out.join("skin_body_Siren.png")).unwrap().to_rgba8();
    assert!(result.pixels().all(|p| p != &Rgba([0, 0, 0, 255])));
}

#[test]
fn test_package_passes_checks() {
    let dir = tempdir().unwrap();
    let input = skin_package(dir.path(), Rgba([255, 0, 0, 255]));
    let skin = SkinDirectory::open(&input).unwrap();

    let options = CheckOptions {
        parts: vec![PartKind::Body],
        decalspec: Some("50% 50% 0 100%".to_string()),
        keep_white: false,
    };
    let result = validate_skin(&skin, &options);
    assert!(result.is_ok(), "{:?}", result);
}
