use std::fs;
use std::path::PathBuf;

use huffpack::compression::compress::compress;
use huffpack::compression::decompress::{decompress, test_file};
use huffpack::tools::cli::{HuffOpts, Mode};
use huffpack::HuffError;

/// Fresh scratch directory for one test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("huffpack-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn opts(mode: Mode, file: &PathBuf, output: Option<&PathBuf>) -> HuffOpts {
    HuffOpts {
        file: file.display().to_string(),
        output: output.map(|p| p.display().to_string()),
        op_mode: mode,
        ..HuffOpts::default()
    }
}

#[test]
fn compress_then_decompress_file() {
    let dir = scratch("roundtrip");
    let input = dir.join("input.txt");
    let packed = dir.join("input.huf");
    let restored = dir.join("restored.txt");
    let text = b"It was the best of times, it was the worst of times.\n".repeat(30);
    fs::write(&input, &text).unwrap();

    let report = compress(&opts(Mode::Zip, &input, Some(&packed))).unwrap();
    assert_eq!(report.bytes_in, text.len() as u64);
    assert_eq!(report.bytes_out, fs::metadata(&packed).unwrap().len());
    assert!(report.bytes_out < report.bytes_in);

    let tested = test_file(&opts(Mode::Test, &packed, None)).unwrap();
    assert_eq!(tested.bytes_out, text.len() as u64);

    let report = decompress(&opts(Mode::Unzip, &packed, Some(&restored))).unwrap();
    assert_eq!(report.bytes_out, text.len() as u64);
    assert_eq!(fs::read(&restored).unwrap(), text);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn empty_file() {
    let dir = scratch("empty");
    let input = dir.join("empty.txt");
    let packed = dir.join("empty.huf");
    let restored = dir.join("empty.out");
    fs::write(&input, b"").unwrap();

    compress(&opts(Mode::Zip, &input, Some(&packed))).unwrap();
    decompress(&opts(Mode::Unzip, &packed, Some(&restored))).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), Vec::<u8>::new());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input_is_io_error() {
    let dir = scratch("missing");
    let input = dir.join("nope.txt");
    let packed = dir.join("nope.huf");
    let result = compress(&opts(Mode::Zip, &input, Some(&packed)));
    assert!(matches!(result, Err(HuffError::Io(_))));
    assert!(!packed.exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn corrupt_input_leaves_no_output() {
    let dir = scratch("corrupt");
    let input = dir.join("input.txt");
    let packed = dir.join("input.huf");
    let restored = dir.join("restored.txt");
    fs::write(&input, b"abracadabra").unwrap();
    compress(&opts(Mode::Zip, &input, Some(&packed))).unwrap();

    let mut bytes = fs::read(&packed).unwrap();
    bytes.pop();
    fs::write(&packed, &bytes).unwrap();

    let result = decompress(&opts(Mode::Unzip, &packed, Some(&restored)));
    assert!(matches!(result, Err(HuffError::CorruptContainer(_))));
    assert!(!restored.exists());
    assert!(matches!(
        test_file(&opts(Mode::Test, &packed, None)),
        Err(HuffError::CorruptContainer(_))
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn existing_output_needs_force() {
    let dir = scratch("force");
    let input = dir.join("input.txt");
    let packed = dir.join("input.huf");
    fs::write(&input, b"abracadabra").unwrap();
    fs::write(&packed, b"keep me").unwrap();

    let mut options = opts(Mode::Zip, &input, Some(&packed));
    assert!(matches!(
        compress(&options),
        Err(HuffError::InvalidInput(_))
    ));
    assert_eq!(fs::read(&packed).unwrap(), b"keep me");

    options.force_overwrite = true;
    compress(&options).unwrap();
    assert_ne!(fs::read(&packed).unwrap(), b"keep me");
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn output_over_input_is_rejected() {
    let dir = scratch("same");
    let input = dir.join("input.txt");
    fs::write(&input, b"abracadabra").unwrap();
    let mut options = opts(Mode::Zip, &input, Some(&input));
    options.force_overwrite = true;
    assert!(matches!(
        compress(&options),
        Err(HuffError::InvalidInput(_))
    ));
    assert_eq!(fs::read(&input).unwrap(), b"abracadabra");
    fs::remove_dir_all(&dir).unwrap();
}
