use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::process::Command;

use tempfile::TempDir;

use rle7::{compress, decompress};

fn sample() -> Vec<u8> {
    let mut data = b"header: ".to_vec();
    data.extend(vec![b' '; 40]);
    data.extend((0..1500u32).map(|i| (i % 13) as u8));
    data.extend(vec![0xFF; 1000]);
    data.extend(b"tail");
    data
}

#[test]
fn round_trip_through_files() {
    let dir = TempDir::new().unwrap();
    let original_path = dir.path().join("input.bin");
    let packed_path = dir.path().join("input.rle");
    let restored_path = dir.path().join("restored.bin");
    let original = sample();
    fs::write(&original_path, &original).unwrap();

    {
        let mut reader = BufReader::new(File::open(&original_path).unwrap());
        let mut writer = BufWriter::new(File::create(&packed_path).unwrap());
        let counters = compress(&mut reader, &mut writer).unwrap();
        assert_eq!(counters.input.value(), original.len() as u128);
    }
    let packed = fs::read(&packed_path).unwrap();
    assert!(packed.len() < original.len());
    assert_eq!(packed.last(), Some(&0x00));

    {
        let mut reader = BufReader::new(File::open(&packed_path).unwrap());
        let mut writer = BufWriter::new(File::create(&restored_path).unwrap());
        let counters = decompress(&mut reader, &mut writer).unwrap();
        assert_eq!(counters.output.value(), original.len() as u128);
    }
    assert_eq!(fs::read(&restored_path).unwrap(), original);
}

#[test]
fn binary_compresses_and_reports() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("aaab.txt");
    let packed = dir.path().join("aaab.rle");
    let restored = dir.path().join("aaab.out");
    fs::write(&input, b"AAAB").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_rle7"))
        .arg("c")
        .arg(&input)
        .arg(&packed)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(fs::read(&packed).unwrap(), vec![0x03, 0x41, 0x81, 0x42, 0x00]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("004 bytes processed,"), "{}", stdout);
    assert!(stdout.contains("005 bytes produced."), "{}", stdout);

    let out = Command::new(env!("CARGO_BIN_EXE_rle7"))
        .args(["--quiet", "decompress"])
        .arg(&packed)
        .arg(&restored)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert_eq!(fs::read(&restored).unwrap(), b"AAAB");
}

#[test]
fn binary_fails_on_missing_input() {
    let dir = TempDir::new().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_rle7"))
        .arg("compress")
        .arg(dir.path().join("nope.txt"))
        .arg(dir.path().join("nope.rle"))
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to open input file"));
}

#[test]
fn binary_rejects_truncated_stream() {
    let dir = TempDir::new().unwrap();
    let packed = dir.path().join("bad.rle");
    fs::write(&packed, [0x85, 0x41, 0x42]).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_rle7"))
        .arg("d")
        .arg(&packed)
        .arg(dir.path().join("bad.out"))
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("malformed stream"));
}

#[test]
fn binary_accepts_uppercase_mode_letters() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("runs.bin");
    let packed = dir.path().join("runs.rle");
    let restored = dir.path().join("runs.out");
    let original = [vec![9u8; 200], b"xyz".to_vec()].concat();
    fs::write(&input, &original).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_rle7"))
        .args(["-q", "C"])
        .arg(&input)
        .arg(&packed)
        .output()
        .unwrap();
    assert!(out.status.success());

    let out = Command::new(env!("CARGO_BIN_EXE_rle7"))
        .args(["-q", "D"])
        .arg(&packed)
        .arg(&restored)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(fs::read(&restored).unwrap(), original);
}
