use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gtconf"))
}

fn generate_image(dir: &TempDir) -> std::path::PathBuf {
    let image = dir.path().join("gt911.bin");
    cmd()
        .arg("generate")
        .arg("-o")
        .arg(&image)
        .assert()
        .success();
    image
}

#[test]
fn help_supports_show_and_inspect() {
    cmd().arg("show").arg("--help").assert().success();
    cmd().arg("inspect").arg("--help").assert().success();
}

#[test]
fn generate_writes_full_image() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);

    let bytes = fs::read(&image_path).expect("read image");
    assert_eq!(bytes.len(), 186);
    assert_eq!(bytes[0], 0x01);
    assert_eq!(&bytes[1..3], &1024u16.to_le_bytes());
    assert_eq!(&bytes[3..5], &600u16.to_le_bytes());
    assert_eq!(bytes[184], 0x85);
    assert_eq!(bytes[185], 0x01);
}

#[test]
fn generate_applies_overrides() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = temp.path().join("override.bin");

    cmd()
        .arg("generate")
        .arg("--preset")
        .arg("5inch")
        .arg("--touch-points")
        .arg("2")
        .arg("-o")
        .arg(&image_path)
        .assert()
        .success();

    let bytes = fs::read(&image_path).expect("read image");
    assert_eq!(&bytes[1..3], &800u16.to_le_bytes());
    assert_eq!(bytes[5], 2);
}

#[test]
fn generate_unknown_preset_errors_with_hint() {
    cmd()
        .arg("generate")
        .arg("--preset")
        .arg("42inch")
        .arg("--hex")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")).and(contains("waveshare7")));
}

#[test]
fn generate_rejects_odd_resolution() {
    cmd()
        .arg("generate")
        .arg("--x-max")
        .arg("801")
        .arg("--hex")
        .assert()
        .failure()
        .stderr(contains("out of range or odd"));
}

#[test]
fn generate_hex_prints_register_addresses() {
    cmd()
        .arg("generate")
        .arg("--hex")
        .assert()
        .success()
        .stdout(contains("8047").and(contains("58 02")));
}

#[test]
fn show_json_round_trips() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);

    let assert = cmd()
        .arg("show")
        .arg(&image_path)
        .arg("--json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["x_max"], 1024);
    assert_eq!(value["y_max"], 600);
    assert_eq!(value["num_touch_points"], 5);
    assert_eq!(value["checksum"], 0x85);
}

#[test]
fn show_text_lists_register_addresses() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);

    cmd()
        .arg("show")
        .arg(&image_path)
        .assert()
        .success()
        .stdout(contains("0x8047").and(contains("0x8100")));
}

#[test]
fn show_strict_fails_on_corrupt_image() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);

    let mut bytes = fs::read(&image_path).expect("read image");
    bytes[9] ^= 0xFF;
    fs::write(&image_path, &bytes).expect("write corrupt image");

    cmd()
        .arg("show")
        .arg(&image_path)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("checksum mismatch"));
}

#[test]
fn show_rejects_truncated_image() {
    let temp = TempDir::new().expect("tempdir");
    let short = temp.path().join("short.bin");
    fs::write(&short, vec![0u8; 100]).expect("write short file");

    cmd()
        .arg("show")
        .arg(&short)
        .assert()
        .failure()
        .stderr(contains("exactly 186").and(contains("hint:")));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");

    cmd()
        .arg("show")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn pretty_requires_json() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);

    cmd()
        .arg("show")
        .arg(&image_path)
        .arg("--pretty")
        .assert()
        .failure();
}

#[test]
fn verify_accepts_fresh_image() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);

    cmd()
        .arg("verify")
        .arg(&image_path)
        .assert()
        .success()
        .stderr(contains("OK: checksum valid"));
}

#[test]
fn verify_detects_corruption() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);

    let mut bytes = fs::read(&image_path).expect("read image");
    bytes[12] = bytes[12].wrapping_add(1);
    fs::write(&image_path, &bytes).expect("write corrupt image");

    cmd()
        .arg("verify")
        .arg(&image_path)
        .assert()
        .failure()
        .stderr(contains("checksum mismatch").and(contains("hint:")));
}

#[test]
fn presets_lists_every_name() {
    cmd()
        .arg("presets")
        .assert()
        .success()
        .stdout(contains("7inch").and(contains("5inch")).and(contains("waveshare7")));
}

#[test]
fn presets_json_is_parseable() {
    let assert = cmd().arg("presets").arg("--json").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value[0]["name"], "7inch");
    assert_eq!(value[0]["x_max"], 1024);
    assert_eq!(value.as_array().map(Vec::len), Some(3));
}

#[test]
fn install_into_custom_firmware_dir() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);
    let firmware = temp.path().join("firmware");
    fs::create_dir(&firmware).expect("firmware dir");

    cmd()
        .arg("install")
        .arg(&image_path)
        .arg("--firmware-dir")
        .arg(&firmware)
        .assert()
        .success()
        .stderr(contains("OK: image installed"));

    let installed = fs::read(firmware.join("goodix_911_cfg.bin")).expect("installed image");
    assert_eq!(installed.len(), 186);
    assert_eq!(installed, fs::read(&image_path).expect("source image"));
}

#[test]
fn install_missing_firmware_dir_errors() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);

    cmd()
        .arg("install")
        .arg(&image_path)
        .arg("--firmware-dir")
        .arg(temp.path().join("absent"))
        .assert()
        .failure()
        .stderr(contains("firmware directory not found").and(contains("hint:")));
}

#[test]
fn install_refuses_corrupt_image() {
    let temp = TempDir::new().expect("tempdir");
    let image_path = generate_image(&temp);
    let firmware = temp.path().join("firmware");
    fs::create_dir(&firmware).expect("firmware dir");

    let mut bytes = fs::read(&image_path).expect("read image");
    bytes[5] ^= 0x01;
    fs::write(&image_path, &bytes).expect("write corrupt image");

    cmd()
        .arg("install")
        .arg(&image_path)
        .arg("--firmware-dir")
        .arg(&firmware)
        .assert()
        .failure()
        .stderr(contains("refusing to install"));
}

#[test]
fn glob_input_resolves_single_match() {
    let temp = TempDir::new().expect("tempdir");
    generate_image(&temp);

    cmd()
        .arg("verify")
        .arg(temp.path().join("*.bin"))
        .assert()
        .success();
}

#[test]
fn glob_input_rejects_multiple_matches() {
    let temp = TempDir::new().expect("tempdir");
    generate_image(&temp);
    let second = temp.path().join("second.bin");
    cmd()
        .arg("generate")
        .arg("-o")
        .arg(&second)
        .assert()
        .success();

    cmd()
        .arg("verify")
        .arg(temp.path().join("*.bin"))
        .assert()
        .failure()
        .stderr(contains("multiple files match"));
}
