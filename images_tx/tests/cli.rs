mod common;

use common::{gradient, scratch_path};
use images_tx::codec;
use images_tx::{Pixel, PixelBuffer};
use std::process::Command;

fn images_tx() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_images_tx"));
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn help_exits_cleanly() {
    let output = images_tx().arg("-h").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-p50"));
    assert!(stdout.contains("Swap red and green values"));
}

#[test]
fn transforms_a_png_file() {
    let input = scratch_path("cli_png", "in.png");
    let output = scratch_path("cli_png", "out.png");
    codec::save(&PixelBuffer::filled(5, 3, Pixel::opaque(0, 100, 200)), &input).unwrap();

    let status = images_tx()
        .args(["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap(), "-g"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        codec::open(&output).unwrap(),
        PixelBuffer::filled(5, 3, Pixel::opaque(100, 100, 100))
    );
}

#[test]
fn parallel_flag_gives_the_same_file() {
    let input = scratch_path("cli_parallel", "in.png");
    let sequential = scratch_path("cli_parallel", "seq.png");
    let parallel = scratch_path("cli_parallel", "par.png");
    codec::save(&gradient(40, 31), &input).unwrap();

    for (out, extra) in [(&sequential, None), (&parallel, Some("-parallel"))] {
        let mut command = images_tx();
        command.args(["-i", input.to_str().unwrap(), "-o", out.to_str().unwrap(), "-p3", "-srg"]);
        command.args(extra);
        assert!(command.status().unwrap().success());
    }
    assert_eq!(std::fs::read(&sequential).unwrap(), std::fs::read(&parallel).unwrap());
}

#[test]
fn bad_arguments_fail_with_status_one() {
    let output = images_tx().args(["-i", "in.png", "-o", "out.png", "-zz"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown transformation flag: -zz"));
}

#[test]
fn missing_input_file_fails() {
    let output = scratch_path("cli_missing", "out.png");
    let status = images_tx()
        .args(["-i", "no/such/file.png", "-o", output.to_str().unwrap()])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(!output.exists());
}
