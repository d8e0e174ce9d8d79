//! Build script for detecting system dependencies and providing installation guidance.
//!
//! This script checks for required system libraries (OpenCV, X11 with XTEST,
//! pkg-config) and for the hand landmark models, and prints hints for
//! whatever is missing.

use std::env;
use std::path::Path;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    check_opencv();

    // X11 is required for cursor control and screenshots on Linux
    check_x11();

    check_pkg_config();

    check_models();

    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
}

fn check_opencv() {
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    let found = ["opencv4", "opencv"].iter().find_map(|name| {
        Command::new("pkg-config")
            .args(["--modversion", name])
            .output()
            .ok()
            .filter(|output| output.status.success())
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
    });

    match found {
        Some(version) => println!("cargo:warning=Found OpenCV version: {version}"),
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config. Make sure OpenCV is installed.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev");
            println!("cargo:warning=On macOS: brew install opencv");
        }
    }
}

fn check_x11() {
    if !env::var("TARGET").unwrap_or_default().contains("linux") {
        return;
    }

    for (module, hint) in [("x11", "libx11-dev"), ("xtst", "libxtst-dev")] {
        let output = Command::new("pkg-config").args(["--exists", module]).output();
        match output {
            Ok(output) if output.status.success() => {}
            _ => {
                println!("cargo:warning={module} not found. Mouse control may not work on this machine.");
                println!("cargo:warning=On Ubuntu: sudo apt-get install {hint}");
            }
        }
    }
}

fn check_pkg_config() {
    let output = Command::new("pkg-config").arg("--version").output();

    match output {
        Ok(output) if output.status.success() => {}
        _ => {
            println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
            println!("cargo:warning=On macOS: brew install pkg-config");
        }
    }
}

fn check_models() {
    for model in ["assets/hand_landmark_full.onnx", "assets/hand_landmark_lite.onnx"] {
        println!("cargo:rerun-if-changed={model}");
        if !Path::new(model).exists() {
            println!("cargo:warning=Hand landmark model missing: {model}");
        }
    }
}
