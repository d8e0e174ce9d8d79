//! Hand gesture mouse: move and click the mouse with hand gestures in front of a webcam.

use anyhow::{Context, Result};
use clap::Parser;
use hand_gesture_mouse::{
    app::GestureMouseApp,
    config::{Config, EXAMPLE_CONFIG},
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long)]
    cam: Option<i32>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// GUI display mode (window, none); overrides the config file
    #[arg(short, long)]
    gui: Option<String>,

    /// Do not mirror the camera image
    #[arg(long)]
    no_mirror: bool,

    /// Do not draw the hand skeleton
    #[arg(long)]
    no_skeleton: bool,

    /// Show the frame rate
    #[arg(long)]
    fps: bool,

    /// Directory to store screenshots in
    #[arg(short, long)]
    screenshot_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

/// Let command-line options that were given override the configuration
fn apply_args(config: &mut Config, args: &Args) {
    if let Some(cam) = args.cam {
        config.camera.index = cam;
    }
    if args.no_mirror {
        config.camera.mirror = false;
    }
    if args.no_skeleton {
        config.display.draw_skeleton = false;
    }
    if args.fps {
        config.display.show_fps = true;
    }
    if let Some(dir) = &args.screenshot_dir {
        config.screenshot.directory = dir.clone();
    }
    match args.gui.as_deref() {
        Some("none") => config.display.show_window = false,
        Some("window") => config.display.show_window = true,
        Some(other) => log::warn!("Unknown GUI mode '{}', keeping configured display", other),
        None => {}
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Hand Gesture Mouse");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    apply_args(&mut config, &args);

    config.validate().context("Invalid configuration")?;

    let mut app = GestureMouseApp::new(config).context("Failed to start")?;
    app.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden_window_config() -> Config {
        Config::from_yaml("display:\n  show_window: false\n").unwrap()
    }

    #[test]
    fn test_config_window_setting_kept_without_gui_flag() {
        let mut config = hidden_window_config();
        let args = Args::parse_from(["hand-gesture-mouse", "-C", "gesture.yaml"]);

        apply_args(&mut config, &args);

        assert!(!config.display.show_window);
    }

    #[test]
    fn test_gui_flag_overrides_config() {
        let mut config = hidden_window_config();
        let args = Args::parse_from(["hand-gesture-mouse", "--gui", "window"]);
        apply_args(&mut config, &args);
        assert!(config.display.show_window);

        let mut config = Config::default();
        let args = Args::parse_from(["hand-gesture-mouse", "--gui", "none"]);
        apply_args(&mut config, &args);
        assert!(!config.display.show_window);
    }

    #[test]
    fn test_unknown_gui_mode_keeps_config() {
        let mut config = hidden_window_config();
        let args = Args::parse_from(["hand-gesture-mouse", "--gui", "fullscreen"]);
        apply_args(&mut config, &args);
        assert!(!config.display.show_window);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();
        let args = Args::parse_from([
            "hand-gesture-mouse",
            "--cam",
            "2",
            "--no-mirror",
            "--no-skeleton",
            "--fps",
            "-s",
            "/tmp/shots",
        ]);

        apply_args(&mut config, &args);

        assert_eq!(config.camera.index, 2);
        assert!(!config.camera.mirror);
        assert!(!config.display.draw_skeleton);
        assert!(config.display.show_fps);
        assert_eq!(config.screenshot.directory, PathBuf::from("/tmp/shots"));
        assert!(config.display.show_window);
    }
}
