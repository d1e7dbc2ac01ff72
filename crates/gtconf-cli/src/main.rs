use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use serde::Serialize;

use gtconf_core::{
    ConfigSettings, ConfigView, REGISTER_BASE, encode_config, parse_config, presets, verify_image,
};

const FIRMWARE_IMAGE_NAME: &str = "goodix_911_cfg.bin";
const GOODIX_MODULE: &str = "goodix";

#[derive(Parser, Debug)]
#[command(name = "gtconf")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ", env!("GTCONF_BUILD_COMMIT"),
    ", ", env!("GTCONF_BUILD_DATE"), ")"
))]
#[command(
    about = "Generate and inspect Goodix GT911 touch controller register images.",
    long_about = None,
    after_help = "Examples:\n  gtconf generate --preset 7inch -o gt911.bin\n  gtconf generate --x-max 800 --y-max 480 --hex\n  gtconf show gt911.bin --json\n  gtconf install gt911.bin --reload"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a register image from a preset plus optional field overrides.
    #[command(
        after_help = "Examples:\n  gtconf generate -o gt911.bin\n  gtconf generate --preset waveshare7 -o gt911.bin\n  gtconf generate --threshold 20 --touch-points 2 --hex"
    )]
    Generate(GenerateArgs),
    /// Decode an image file and print its field view.
    #[command(alias = "inspect")]
    Show(ShowArgs),
    /// Recompute an image's checksum and compare it with the stored byte.
    Verify(VerifyArgs),
    /// List the built-in display presets.
    Presets(PresetsArgs),
    /// Install an image into the firmware directory.
    Install(InstallArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Preset to start from
    #[arg(long, default_value = presets::DEFAULT_PRESET)]
    preset: String,

    /// Horizontal resolution override (even, 2-4094)
    #[arg(long)]
    x_max: Option<u16>,

    /// Vertical resolution override (even, 2-4094)
    #[arg(long)]
    y_max: Option<u16>,

    /// Touch threshold override (1-255)
    #[arg(long)]
    threshold: Option<u16>,

    /// Touch point count override (1-10)
    #[arg(long)]
    touch_points: Option<u8>,

    /// Filter coefficient override (low byte stored)
    #[arg(long)]
    filter: Option<u16>,

    /// Output image path
    #[arg(short = 'o', long, required_unless_present = "hex")]
    out: Option<PathBuf>,

    /// Print the image as a hex dump instead of writing a file
    #[arg(long, conflicts_with = "out")]
    hex: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Path to a 186-byte image (single-match glob patterns accepted)
    input: PathBuf,

    /// Emit the field view as JSON
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Exit with a non-zero code if the stored checksum does not match
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Path to a 186-byte image (single-match glob patterns accepted)
    input: PathBuf,
}

#[derive(Args, Debug)]
struct PresetsArgs {
    /// Emit the preset table as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct InstallArgs {
    /// Path to a 186-byte image (single-match glob patterns accepted)
    input: PathBuf,

    /// Firmware directory to install into
    #[arg(long, default_value = "/lib/firmware")]
    firmware_dir: PathBuf,

    /// Unload and reload the goodix kernel module after installing
    #[arg(long)]
    reload: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(args) => cmd_generate(args),
        Commands::Show(args) => cmd_show(args),
        Commands::Verify(args) => cmd_verify(args),
        Commands::Presets(args) => cmd_presets(args),
        Commands::Install(args) => cmd_install(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_generate(args: GenerateArgs) -> Result<(), CliError> {
    let mut settings = presets::preset(&args.preset).ok_or_else(|| {
        CliError::new(
            format!("unknown preset '{}'", args.preset),
            Some(format!(
                "available presets: {}",
                presets::preset_names().join(", ")
            )),
        )
    })?;

    if let Some(x_max) = args.x_max {
        settings.x_max = x_max;
    }
    if let Some(y_max) = args.y_max {
        settings.y_max = y_max;
    }
    if let Some(threshold) = args.threshold {
        settings.touch_threshold = threshold;
    }
    if let Some(touch_points) = args.touch_points {
        settings.num_touch_points = touch_points;
    }
    if let Some(filter) = args.filter {
        settings.filter_coefficient = filter;
    }

    let image = encode_config(&settings).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("resolution axes must be even and between 2 and 4094".to_string()),
        )
    })?;

    if args.hex {
        print!("{}", hex_dump(&image));
        return Ok(());
    }

    let out = args.out.expect("output path required when not using --hex");
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&out, image).with_context(|| format!("Failed to write image: {}", out.display()))?;

    if !args.quiet {
        eprintln!("OK: image written -> {}", out.display());
    }
    Ok(())
}

fn cmd_show(args: ShowArgs) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input)?;
    let image = read_image(&input)?;
    let view = parse_image(&image, &input)?;

    if args.json {
        let json = if args.pretty {
            serde_json::to_string_pretty(&view)
        } else {
            serde_json::to_string(&view)
        }
        .context("JSON serialization failed")?;
        println!("{}", json);
    } else {
        print_details(&view);
    }

    if args.strict {
        let valid = verify_image(&image).map_err(|err| CliError::new(err.to_string(), None))?;
        if !valid {
            return Err(CliError::new(
                format!("checksum mismatch -> {}", input.display()),
                Some("regenerate the image with gtconf generate".to_string()),
            ));
        }
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input)?;
    let image = read_image(&input)?;
    let valid = verify_image(&image).map_err(|err| {
        CliError::new(
            format!("{}: {}", input.display(), err),
            Some("expected a 186-byte GT911 register image".to_string()),
        )
    })?;
    if !valid {
        return Err(CliError::new(
            format!("checksum mismatch -> {}", input.display()),
            Some("regenerate the image with gtconf generate".to_string()),
        ));
    }
    eprintln!("OK: checksum valid -> {}", input.display());
    Ok(())
}

#[derive(Debug, Serialize)]
struct PresetEntry {
    name: &'static str,
    #[serde(flatten)]
    settings: ConfigSettings,
}

fn cmd_presets(args: PresetsArgs) -> Result<(), CliError> {
    if args.json {
        let entries: Vec<PresetEntry> = presets::PRESETS
            .iter()
            .map(|entry| PresetEntry {
                name: entry.0,
                settings: entry.1,
            })
            .collect();
        let json = serde_json::to_string_pretty(&entries).context("JSON serialization failed")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Available presets:");
    for (name, settings) in presets::PRESETS {
        println!();
        println!("{}:", name);
        println!("  Resolution:         {}x{}", settings.x_max, settings.y_max);
        println!("  Touch threshold:    {}", settings.touch_threshold);
        println!("  Touch points:       {}", settings.num_touch_points);
        println!("  Filter coefficient: {}", settings.filter_coefficient);
    }
    Ok(())
}

fn cmd_install(args: InstallArgs) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input)?;
    let image = read_image(&input)?;
    parse_image(&image, &input)?;

    let valid = verify_image(&image).map_err(|err| CliError::new(err.to_string(), None))?;
    if !valid {
        return Err(CliError::new(
            format!("refusing to install {}: checksum mismatch", input.display()),
            Some("run gtconf verify on the image".to_string()),
        ));
    }

    if !args.firmware_dir.is_dir() {
        return Err(CliError::new(
            format!(
                "firmware directory not found: {}",
                args.firmware_dir.display()
            ),
            Some("create it or pass --firmware-dir".to_string()),
        ));
    }

    let target = args.firmware_dir.join(FIRMWARE_IMAGE_NAME);
    fs::write(&target, &image).map_err(|err| {
        let hint = if err.kind() == std::io::ErrorKind::PermissionDenied {
            Some("run as root; the firmware directory is usually root-owned".to_string())
        } else {
            None
        };
        CliError::new(
            format!("failed to install {}: {}", target.display(), err),
            hint,
        )
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644))
            .with_context(|| format!("Failed to set permissions: {}", target.display()))?;
    }

    if !args.quiet {
        eprintln!("OK: image installed -> {}", target.display());
    }

    if args.reload {
        reload_driver(args.quiet)
    } else {
        if !args.quiet {
            eprintln!("Driver not reloaded; changes take effect after reboot or --reload.");
        }
        Ok(())
    }
}

fn reload_driver(quiet: bool) -> Result<(), CliError> {
    // modprobe -n resolves the module without loading it.
    run_modprobe(&["-n", GOODIX_MODULE])?;
    run_modprobe(&["-r", GOODIX_MODULE])?;
    thread::sleep(Duration::from_secs(1));
    run_modprobe(&[GOODIX_MODULE])?;
    if !quiet {
        eprintln!("Driver reloaded; check `dmesg | grep -i goodix` for results.");
    }
    Ok(())
}

fn run_modprobe(args: &[&str]) -> Result<(), CliError> {
    let output = Command::new("modprobe").args(args).output().map_err(|err| {
        CliError::new(
            format!("failed to run modprobe: {}", err),
            Some("install kmod or rerun without --reload".to_string()),
        )
    })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(CliError::new(
            format!("modprobe {} failed: {}", args.join(" "), stderr),
            Some("the goodix driver module may not be available on this system".to_string()),
        ));
    }
    Ok(())
}

fn read_image(path: &Path) -> Result<Vec<u8>, CliError> {
    if !path.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", path.display()),
            Some("pass a register image produced by gtconf generate -o <path>".to_string()),
        ));
    }
    if !path.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", path.display()),
            Some("pass a 186-byte register image".to_string()),
        ));
    }
    fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
        .map_err(Into::into)
}

fn parse_image(image: &[u8], path: &Path) -> Result<ConfigView, CliError> {
    parse_config(image).map_err(|err| {
        CliError::new(
            format!("{}: {}", path.display(), err),
            Some("expected a 186-byte GT911 register image".to_string()),
        )
    })
}

fn print_details(view: &ConfigView) {
    println!("=== GT911 configuration ===");
    println!(" Config_Version (0x8047):      0x{:02X}", view.config_version);
    println!(" X Resolution (0x8048..49):    {}", view.x_max);
    println!(" Y Resolution (0x804A..4B):    {}", view.y_max);
    println!(" Touch Points (0x804C):        {}", view.num_touch_points);
    println!(" Module_Switch1 (0x804D):      0x{:02X}", view.module_switch1);
    println!(" Module_Switch2 (0x804E):      0x{:02X}", view.module_switch2);
    println!(" Shake_Count (0x804F):         {}", view.shake_count);
    println!(" Filter (0x8050):              {}", view.filter_coefficient);
    println!(" Screen_Touch_Level (0x8053):  {}", view.touch_threshold);
    println!(" Checksum (0x80FF):            0x{:02X}", view.checksum);
    println!(" Config_Fresh (0x8100):        0x{:02X}", view.config_fresh);
}

fn hex_dump(image: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in image.chunks(16).enumerate() {
        let addr = u32::from(REGISTER_BASE) + (row as u32) * 16;
        let bytes = chunk
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("{:04x}  {}\n", addr, bytes));
    }
    out
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let suffix = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                suffix
            ),
            Some("pass a single image file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
