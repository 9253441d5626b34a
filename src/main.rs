// SPDX-License-Identifier: MIT
//
// staple-studio: the Token Studio on the command line.
//
// This is the binary that wires the two library crates to a shell:
//
//   staple-color  → hex ↔ OKLCH, HSL, gamut mapping
//   staple-tokens → ramps, harmonies, contrast, palette resolution, export
//
// Every subcommand renders to a String; main decides whether it goes to
// stdout or to a file. Errors print to stderr with their context chain and
// the process exits with status 1.
//
// Logging goes to stderr through tracing-subscriber, filtered by the
// STAPLE_LOG environment variable (default `warn`):
//
//   STAPLE_LOG=debug staple-studio build theme.json

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use staple_color::Color;
use staple_tokens::audit::audit_theme;
use staple_tokens::contrast::ContrastReport;
use staple_tokens::export::{config_from_json, config_from_typescript, export, to_json};
use staple_tokens::preset::preset_seed;
use staple_tokens::ramp::generate_alpha_ramp;
use staple_tokens::{
    BuilderConfig, ExportFormat, HarmonyType, RampAlgorithm, RampParams, StepCount, ThemeMode,
    generate_harmony, generate_ramp,
};

const LOG_ENV: &str = "STAPLE_LOG";

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "staple-studio")]
#[command(version, about = "Build, inspect and export staple-css color themes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline on a config and export the result
    Build {
        /// Builder config (`.json`, or a `.ts` module written by `--format ts`)
        config: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Css)]
        format: FormatArg,
        /// Write to a file instead of stdout; the format's extension is added
        /// when the path has none
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the ramp generated from a hex seed or a preset name
    Ramp {
        /// `#rrggbb` or a preset name such as `blue`
        seed: String,
        /// Number of steps (12 or 16)
        #[arg(short, long, default_value_t = 12, value_parser = parse_steps)]
        steps: usize,
        /// Theme mode the ramp is generated for
        #[arg(short, long, value_enum, default_value_t = ModeArg::Light)]
        mode: ModeArg,
        /// Lightness/chroma distribution
        #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Curve)]
        algorithm: AlgorithmArg,
        /// Also print the alpha ramp built on the solid step
        #[arg(long)]
        alpha: bool,
    },
    /// Print a seed and its harmony companions
    Harmony {
        /// `#rrggbb`
        seed: String,
        /// complementary, split-complementary, triadic, tetradic, analogous, monochrome
        kind: String,
    },
    /// WCAG and APCA contrast of a foreground on a background
    Contrast {
        /// Foreground `#rrggbb`
        foreground: String,
        /// Background `#rrggbb`
        background: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the config's contrast pairs in both modes
    Audit {
        /// Builder config
        config: PathBuf,
        /// Print findings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the starter config as JSON
    Starter,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum FormatArg {
    Css,
    Json,
    #[value(alias = "typescript")]
    Ts,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Css => Self::Css,
            FormatArg::Json => Self::Json,
            FormatArg::Ts => Self::TypeScript,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum ModeArg {
    Light,
    Dark,
}

impl From<ModeArg> for ThemeMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Light => Self::Light,
            ModeArg::Dark => Self::Dark,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum AlgorithmArg {
    Curve,
    Linear,
}

impl From<AlgorithmArg> for RampAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Curve => Self::Curve,
            AlgorithmArg::Linear => Self::Linear,
        }
    }
}

fn parse_steps(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    StepCount::try_from(n).map(usize::from).map_err(|e| e.to_string())
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<BuilderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let is_ts = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ts"));
    let config = if is_ts {
        config_from_typescript(&text)
    } else {
        config_from_json(&text)
    };
    config.with_context(|| format!("cannot load config {}", path.display()))
}

fn build(config: &BuilderConfig, format: ExportFormat) -> Result<String> {
    let out = export(config, format).context("theme build failed")?;
    info!(format = %format, bytes = out.len(), "theme built");
    Ok(out)
}

/// `--output theme` becomes `theme.css` (or `.json`, `.ts`); a path that
/// already has an extension is used as given.
fn output_path(path: PathBuf, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(format.extension())
    }
}

/// A `#`-prefixed seed is always hex; otherwise a known preset wins over a
/// bare hex like `2563eb`.
fn parse_seed(seed: &str) -> Result<Color> {
    if !seed.starts_with('#') {
        if let Ok(color) = preset_seed(seed) {
            return Ok(color);
        }
    }
    Color::from_hex(seed).with_context(|| format!("{seed:?} is neither a preset nor a hex color"))
}

fn ramp(seed: &str, params: &RampParams, mode: ThemeMode, alpha: bool) -> Result<String> {
    let seed = parse_seed(seed)?;
    let ramp = generate_ramp(seed, params, mode);
    let mut out = String::new();
    for (i, hex) in ramp.to_hex().iter().enumerate() {
        let _ = writeln!(out, "{:>2}  {hex}", i + 1);
    }
    if alpha {
        let solid = ramp.step(params.step_count.solid_step()).unwrap_or(seed);
        out.push('\n');
        for (i, hex) in generate_alpha_ramp(solid, params.step_count).to_hex().iter().enumerate() {
            let _ = writeln!(out, "a{:<2} {hex}", i + 1);
        }
    }
    Ok(out)
}

fn harmony(seed: &str, kind: &str) -> Result<String> {
    let kind: HarmonyType = kind.parse()?;
    let set = generate_harmony(seed, kind)?;
    Ok(set.to_hex().join("\n") + "\n")
}

fn contrast(foreground: &str, background: &str, json: bool) -> Result<String> {
    let report = ContrastReport::from_hex(foreground, background)?;
    if json {
        return Ok(serde_json::to_string_pretty(&report)? + "\n");
    }
    let mut out = String::new();
    let _ = writeln!(out, "{} on {}", report.foreground, report.background);
    let _ = writeln!(out, "WCAG  {:.2}:1  {}", report.ratio, report.wcag);
    let _ = writeln!(out, "APCA  Lc {:.1}", report.lc);
    for (context, rating) in &report.apca {
        let _ = writeln!(out, "  {context:<11} {rating}");
    }
    Ok(out)
}

fn audit(config: &BuilderConfig, json: bool) -> Result<String> {
    if config.contrast_pairs.is_empty() {
        bail!("config has no contrastPairs to audit");
    }
    let findings = audit_theme(config)?;
    if json {
        return Ok(serde_json::to_string_pretty(&findings)? + "\n");
    }
    let mut out = String::new();
    for f in &findings {
        let verdict = if f.passes() { "pass" } else { "FAIL" };
        let _ = write!(
            out,
            "{:<5} {:<4} {} on {} ({}): {:.2}:1 {}, Lc {:.1}",
            f.mode, verdict, f.foreground, f.background, f.context, f.ratio, f.wcag, f.lc
        );
        if let Some(hex) = &f.suggestion {
            let _ = write!(out, ", try {hex}");
        }
        out.push('\n');
    }
    Ok(out)
}

fn run(command: Command) -> Result<(String, Option<PathBuf>)> {
    let rendered = match command {
        Command::Build {
            config,
            format,
            output,
        } => {
            let loaded = load_config(&config)?;
            let format = ExportFormat::from(format);
            debug!(path = %config.display(), format = %format, "building");
            let output = output.map(|path| output_path(path, format));
            return Ok((build(&loaded, format)?, output));
        }
        Command::Ramp {
            seed,
            steps,
            mode,
            algorithm,
            alpha,
        } => {
            let params = RampParams {
                step_count: StepCount::try_from(steps)?,
                algorithm: algorithm.into(),
                chroma_scale: 1.0,
            };
            ramp(&seed, &params, mode.into(), alpha)?
        }
        Command::Harmony { seed, kind } => harmony(&seed, &kind)?,
        Command::Contrast {
            foreground,
            background,
            json,
        } => contrast(&foreground, &background, json)?,
        Command::Audit { config, json } => audit(&load_config(&config)?, json)?,
        Command::Starter => to_json(&BuilderConfig::starter())? + "\n",
    };
    Ok((rendered, None))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = run(cli.command).and_then(|(rendered, output)| match output {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("cannot write {}", path.display())),
        None => {
            print!("{rendered}");
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("staple-studio: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

// ─── Tests ──────────────────────────────────────────────────────────────────
