//! Glyphgate CLI - render monochrome BMP challenge images
//!
//! Generates random challenges (printing the expected answer), renders
//! fixed text for previews, and dumps the embedded font.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use glyphgate_cli::commands;
use glyphgate_cli::input::ConfigOverrides;

/// Glyphgate - monochrome BMP challenge images
#[derive(Parser)]
#[command(name = "glyphgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random challenge and write its image
    Generate {
        /// Output BMP path, or - for stdout
        #[arg(short, long, default_value = "captcha.bmp")]
        output: String,

        /// Seed for reproducible output (not for production use)
        #[arg(long)]
        seed: Option<u32>,

        /// Print a JSON summary
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Render fixed text at a fixed angle
    Render {
        /// Text to render
        #[arg(short, long)]
        text: String,

        /// Rotation in degrees
        #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
        angle: f64,

        /// Output BMP path, or - for stdout
        #[arg(short, long, default_value = "render.bmp")]
        output: String,

        /// Seed for the noise step
        #[arg(long, default_value_t = 0)]
        seed: u32,

        /// Print a JSON summary
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Print the embedded font as ASCII art
    Glyphs {
        /// Only print these characters
        #[arg(long)]
        only: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            output,
            seed,
            json,
            overrides,
        } => commands::generate::run(&output, seed, &overrides, json),
        Commands::Render {
            text,
            angle,
            output,
            seed,
            json,
            overrides,
        } => commands::render::run(&text, angle, &output, seed, &overrides, json),
        Commands::Glyphs { only } => commands::glyphs::run(only.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate_defaults() {
        let cli = Cli::try_parse_from(["glyphgate", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                output,
                seed,
                json,
                overrides,
            } => {
                assert_eq!(output, "captcha.bmp");
                assert_eq!(seed, None);
                assert!(!json);
                assert!(!overrides.no_distort);
                assert_eq!(overrides.scale, None);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_generate_overrides() {
        let cli = Cli::try_parse_from([
            "glyphgate",
            "generate",
            "--seed",
            "42",
            "--no-distort",
            "--scale",
            "1",
            "--length",
            "6",
            "-o",
            "-",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                output,
                seed,
                overrides,
                ..
            } => {
                assert_eq!(output, "-");
                assert_eq!(seed, Some(42));
                assert!(overrides.no_distort);
                assert_eq!(overrides.scale, Some(1.0));
                assert_eq!(overrides.length, Some(6));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_render_negative_angle() {
        let cli =
            Cli::try_parse_from(["glyphgate", "render", "--text", "ABDH", "--angle", "-3"]).unwrap();
        match cli.command {
            Commands::Render { text, angle, .. } => {
                assert_eq!(text, "ABDH");
                assert_eq!(angle, -3.0);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_glyphs_filter() {
        let cli = Cli::try_parse_from(["glyphgate", "-v", "glyphs", "--only", "AB"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Glyphs { only } => assert_eq!(only.as_deref(), Some("AB")),
            _ => panic!("expected glyphs command"),
        }
    }
}
