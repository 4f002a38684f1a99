//! Command-line interface
//!
//! Serve the prediction form, or run a single prediction from the terminal.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::form::{self, FormInputs, FormState};
use crate::inference::{ArtifactContext, ArtifactPaths};

// ─── Styling helpers ───────────────────────────────────────────────────────────

const W: usize = 58; // box inner width

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn line_box_top()    { println!("  {}", dim("┌─────────────────────────────────────────────────────────┐")); }
fn line_box_bottom() { println!("  {}", dim("└─────────────────────────────────────────────────────────┘")); }
fn line_box_sep()    { println!("  {}", dim("├─────────────────────────────────────────────────────────┤")); }

fn line_box(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let pad = W.saturating_sub(visible_len);
    println!("  {}  {}{} {}", dim("│"), content, " ".repeat(pad), dim("│"));
}

fn line_box_center(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let total_pad = W.saturating_sub(visible_len);
    let left = total_pad / 2;
    let right = total_pad - left;
    println!("  {}  {}{}{} {}", dim("│"), " ".repeat(left), content, " ".repeat(right), dim("│"));
}

fn line_box_empty() { line_box(""); }

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' { in_escape = true; continue; }
        if in_escape { if c == 'm' { in_escape = false; } continue; }
        out.push(c);
    }
    out
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "iris-predict")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Iris flower prediction form backed by a pre-trained random forest")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Server port
        #[arg(short, long, env = "API_PORT", default_value = "8080")]
        port: u16,

        /// Server host
        #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Directory containing rf_model.json, features_scaler.json and label_encoder.json
        #[arg(short, long, env = "ARTIFACT_DIR", default_value = ".")]
        artifact_dir: PathBuf,
    },

    /// Predict the species for one set of measurements
    Predict {
        #[arg(long, default_value = "5.0")]
        sepal_length: f64,

        #[arg(long, default_value = "5.0")]
        sepal_width: f64,

        #[arg(long, default_value = "5.0")]
        petal_length: f64,

        #[arg(long, default_value = "5.0")]
        petal_width: f64,

        /// Directory containing the artifact files
        #[arg(short, long, env = "ARTIFACT_DIR", default_value = ".")]
        artifact_dir: PathBuf,
    },

    /// Show a summary of the loaded artifacts
    Info {
        /// Directory containing the artifact files
        #[arg(short, long, env = "ARTIFACT_DIR", default_value = ".")]
        artifact_dir: PathBuf,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

fn load_context(artifact_dir: &PathBuf) -> anyhow::Result<std::sync::Arc<ArtifactContext>> {
    step_run(&format!("Loading artifacts from {}", artifact_dir.display()));
    let start = Instant::now();
    let context = FormState::new(ArtifactPaths::in_dir(artifact_dir))
        .load()?
        .into_context()
        .ok_or_else(|| anyhow::anyhow!("prediction form did not become ready"))?;
    step_done(&format!("{:?}", start.elapsed()));
    Ok(context)
}

pub fn cmd_predict(values: [f64; form::N_FEATURES], artifact_dir: &PathBuf) -> anyhow::Result<()> {
    section("Predict");

    let inputs = FormInputs::new(values)?;
    let context = load_context(artifact_dir)?;

    for slider in inputs.sliders() {
        println!("  {:<16} {}", muted(slider.label), format!("{:.2}", slider.value).white());
    }

    let label = form::predict_on_current_inputs(&inputs, &context)?;

    println!();
    println!("  {:<16} {}", muted("Prediction"), label.white().bold());
    println!();
    Ok(())
}

pub fn cmd_info(artifact_dir: &PathBuf) -> anyhow::Result<()> {
    section("Artifacts");

    let context = load_context(artifact_dir)?;
    let summary = context.summary();

    println!();
    println!("  {:<16} {}", muted("Features"), summary.n_features.to_string().white());
    if let Some(scaler_type) = summary.scaler_type {
        println!("  {:<16} {}", muted("Scaler"), format!("{:?}", scaler_type).white());
    }
    if let Some(n_trees) = summary.n_trees {
        println!("  {:<16} {}", muted("Trees"), n_trees.to_string().white());
    }
    println!("  {:<16} {}", muted("Classes"), summary.labels.join(", ").white());
    println!();
    Ok(())
}

pub async fn cmd_serve(host: &str, port: u16, artifact_dir: PathBuf) -> anyhow::Result<()> {
    use crate::server::{run_server, ServerConfig};

    println!();
    line_box_top();
    line_box_empty();
    line_box_center(&format!("{}", form::TITLE.white().bold()));
    line_box_center(&format!("{}", dim(&format!("v{}", env!("CARGO_PKG_VERSION")))));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box(&kv("Form   ", &format!("http://{}:{}", host, port)));
    line_box(&kv("API    ", &format!("http://{}:{}/api", host, port)));
    line_box(&kv("Health ", &format!("http://{}:{}/api/health", host, port)));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box_center(&format!("{}", dim("ctrl+c to stop")));
    line_box_empty();
    line_box_bottom();
    println!();

    let config = ServerConfig {
        host: host.to_string(),
        port,
        artifact_dir,
    };

    run_server(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        let colored = format!("{}", "hi".truecolor(1, 2, 3));
        assert_eq!(strip_ansi(&colored), "hi");
    }

    #[test]
    fn test_parse_predict() {
        let cli = Cli::try_parse_from([
            "iris-predict", "predict", "--sepal-length", "6.1", "--petal-width", "1.4",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Predict { sepal_length, sepal_width, petal_width, .. }) => {
                assert_eq!(sepal_length, 6.1);
                assert_eq!(sepal_width, 5.0);
                assert_eq!(petal_width, 1.4);
            }
            _ => panic!("expected predict command"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["iris-predict"]).unwrap();
        assert!(cli.command.is_none());
    }
}
