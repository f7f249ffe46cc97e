use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tdiff_engine::{DiffOptions, Differ, EditOp, EditScript, Op};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let options = resolve_options(&cli)?;
    debug!(?options, "resolved diff options");

    let (old, new) = if cli.strings {
        (cli.old.clone(), cli.new.clone())
    } else {
        (read_input(Path::new(&cli.old))?, read_input(Path::new(&cli.new))?)
    };

    let script = Differ::new(options).diff_text(&old, &new);
    print!("{}", render(&script, cli.format)?);
    if cli.stats {
        println!("{}", render_stats(&script));
    }
    Ok(())
}

/// Options from the config file, if any, with command-line flags on top.
fn resolve_options(cli: &Cli) -> anyhow::Result<DiffOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            DiffOptions::from_toml_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => DiffOptions::default(),
    };
    if let Some(ms) = cli.timeout_ms {
        options.timeout_ms = ms;
    }
    if cli.no_timeout {
        options.timeout_ms = 0;
    }
    if cli.no_line_mode {
        options.line_mode = false;
    }
    if let Some(profile) = cli.cleanup {
        options.cleanup = profile;
    }
    if let Some(cost) = cli.edit_cost {
        options.edit_cost = cost;
    }
    Ok(options)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn render(script: &EditScript, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => {
            let mut out = render_ops(script.iter());
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(script)?;
            out.push('\n');
            out
        }
        OutputFormat::Delta => format!("{}\n", script.to_delta()),
        OutputFormat::Views => format!(
            "{} {}\n{} {}\n",
            "old:".bold(),
            render_ops(script.old_view().iter()),
            "new:".bold(),
            render_ops(script.new_view().iter()),
        ),
    })
}

fn render_ops<'a>(ops: impl Iterator<Item = &'a EditOp>) -> String {
    ops.map(|o| match o.op {
        Op::Delete => o.text.red().strikethrough().to_string(),
        Op::Insert => o.text.green().to_string(),
        Op::Equal => o.text.clone(),
    })
    .collect()
}

fn render_stats(script: &EditScript) -> String {
    let count = |op: Op| script.iter().filter(|o| o.op == op).count();
    format!(
        "{} {}  ({} equal, {} deleted, {} inserted)",
        "levenshtein:".bold(),
        script.levenshtein(),
        count(Op::Equal),
        count(Op::Delete).to_string().red(),
        count(Op::Insert).to_string().green(),
    )
}
