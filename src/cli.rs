use crate::config::load_config;
use crate::cycle::detect_cycle;
use crate::layout::{LayoutOptions, Viewport, ViewMode, compute_layout};
use crate::layout_dump::{LayoutDump, write_layout_json};
use crate::model::{CENTER_NODE_ID, WorkspaceGraph};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "orbitlay",
    version,
    about = "Radial workspace layout engine (deterministic domain/ring placement)"
)]
pub struct Args {
    /// Input workspace JSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output layout JSON file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Center node id
    #[arg(long = "center", default_value = CENTER_NODE_ID)]
    pub center: String,

    /// View mode
    #[arg(long = "viewMode", value_enum, default_value = "expanded")]
    pub view_mode: ViewModeArg,

    /// Viewport width
    #[arg(short = 'w', long = "width", default_value_t = 1920.0)]
    pub width: f64,

    /// Viewport height
    #[arg(short = 'H', long = "height", default_value_t = 1080.0)]
    pub height: f64,

    /// Validate references and acyclicity only; no layout output
    #[arg(long = "check", default_value_t = false)]
    pub check: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ViewModeArg {
    Expanded,
    Compact,
}

impl From<ViewModeArg> for ViewMode {
    fn from(arg: ViewModeArg) -> Self {
        match arg {
            ViewModeArg::Expanded => ViewMode::Expanded,
            ViewModeArg::Compact => ViewMode::Compact,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let graph: WorkspaceGraph = serde_json::from_str(&input)?;

    graph.validate_references()?;
    let check = detect_cycle(&graph.nodes, &graph.edges, None)?;
    if check.has_cycle {
        let path = check
            .cycle
            .unwrap_or_default()
            .join(" -> ");
        return Err(anyhow::anyhow!("edge set contains a cycle: {path}"));
    }
    if args.check {
        eprintln!(
            "ok: {} nodes, {} edges, acyclic",
            graph.nodes.len(),
            graph.edges.len()
        );
        return Ok(());
    }

    let options = LayoutOptions {
        center_id: args.center.clone(),
        view_mode: args.view_mode.into(),
        viewport: Viewport::new(args.width, args.height),
        measure: None,
    };
    let result = compute_layout(&graph, &options, &config.layout);
    if result.pending_measurement {
        eprintln!("warning: unmeasured nodes, default sizes substituted; overlap guarantee suspended");
    }

    let dump = LayoutDump::from_result(
        &result,
        &graph,
        config.layout.collision.padding,
        options.measure.as_ref(),
        &config.layout.dimension,
    );
    match args.output.as_deref() {
        Some(path) => write_layout_json(&dump, path)?,
        None => println!("{}", dump.to_json()?),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::try_parse_from(["orbitlay", "-i", "workspace.json"]).unwrap();
        assert_eq!(args.center, CENTER_NODE_ID);
        assert_eq!(args.width, 1920.0);
        assert!(!args.check);
    }

    #[test]
    fn view_mode_flag_parses() {
        let args =
            Args::try_parse_from(["orbitlay", "--viewMode", "compact", "--check"]).unwrap();
        assert!(matches!(args.view_mode, ViewModeArg::Compact));
        assert!(args.check);
    }
}
