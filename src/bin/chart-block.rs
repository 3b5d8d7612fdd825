use anyhow::{Context, Result};
use chart_block::render::{build_chart_spec, render_to_file};
use chart_block::settings::SettingsPanelBuilder;
use chart_block::storage;
use chart_block::tunes::TUNES;
use chart_block::{ChartConfig, ChartData, ChartTool, ChartType, Palette, PlottersSurface, ToolConfig, ToolInit};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "chart-block",
    version,
    about = "Render, inspect & script-edit chart blocks"
)]
struct Cli {
    /// Tool configuration (TOML). Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a chart record to an .svg or .png file.
    Render(RenderArgs),
    /// Print the drawing request (Chart.js-shaped JSON) for a chart record.
    Spec { input: PathBuf },
    /// Print the settings panel a chart record produces.
    Panel { input: PathBuf },
    /// Replay a JSON array of editor events against a chart record.
    Edit(EditArgs),
    /// Export the chart table as CSV.
    Csv {
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the default chart record.
    New {
        #[arg(long)]
        out: PathBuf,
        /// Chart type (bar, line, pie, doughnut, radar, polarArea).
        #[arg(long = "type", value_parser = parse_chart_type)]
        chart_type: Option<ChartType>,
    },
    /// List the chart-type tunes.
    Tunes,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Chart record (JSON). Missing fields get the defaults.
    input: PathBuf,
    /// Output path (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    /// Width in pixels (overrides the config file).
    #[arg(long)]
    width: Option<u32>,
    /// Height in pixels (overrides the config file).
    #[arg(long)]
    height: Option<u32>,
    /// Override the chart type.
    #[arg(long = "type", value_parser = parse_chart_type)]
    chart_type: Option<ChartType>,
    /// Override the title.
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    input: PathBuf,
    /// JSON array of events, e.g. [{"target":"settings","event":"addDataset"}]
    #[arg(long)]
    events: PathBuf,
    /// Where to write the edited record (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also draw the edited chart (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
}

fn parse_chart_type(s: &str) -> Result<ChartType, String> {
    ChartType::parse(s).ok_or_else(|| {
        let names: Vec<&str> = ChartType::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown chart type '{s}', expected one of: {}", names.join(", "))
    })
}

fn load(input: &Path) -> Result<ChartConfig> {
    storage::load_config(input).with_context(|| format!("reading {}", input.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let tool_cfg = ToolConfig::load(cli.config.as_deref()).context("loading tool configuration")?;
    match cli.cmd {
        Command::Render(args) => cmd_render(args, &tool_cfg),
        Command::Spec { input } => {
            let spec = build_chart_spec(&load(&input)?, &Palette::default());
            println!("{}", serde_json::to_string_pretty(&spec)?);
            Ok(())
        }
        Command::Panel { input } => {
            let panel = SettingsPanelBuilder::default().build(&load(&input)?);
            println!("{}", serde_json::to_string_pretty(&panel)?);
            Ok(())
        }
        Command::Edit(args) => cmd_edit(args, &tool_cfg),
        Command::Csv { input, out } => {
            storage::export_csv(&load(&input)?, &out)?;
            eprintln!("Wrote table to {}", out.display());
            Ok(())
        }
        Command::New { out, chart_type } => {
            let cfg = ChartConfig::from_partial(ChartData {
                chart_type,
                ..ChartData::default()
            });
            storage::save_config(&cfg, &out)?;
            eprintln!("Wrote {} chart to {}", cfg.chart_type, out.display());
            Ok(())
        }
        Command::Tunes => {
            for t in TUNES {
                println!("{:<10} {}", t.name.as_str(), t.title);
            }
            Ok(())
        }
    }
}

fn cmd_render(args: RenderArgs, tool_cfg: &ToolConfig) -> Result<()> {
    let mut cfg = load(&args.input)?;
    if let Some(t) = args.chart_type {
        cfg.chart_type = t;
    }
    if let Some(title) = args.title {
        cfg.title = title.trim().to_string();
    }
    let width = args.width.unwrap_or(tool_cfg.canvas.width);
    let height = args.height.unwrap_or(tool_cfg.canvas.height);
    if !tool_cfg.register_fonts() {
        log::info!("no font available, bitmap output will have no text");
    }
    render_to_file(&cfg, &args.out, width, height)
        .with_context(|| format!("drawing {}", args.out.display()))?;
    eprintln!("Wrote plot to {}", args.out.display());
    Ok(())
}

fn cmd_edit(args: EditArgs, tool_cfg: &ToolConfig) -> Result<()> {
    let cfg = load(&args.input)?;
    let events = storage::load_events(&args.events)
        .with_context(|| format!("reading events from {}", args.events.display()))?;
    let surface = PlottersSurface::svg(tool_cfg.canvas.width, tool_cfg.canvas.height);
    let mut tool = ChartTool::new(ToolInit::editable(cfg.into()), surface);
    tool.render()?;
    for (i, ev) in events.into_iter().enumerate() {
        let refresh = tool.handle(ev)?;
        log::info!("event #{i}: {refresh:?}");
    }
    let saved = tool.save();
    match &args.out {
        Some(path) => {
            storage::save_config(saved, path)?;
            eprintln!("Saved edited chart to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(saved)?),
    }
    if let Some(plot) = &args.plot {
        tool_cfg.register_fonts();
        render_to_file(saved, plot, tool_cfg.canvas.width, tool_cfg.canvas.height)?;
        eprintln!("Wrote plot to {}", plot.display());
    }
    Ok(())
}
