use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pag", version)]
struct Cli {
    /// Log codec decisions (skipped and gated tags) to stderr. `RUST_LOG` overrides.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a JSON summary of a PAG file.
    Info(InfoArgs),
    /// Decode a PAG file into its JSON model.
    Dump(DumpArgs),
    /// Encode a JSON model into a PAG file.
    Encode(EncodeArgs),
    /// Decode a PAG file and encode it again, typically for an older player.
    Transcode(TranscodeArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input PAG file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Input PAG file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Input model JSON, as produced by `dump`.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PAG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    gate: GateArgs,
}

#[derive(Parser, Debug)]
struct TranscodeArgs {
    /// Input PAG file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PAG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    gate: GateArgs,
}

#[derive(clap::Args, Debug)]
struct GateArgs {
    /// Encode options JSON (`{"gate": {"mode": "stable"}, "version": 2}`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compatibility preset; overrides the config file.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Highest tag code to emit. Implies `--mode custom` unless a mode is given.
    #[arg(long)]
    level: Option<u16>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Stable,
    Beta,
    Custom,
}

impl From<ModeChoice> for pag::GateMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Stable => pag::GateMode::Stable,
            ModeChoice::Beta => pag::GateMode::Beta,
            ModeChoice::Custom => pag::GateMode::Custom,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Dump(args) => cmd_dump(args),
        Command::Encode(args) => cmd_encode(args),
        Command::Transcode(args) => cmd_transcode(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "pag=debug" } else { "pag=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_pag(path: &Path) -> anyhow::Result<pag::File> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    let file = pag::decode(&bytes).with_context(|| format!("decode '{}'", path.display()))?;
    Ok(file)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn encode_options(args: &GateArgs) -> anyhow::Result<pag::EncodeOptions> {
    let mut options = match &args.config {
        Some(path) => pag::EncodeOptions::from_path(path)?,
        None => pag::EncodeOptions::default(),
    };
    match (args.mode, args.level) {
        (Some(mode), level) => {
            options.gate.mode = mode.into();
            options.gate.level = level.or(options.gate.level);
        }
        (None, Some(level)) => {
            options.gate.mode = pag::GateMode::Custom;
            options.gate.level = Some(level);
        }
        (None, None) => {}
    }
    options.validate()?;
    Ok(options)
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let file = read_pag(&args.in_path)?;
    let compositions: Vec<_> = file
        .compositions
        .iter()
        .map(|comp| {
            let mut layer_types = BTreeMap::<String, usize>::new();
            for layer in &comp.layers {
                *layer_types
                    .entry(format!("{:?}", layer.layer_type()))
                    .or_default() += 1;
            }
            serde_json::json!({
                "id": comp.id,
                "width": comp.width,
                "height": comp.height,
                "duration": comp.duration,
                "frame_rate": comp.frame_rate,
                "layers": comp.layers.len(),
                "layer_types": layer_types,
            })
        })
        .collect();
    let summary = serde_json::json!({
        "version": file.version,
        "tag_level": file.tag_level(),
        "images": file.images.len(),
        "compositions": compositions,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let file = read_pag(&args.in_path)?;
    let json = serde_json::to_string_pretty(&file).context("serialize model JSON")?;
    match &args.out {
        Some(out) => write_bytes(out, json.as_bytes()),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open model '{}'", args.in_path.display()))?;
    let file: pag::File =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse model JSON")?;
    file.verify()?;
    let options = encode_options(&args.gate)?;
    let bytes = pag::encode_with_options(&file, &options)?;
    write_bytes(&args.out, &bytes)
}

fn cmd_transcode(args: TranscodeArgs) -> anyhow::Result<()> {
    let file = read_pag(&args.in_path)?;
    let options = encode_options(&args.gate)?;
    let bytes = pag::encode_with_options(&file, &options)?;
    write_bytes(&args.out, &bytes)
}
