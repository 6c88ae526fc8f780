use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use resobox::config::EngineConfig;
use resobox::dashboard::Dashboard;
use resobox::ingest::{DocReport, FsSource, SnapshotSource, load_snapshot};
use resobox::layout::Projection;
use resobox::model::{InstrumentId, SequenceDoc, Signal};
use resobox::viewport::ViewportWindow;
use serde::Deserialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProjectionArg {
    #[value(name = "2d")]
    TwoD,
    #[value(name = "3d")]
    ThreeD,
}

impl From<ProjectionArg> for Projection {
    fn from(p: ProjectionArg) -> Self {
        match p {
            ProjectionArg::TwoD => Projection::TwoD,
            ProjectionArg::ThreeD => Projection::ThreeD,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out box snapshots as nested squares or cubes and print the frames as JSON", long_about = None)]
struct Cli {
    /// Snapshot file: JSON payload or `.rbx` binary snapshot
    #[arg(value_name = "SNAPSHOT")]
    snapshot: String,
    /// Instrument name; required for single-slice payloads and limits output to it
    #[arg(long)]
    pair: Option<String>,
    #[arg(long, value_enum, default_value_t = ProjectionArg::TwoD)]
    projection: ProjectionArg,
    /// First visible ranked box
    #[arg(long)]
    start: Option<usize>,
    /// Number of visible ranked boxes
    #[arg(long)]
    count: Option<usize>,
    /// JSON file with one signal or a list of signals
    #[arg(long)]
    signal: Option<String>,
    /// JSON engine configuration
    #[arg(long)]
    config: Option<String>,
    /// Also write the loaded snapshot as a binary `.rbx` file
    #[arg(long, value_name = "PATH")]
    save_binary: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignalFile {
    One(Signal),
    Many(Vec<Signal>),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("RESOBOX_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(p) => EngineConfig::load(Utf8PathBuf::from(p))?,
        None => EngineConfig::default(),
    };
    let pair = cli.pair.as_deref().map(InstrumentId::new).transpose()?;

    let path = Utf8PathBuf::from(&cli.snapshot);
    let (doc, reports) = if path.extension() == Some("rbx") {
        let doc = SequenceDoc::load_from_binary(&path).with_context(|| format!("Load {}", path))?;
        (doc, DocReport::new())
    } else {
        load_snapshot(&mut FsSource, &path, pair.as_ref())?
    };
    for (id, report) in &reports {
        if !report.is_clean() {
            warn!(
                instrument = %id,
                accepted = report.accepted,
                rejected = report.rejected.len(),
                "[resobox] snapshot had invalid boxes"
            );
        }
    }
    if let Some(out) = &cli.save_binary {
        doc.save_to_binary(out)
            .with_context(|| format!("Failed to write {}", out))?;
    }

    let mut dashboard = Dashboard::new(config);
    let names: Vec<String> = doc.sequences.keys().map(|id| id.to_string()).collect();
    dashboard.set_instruments(&names);
    dashboard.push_doc(doc);

    if let Some(p) = &cli.signal {
        let text = FsSource.read_to_string(Utf8PathBuf::from(p).as_path())?;
        let signals = match serde_json::from_str::<SignalFile>(&text)
            .with_context(|| format!("Failed to parse signals in {}", p))?
        {
            SignalFile::One(s) => vec![s],
            SignalFile::Many(v) => v,
        };
        for s in signals {
            dashboard.push_signal(s);
        }
    }

    if cli.start.is_some() || cli.count.is_some() {
        let ids: Vec<InstrumentId> = dashboard.instruments().cloned().collect();
        for id in ids {
            dashboard.update_window(&id, |w| {
                ViewportWindow::new(
                    cli.start.unwrap_or(w.start),
                    cli.count.unwrap_or(w.count),
                    w.total,
                )
            });
        }
    }

    let projection = Projection::from(cli.projection);
    let now = Utc::now();
    let frames: Vec<_> = match &pair {
        Some(id) => dashboard.frame(id, projection, now).into_iter().collect(),
        None => dashboard.frames(projection, now),
    };

    let json = serde_json::to_string_pretty(&frames)?;
    println!("{}", json);
    Ok(())
}
