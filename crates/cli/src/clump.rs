//! clump - group touching or nearby shapes of a vector scene
//!
//! Reads a JSON scene, clusters the items of each layer by bounding-box
//! adjacency and wraps every multi-item cluster in a plain or clip group
//! that keeps the items' original stacking order. The resulting scene is
//! written back as JSON.

mod scene_file;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use clump_core::api::{GroupingReport, assemble_partition, partition_selection};
use clump_core::cluster::ClusterPartition;
use clump_core::geometry::Axis;
use clump_core::params::{
    AdjacencyMode, AssembleParams, ClusterParams, ContainerKind, OverlapRatio, ReferencePolicy,
};
use clump_core::scene::{Document, NodeId, SceneGraph};
use itertools::Itertools;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use scene_file::SceneFile;

/// Adjacency rule used to connect two items.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Mode {
    /// Only overlapping items connect
    Overlap,
    /// Overlap, or a gap up to the threshold in any direction (default)
    #[default]
    Proximity,
    /// Gap measured left to right only
    Horizontal,
    /// Gap measured top to bottom only
    Vertical,
}

/// Denominator of the overlap ratio.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Ratio {
    /// Area of the smaller item (default)
    #[default]
    Min,
    /// Area of the larger item
    Max,
}

/// Kind of group built for each cluster.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Container {
    /// Plain group (default)
    #[default]
    Plain,
    /// Clip group masked by the reference item
    Clip,
}

/// Which item of a cluster becomes the clipping mask.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Reference {
    /// Frontmost item (default)
    #[default]
    Front,
    /// Backmost item
    Back,
}

/// Cluster the items of a JSON scene and group each cluster.
#[derive(Parser, Debug)]
#[command(name = "clump")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON scene
    file: PathBuf,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Clustering options ===
    /// Adjacency rule
    #[arg(short = 'm', long, value_enum, default_value = "proximity")]
    mode: Mode,

    /// Largest gap that still connects two items; negative means overlap only
    #[arg(short = 't', long, default_value = "0.0", allow_hyphen_values = true)]
    threshold: f64,

    /// In horizontal/vertical mode, also connect overlapping items
    #[arg(long, action = ArgAction::SetTrue)]
    loose: bool,

    /// Denominator of the overlap ratio
    #[arg(long, value_enum, default_value = "min")]
    ratio: Ratio,

    /// Overlap ratio that must be exceeded for items to count as overlapping
    #[arg(long = "min-overlap-ratio", default_value = "0.0")]
    min_overlap_ratio: f64,

    /// Comma-separated thresholds to retry with while singletons remain
    #[arg(short = 'e', long, value_delimiter = ',', allow_hyphen_values = true)]
    escalate: Vec<f64>,

    /// Only process the layer with this name
    #[arg(short = 'l', long)]
    layer: Option<String>,

    // === Grouping options ===
    /// Kind of group to build
    #[arg(short = 'k', long, value_enum, default_value = "plain")]
    container: Container,

    /// Clipping mask selection for clip groups
    #[arg(short = 'r', long, value_enum, default_value = "front")]
    reference: Reference,

    /// Restore the mask's original stacking position too
    #[arg(long = "reference-in-reorder", action = ArgAction::SetTrue)]
    reference_in_reorder: bool,

    /// Print the clusters without changing the scene
    #[arg(short = 'n', long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    // === Output options ===
    /// Path to file where the scene is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Build ClusterParams from command line arguments.
fn build_cluster_params(args: &Args) -> Result<ClusterParams> {
    let strict = !args.loose;
    let mode = match args.mode {
        Mode::Overlap => AdjacencyMode::Overlap,
        Mode::Proximity => AdjacencyMode::Proximity,
        Mode::Horizontal => AdjacencyMode::Axis {
            axis: Axis::Horizontal,
            strict,
        },
        Mode::Vertical => AdjacencyMode::Axis {
            axis: Axis::Vertical,
            strict,
        },
    };
    let overlap_ratio = match args.ratio {
        Ratio::Min => OverlapRatio::Min,
        Ratio::Max => OverlapRatio::Max,
    };
    let params = ClusterParams::new(mode, args.threshold)?
        .with_overlap_ratio(overlap_ratio)
        .with_min_overlap_ratio(args.min_overlap_ratio);
    params.validate()?;
    for &threshold in &args.escalate {
        params.clone().with_threshold(threshold).validate()?;
    }
    Ok(params)
}

/// Build AssembleParams from command line arguments.
fn build_assemble_params(args: &Args) -> AssembleParams {
    let reference = match args.reference {
        Reference::Front => ReferencePolicy::Frontmost,
        Reference::Back => ReferencePolicy::Backmost,
    };
    let kind = match args.container {
        Container::Plain => ContainerKind::Plain,
        Container::Clip => ContainerKind::Clip,
    };
    AssembleParams {
        kind,
        reference,
        reference_in_reorder: args.reference_in_reorder,
    }
}

/// Partitions `selection`, retrying with each escalation threshold in turn
/// while the partition still has singletons.
fn partition_with_escalation(
    doc: &Document,
    selection: &[NodeId],
    params: &ClusterParams,
    escalate: &[f64],
) -> Result<ClusterPartition<NodeId>> {
    let mut clusters = partition_selection(doc, selection, params)?;
    for &threshold in escalate {
        if clusters.singletons() == 0 {
            break;
        }
        info!(
            singletons = clusters.singletons(),
            threshold, "singletons remain, retrying with a new threshold"
        );
        let retry = params.clone().with_threshold(threshold);
        clusters = partition_selection(doc, selection, &retry)?;
    }
    Ok(clusters)
}

fn describe_clusters(doc: &Document, clusters: &ClusterPartition<NodeId>) -> String {
    clusters
        .iter()
        .map(|cluster| {
            let names = cluster
                .members()
                .iter()
                .map(|&n| doc.name(n).unwrap_or("?"))
                .join(", ");
            format!("[{names}]")
        })
        .join(" ")
}

fn summarize(doc: &Document, layer: NodeId, report: &GroupingReport<NodeId>) -> String {
    let groups = report
        .containers()
        .into_iter()
        .map(|c| doc.name(c).unwrap_or("?"))
        .join(", ");
    format!(
        "{}: {} group(s) [{}], {} singleton(s), {} failed",
        doc.name(layer).unwrap_or("?"),
        report.assemblies.len(),
        groups,
        report.singletons,
        report.failed_clusters
    )
}

/// Process every selected layer of the scene.
fn process(doc: &mut Document, args: &Args) -> Result<Vec<String>> {
    let cluster_params = build_cluster_params(args)?;
    let assemble_params = build_assemble_params(args);

    let layers: Vec<NodeId> = doc
        .layers()
        .iter()
        .copied()
        .filter(|&l| {
            args.layer
                .as_deref()
                .is_none_or(|name| doc.name(l) == Some(name))
        })
        .collect();
    if let Some(name) = &args.layer {
        if layers.is_empty() {
            bail!("no layer named {name:?}");
        }
    }

    let mut lines = Vec::with_capacity(layers.len());
    for layer in layers {
        let selection = doc.children(layer)?;
        debug!(layer = ?doc.name(layer), items = selection.len(), "clustering layer");
        let clusters =
            partition_with_escalation(doc, &selection, &cluster_params, &args.escalate)?;

        if args.dry_run {
            lines.push(format!(
                "{}: {}",
                doc.name(layer).unwrap_or("?"),
                describe_clusters(doc, &clusters)
            ));
            continue;
        }

        let report = assemble_partition(doc, &clusters, &assemble_params);
        lines.push(summarize(doc, layer, &report));
    }
    Ok(lines)
}

fn run(args: &Args) -> Result<()> {
    let scene = SceneFile::read(&args.file)?;
    let mut doc = scene.to_document()?;

    for line in process(&mut doc, args)? {
        eprintln!("{line}");
    }
    if args.dry_run {
        return Ok(());
    }

    let result = SceneFile::from_document(&doc);
    if args.outfile == "-" {
        let stdout = io::stdout();
        result.write(BufWriter::new(stdout.lock()))?;
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create {}", args.outfile))?;
        let mut writer = BufWriter::new(file);
        result.write(&mut writer)?;
        writer.flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);
    run(&args)
}
