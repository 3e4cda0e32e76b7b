use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use vidsplit_plan::ChunkStrategy;

#[derive(Debug, Parser)]
#[command(name = "vidsplit")]
#[command(author, version, about = "Split a video into chunks or named segments with ffmpeg")]
#[command(group(ArgGroup::new("sizing").multiple(true).args(["split_size", "split_chunks", "split_filesize"])))]
pub struct Cli {
    /// File to split, for example sample.avi
    #[arg(short = 'f', long = "file", value_name = "FILE", required_unless_present = "check_tools")]
    pub file: Option<PathBuf>,

    /// Split or chunk size in seconds, for example 10
    #[arg(short = 's', long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub split_size: Option<i64>,

    /// Number of chunks to split to
    #[arg(short = 'c', long, value_name = "COUNT", allow_negative_numbers = true)]
    pub split_chunks: Option<i64>,

    /// Split or chunk size in bytes (approximate)
    #[arg(short = 'S', long, value_name = "BYTES")]
    pub split_filesize: Option<u64>,

    /// With --split-filesize, use this factor in time to size heuristics [default: 0.95]
    #[arg(long, value_name = "FACTOR")]
    pub filesize_factor: Option<f64>,

    /// With --split-filesize, allocate chunks according to the given strategy (eager or even) [default: eager]
    #[arg(long, value_name = "STRATEGY")]
    pub chunk_strategy: Option<ChunkStrategy>,

    /// Split video based on a json or csv manifest file
    #[arg(short = 'm', long, value_name = "MANIFEST", conflicts_with = "sizing")]
    pub manifest: Option<PathBuf>,

    /// Video codec to use [default: copy]
    #[arg(short = 'v', long, value_name = "CODEC")]
    pub vcodec: Option<String>,

    /// Audio codec to use [default: copy]
    #[arg(short = 'a', long, value_name = "CODEC")]
    pub acodec: Option<String>,

    /// Extra options for ffmpeg, e.g. '-e "-threads 8"'
    #[arg(short = 'e', long, value_name = "OPTIONS", allow_hyphen_values = true)]
    pub extra: Option<String>,

    /// Print the ffmpeg invocations without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Report whether ffmpeg and ffprobe are available, then exit
    #[arg(long)]
    pub check_tools: bool,

    /// Path to config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,
}
