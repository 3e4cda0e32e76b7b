//! Merging of command-line flags with the config file.
//!
//! Flags win over `[split]` values, which win over built-in defaults.

use std::path::PathBuf;

use vidsplit_av::TranscodeSettings;
use vidsplit_common::{Error, Result};
use vidsplit_plan::SizingOptions;

use crate::cli::Cli;
use crate::config::Config;

/// How the plan is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitMode {
    /// Fixed-length chunks, either given directly or derived from sizing.
    Chunks {
        chunk_length: Option<u64>,
        sizing: SizingOptions,
    },
    /// Named segments read from a manifest.
    Manifest(PathBuf),
}

/// Everything a split run needs, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOptions {
    pub source: PathBuf,
    pub mode: SplitMode,
    pub settings: TranscodeSettings,
    pub dry_run: bool,
}

impl SplitOptions {
    pub fn from_cli(cli: &Cli, config: &Config) -> Result<Self> {
        let source = cli
            .file
            .clone()
            .ok_or_else(|| Error::invalid_argument("no input file given (-f/--file)"))?;

        let extra = match &cli.extra {
            Some(raw) => shlex::split(raw).ok_or_else(|| {
                Error::invalid_argument(format!("cannot split extra options: {raw:?}"))
            })?,
            None => config.split.extra.clone(),
        };

        let mut settings = TranscodeSettings {
            vcodec: cli.vcodec.clone().unwrap_or_else(|| config.split.vcodec.clone()),
            acodec: cli.acodec.clone().unwrap_or_else(|| config.split.acodec.clone()),
            extra,
            overwrite: config.split.overwrite,
        };

        let mode = match &cli.manifest {
            Some(manifest) => {
                settings.overwrite = true;
                SplitMode::Manifest(manifest.clone())
            }
            None => chunk_mode(cli, config)?,
        };

        Ok(Self {
            source,
            mode,
            settings,
            dry_run: cli.dry_run,
        })
    }
}

fn chunk_mode(cli: &Cli, config: &Config) -> Result<SplitMode> {
    if cli.split_size.is_none() && cli.split_chunks.is_none() && cli.split_filesize.is_none() {
        return Err(Error::invalid_argument(
            "no split method given; use --split-size, --split-chunks, --split-filesize or --manifest",
        ));
    }

    let chunk_length = cli
        .split_size
        .map(|secs| {
            u64::try_from(secs)
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| {
                    Error::invalid_argument(format!("invalid chunk length: {secs} (must be > 0)"))
                })
        })
        .transpose()?;

    let target_chunks = cli
        .split_chunks
        .map(|count| {
            u64::try_from(count)
                .ok()
                .filter(|&c| c > 0)
                .ok_or_else(|| {
                    Error::invalid_argument(format!("invalid chunk count: {count} (must be > 0)"))
                })
        })
        .transpose()?;

    let sizing = SizingOptions {
        target_chunks,
        target_filesize: cli.split_filesize,
        filesize_factor: cli.filesize_factor.unwrap_or(config.split.filesize_factor),
        strategy: cli.chunk_strategy.unwrap_or(config.split.chunk_strategy),
    };

    Ok(SplitMode::Chunks {
        chunk_length,
        sizing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::Parser;
    use vidsplit_plan::ChunkStrategy;

    fn resolve(args: &[&str], config: &Config) -> Result<SplitOptions> {
        let mut argv = vec!["vidsplit"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        SplitOptions::from_cli(&cli, config)
    }

    #[test]
    fn defaults_for_chunk_mode() {
        let opts = resolve(&["-f", "video.mp4", "-s", "10"], &Config::default()).unwrap();
        assert_eq!(opts.source, PathBuf::from("video.mp4"));
        assert_eq!(
            opts.settings,
            TranscodeSettings {
                overwrite: true,
                ..Default::default()
            }
        );
        assert!(!opts.dry_run);
        assert_matches!(
            opts.mode,
            SplitMode::Chunks { chunk_length: Some(10), ref sizing } if sizing.target_chunks.is_none()
        );
    }

    #[test]
    fn chunk_mode_overwrite_follows_config() {
        let mut config = Config::default();
        config.split.overwrite = false;
        let opts = resolve(&["-f", "video.mp4", "-s", "10"], &config).unwrap();
        assert!(!opts.settings.overwrite);

        let opts = resolve(&["-f", "video.mp4", "-m", "cuts.json"], &config).unwrap();
        assert!(opts.settings.overwrite);
    }

    #[test]
    fn manifest_mode_overwrites() {
        let opts = resolve(&["-f", "video.mp4", "-m", "cuts.csv"], &Config::default()).unwrap();
        assert!(opts.settings.overwrite);
        assert_eq!(opts.mode, SplitMode::Manifest(PathBuf::from("cuts.csv")));
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.split.vcodec = "libx265".to_string();
        config.split.acodec = "opus".to_string();
        config.split.extra = vec!["-threads".to_string(), "2".to_string()];
        config.split.chunk_strategy = ChunkStrategy::Even;
        config.split.filesize_factor = 0.8;
        config.split.overwrite = false;

        let opts = resolve(
            &["-f", "v.mkv", "-S", "1000000", "-v", "libx264", "-e", "-threads 8 -map 0"],
            &config,
        )
        .unwrap();
        assert_eq!(opts.settings.vcodec, "libx264");
        assert_eq!(opts.settings.acodec, "opus");
        assert_eq!(opts.settings.extra, vec!["-threads", "8", "-map", "0"]);
        assert!(!opts.settings.overwrite);

        let SplitMode::Chunks { sizing, .. } = opts.mode else {
            panic!("expected chunk mode");
        };
        assert_eq!(sizing.strategy, ChunkStrategy::Even);
        assert_eq!(sizing.filesize_factor, 0.8);
        assert_eq!(sizing.target_filesize, Some(1_000_000));
    }

    #[test]
    fn extra_respects_shell_quoting() {
        let opts = resolve(
            &["-f", "v.mp4", "-s", "5", "-e", r#"-metadata "title=My Clip""#],
            &Config::default(),
        )
        .unwrap();
        assert_eq!(opts.settings.extra, vec!["-metadata", "title=My Clip"]);
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        assert_matches!(
            resolve(&["-f", "v.mp4", "-s", "5", "-e", "\"-threads 8"], &Config::default()),
            Err(Error::InvalidArgument(_))
        );
    }

    #[test]
    fn non_positive_split_size_is_rejected() {
        for size in ["0", "-5"] {
            assert_matches!(
                resolve(&["-f", "v.mp4", "-s", size], &Config::default()),
                Err(Error::InvalidArgument(msg)) if msg.contains("invalid chunk length")
            );
        }
    }

    #[test]
    fn non_positive_chunk_count_is_rejected() {
        assert_matches!(
            resolve(&["-f", "v.mp4", "-c", "0"], &Config::default()),
            Err(Error::InvalidArgument(msg)) if msg.contains("chunk count")
        );
    }

    #[test]
    fn a_split_method_is_required() {
        assert_matches!(
            resolve(&["-f", "v.mp4"], &Config::default()),
            Err(Error::InvalidArgument(msg)) if msg.contains("no split method")
        );
    }
}
