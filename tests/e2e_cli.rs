//! CLI end-to-end tests
//!
//! Tests for the vidsplit command-line interface. The unix-only tests swap in
//! shell scripts for ffmpeg and ffprobe through a config file and inspect the
//! arguments ffmpeg received.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Get a command for the vidsplit binary
#[allow(deprecated)]
fn vidsplit_cmd() -> Command {
    Command::cargo_bin("vidsplit").unwrap()
}

/// A scratch directory holding a source video, fake tools and a config file.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("video.mp4"), vec![0u8; 1_000_000]).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn source(&self) -> PathBuf {
        self.path("video.mp4")
    }

    fn log(&self) -> PathBuf {
        self.path("ffmpeg.log")
    }

    /// Invocations recorded by the fake ffmpeg, one line of arguments each.
    fn calls(&self) -> Vec<String> {
        match fs::read_to_string(self.log()) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    #[cfg(unix)]
    fn install_tools(&self, duration: &str, ffmpeg_exit: i32) -> PathBuf {
        let ffprobe = self.path("ffprobe");
        write_script(&ffprobe, &format!("#!/bin/sh\necho {duration}\n"));

        // Like ffmpeg, refuses to replace an existing output unless given -y.
        let ffmpeg = self.path("ffmpeg");
        let script = r#"#!/bin/sh
printf '%s\n' "$*" >> 'LOG'
for last; do :; done
case " $* " in
  *" -y "*) ;;
  *) if [ -e "$last" ]; then echo "File '$last' already exists. Not overwriting - exiting" >&2; exit 1; fi ;;
esac
if [ STATUS -eq 0 ]; then : > "$last"; fi
exit STATUS
"#;
        write_script(
            &ffmpeg,
            &script
                .replace("LOG", &self.log().display().to_string())
                .replace("STATUS", &ffmpeg_exit.to_string()),
        );

        let config = self.path("vidsplit.toml");
        fs::write(
            &config,
            format!(
                "[tools]\nffmpeg_path = \"{}\"\nffprobe_path = \"{}\"\n",
                ffmpeg.display(),
                ffprobe.display()
            ),
        )
        .unwrap();
        config
    }

    fn cmd(&self, config: &Path) -> Command {
        let mut cmd = vidsplit_cmd();
        cmd.current_dir(self.dir.path()).arg("--config").arg(config);
        cmd
    }
}

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_cli_no_args_shows_usage() {
    let mut cmd = vidsplit_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = vidsplit_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("vidsplit"))
        .stdout(predicate::str::contains("--split-size"))
        .stdout(predicate::str::contains("--manifest"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = vidsplit_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vidsplit"));
}

#[test]
fn test_manifest_conflicts_with_split_size() {
    let mut cmd = vidsplit_cmd();
    cmd.args(["-f", "video.mp4", "-m", "cuts.json", "-s", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    let mut cmd = vidsplit_cmd();
    cmd.current_dir(dir.path())
        .args(["-f", "missing.mp4", "-s", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("input file does not exist"));
}

#[test]
fn test_negative_split_size() {
    let fixture = Fixture::new();
    let mut cmd = vidsplit_cmd();
    cmd.arg("-f")
        .arg(fixture.source())
        .args(["-s", "-5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid chunk length"));
}

#[test]
fn test_no_split_method_shows_usage() {
    let fixture = Fixture::new();
    let mut cmd = vidsplit_cmd();
    cmd.arg("-f")
        .arg(fixture.source())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"))
        .stderr(predicate::str::contains("no split method given"));
}

#[test]
fn test_missing_manifest() {
    let fixture = Fixture::new();
    let mut cmd = vidsplit_cmd();
    cmd.arg("-f")
        .arg(fixture.source())
        .arg("-m")
        .arg(fixture.path("cuts.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("manifest not found"));
}

#[test]
fn test_unsupported_manifest_format() {
    let fixture = Fixture::new();
    let manifest = fixture.path("cuts.txt");
    fs::write(&manifest, "0 5 part1\n").unwrap();

    let mut cmd = vidsplit_cmd();
    cmd.arg("-f")
        .arg(fixture.source())
        .arg("-m")
        .arg(&manifest)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("must be a csv or json file"));
}

#[test]
fn test_manifest_missing_field_prints_schema() {
    let fixture = Fixture::new();
    let manifest = fixture.path("cuts.csv");
    fs::write(&manifest, "start_time,length\n0,5\n").unwrap();

    let mut cmd = vidsplit_cmd();
    cmd.arg("-f")
        .arg(fixture.source())
        .arg("-m")
        .arg(&manifest)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("rename_to"))
        .stderr(predicate::str::contains(
            "start_time,length,rename_to should be the first line",
        ));
}

#[test]
fn test_bad_config_file() {
    let fixture = Fixture::new();
    let config = fixture.path("broken.toml");
    fs::write(&config, "[split\n").unwrap();

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-s", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config error"));
}

#[cfg(unix)]
#[test]
fn test_split_by_seconds() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("25.000000", 0);

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-s", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("video-3-of-3.mp4"));

    let src = fixture.source();
    let expected: Vec<String> = [(0, 1), (10, 2), (20, 3)]
        .iter()
        .map(|(start, n)| {
            format!(
                "-i {} -vcodec copy -acodec copy -y -ss {start} -t 10 {}",
                src.display(),
                fixture.path(&format!("video-{n}-of-3.mp4")).display()
            )
        })
        .collect();
    assert_eq!(fixture.calls(), expected);
}

#[cfg(unix)]
#[test]
fn test_codecs_and_extra_options() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("25.000000", 0);

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-c", "2", "-v", "libx264", "-a", "aac", "-e", "-threads 8"])
        .assert()
        .success();

    let calls = fixture.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("-vcodec libx264 -acodec aac -y -threads 8 -ss 0 -t 13 "));
    assert!(calls[1].contains("-ss 13 -t 13 "));
    assert!(calls[1].ends_with("video-2-of-2.mp4"));
}

#[cfg(unix)]
#[test]
fn test_split_by_filesize_even() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("100.0", 0);

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-S", "400000", "--chunk-strategy", "even"])
        .assert()
        .success();

    let starts: Vec<String> = fixture
        .calls()
        .iter()
        .map(|call| call.split("-ss ").nth(1).unwrap().to_string())
        .collect();
    assert_eq!(starts.len(), 3);
    assert!(starts[0].starts_with("0 -t 34 "));
    assert!(starts[1].starts_with("34 -t 34 "));
    assert!(starts[2].starts_with("68 -t 34 "));
}

#[cfg(unix)]
#[test]
fn test_degenerate_split() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("20.0", 0);

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-s", "30"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("shorter than chunk length"));
    assert!(fixture.calls().is_empty());
}

#[cfg(unix)]
#[test]
fn test_split_by_json_manifest() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("25.0", 0);
    let manifest = fixture.path("cuts.json");
    fs::write(
        &manifest,
        r#"[{"start_time":0,"length":5,"rename_to":"part1"},
            {"start_time":5,"end_time":4,"rename_to":"part2.mp4"}]"#,
    )
    .unwrap();

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .arg("-m")
        .arg(&manifest)
        .assert()
        .success();

    let src = fixture.source();
    assert_eq!(
        fixture.calls(),
        vec![
            format!("-i {} -vcodec copy -acodec copy -y -ss 0 -t 5 part1.mp4", src.display()),
            format!("-i {} -vcodec copy -acodec copy -y -ss 5 -t 4 part2.mp4", src.display()),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_split_by_csv_manifest() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("25.0", 0);
    let manifest = fixture.path("cuts.csv");
    fs::write(&manifest, "start_time,length,rename_to\n0,3,segA\n3,2,segB\n").unwrap();

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .arg("-m")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("segA.mp4"))
        .stdout(predicate::str::contains("segB.mp4"));

    let calls = fixture.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].ends_with("-y -ss 0 -t 3 segA.mp4"));
    assert!(calls[1].ends_with("-y -ss 3 -t 2 segB.mp4"));
}

#[cfg(unix)]
#[test]
fn test_dry_run_prints_commands_only() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("25.0", 0);

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-s", "10", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-ss 20 -t 10"))
        .stdout(predicate::str::contains("video-3-of-3.mp4"));
    assert!(fixture.calls().is_empty());
}

#[cfg(unix)]
#[test]
fn test_ffmpeg_failure_aborts() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("25.0", 1);

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-s", "10"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Tool error [ffmpeg]"));
    assert_eq!(fixture.calls().len(), 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_duration() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("N/A", 0);

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-s", "10"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cannot determine media length"));
}

#[cfg(unix)]
#[test]
fn test_check_tools_with_configured_paths() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("25.0", 0);

    fixture
        .cmd(&config)
        .arg("--check-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("ffmpeg"))
        .stdout(predicate::str::contains("ffprobe"));
}

#[cfg(unix)]
#[test]
fn test_rerun_replaces_chunks() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("25.0", 0);

    for _ in 0..2 {
        fixture
            .cmd(&config)
            .arg("-f")
            .arg(fixture.source())
            .args(["-s", "10"])
            .assert()
            .success();
    }

    assert_eq!(fixture.calls().len(), 6);
    assert!(fixture.path("video-3-of-3.mp4").exists());
}

#[cfg(unix)]
#[test]
fn test_rerun_without_overwrite_keeps_chunks() {
    let fixture = Fixture::new();
    let config = fixture.install_tools("25.0", 0);
    let mut body = fs::read_to_string(&config).unwrap();
    body.push_str("\n[split]\noverwrite = false\n");
    fs::write(&config, body).unwrap();

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-s", "10"])
        .assert()
        .success();
    assert!(fixture.calls().iter().all(|call| !call.contains(" -y ")));

    fixture
        .cmd(&config)
        .arg("-f")
        .arg(fixture.source())
        .args(["-s", "10"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("already exists"));
}
