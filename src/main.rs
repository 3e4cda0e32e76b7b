use clap::{CommandFactory, Parser};

use vidsplit::cli::Cli;
use vidsplit::config::{self, Config};
use vidsplit::options::SplitOptions;
use vidsplit::run::{self, RunReport};
use vidsplit_common::{Error, Result};

fn main() {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidsplit=debug,vidsplit_av=debug,vidsplit_plan=debug,vidsplit_common=debug"
                .to_string()
        } else {
            "vidsplit=info,vidsplit_av=info,vidsplit_plan=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dispatch(&cli) {
        eprintln!("Error: {e}");
        if let Some(schema) = e.schema_hint() {
            eprintln!("{schema}");
        }
        std::process::exit(e.exit_code());
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    let config = config::load_config_or_default(cli.config.as_deref())?;

    if cli.check_tools {
        check_tools(&config);
        return Ok(());
    }

    let opts = SplitOptions::from_cli(cli, &config).inspect_err(|e| {
        if matches!(e, Error::InvalidArgument(_)) {
            eprintln!("{}", Cli::command().render_usage());
        }
    })?;
    tracing::debug!("Resolved options: {:?}", opts);

    match run::run(&opts, &config.tools)? {
        RunReport::Planned(commands) => {
            for cmd in &commands {
                println!("{cmd}");
            }
        }
        RunReport::Completed(outcomes) => {
            for outcome in &outcomes {
                println!(
                    "{} ({:.1}s)",
                    outcome.output.display(),
                    outcome.elapsed.as_secs_f64()
                );
            }
        }
    }

    Ok(())
}

fn check_tools(config: &Config) {
    println!("Checking external tools...\n");

    let tools = vidsplit_av::check_tools(
        config.tools.ffmpeg_path.as_deref(),
        config.tools.ffprobe_path.as_deref(),
    );
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. vidsplit needs both ffmpeg and ffprobe.");
    }
}
