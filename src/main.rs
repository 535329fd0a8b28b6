use anyhow::{bail, Context};
use rbf::{
    cli::{Cli, Commands, ConfigAction},
    config::Config,
    input::ParameterForm,
    plot::render_plots,
    repl::Repl,
    session::Session,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn run(
    config: &Config,
    points: &Path,
    form: ParameterForm,
    out: Option<PathBuf>,
    export: Option<&Path>,
    no_plot: bool,
) -> anyhow::Result<()> {
    let dataset = rbf::parse::parse(points)
        .with_context(|| format!("failed to read points from {}", points.display()))?;
    info!(rows = dataset.len(), path = %points.display(), "loaded points");

    let mut session = Session::new(dataset, form);
    let status = session.input_status();
    if status.parameters().is_none() {
        bail!("{}", status.message());
    }

    session.calculate_r()?;
    session.calculate_phi()?;

    let table = session.table()?;
    println!("Original + Transformation Table:");
    print!("{table}");

    if let Some(path) = export {
        table
            .export(path)
            .with_context(|| format!("failed to export table to {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    if !no_plot {
        let mut plot = config.plot.clone();
        if let Some(out) = out {
            plot.output_dir = out;
        }

        for path in render_plots(&session, &plot).context("failed to render plots")? {
            println!("wrote {}", path.display());
        }

        let excluded = session.dataset().unlabelled_rows();
        if excluded > 0 {
            println!("{excluded} rows have a category other than 0 or 1 and were not plotted");
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = if cli.config.is_some() {
        Config::load(&config_path)
    } else {
        Config::load_or_default(&config_path)
    }
    .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    match cli.command {
        Commands::Run {
            points,
            c1,
            c2,
            sigma_sq,
            out,
            export,
            no_plot,
        } => {
            let form = ParameterForm::new(&c1, &c2, &sigma_sq);
            run(&config, &points, form, out, export.as_deref(), no_plot)?;
        }
        Commands::Interactive => {
            let stdin = std::io::stdin();
            let mut repl = Repl::new(stdin.lock(), std::io::stdout(), config);
            repl.run()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => print!("{}", config.to_toml()?),
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    bail!(
                        "{} already exists, use --force to overwrite",
                        config_path.display()
                    );
                }
                Config::default().save(&config_path)?;
                println!("wrote {}", config_path.display());
            }
        },
    }

    Ok(())
}
