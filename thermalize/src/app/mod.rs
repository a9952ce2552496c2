mod report;
mod runner;

pub use runner::{build_lattice, thermalize, RunSettings};

use self::report::report_summary;
use crate::config::{Args, Config};
use crate::io::{print_lattice, setup_output};
use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use std::fs;
use std::io;
use tracing::info;

pub struct ThermalizeApplication {
    args: Args,
    config: Config,
}

impl ThermalizeApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(args.config_file.as_deref())?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref(), self.args.verbose)?;

        let settings = RunSettings::resolve(&self.args, &self.config);
        settings
            .validate()
            .map_err(|e| eyre!(e))
            .wrap_err("Invalid run settings")?;
        info!("Configuration loaded:\n{:?}", settings);

        let mut lattice = build_lattice(&settings)?;
        print_lattice(&mut io::stdout(), "Lattice at the ground state:", &lattice)?;

        let report = thermalize(&mut lattice, &settings)?;
        print_lattice(&mut io::stdout(), "Lattice at the thermal state:", &lattice)?;

        report_summary(&report, &lattice, settings.params.beta);
        Ok(())
    }
}

/// Read, default and validate the YAML configuration. Without a path the
/// built-in defaults reproduce the reference run.
fn load_config(path: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .wrap_err_with(|| format!("Unable to read configuration file: {}", path))?;
            serde_yml::from_str::<Config>(&content)
                .wrap_err("Failed to parse configuration file")?
        }
        None => Config::default(),
    }
    .with_defaults();

    config
        .validate()
        .map_err(|e| eyre!(e))
        .wrap_err("Invalid configuration")?;
    Ok(config)
}
