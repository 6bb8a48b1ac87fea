use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use nrfmon::config::Config;
use nrfmon::session::RadioConfig;

#[derive(Parser)]
#[command(name = "nrfmon", version, about = "NRF24L01 packet monitor daemon")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "nrfmon.json")]
    config: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print the loaded configuration and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(cli: &Cli, cfg: &Config) -> Result<()> {
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        let configured = cfg.get_value("log.level");
        if configured.is_empty() {
            "info".to_string()
        } else {
            configured
        }
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    builder.format_timestamp_millis();

    let log_file = cli.log.clone().or_else(|| {
        let configured = cfg.get_value("log.filename");
        if configured.is_empty() {
            None
        } else {
            Some(PathBuf::from(configured))
        }
    });

    if let Some(path) = log_file {
        let file = File::create(&path)
            .with_context(|| format!("could not open log file '{}'", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

#[cfg(feature = "hardware")]
fn run(session: RadioConfig, running: Arc<AtomicBool>) -> Result<()> {
    use nrfmon::config::{NRF_SPI_CE_PIN, NRF_SPI_DEVICE, NRF_SPI_FREQUENCY_HZ};
    use nrfmon::poller::Poller;
    use nrfmon::radio::{Nrf24Device, TransportOptions};

    let device = Nrf24Device::new(TransportOptions {
        spi_frequency_hz: NRF_SPI_FREQUENCY_HZ,
        spi_device: NRF_SPI_DEVICE,
        ce_pin: NRF_SPI_CE_PIN,
    });

    let mut poller = Poller::new(device, session, running);
    poller.open().context("could not open the radio")?;
    poller.run().context("radio polling failed")?;
    Ok(())
}

#[cfg(not(feature = "hardware"))]
fn run(_session: RadioConfig, _running: Arc<AtomicBool>) -> Result<()> {
    anyhow::bail!("this build has no radio backend; rebuild with `--features hardware`")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = Config::load(&cli.config).with_context(|| {
        format!(
            "could not open configuration file '{}'",
            cli.config.display()
        )
    })?;

    if cli.dump_config {
        println!("{}", cfg.dump());
        return Ok(());
    }

    init_logging(&cli, &cfg)?;

    let session = RadioConfig::from_config(&cfg).context("invalid radio configuration")?;
    info!(
        "radio session: channel {}, {:?} air data rate, local address '{}'",
        session.channel, session.air_data_rate, session.local_address
    );

    let running = Arc::new(AtomicBool::new(true));
    let stop = running.clone();
    ctrlc::set_handler(move || {
        stop.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    run(session, running)
}
