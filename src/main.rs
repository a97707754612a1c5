use std::time::Duration;

use anyhow::Context;
use backon::BlockingRetryable;
use backon::ConstantBuilder;
use config::{CONFIG_FILE, Config};
use control::ControlLoop;
use dispatcher::HueBridge;
use log::LevelFilter;
use sensor::Sensor;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

mod actuator;
mod classifier;
mod config;
mod control;
mod dispatcher;
mod error;
mod measurement;
mod pmsa003i;
mod scd40;
mod sensirion;
mod sensor;
mod sgp30;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    TermLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .set_time_offset_to_local()
            .map_err(|_| anyhow::anyhow!("Failed to set time offset to local"))?
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;

    if let Err(e) = run().await {
        log::error!("{e:#}");
    }

    Ok(())
}

pub async fn run() -> Result<(), anyhow::Error> {
    let config = Config::load(CONFIG_FILE)?;

    let retry_builder = ConstantBuilder::default()
        .with_delay(Duration::from_millis(100))
        .with_max_times(20);

    let mut sensor = Sensor::new(config.i2c.bus).context("Failed to initialize sensors")?;
    (|| sensor.init())
        .retry(retry_builder)
        .notify(|e, dur| {
            log::error!("{e:#}");
            log::info!("Retrying in {:?}", dur);
        })
        .call()?;

    let bridge = HueBridge::new(&config.bridge);
    let control = ControlLoop::new(sensor, bridge, config.memory_update);

    log::info!("Monitoring air quality (PM2.5, VOC, CO2) and controlling Hue light...");
    tokio::spawn(control.run(config.poll_interval()));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for Ctrl+C signal")?;

    Ok(())
}
