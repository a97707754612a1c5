use std::{thread, time::Duration};

use rppal::i2c::I2c;

use crate::sensirion;

pub const ADDRESS: u16 = 0x62;

pub const START_PERIODIC_MEASUREMENT: u16 = 0x21b1;
pub const STOP_PERIODIC_MEASUREMENT: u16 = 0x3f86;
pub const GET_DATA_READY_STATUS: u16 = 0xe4b8;
pub const READ_MEASUREMENT: u16 = 0xec05;

const COMMAND_DELAY: Duration = Duration::from_millis(1);
const STOP_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Co2Measurement {
    pub co2: u16,
    pub temperature: f32,
    pub humidity: f32,
}

#[derive(Debug, Default)]
pub struct SCD40;

impl SCD40 {
    /// Restarts periodic measurement. A new sample is ready about every 5 s.
    pub fn init(&mut self, i2c: &mut I2c) -> Result<(), anyhow::Error> {
        sensirion::write_command(i2c, ADDRESS, STOP_PERIODIC_MEASUREMENT)?;
        thread::sleep(STOP_DELAY);
        sensirion::write_command(i2c, ADDRESS, START_PERIODIC_MEASUREMENT)?;
        Ok(())
    }

    pub fn data_ready(&mut self, i2c: &mut I2c) -> Result<bool, anyhow::Error> {
        let [status] =
            sensirion::read_words::<1>(i2c, ADDRESS, GET_DATA_READY_STATUS, COMMAND_DELAY)?;
        Ok(is_ready(status))
    }

    pub fn read_measurement(&mut self, i2c: &mut I2c) -> Result<Co2Measurement, anyhow::Error> {
        let words = sensirion::read_words::<3>(i2c, ADDRESS, READ_MEASUREMENT, COMMAND_DELAY)?;
        Ok(convert(words))
    }
}

pub fn is_ready(status: u16) -> bool {
    status & 0x07ff != 0
}

pub fn convert([co2, temperature, humidity]: [u16; 3]) -> Co2Measurement {
    Co2Measurement {
        co2,
        temperature: -45.0 + 175.0 * (f32::from(temperature) / 65536.0),
        humidity: 100.0 * (f32::from(humidity) / 65536.0),
    }
}
