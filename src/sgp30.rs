use std::{thread, time::Duration};

use rppal::i2c::I2c;

use crate::sensirion;

pub const ADDRESS: u16 = 0x58;

pub const IAQ_INIT: u16 = 0x2003;
pub const MEASURE_IAQ: u16 = 0x2008;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IaqMeasurement {
    pub eco2: u16,
    pub tvoc: u16,
}

#[derive(Debug, Default)]
pub struct SGP30;

impl SGP30 {
    pub fn init(&mut self, i2c: &mut I2c) -> Result<(), anyhow::Error> {
        sensirion::write_command(i2c, ADDRESS, IAQ_INIT)?;
        thread::sleep(Duration::from_millis(10));
        Ok(())
    }

    pub fn measure_iaq(&mut self, i2c: &mut I2c) -> Result<IaqMeasurement, anyhow::Error> {
        let [eco2, tvoc] =
            sensirion::read_words::<2>(i2c, ADDRESS, MEASURE_IAQ, Duration::from_millis(12))?;
        Ok(IaqMeasurement { eco2, tvoc })
    }
}
