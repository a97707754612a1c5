use anyhow::Context as _;
use rppal::i2c::I2c;

use crate::{
    error::AcquisitionError, measurement::SensorReading, pmsa003i::PMSA003I, scd40::SCD40,
    sgp30::SGP30,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particulate {
    pub pm25: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolatileOrganics {
    pub tvoc: u16,
    pub eco2: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Co2Environment {
    pub co2: u16,
    pub temperature: f32,
    pub humidity: f32,
}

/// Read accessors polled once per cycle. Device setup happens elsewhere.
pub trait Sensors {
    fn read_particulate(&mut self) -> Result<Particulate, AcquisitionError>;
    fn read_volatile_organics(&mut self) -> Result<VolatileOrganics, AcquisitionError>;
    fn co2_sensor_ready(&mut self) -> Result<bool, AcquisitionError>;
    fn read_co2_environment(&mut self) -> Result<Co2Environment, AcquisitionError>;
}

pub fn acquire<S: Sensors>(sensors: &mut S) -> Result<SensorReading, AcquisitionError> {
    let Particulate { pm25 } = sensors.read_particulate()?;
    let VolatileOrganics { tvoc, eco2 } = sensors.read_volatile_organics()?;

    let environment = if sensors.co2_sensor_ready()? {
        Some(sensors.read_co2_environment()?)
    } else {
        None
    };

    Ok(SensorReading {
        pm25,
        tvoc,
        eco2,
        co2: environment.map(|e| e.co2),
        temperature: environment.map(|e| e.temperature),
        humidity: environment.map(|e| e.humidity),
    })
}

/// PMSA003I, SGP30 and SCD40 sharing one I2C bus.
#[derive(Debug)]
pub struct Sensor {
    i2c: I2c,
    pmsa003i: PMSA003I,
    sgp30: SGP30,
    scd40: SCD40,
}

impl Sensor {
    pub fn new(bus: u8) -> Result<Sensor, anyhow::Error> {
        let i2c = I2c::with_bus(bus).context("Failed to initialize I2C")?;

        Ok(Sensor {
            i2c,
            pmsa003i: PMSA003I,
            sgp30: SGP30,
            scd40: SCD40,
        })
    }

    pub fn init(&mut self) -> Result<(), anyhow::Error> {
        self.sgp30
            .init(&mut self.i2c)
            .context("Failed to initialize SGP30")?;
        self.scd40
            .init(&mut self.i2c)
            .context("Failed to initialize SCD40")?;

        Ok(())
    }
}

impl Sensors for Sensor {
    fn read_particulate(&mut self) -> Result<Particulate, AcquisitionError> {
        let pm25 = self
            .pmsa003i
            .read_pm25(&mut self.i2c)
            .map_err(|e| AcquisitionError::device("PMSA003I", e))?;
        Ok(Particulate { pm25 })
    }

    fn read_volatile_organics(&mut self) -> Result<VolatileOrganics, AcquisitionError> {
        let m = self
            .sgp30
            .measure_iaq(&mut self.i2c)
            .map_err(|e| AcquisitionError::device("SGP30", e))?;
        Ok(VolatileOrganics {
            tvoc: m.tvoc,
            eco2: m.eco2,
        })
    }

    fn co2_sensor_ready(&mut self) -> Result<bool, AcquisitionError> {
        self.scd40
            .data_ready(&mut self.i2c)
            .map_err(|e| AcquisitionError::device("SCD40", e))
    }

    fn read_co2_environment(&mut self) -> Result<Co2Environment, AcquisitionError> {
        let m = self
            .scd40
            .read_measurement(&mut self.i2c)
            .map_err(|e| AcquisitionError::device("SCD40", e))?;
        Ok(Co2Environment {
            co2: m.co2,
            temperature: m.temperature,
            humidity: m.humidity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSensors {
        ready: bool,
    }

    impl Sensors for FixedSensors {
        fn read_particulate(&mut self) -> Result<Particulate, AcquisitionError> {
            Ok(Particulate { pm25: 5.0 })
        }

        fn read_volatile_organics(&mut self) -> Result<VolatileOrganics, AcquisitionError> {
            Ok(VolatileOrganics { tvoc: 7, eco2: 410 })
        }

        fn co2_sensor_ready(&mut self) -> Result<bool, AcquisitionError> {
            Ok(self.ready)
        }

        fn read_co2_environment(&mut self) -> Result<Co2Environment, AcquisitionError> {
            if !self.ready {
                return Err(AcquisitionError::device(
                    "SCD40",
                    anyhow::anyhow!("read while not ready"),
                ));
            }
            Ok(Co2Environment {
                co2: 650,
                temperature: 22.5,
                humidity: 45.0,
            })
        }
    }

    #[test]
    fn test_acquire_with_co2_ready() {
        let reading = acquire(&mut FixedSensors { ready: true }).unwrap();
        assert_eq!(reading.pm25, 5.0);
        assert_eq!(reading.tvoc, 7);
        assert_eq!(reading.eco2, 410);
        assert_eq!(reading.co2, Some(650));
        assert_eq!(reading.temperature, Some(22.5));
        assert_eq!(reading.humidity, Some(45.0));
    }

    #[test]
    fn test_acquire_with_co2_not_ready() {
        let reading = acquire(&mut FixedSensors { ready: false }).unwrap();
        assert_eq!(reading.pm25, 5.0);
        assert_eq!(reading.co2, None);
        assert_eq!(reading.temperature, None);
        assert_eq!(reading.humidity, None);
    }
}
