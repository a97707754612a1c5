use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub pm25: f32,
    pub tvoc: u16,
    pub eco2: u16,
    /// Absent when the SCD40 had no fresh sample this cycle.
    pub co2: Option<u16>,
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PM2.5: {} ug/m^3 | TVOC: {} ppb | eCO2: {} ppm",
            self.pm25, self.tvoc, self.eco2
        )?;

        match (self.co2, self.temperature, self.humidity) {
            (Some(co2), Some(temperature), Some(humidity)) => write!(
                f,
                " | True CO2: {co2} ppm | Temp: {temperature:.1}C | RH: {humidity:.1}%"
            ),
            _ => write!(f, " | SCD40 data not ready"),
        }
    }
}
