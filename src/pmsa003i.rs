use anyhow::Context as _;
use rppal::i2c::I2c;

pub const ADDRESS: u16 = 0x12;
pub const FRAME_LEN: usize = 32;
pub const START_BYTES: [u8; 2] = [0x42, 0x4d];

/// Byte offset of the "PM2.5 environmental" word.
const PM25_ENV_OFFSET: usize = 12;
const CHECKSUM_OFFSET: usize = 30;

#[derive(Debug, Default)]
pub struct PMSA003I;

impl PMSA003I {
    pub fn read_pm25(&mut self, i2c: &mut I2c) -> Result<f32, anyhow::Error> {
        i2c.set_slave_address(ADDRESS)
            .context("Failed to select I2C address")?;

        let mut frame = [0u8; FRAME_LEN];
        i2c.read(&mut frame).context("Failed to read frame")?;

        parse_pm25(&frame)
    }
}

pub fn parse_pm25(frame: &[u8; FRAME_LEN]) -> Result<f32, anyhow::Error> {
    if frame[..2] != START_BYTES {
        return Err(anyhow::anyhow!(
            "Invalid frame: expected start bytes {:?}, got {:?}",
            START_BYTES,
            &frame[..2]
        ));
    }

    let checksum = calculate_checksum(frame);
    let expected = read_u16(frame, CHECKSUM_OFFSET);
    if checksum != expected {
        return Err(anyhow::anyhow!(
            "Invalid checksum: expected {}, got {}",
            expected,
            checksum
        ));
    }

    Ok(f32::from(read_u16(frame, PM25_ENV_OFFSET)))
}

pub fn calculate_checksum(frame: &[u8; FRAME_LEN]) -> u16 {
    frame[..CHECKSUM_OFFSET]
        .iter()
        .fold(0u16, |sum, &b| sum.wrapping_add(u16::from(b)))
}

fn read_u16(frame: &[u8; FRAME_LEN], offset: usize) -> u16 {
    u16::from_be_bytes([frame[offset], frame[offset + 1]])
}
