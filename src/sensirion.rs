use std::{thread, time::Duration};

use anyhow::Context as _;
use rppal::i2c::I2c;

pub const CRC_POLYNOMIAL: u8 = 0x31;
pub const CRC_INIT: u8 = 0xff;

pub fn write_command(i2c: &mut I2c, address: u16, command: u16) -> Result<(), anyhow::Error> {
    i2c.set_slave_address(address)
        .context("Failed to select I2C address")?;
    i2c.write(&command.to_be_bytes())
        .with_context(|| format!("Failed to write command {command:#06x}"))?;
    Ok(())
}

/// Sends `command`, waits `delay` and reads back `N` CRC-protected words.
pub fn read_words<const N: usize>(
    i2c: &mut I2c,
    address: u16,
    command: u16,
    delay: Duration,
) -> Result<[u16; N], anyhow::Error> {
    write_command(i2c, address, command)?;
    thread::sleep(delay);

    let mut response = vec![0u8; N * 3];
    i2c.read(&mut response)
        .with_context(|| format!("Failed to read response to {command:#06x}"))?;

    decode_words(&response)
}

pub fn decode_words<const N: usize>(response: &[u8]) -> Result<[u16; N], anyhow::Error> {
    if response.len() != N * 3 {
        return Err(anyhow::anyhow!(
            "Invalid response length: expected {}, got {}",
            N * 3,
            response.len()
        ));
    }

    let mut words = [0u16; N];
    for (word, chunk) in words.iter_mut().zip(response.chunks_exact(3)) {
        let checksum = calculate_crc(&chunk[..2]);
        if chunk[2] != checksum {
            return Err(anyhow::anyhow!(
                "Invalid CRC: expected {}, got {}",
                checksum,
                chunk[2]
            ));
        }
        *word = u16::from_be_bytes([chunk[0], chunk[1]]);
    }

    Ok(words)
}

pub fn calculate_crc(data: &[u8]) -> u8 {
    let mut crc = CRC_INIT;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}
