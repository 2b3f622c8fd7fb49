//! Persisted alignment data
//!
//! Stores the outcome of offset calibration and driver synchronization so
//! firmware can restore it on boot instead of energizing the motor again.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::current::{ChannelAssignment, GainCorrection, PhaseOffsets, Polarity};

/// Magic number to identify valid calibration data
pub const CALIBRATION_MAGIC: u32 = 0x50534E53; // "PSNS"

/// Current calibration data version
pub const CALIBRATION_VERSION: u8 = 1;

/// Upper bound of the postcard encoding of [`SenseCalibration`]
pub const MAX_ENCODED_LEN: usize = 48;

/// Errors from loading or applying calibration data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Buffer too small for the encoded data
    BufferTooSmall,
    /// Data could not be decoded
    Corrupted,
    /// Magic number does not match
    BadMagic,
    /// Data was written by a different format version
    VersionMismatch,
    /// CRC does not match the contents
    CrcMismatch,
    /// Snapshot refers to different analog inputs than the sensor
    ChannelMismatch,
}

/// Alignment snapshot for one current sensor
///
/// This struct is serialized to flash using postcard.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SenseCalibration {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Channel assignment after synchronization
    pub channels: ChannelAssignment,
    /// Zero-current offsets, in assignment order
    pub offsets: PhaseOffsets,
    /// Polarity correction per phase
    pub gains: GainCorrection,
    /// CRC32 checksum (calculated over magic..gains)
    pub crc: u32,
}

impl SenseCalibration {
    /// Create a snapshot with a valid header and CRC
    pub fn new(channels: ChannelAssignment, offsets: PhaseOffsets, gains: GainCorrection) -> Self {
        let mut data = Self {
            magic: CALIBRATION_MAGIC,
            version: CALIBRATION_VERSION,
            channels,
            offsets,
            gains,
            crc: 0,
        };
        data.update_crc();
        data
    }

    /// Check if the header is valid (magic and version match)
    pub fn is_valid(&self) -> bool {
        self.magic == CALIBRATION_MAGIC && self.version == CALIBRATION_VERSION
    }

    /// Check header and CRC
    pub fn check(&self) -> Result<(), CalibrationError> {
        if self.magic != CALIBRATION_MAGIC {
            return Err(CalibrationError::BadMagic);
        }
        if self.version != CALIBRATION_VERSION {
            return Err(CalibrationError::VersionMismatch);
        }
        if !self.verify_crc() {
            return Err(CalibrationError::CrcMismatch);
        }
        Ok(())
    }

    /// Calculate CRC32 for the data (excluding the crc field itself)
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFFFFFF;

        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);

        crc = crc32_update(crc, &[self.channels.a().id(), self.channels.b().id()]);
        match self.channels.c() {
            Some(c) => crc = crc32_update(crc, &[1, c.id()]),
            None => crc = crc32_update(crc, &[0, 0]),
        }

        for offset in [self.offsets.a, self.offsets.b, self.offsets.c] {
            crc = crc32_update(crc, &offset.to_le_bytes());
        }

        for polarity in [self.gains.a, self.gains.b, self.gains.c] {
            crc = crc32_update(crc, &[(polarity == Polarity::Inverted) as u8]);
        }

        !crc
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Serialize into `buffer`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn encode<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], CalibrationError> {
        postcard::to_slice(self, buffer).map_err(|e| match e {
            postcard::Error::SerializeBufferFull => CalibrationError::BufferTooSmall,
            _ => CalibrationError::Corrupted,
        })
    }

    /// Deserialize and check a stored snapshot
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, CalibrationError> {
        let data: Self = postcard::from_bytes(bytes).map_err(|_| CalibrationError::Corrupted)?;
        data.check()?;
        Ok(data)
    }
}

/// Simple CRC32 update function (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
