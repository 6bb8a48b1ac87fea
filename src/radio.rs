use thiserror::Error;

use crate::session::RadioConfig;

/// Fixed payload length the transceiver delivers per received packet.
pub const RADIO_PACKET_LEN: usize = 32;

/// One received packet, exactly the transceiver's maximum packet length.
/// Shorter on-air packets arrive zero-padded.
pub type Payload = [u8; RADIO_PACKET_LEN];

#[derive(Debug, Error)]
pub enum RadioError {
    #[error("radio transport error: {0}")]
    Transport(#[from] std::io::Error),
    #[error("radio is not open")]
    NotOpen,
    #[error("no payload was ready")]
    NoData,
}

/// SPI/GPIO parameters applied when the transceiver is brought up.
#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    pub spi_frequency_hz: u32,
    pub spi_device: u8,
    pub ce_pin: u64,
}

/// Narrow interface to the packet radio: everything the polling loop
/// needs and nothing else.
pub trait RadioDevice {
    /// Bring the radio up in receive mode with a validated session.
    fn open(&mut self, session: &RadioConfig) -> Result<(), RadioError>;

    /// Whether at least one payload is waiting to be read.
    fn is_data_ready(&mut self) -> Result<bool, RadioError>;

    /// Pull the oldest waiting payload.
    fn read_payload(&mut self) -> Result<Payload, RadioError>;
}

#[cfg(feature = "hardware")]
pub use nrf24::Nrf24Device;

#[cfg(feature = "hardware")]
mod nrf24 {
    use std::collections::VecDeque;

    use log::info;
    use nrf24l01::{DataRate as DriverDataRate, NRF24L01, OperatingMode, PALevel, RXConfig};

    use super::{Payload, RADIO_PACKET_LEN, RadioDevice, RadioError, TransportOptions};
    use crate::session::{DataRate, RadioConfig};

    /// NRF24L01 backend over the Linux spidev/sysfs-gpio driver.
    ///
    /// The driver hands over every packet in the receive FIFO at once, so
    /// payloads are staged in a queue and handed out one per
    /// `read_payload` call, preserving arrival order.
    pub struct Nrf24Device {
        options: TransportOptions,
        device: Option<NRF24L01>,
        staged: VecDeque<Payload>,
    }

    impl Nrf24Device {
        pub fn new(options: TransportOptions) -> Self {
            Self {
                options,
                device: None,
                staged: VecDeque::new(),
            }
        }

        // the transceiver matches on at most the first 5 address bytes
        fn pipe_address(session: &RadioConfig) -> [u8; 5] {
            let mut address = [0u8; 5];
            for (slot, byte) in address.iter_mut().zip(session.local_address.bytes()) {
                *slot = byte;
            }
            address
        }
    }

    impl RadioDevice for Nrf24Device {
        fn open(&mut self, session: &RadioConfig) -> Result<(), RadioError> {
            let config = RXConfig {
                data_rate: match session.air_data_rate {
                    DataRate::Low => DriverDataRate::R250Kbps,
                    DataRate::Medium => DriverDataRate::R1Mbps,
                    DataRate::High => DriverDataRate::R2Mbps,
                },
                channel: session.channel as u8,
                // the driver folds the LNA setting into the RF gain level
                pa_level: if session.lna_gain_on {
                    PALevel::Max
                } else {
                    PALevel::Low
                },
                pipe0_address: Self::pipe_address(session),
                ..Default::default()
            };

            info!(
                "opening SPI device {} (CE pin {}, {} Hz)",
                self.options.spi_device, self.options.ce_pin, self.options.spi_frequency_hz
            );
            let mut device = NRF24L01::new(self.options.ce_pin, self.options.spi_device)?;
            device.configure(&OperatingMode::RX(config))?;
            device.listen()?;
            info!(
                "NRF24L01 listening on channel {} as '{}'",
                session.channel, session.local_address
            );

            self.device = Some(device);
            Ok(())
        }

        fn is_data_ready(&mut self) -> Result<bool, RadioError> {
            if !self.staged.is_empty() {
                return Ok(true);
            }
            let device = self.device.as_mut().ok_or(RadioError::NotOpen)?;
            Ok(device.data_available()?)
        }

        fn read_payload(&mut self) -> Result<Payload, RadioError> {
            if let Some(payload) = self.staged.pop_front() {
                return Ok(payload);
            }

            let device = self.device.as_mut().ok_or(RadioError::NotOpen)?;
            let staged = &mut self.staged;
            device.read_all(|packet| {
                let mut payload: Payload = [0; RADIO_PACKET_LEN];
                for (slot, byte) in payload.iter_mut().zip(packet.iter()) {
                    *slot = *byte;
                }
                staged.push_back(payload);
            })?;

            self.staged.pop_front().ok_or(RadioError::NoData)
        }
    }
}
