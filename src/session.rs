use log::warn;
use thiserror::Error;

use crate::config::Config;

/// Longest local address a session carries; longer configured values are
/// truncated to this many characters.
pub const MAX_ADDRESS_LEN: usize = 31;

/// Highest RF channel the NRF24L01 accepts.
pub const MAX_CHANNEL: i64 = 125;

/// Air data rate of the NRF24L01 link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRate {
    Low,
    Medium,
    High,
}

impl DataRate {
    /// Exact, case-sensitive match against a configured baud token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "2MHz" => Some(DataRate::High),
            "1MHz" => Some(DataRate::Medium),
            "250KHz" => Some(DataRate::Low),
            _ => None,
        }
    }

    /// Resolve a configured baud token, falling back to the safe default
    /// for anything unrecognized. Never an error.
    pub fn resolve(token: &str) -> Self {
        Self::from_token(token).unwrap_or(DataRate::Medium)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("radio channel {0} is outside the valid range 0-{MAX_CHANNEL}")]
    ChannelOutOfRange(i64),
    #[error("radio local address is empty")]
    EmptyAddress,
}

/// Validated radio session parameters.
///
/// Built once at startup from the configuration store and never mutated
/// afterwards; the radio is only ever opened with a session that passed
/// [`RadioConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioConfig {
    pub air_data_rate: DataRate,
    pub channel: i64,
    pub local_address: String,
    pub lna_gain_on: bool,
}

impl RadioConfig {
    /// Assemble a session from `radio.baud`, `radio.channel` and
    /// `radio.localaddress`, then validate it. LNA gain is not
    /// operator-configurable on this path and stays off.
    pub fn from_config(cfg: &Config) -> Result<Self, SessionError> {
        let baud = cfg.get_value("radio.baud");
        let air_data_rate = match DataRate::from_token(&baud) {
            Some(rate) => rate,
            None => {
                if !baud.is_empty() {
                    warn!("unrecognized radio.baud '{}', falling back to 1MHz", baud);
                }
                DataRate::Medium
            }
        };

        let configured_address = cfg.get_value("radio.localaddress");
        let local_address: String = configured_address.chars().take(MAX_ADDRESS_LEN).collect();
        if local_address.len() != configured_address.len() {
            warn!(
                "radio.localaddress longer than {} characters, truncated to '{}'",
                MAX_ADDRESS_LEN, local_address
            );
        }

        let session = RadioConfig {
            air_data_rate,
            channel: cfg.get_value_as_integer("radio.channel"),
            local_address,
            lna_gain_on: false,
        };
        session.validate()?;
        Ok(session)
    }

    /// Reject values the hardware would not accept.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !(0..=MAX_CHANNEL).contains(&self.channel) {
            return Err(SessionError::ChannelOutOfRange(self.channel));
        }
        if self.local_address.is_empty() {
            return Err(SessionError::EmptyAddress);
        }
        Ok(())
    }
}
