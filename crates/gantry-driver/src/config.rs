//! Driver configuration from environment variables

use std::env;

use crate::error::DriverError;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the game-state service
    pub api_base_url: String,

    /// Serial device path for the board controller
    pub serial_port: String,

    /// Serial baud rate
    pub serial_baud: u32,

    /// Per-action acknowledgement deadline in seconds
    pub ack_timeout_secs: u64,

    /// Delay between move polls in milliseconds
    pub poll_interval_ms: u64,

    /// Which color's committed moves the robot plays out
    pub plays_white: bool,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    /// suitable for a bench setup next to a locally running service.
    pub fn load() -> Result<Self, DriverError> {
        let api_base_url =
            env::var("GAME_API_URL").unwrap_or_else(|_| "http://127.0.0.1:9247".to_string());

        let serial_port =
            env::var("SERIAL_PORT").unwrap_or_else(|_| "/dev/ttyACM0".to_string());

        let serial_baud = match env::var("SERIAL_BAUD") {
            Ok(v) => v
                .parse()
                .map_err(|_| DriverError::Config("SERIAL_BAUD must be an integer"))?,
            Err(_) => 115_200,
        };

        let ack_timeout_secs = match env::var("ACK_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .map_err(|_| DriverError::Config("ACK_TIMEOUT_SECS must be an integer"))?,
            Err(_) => 10,
        };

        let poll_interval_ms = match env::var("POLL_INTERVAL_MS") {
            Ok(v) => v
                .parse()
                .map_err(|_| DriverError::Config("POLL_INTERVAL_MS must be an integer"))?,
            Err(_) => 1000,
        };

        let plays_white = match env::var("ROBOT_PLAYS_WHITE") {
            Ok(v) => v
                .parse()
                .map_err(|_| DriverError::Config("ROBOT_PLAYS_WHITE must be true or false"))?,
            Err(_) => true,
        };

        Ok(Self {
            api_base_url,
            serial_port,
            serial_baud,
            ack_timeout_secs,
            poll_interval_ms,
            plays_white,
        })
    }

    /// Endpoint serving the committed move list.
    pub fn moves_url(&self) -> String {
        format!("{}/robot/moves", self.api_base_url.trim_end_matches('/'))
    }
}
