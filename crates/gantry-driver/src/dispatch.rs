//! Command dispatcher for the board controller
//!
//! Sends one action per line and blocks for a `Done`/`Error`
//! acknowledgement with a per-action deadline. When no controller is
//! attached the dispatcher degrades to a logging simulation so the
//! rest of the pipeline can run off-hardware.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::{timeout_at, Instant};
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

use gantry_core::{Action, Choreography};

use crate::config::Config;
use crate::error::DriverError;

/// Settle time after opening the port; the controller resets on
/// connect and drops anything sent before it comes back up.
const RESET_DELAY: Duration = Duration::from_secs(2);

type BoxReader = Box<dyn AsyncBufRead + Unpin + Send>;
type BoxWriter = Box<dyn AsyncWrite + Unpin + Send>;

enum Transport {
    /// Line-oriented byte stream to a live controller.
    Live { reader: BoxReader, writer: BoxWriter },
    /// Simulation mode: actions are logged, never transmitted.
    Logged,
}

/// Owns the controller connection for the lifetime of the process.
pub struct Dispatcher {
    transport: Transport,
    ack_timeout: Duration,
}

impl Dispatcher {
    /// Open the configured serial port, falling back to simulation
    /// mode when the controller is absent. Never fatal.
    pub async fn connect(config: &Config) -> Self {
        let ack_timeout = Duration::from_secs(config.ack_timeout_secs);
        match Self::open_serial(&config.serial_port, config.serial_baud, ack_timeout).await {
            Ok(dispatcher) => {
                info!(
                    port = %config.serial_port,
                    baud = config.serial_baud,
                    "Controller connected"
                );
                dispatcher
            }
            Err(e) => {
                warn!(
                    port = %config.serial_port,
                    error = %e,
                    "Controller unavailable, continuing in simulation mode"
                );
                Self::logged(ack_timeout)
            }
        }
    }

    async fn open_serial(
        port: &str,
        baud: u32,
        ack_timeout: Duration,
    ) -> Result<Self, DriverError> {
        let stream = tokio_serial::new(port, baud)
            .open_native_async()
            .map_err(|e| DriverError::Connection(e.to_string()))?;
        tokio::time::sleep(RESET_DELAY).await;
        let (reader, writer) = tokio::io::split(stream);
        Ok(Self::over_stream(reader, writer, ack_timeout))
    }

    /// Dispatcher over an arbitrary byte stream pair.
    pub fn over_stream<R, W>(reader: R, writer: W, ack_timeout: Duration) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        Dispatcher {
            transport: Transport::Live {
                reader: Box::new(BufReader::new(reader)),
                writer: Box::new(writer),
            },
            ack_timeout,
        }
    }

    /// Simulation-mode dispatcher: every action succeeds immediately.
    pub fn logged(ack_timeout: Duration) -> Self {
        Dispatcher {
            transport: Transport::Logged,
            ack_timeout,
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self.transport, Transport::Logged)
    }

    /// Execute a whole choreography, one acknowledged action at a
    /// time. The first failure aborts: remaining actions are dropped
    /// and the gripper stays wherever it stopped — recovery is the
    /// operator's call, never automatic.
    pub async fn execute(&mut self, choreography: &Choreography) -> Result<(), DriverError> {
        for action in choreography.actions() {
            self.send(action).await?;
        }
        Ok(())
    }

    async fn send(&mut self, action: &Action) -> Result<(), DriverError> {
        let (reader, writer) = match &mut self.transport {
            Transport::Logged => {
                debug!(command = %action, "SIM <");
                return Ok(());
            }
            Transport::Live { reader, writer } => (reader, writer),
        };

        debug!(command = %action, "CTRL <");
        writer.write_all(format!("{action}\n").as_bytes()).await?;
        writer.flush().await?;

        let deadline = Instant::now() + self.ack_timeout;
        let mut line = String::new();
        loop {
            line.clear();
            let read = timeout_at(deadline, reader.read_line(&mut line))
                .await
                .map_err(|_| DriverError::AckTimeout(action.to_string()))??;
            if read == 0 {
                return Err(DriverError::Connection(
                    "controller closed the stream".to_string(),
                ));
            }
            let response = line.trim();
            debug!(line = response, "CTRL >");
            if response.starts_with("Done") {
                return Ok(());
            }
            if response.starts_with("Error") {
                return Err(DriverError::Controller(response.to_string()));
            }
        }
    }
}
