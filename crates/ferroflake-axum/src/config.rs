use anyhow::{Context, bail};
use clap::Parser;
use core::time::Duration;
use ferroflake::{MAX_BITS_FIELD, Settings};
use std::net::SocketAddr;

/// Runtime configuration for the `ferroflake-axum` binary.
///
/// All values are parsed from CLI arguments or environment variables. The
/// generator layout flags map one-to-one onto [`Settings`] and are validated
/// again when the generator is constructed.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ferroflake-axum",
    version,
    about = "An HTTP service for Sonyflake-style IDs"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:8080"))]
    pub server_addr: String,

    /// Fixed machine ID for this instance.
    ///
    /// When unset, the machine ID is derived from the lower 16 bits of the
    /// host's first private IPv4 address. Operators running more than one
    /// instance per host must set this explicitly.
    ///
    /// Environment variable: `MACHINE_ID`
    #[arg(long, env = "MACHINE_ID")]
    pub machine_id: Option<u32>,

    /// Width of the sequence field in bits.
    ///
    /// Environment variable: `BITS_SEQUENCE`
    #[arg(long, env = "BITS_SEQUENCE", default_value_t = 8)]
    pub bits_sequence: u32,

    /// Width of the machine ID field in bits.
    ///
    /// Environment variable: `BITS_MACHINE_ID`
    #[arg(long, env = "BITS_MACHINE_ID", default_value_t = 16)]
    pub bits_machine_id: u32,

    /// Duration of one time tick in milliseconds.
    ///
    /// Environment variable: `TIME_UNIT_MS`
    #[arg(long, env = "TIME_UNIT_MS", default_value_t = 10)]
    pub time_unit_ms: u64,

    /// Epoch in milliseconds since 1970-01-01 UTC. Defaults to
    /// 2025-01-01 UTC.
    ///
    /// Environment variable: `START_TIME_MS`
    #[arg(long, env = "START_TIME_MS")]
    pub start_time_ms: Option<u64>,

    /// Emit logs as JSON lines instead of human-readable text.
    ///
    /// Environment variable: `LOG_JSON`
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: SocketAddr,
    pub machine_id: Option<u32>,
    pub bits_sequence: u32,
    pub bits_machine_id: u32,
    pub time_unit: Duration,
    pub start_time: Option<Duration>,
    pub log_json: bool,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let server_addr: SocketAddr = args
            .server_addr
            .parse()
            .with_context(|| format!("SERVER_ADDR ({}) is not a socket address", args.server_addr))?;

        if args.bits_sequence == 0 || args.bits_sequence > MAX_BITS_FIELD {
            bail!(
                "BITS_SEQUENCE ({}) must be between 1 and {MAX_BITS_FIELD}",
                args.bits_sequence
            );
        }
        if args.bits_machine_id == 0 || args.bits_machine_id > MAX_BITS_FIELD {
            bail!(
                "BITS_MACHINE_ID ({}) must be between 1 and {MAX_BITS_FIELD}",
                args.bits_machine_id
            );
        }
        if args.time_unit_ms == 0 {
            bail!("TIME_UNIT_MS must be greater than 0");
        }
        if let Some(machine_id) = args.machine_id {
            let max_machine_id = (1u64 << args.bits_machine_id) - 1;
            if u64::from(machine_id) > max_machine_id {
                bail!(
                    "MACHINE_ID ({machine_id}) exceeds the machine ID space (max = {max_machine_id})"
                );
            }
        }

        Ok(Self {
            server_addr,
            machine_id: args.machine_id,
            bits_sequence: args.bits_sequence,
            bits_machine_id: args.bits_machine_id,
            time_unit: Duration::from_millis(args.time_unit_ms),
            start_time: args.start_time_ms.map(Duration::from_millis),
            log_json: args.log_json,
        })
    }
}

impl ServerConfig {
    /// Builds generator settings from this configuration.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default()
            .with_bits_sequence(self.bits_sequence)
            .with_bits_machine_id(self.bits_machine_id)
            .with_time_unit(self.time_unit);
        if let Some(start_time) = self.start_time {
            settings = settings.with_start_time(start_time);
        }
        if let Some(machine_id) = self.machine_id {
            settings = settings.with_machine_id(move || Ok(machine_id));
        }
        settings
    }
}
