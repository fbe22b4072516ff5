//! Process configuration, read from flags or `POLICY_PAY_*` environment variables.

use crate::domain::charges::FeeSchedule;
use clap::Parser;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("{name} must not be negative (got {value})")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: Decimal,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Insurance premium payment backend", long_about = None)]
pub struct Cli {
    /// Address the HTTP server listens on
    #[arg(long, env = "POLICY_PAY_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Smallest processing fee charged per payment
    #[arg(long, env = "POLICY_PAY_MINIMUM_FEE", default_value = "3.50")]
    pub minimum_fee: Decimal,

    /// Processing fee as a fraction of the premium (0.029 = 2.9%)
    #[arg(long, env = "POLICY_PAY_FEE_RATE", default_value = "0")]
    pub fee_rate: Decimal,

    /// Tax as a fraction of the premium
    #[arg(long, env = "POLICY_PAY_TAX_RATE", default_value = "0.01")]
    pub tax_rate: Decimal,

    /// Emit logs as JSON lines
    #[arg(long, env = "POLICY_PAY_LOG_JSON")]
    pub log_json: bool,
}

impl Cli {
    pub fn fee_schedule(&self) -> Result<FeeSchedule, ConfigError> {
        for (name, value) in [
            ("minimum fee", self.minimum_fee),
            ("fee rate", self.fee_rate),
            ("tax rate", self.tax_rate),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigError { name, value });
            }
        }
        Ok(FeeSchedule {
            minimum_fee: self.minimum_fee,
            fee_rate: self.fee_rate,
            tax_rate: self.tax_rate,
        })
    }
}
