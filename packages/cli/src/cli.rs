use anyhow::{ensure, Context};
use clap::{Parser, Subcommand};
use encap_rsa::{kem, KemParams};
use log::info;
use std::path::PathBuf;

use crate::report::Report;

const MAX_DIGITS: u32 = 512;

fn parse_digits(s: &str) -> Result<u32, String> {
    clap_num::number_range(s, 1, MAX_DIGITS)
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the results as a JSON object
    #[arg(long, global = true)]
    pub json: bool,

    /// JSON file with sampling limits, e.g. {"max_prime_attempts": 1000, ...}
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Candidates drawn per prime before giving up
    #[arg(long, global = true)]
    pub max_prime_attempts: Option<u64>,

    /// Candidates drawn for the public exponent before giving up
    #[arg(long, global = true)]
    pub max_exponent_attempts: Option<u64>,

    /// Miller-Rabin bases tried per prime candidate
    #[arg(long, global = true)]
    pub miller_rabin_rounds: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a public and a private key
    Keygen {
        /// Decimal digits of each prime factor
        #[arg(long, value_parser = parse_digits)]
        digits: u32,

        #[arg(long)]
        salt: String,
    },

    /// Encapsulate a fresh secret under a public key
    Encapsulate {
        #[arg(long)]
        public_key: String,

        #[arg(long)]
        salt: String,
    },

    /// Recover a secret from a ciphertext with the private key
    Decapsulate {
        #[arg(long)]
        ciphertext: String,

        #[arg(long)]
        private_key: String,

        #[arg(long, default_value = "")]
        salt: String,
    },

    /// Generate keys, encapsulate, decapsulate and check the secrets match
    Demo {
        #[arg(long, default_value_t = 10, value_parser = parse_digits)]
        digits: u32,

        #[arg(long, default_value = "secure_salt")]
        salt: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Demo { digits: 10, salt: "secure_salt".into() }
    }
}

impl Cli {
    /// Builds the sampling limits from the config file and the command line flags.
    pub fn params(&self) -> anyhow::Result<KemParams> {
        let mut params = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
                serde_json::from_str::<KemParams>(&text).with_context(|| format!("parsing {:?}", path))?
            }
            None => KemParams::default(),
        };

        if let Some(attempts) = self.max_prime_attempts {
            params.max_prime_attempts = attempts;
        }
        if let Some(attempts) = self.max_exponent_attempts {
            params.max_exponent_attempts = attempts;
        }
        if let Some(rounds) = self.miller_rabin_rounds {
            params.miller_rabin_rounds = rounds;
        }

        Ok(params)
    }

    pub fn execute(&self) -> anyhow::Result<Report> {
        let params = self.params()?;
        execute(self.command.clone().unwrap_or_default(), &params)
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let report = self.execute()?;
        if self.json {
            println!("{}", report.to_json()?);
        } else {
            print!("{}", report);
        }
        Ok(())
    }
}

pub fn execute(command: Command, params: &KemParams) -> anyhow::Result<Report> {
    use Command::*;
    let report = match command {
        Keygen { digits, salt } => {
            let (public_key, private_key) =
                kem::generate_keys_with_params(digits, &salt, params).context("key generation failed")?;
            Report { public_key: Some(public_key), private_key: Some(private_key), ..Report::default() }
        }
        Encapsulate { public_key, salt } => {
            let (ciphertext, secret) = kem::encapsulate(&public_key, &salt).context("encapsulation failed")?;
            Report { ciphertext: Some(ciphertext), secret: Some(secret), ..Report::default() }
        }
        Decapsulate { ciphertext, private_key, salt } => {
            let secret = kem::decapsulate(&ciphertext, &private_key, &salt).context("decapsulation failed")?;
            Report { recovered_secret: Some(secret), ..Report::default() }
        }
        Demo { digits, salt } => {
            info!("running the demo with {}-digit primes", digits);
            let (public_key, private_key) =
                kem::generate_keys_with_params(digits, &salt, params).context("key generation failed")?;
            let (ciphertext, secret) = kem::encapsulate(&public_key, &salt).context("encapsulation failed")?;
            let recovered = kem::decapsulate(&ciphertext, &private_key, &salt).context("decapsulation failed")?;
            ensure!(recovered == secret, "decapsulated secret does not match the encapsulated one");

            Report {
                public_key: Some(public_key),
                private_key: Some(private_key),
                ciphertext: Some(ciphertext),
                secret: Some(secret),
                recovered_secret: Some(recovered),
                verified: Some(true),
            }
        }
    };
    Ok(report)
}
