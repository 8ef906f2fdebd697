use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use cipher::rsa::{KeyPair, DEFAULT_ROUNDS};
use clap::Args;
use rand::DefaultRand;

#[derive(Args, Clone)]
pub struct KeygenArgs {
    #[arg(long, default_value_t = 20)]
    #[arg(help = "decimal digits of each generated prime")]
    pub digits: usize,

    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    #[arg(help = "miller-rabin rounds per prime")]
    pub rounds: usize,

    #[arg(long, default_value_t = 0)]
    #[arg(help = "rng seed; 0 derives one from the system time")]
    pub seed: u64,

    #[arg(long, short)]
    #[arg(help = "the key pair file path")]
    pub out: PathBuf,
}

impl KeygenArgs {
    pub fn run(self) -> anyhow::Result<()> {
        let t = Instant::now();
        let pair = KeyPair::generate(self.digits, self.rounds, DefaultRand::from_seed(self.seed))?;
        log::info!(
            "generated a {} digit modulus in {:?}",
            pair.public_key().modulus().len(),
            t.elapsed()
        );

        let json = serde_json::to_string_pretty(&pair)?;
        fs::write(&self.out, json)
            .with_context(|| format!("writing the key pair to {}", self.out.display()))?;
        log::info!("key pair written to {}", self.out.display());
        Ok(())
    }
}
