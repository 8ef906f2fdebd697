use clap::{Parser, Subcommand};

mod crypt;
mod key;

pub use crypt::{CryptArgs, KeyHalf};
pub use key::KeygenArgs;

pub const fn rsan_version() -> &'static str {
    concat!(env!("RSAN_VERSION_INFO"), " (", env!("RSAN_GIT_INFO"), ")")
}

pub const fn rsan_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

#[derive(Parser)]
#[command(name = rsan_name(), version = rsan_version())]
#[command(about = "self-contained rsa toolkit")]
pub struct RsanCli {
    #[command(subcommand)]
    pub command: RsanSubCmd,
}

#[derive(Subcommand)]
pub enum RsanSubCmd {
    #[command(name = "keygen", alias = "k")]
    Keygen(KeygenArgs),
    #[command(name = "encrypt", alias = "e")]
    Encrypt(CryptArgs),
    #[command(name = "decrypt", alias = "d")]
    Decrypt(CryptArgs),
}

impl RsanCli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            RsanSubCmd::Keygen(args) => args.run(),
            RsanSubCmd::Encrypt(args) => args.encrypt(),
            RsanSubCmd::Decrypt(args) => args.decrypt(),
        }
    }
}
