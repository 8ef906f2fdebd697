use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use cipher::rsa::{ChunkCipher, KeyPair};
use clap::{Args, ValueEnum};

use crate::error::RsanError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyHalf {
    Public,
    Private,
}

#[derive(Args, Clone)]
pub struct CryptArgs {
    #[arg(long, short)]
    #[arg(help = "the key pair file path")]
    pub key: PathBuf,

    #[arg(long, value_enum)]
    #[arg(help = "key half to use; defaults to public for encrypt, private for decrypt")]
    pub half: Option<KeyHalf>,

    #[arg(help = "source file path")]
    pub src: PathBuf,

    #[arg(help = "destination file path")]
    pub dst: PathBuf,
}

impl CryptArgs {
    pub fn encrypt(self) -> anyhow::Result<()> {
        let cipher = self.cipher(KeyHalf::Public)?;
        let t = Instant::now();
        cipher.encrypt_file(&self.src, &self.dst)?;
        log::info!(
            "encrypted {} -> {} in {:?}",
            self.src.display(),
            self.dst.display(),
            t.elapsed()
        );
        Ok(())
    }

    pub fn decrypt(self) -> anyhow::Result<()> {
        let cipher = self.cipher(KeyHalf::Private)?;
        let t = Instant::now();
        cipher.decrypt_file(&self.src, &self.dst)?;
        log::info!(
            "decrypted {} -> {} in {:?}",
            self.src.display(),
            self.dst.display(),
            t.elapsed()
        );
        Ok(())
    }

    fn cipher(&self, default_half: KeyHalf) -> anyhow::Result<ChunkCipher> {
        if !self.src.exists() {
            return Err(RsanError::PathNotExist(self.src.display().to_string()).into());
        }

        let data = fs::read_to_string(&self.key)
            .with_context(|| format!("reading the key file {}", self.key.display()))?;
        let pair: KeyPair = serde_json::from_str(&data).map_err(|e| RsanError::BadKeyFile {
            path: self.key.display().to_string(),
            reason: e.to_string(),
        })?;

        let key = match self.half.unwrap_or(default_half) {
            KeyHalf::Public => pair.public_key().clone(),
            KeyHalf::Private => pair.private_key().clone(),
        };
        Ok(ChunkCipher::new(key)?)
    }
}
