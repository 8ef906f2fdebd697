use std::{error::Error, fmt::Display};

use bignat::NatError;

#[derive(Debug)]
pub enum CipherError {
    /// 大数运算错误
    Nat(NatError),

    IOError(std::io::Error),

    /// 密钥强度不足, 欧拉函数至少要2^20
    KeyTooWeak,

    /// 模数的十进制位数不足
    KeyTooShort {
        digits: usize,
    },

    /// 密文分块不小于模数
    ChunkTooLarge,

    /// 模线性方程无解
    NoSolution,

    /// 文件内容不是预期的密文格式
    FileError(String),
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherError::Nat(e) => f.write_fmt(format_args!("{}", e)),
            CipherError::IOError(io_err) => f.write_fmt(format_args!("{}", io_err)),
            CipherError::KeyTooWeak => {
                f.write_str("rsa: key totient is below the 2^20 strength floor")
            }
            CipherError::KeyTooShort { digits } => f.write_fmt(format_args!(
                "rsa: key modulus has `{digits}` digits, at least 7 are required"
            )),
            CipherError::ChunkTooLarge => {
                f.write_str("rsa: ciphertext chunk is not smaller than the modulus")
            }
            CipherError::NoSolution => f.write_str("rsa: modular linear equation has no solution"),
            CipherError::FileError(what) => f.write_fmt(format_args!("rsa: {what}")),
        }
    }
}

impl Error for CipherError {}

impl From<NatError> for CipherError {
    fn from(value: NatError) -> Self {
        Self::Nat(value)
    }
}

impl From<std::io::Error> for CipherError {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value)
    }
}
