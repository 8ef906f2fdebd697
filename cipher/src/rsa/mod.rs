//! RSA
//!
//! - 随机选择两个质数$p$和$q$($p\neq q$), 则模数$n=p*q$;
//! - 欧拉函数$\phi(n)=(p-1)*(q-1)$;
//! - 公钥指数$e$和$\phi$互质, 私钥指数$d$满足$d*e \equiv 1 \mod \phi$;
//!
//! 加密: $c = m ^ e \mod n$;
//!
//! 解密: $m = c ^ d \mod n$;
//!
//! Messages are mapped onto numbers with a fixed decimal codec (three digits
//! per byte) and processed in chunks that stay below the modulus; this is a
//! demonstration scheme, not a padded production one.

pub mod codec;

mod key;
pub use key::{Key, KeyPair, DEFAULT_ROUNDS, MIN_MODULUS_DIGITS};

mod chunk;
pub use chunk::ChunkCipher;

mod stream;
