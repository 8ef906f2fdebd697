use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NatError {
    /// 空字符串不能转换为自然数
    EmptyInput,

    /// 字符串中含有非十进制数字
    InvalidDigit {
        idx: usize,
        byte: u8,
    },

    /// 不支持负数
    NegativeInput(i64),

    /// 减法下溢
    NegativeResult,

    DivideByZero,

    /// 数字索引`idx`超出位数`len`
    IndexOutOfRange {
        idx: usize,
        len: usize,
    },

    /// 右移位数`shift`不能超过位数`len`
    ShiftRightOverflow {
        shift: usize,
        len: usize,
    },
}

impl Display for NatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NatError::EmptyInput => f.write_str("empty string cannot be parsed as a natural number"),
            NatError::InvalidDigit { idx, byte } => f.write_fmt(format_args!(
                "invalid digit byte `{:#04x}` in the `{idx}`th position",
                byte
            )),
            NatError::NegativeInput(n) => {
                f.write_fmt(format_args!("negative input `{n}` is not a natural number"))
            }
            NatError::NegativeResult => f.write_str("subtraction result would be negative"),
            NatError::DivideByZero => f.write_str("attempt to divide by zero"),
            NatError::IndexOutOfRange { idx, len } => f.write_fmt(format_args!(
                "digit index `{idx}` out of range for a `{len}` digit number"
            )),
            NatError::ShiftRightOverflow { shift, len } => f.write_fmt(format_args!(
                "right shift by `{shift}` overflows a `{len}` digit number"
            )),
        }
    }
}

impl Error for NatError {}
