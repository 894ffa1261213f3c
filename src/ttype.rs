use std::fmt;

/// Byte terminating the field sequence of an encoded struct.
pub const STOP: u8 = 0x00;

/// Type codes used in the Thrift binary protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TType {
    Bool = 0x02,
    Byte = 0x03,
    Double = 0x04,
    I16 = 0x06,
    I32 = 0x08,
    I64 = 0x0A,
    Binary = 0x0B,
    Struct = 0x0C,
    Map = 0x0D,
    Set = 0x0E,
    List = 0x0F,
}

impl TType {
    /// Returns the type code for a tag byte, or `None` if the byte is not a
    /// known tag. `STOP` is not a type code.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x02 => Some(TType::Bool),
            0x03 => Some(TType::Byte),
            0x04 => Some(TType::Double),
            0x06 => Some(TType::I16),
            0x08 => Some(TType::I32),
            0x0A => Some(TType::I64),
            0x0B => Some(TType::Binary),
            0x0C => Some(TType::Struct),
            0x0D => Some(TType::Map),
            0x0E => Some(TType::Set),
            0x0F => Some(TType::List),
            _ => None,
        }
    }

    /// Smallest number of bytes a value of this type can occupy on the wire.
    pub(crate) fn min_encoded_len(self) -> usize {
        match self {
            TType::Bool | TType::Byte => 1,
            TType::I16 => 2,
            TType::I32 => 4,
            TType::Double | TType::I64 => 8,
            TType::Binary => 4,
            TType::Struct => 1,
            TType::Map => 6,
            TType::Set | TType::List => 5,
        }
    }

    /// Lower-case name used in diagnostics and formatted output.
    pub fn name(self) -> &'static str {
        match self {
            TType::Bool => "bool",
            TType::Byte => "byte",
            TType::Double => "double",
            TType::I16 => "i16",
            TType::I32 => "i32",
            TType::I64 => "i64",
            TType::Binary => "binary",
            TType::Struct => "struct",
            TType::Map => "map",
            TType::Set => "set",
            TType::List => "list",
        }
    }
}

impl From<TType> for u8 {
    fn from(ttype: TType) -> u8 {
        ttype as u8
    }
}

impl fmt::Display for TType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
