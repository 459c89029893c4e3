use core::fmt;

/// Sub-field of a packed record, used to report configuration errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldName {
    Encoding,
    MandatoryPrefixByte,
    Table,
    Encodable,
    AllowedPrefixes,
    OperandSize,
    AddressSize,
    VectorLength,
    TupleType,
    OpKind(u8),
}

impl fmt::Display for FieldName {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Encoding => fmt.write_str("encoding"),
            Self::MandatoryPrefixByte => fmt.write_str("mandatory prefix byte"),
            Self::Table => fmt.write_str("opcode table"),
            Self::Encodable => fmt.write_str("encodable"),
            Self::AllowedPrefixes => fmt.write_str("allowed prefixes"),
            Self::OperandSize => fmt.write_str("operand size"),
            Self::AddressSize => fmt.write_str("address size"),
            Self::VectorLength => fmt.write_str("vector length"),
            Self::TupleType => fmt.write_str("tuple type"),
            Self::OpKind(i) => write!(fmt, "op{i} kind"),
        }
    }
}

/// A packed record holds a value outside of a sub-field enumeration.
///
/// Always a defect of the static table, never caused by user input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    pub code: u16,
    pub field: FieldName,
    pub value: u32,
}

impl ConfigError {
    pub const fn new(code: u16, field: FieldName, value: u32) -> Self {
        Self { code, field, value }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "opcode record {}: invalid {} value {}",
            self.code, self.field, self.value
        )
    }
}

/// Invalid argument passed to an opcode info query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UsageError {
    /// Operand index outside of `0..5`.
    OperandIndex(usize),
    /// Bitness other than 16, 32 or 64.
    Bitness(u32),
}

impl fmt::Display for UsageError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OperandIndex(i) => write!(fmt, "operand index {i} is out of range"),
            Self::Bitness(b) => write!(fmt, "invalid bitness {b}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for UsageError {}
