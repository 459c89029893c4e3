use opinfo_core::PackedOpCode;

/// Opcode form identities, in table order.
pub mod code {
    use crate::Code;

    include!(concat!(env!("OUT_DIR"), "/generated_code.rs"));
}

include!(concat!(env!("OUT_DIR"), "/generated_table.rs"));
