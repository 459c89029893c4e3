use once_cell::sync::Lazy;

use opinfo_core::error::ConfigError;

use crate::{decoder::decode, generated::OP_CODE_DATA, info::OpCodeInfo, Code};

static OP_CODE_INFOS: Lazy<Vec<OpCodeInfo>> = Lazy::new(|| match try_build_table() {
    Ok(table) => table,
    // a broken record is a defect of the compiled-in table
    Err(err) => panic!("{err}"),
});

/// Resolves every record of the static table, in identity order.
pub fn try_build_table() -> Result<Vec<OpCodeInfo>, ConfigError> {
    let table = Code::values()
        .zip(OP_CODE_DATA.iter())
        .map(|(code, packed)| decode(code, packed))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("resolved {} opcode records", table.len());
    Ok(table)
}

/// Resolved table, indexed by [`Code::value`].
///
/// The table is built on first access and lives until the process exits.
pub fn op_code_infos() -> &'static [OpCodeInfo] {
    &OP_CODE_INFOS
}
