use std::env;

use opinfo_gen::Table;

fn main() {
    let out_dir = match env::var_os("OUT_DIR") {
        Some(dir) => dir,
        None => {
            eprintln!("error: OUT_DIR is not set");
            std::process::exit(1);
        }
    };

    if let Err(err) = Table::new("opcodes.table", out_dir).generate() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
