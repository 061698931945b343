//! Reading gray maps and writing feature tables

mod feature_table;
mod pgm;

pub use feature_table::{append_record, write_record, TableFormat};
pub use pgm::{read_pgm, read_pgm_from_buffer};
