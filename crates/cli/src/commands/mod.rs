pub mod disasm;
pub mod load;
