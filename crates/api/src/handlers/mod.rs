pub mod entities;
pub mod imports;
