//! CLI commands for the pairgram encoder.

pub mod decode;
pub mod encode;
pub mod generate;
pub mod print;

pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use generate::GenerateCommand;
pub use print::PrintCommand;
