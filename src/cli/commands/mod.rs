mod command_result;
pub mod helper;
pub mod init;
pub mod resolve;
pub mod translate;

pub use command_result::*;
