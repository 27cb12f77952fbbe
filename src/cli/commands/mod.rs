pub mod detect;
pub mod helper;
pub mod init;
pub mod translate;

mod command_result;

pub use command_result::*;
