pub mod device;
pub mod process;
pub mod record;
