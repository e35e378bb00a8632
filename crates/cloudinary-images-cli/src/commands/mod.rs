pub mod configure;
pub mod format;
pub mod show;
pub mod sizes;
pub mod sync;
pub mod uninstall;
pub mod validate;
