pub mod apply;
pub mod blocks;
pub mod check;
pub mod init;
pub mod inspect;
pub mod ui;

pub use apply::{apply, ApplyArgs};
pub use blocks::{blocks, BlocksArgs};
pub use check::{check, CheckArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use ui::{ui, UiArgs};
