pub mod csv;
pub mod profile;
pub mod ranking;
pub mod roster;
pub mod season;
pub mod snake;

pub use profile::*;
pub use roster::*;
pub use season::*;
