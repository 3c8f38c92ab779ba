pub mod cli;
pub mod clock;
pub mod command;
pub mod decoder;
pub mod error;
pub mod layout;
pub mod logging;
pub mod output;
pub mod record;
pub mod serial;
pub mod series;
pub mod session;
