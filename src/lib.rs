#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bar;
pub mod bar_kind;
pub mod catalog;
pub mod loadout;
pub mod loadout_error;
pub mod logging;
pub mod message_bus;
pub mod plate;
pub mod session;
pub mod sync_channel;
pub mod sync_state;
pub mod target;
pub mod weight;
