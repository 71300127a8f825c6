//! folio
//!
//! Animated single-page personal portfolio for the terminal.
//!
//! Pure Core / Impure Shell: [`anim`], [`model`] and [`state`] are
//! driven by explicit time and input and never touch the terminal;
//! [`view`], [`contact`] and [`logging`] own the side effects.

pub mod anim;
pub mod config;
pub mod contact;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;
