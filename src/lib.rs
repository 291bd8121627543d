#![doc(test(attr(deny(warnings))))]

//! Community Core holds the form, validation, wizard and synchronisation
//! machinery behind a community management application, together with the
//! record stores and a terminal shell that drives them.

pub mod cli;
pub mod config;
pub mod directory;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod storage;
pub mod sync;
pub mod utils;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes global tracing once per process.
pub fn init() {
    INIT.call_once(|| {
        utils::init_tracing();
        tracing::debug!("community_core tracing initialized");
    });
}
