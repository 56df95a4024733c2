//! Site configuration: the TOML model with its defaults, and the
//! process-wide instance read by the `verbose!` macro.

pub mod constants;
pub(crate) mod defaults;
pub mod models;
pub mod utils;

pub use models::*;
pub use utils::*;

#[cfg(test)]
use std::cell::RefCell;

use std::sync::OnceLock;

/// Name of the configuration directory and dotfile.
pub const APP_NAME: &str = "portfolio";
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_SHA: &str = match option_env!("GIT_SHA") {
    Some(v) => v,
    None => "unknown",
};

/// User-Agent sent by the contact form client.
pub fn user_agent() -> String {
    format!("{}/{}", PKG_NAME, VERSION)
}

pub fn version() -> String {
    format!("{} {} (commit {})", PKG_NAME, VERSION, GIT_SHA)
}

#[cfg_attr(test, allow(dead_code))]
static CONFIG: OnceLock<Configuration> = OnceLock::new();

#[cfg(test)]
thread_local! {
    static TEST_CONFIG: RefCell<&'static Configuration> = RefCell::new(Box::leak(Box::new(Configuration::default())))
}

/// Startup progress on stderr, printed only with `general.verbose` set.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)+) => {
        if $crate::config::Configuration::instance().general.verbose {
            eprintln!("[+] {}", format_args!($($arg)+));
        }
    };
}

pub use verbose;
