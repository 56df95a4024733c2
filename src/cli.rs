use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};

use crate::config::{self, Configuration, load_configuration, lookup_config_path};
use crate::models::ContactForm;

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"Contact form backend and article API of a personal portfolio site

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/portfolio/config.toml
    * $HOME/.config/portfolio/config.toml
    * $HOME/.portfolio.toml
"#,
    disable_version_flag = true
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Show the version
    #[arg(short, long)]
    version: bool,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Serve the contact endpoint and the article API (default)
    Serve {
        /// Listen address, overrides server.listen
        #[arg(short, long, value_name = "ADDR")]
        listen: Option<String>,
    },

    /// Send the contact form once and print the resulting notice
    Submit(SubmitArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub subject: String,

    #[arg(long, default_value = "")]
    pub message: String,

    /// Contact endpoint URL, overrides client.endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
}

impl SubmitArgs {
    pub fn form(&self) -> ContactForm {
        ContactForm::new()
            .with_name(&self.name)
            .with_email(&self.email)
            .with_subject(&self.subject)
            .with_message(&self.message)
    }
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| lookup_config_path().unwrap_or_default());

        if config_path.is_empty() {
            // No config path is specified just use the default config
            return Ok(Configuration::default());
        }
        load_configuration(config_path.as_str()).wrap_err("loading configuration")
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn print_version(&self) {
        println!("{}", config::version())
    }

    pub fn action(&self) -> Action {
        self.action
            .clone()
            .unwrap_or(Action::Serve { listen: None })
    }
}
