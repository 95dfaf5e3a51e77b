use clap::Parser;

use estate_chat::config::WidgetConfig;
use estate_chat::error::Result;
use estate_chat::{runtime_paths, widget, ChatWidgetError};

#[derive(Parser, Debug)]
#[command(name = "estate-chat")]
#[command(about = "Real estate assistant chat widget")]
#[command(version)]
struct Cli {
    /// JSON config file. Missing file means built-in defaults.
    #[arg(
        long,
        env = "ESTATE_CHAT_CONFIG",
        default_value_t = runtime_paths::default_config_path()
    )]
    config: String,

    /// Chat endpoint URL, overrides the config file.
    #[arg(long, env = "ESTATE_CHAT_ENDPOINT")]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    estate_chat::logging::init_tracing("estate_chat_widget");
    let cli = Cli::parse();

    let mut config = WidgetConfig::load(&cli.config)?;
    if let Some(endpoint) = cli.endpoint {
        config = config.with_endpoint(endpoint)?;
    }

    widget::launch(config).map_err(|err| ChatWidgetError::Runtime(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn endpoint_flag_parses() {
        let cli = Cli::try_parse_from([
            "estate-chat",
            "--config",
            "/tmp/none.json",
            "--endpoint",
            "http://localhost:3000/api/chatbot/message",
        ])
        .expect("parse");
        assert_eq!(cli.config, "/tmp/none.json");
        assert_eq!(
            cli.endpoint.as_deref(),
            Some("http://localhost:3000/api/chatbot/message")
        );
    }
}
