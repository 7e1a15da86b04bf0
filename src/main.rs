use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use qciup::{cli, config, error, types::RunContext, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Register this device with the QiaOAuth authorization server
    DeviceCode(DeviceCodeOptions),

    /// Upload a sample variant archive to QCI Interpret
    Upload(UploadOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DeviceCodeOptions {
    /// OAuth client ID issued for this integration
    #[clap(long)]
    pub client_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct UploadOptions {
    /// Sample name used for the manifest and the uploaded archive
    #[clap(long)]
    pub sample_name: String,

    /// Path to the secondary analysis ZIP archive of the sample
    #[clap(long, value_parser = utils::parse_existing_file)]
    pub sample_path: PathBuf,

    /// OAuth client ID issued for this integration
    #[clap(long)]
    pub client_id: String,

    /// OAuth client secret issued for this integration
    #[clap(long)]
    pub client_secret: String,

    /// PKCE code verifier saved by the device-code command
    #[clap(long)]
    pub code_verifier: String,

    /// Device code saved by the device-code command
    #[clap(long)]
    pub device_code: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let run = RunContext::new();

    match cli.command {
        Command::DeviceCode(opt) => cli::device_code(opt.client_id, &run).await,

        Command::Upload(opt) => {
            cli::upload(
                opt.sample_name,
                opt.sample_path,
                opt.client_id,
                opt.client_secret,
                opt.code_verifier,
                opt.device_code,
                &run,
            )
            .await
        }

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
