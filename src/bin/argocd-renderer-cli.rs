use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};

use argocd_renderer::client::{
    format_render, format_whitelist, OutputFormat, RendererClient, DEFAULT_SERVER_URL,
};
use argocd_renderer::http::types::RenderRequest;

#[derive(Parser)]
#[command(name = "argocd-renderer")]
#[command(about = "ArgoCD Renderer CLI", long_about = None, version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Kubernetes manifests from a Git repository
    Render {
        /// Git repository URL
        #[arg(short = 'r', long)]
        repo: String,

        /// Path within the repository
        #[arg(short = 'p', long, default_value = ".")]
        path: String,

        /// Git revision to render
        #[arg(short = 'v', long, default_value = "HEAD")]
        revision: String,

        /// Server URL
        #[arg(short = 's', long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },
    /// Whitelist management commands
    Whitelist {
        #[command(subcommand)]
        command: WhitelistCommands,
    },
}

#[derive(Subcommand)]
enum WhitelistCommands {
    /// List current whitelist patterns
    List {
        /// Server URL
        #[arg(short = 's', long, default_value = DEFAULT_SERVER_URL)]
        server: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    match run(command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<String, Box<dyn std::error::Error>> {
    match command {
        Commands::Render {
            repo,
            path,
            revision,
            server,
            output,
        } => {
            let client = RendererClient::new(&server);
            let req = RenderRequest {
                repo_url: repo,
                path,
                target_revision: revision,
            };
            let resp = client.render(&req).await?;
            Ok(format_render(&resp, output)?)
        }
        Commands::Whitelist {
            command: WhitelistCommands::List { server },
        } => {
            let client = RendererClient::new(&server);
            let resp = client.whitelist().await?;
            Ok(format_whitelist(&resp))
        }
    }
}
