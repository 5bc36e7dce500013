pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "employee-directory-api")]
#[command(about = "Employee directory admin API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Listen port, overrides PORT")]
        port: Option<u16>,

        #[arg(long, help = "Keep users, employees and images in process memory")]
        in_memory: bool,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Serve {
        port: None,
        in_memory: false,
    });

    match command {
        Commands::Serve { port, in_memory } => commands::serve::handle(port, in_memory).await,
        Commands::Migrate => commands::migrate::handle().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["employee-directory-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::try_parse_from(["employee-directory-api", "serve", "--port", "8080", "--in-memory"])
            .unwrap();
        match cli.command {
            Some(Commands::Serve { port, in_memory }) => {
                assert_eq!(port, Some(8080));
                assert!(in_memory);
            }
            _ => panic!("expected serve"),
        }
    }
}
