use crate::history::{run_history, run_statuses, HistoryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use writer_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Writer Desk",
    about = "Serve and inspect writer script submissions from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Filter and sort a submission export the way the dashboard does
    History(HistoryArgs),
    /// List canonical review statuses and their badge styles
    Statuses,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::History(args) => run_history(args),
        Command::Statuses => {
            run_statuses();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use writer_desk::workflows::submissions::FilterMode;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["writer-desk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn history_accepts_filter_flags() {
        let cli = Cli::try_parse_from([
            "writer-desk-api",
            "history",
            "--input",
            "submissions.json",
            "--filter-mode",
            "Custom",
            "--start",
            "2024-01-02",
            "--end",
            "2024-01-03",
            "--sort",
            "asc",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::History(args)) => {
                assert_eq!(args.filter_mode, Some(FilterMode::Custom));
                assert!(args.start.is_some());
                assert!(args.end.is_some());
            }
            other => panic!("expected history command, got {other:?}"),
        }
    }

    #[test]
    fn history_rejects_malformed_dates() {
        let result = Cli::try_parse_from([
            "writer-desk-api",
            "history",
            "--input",
            "submissions.json",
            "--start",
            "last week",
        ]);
        assert!(result.is_err());
    }
}
