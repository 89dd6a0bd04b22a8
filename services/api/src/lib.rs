mod cli;
mod history;
mod infra;
mod routes;
mod server;

use writer_desk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
