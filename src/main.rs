use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match dcloud_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
