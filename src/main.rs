use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = fileops::cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e) => {
            fileops::output::print_error(&format!("{e:#}"));
            ExitCode::from(app::exit_code(&e))
        }
    }
}
