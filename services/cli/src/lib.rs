mod cli;

use deed_intake::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
