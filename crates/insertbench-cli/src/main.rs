use insertbench_core::errors::ErrorCode;

fn main() {
    if let Err(e) = insertbench_cli::run() {
        tracing::error!(code = e.error_code(), "{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
