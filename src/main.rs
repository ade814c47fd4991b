fn main() {
    let cli = ask::Cli::parse_lenient(std::env::args_os());
    let exit_code = match ask::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            0
        }
    };
    std::process::exit(exit_code);
}
