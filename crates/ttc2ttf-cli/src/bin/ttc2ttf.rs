use ttc2ttf_cli::{read_args, report, Invocation};

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );
    let status = match read_args(std::env::args_os()) {
        Ok(Invocation::Info(info)) => info.exit(),
        Ok(Invocation::Run(request)) => match ttc2ttf::run(&request) {
            Ok(written) => {
                log::info!("Wrote {} font(s)", written.len());
                0
            }
            Err(e) => report(&e),
        },
        Err(e) => report(&e),
    };
    std::process::exit(status);
}
