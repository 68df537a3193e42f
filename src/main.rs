use std::process::ExitCode;

use polygon_circle::config::{Config, Parsed, HELP};
use polygon_circle::viewer::App;
use polygon_circle::window::SfmlSurface;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Parsed::Help => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Parsed::Run(config) => config,
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> polygon_circle::Result<()> {
    let config = config.validate()?;
    log::info!(
        "animating {}..{} sides, {}, {}",
        config.start_sides,
        config.max_sides,
        if config.circumscribed() {
            "circumscribed"
        } else {
            "inscribed"
        },
        if config.step_mode() {
            "stepping on SPACE".to_string()
        } else {
            format!("every {}s", config.interval)
        }
    );

    let mut surface = SfmlSurface::open(&config)?;
    let mut app = App::new(&mut surface, config)?;
    app.run()
}
