use std::io::{self, BufRead, Write};

use dotenv::dotenv;
use gogo_admin::{AdminApp, AppConfig, Reply};
use log::{error, info};

fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            std::process::exit(2);
        }
    };
    let mut app = match AdminApp::bootstrap(&config) {
        Ok(app) => app,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    info!(
        "Admin panel ready with {} employees",
        app.store().borrow().employees().len()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        match app.handle_line(&line?) {
            Reply::Quit => break,
            Reply::Text(text) if text.is_empty() => {}
            Reply::Text(text) => writeln!(stdout, "{}", text)?,
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    Ok(())
}
