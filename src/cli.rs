use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "flights-api")]
#[command(about = "Flight records API with JWT authentication")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Bind address (overrides HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Listen port (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Do not apply database migrations on startup")]
    pub skip_migrations: bool,
}
