//! Plan and execute a single move from the command line.
//!
//! Usage: manual-move <from> <to> [--capture] [--castle] [--black] [--promote <QRBN>]
//!
//! Prints the planned wire commands, then runs them against the
//! configured port (or in simulation mode when none is attached).

use tracing::info;

use gantry_core::{plan, DiscardPile, MoveRequest, PieceKind, Square};
use gantry_driver::config::Config;
use gantry_driver::dispatch::Dispatcher;

const USAGE: &str = "usage: manual-move <from> <to> [--capture] [--castle] [--black] [--promote <QRBN>]";

fn parse_args() -> Result<MoveRequest, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        return Err(USAGE.to_string());
    }

    let from: Square = args[0].parse().map_err(|e| format!("{e}"))?;
    let to: Square = args[1].parse().map_err(|e| format!("{e}"))?;
    let mut request = MoveRequest {
        from,
        to,
        is_white: true,
        is_capture: false,
        is_castle: false,
        promotion: None,
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--capture" => request.is_capture = true,
            "--castle" => request.is_castle = true,
            "--black" => request.is_white = false,
            "--promote" => {
                i += 1;
                let letter = args
                    .get(i)
                    .and_then(|s| s.chars().next())
                    .ok_or("--promote needs a piece letter")?;
                request.promotion = Some(
                    PieceKind::from_letter(letter)
                        .ok_or("promotion piece must be one of QRBN")?,
                );
            }
            other => return Err(format!("unknown argument: {other}\n{USAGE}")),
        }
        i += 1;
    }
    Ok(request)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let _ = dotenvy::dotenv();

    let request = match parse_args() {
        Ok(request) => request,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let config = Config::load()?;
    let mut discards = DiscardPile::new();
    let choreography = plan(&request, &mut discards)?;
    for action in choreography.actions() {
        println!("{action}");
    }

    let mut dispatcher = Dispatcher::connect(&config).await;
    dispatcher.execute(&choreography).await?;
    info!(from = %request.from, to = %request.to, "Move executed");
    Ok(())
}
