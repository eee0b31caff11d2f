//! Draftshield and zero example

use ohrust::{Balance, DoorState};

#[tokio::main]
async fn main() -> ohrust::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let port = std::env::var("BALANCE_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut balance = Balance::new(port);
    balance.connect().await?;

    // Each call returns once the door has physically settled.
    println!("Opening left door...");
    balance.move_door(DoorState::OpenLeft).await?;

    println!("Closing doors...");
    balance.move_door(DoorState::CloseBoth).await?;

    println!("Zeroing...");
    balance.zero().await?;

    println!("Done!");

    balance.disconnect().await?;

    Ok(())
}
