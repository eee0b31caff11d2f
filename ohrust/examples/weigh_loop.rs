//! Immediate-weight polling example

use ohrust::Balance;

#[tokio::main]
async fn main() -> ohrust::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let port = std::env::var("BALANCE_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut balance = Balance::new(port);
    balance.connect().await?;

    if let Some(info) = balance.info() {
        println!("Connected: {}", info);
    }

    for i in 0..3 {
        let reading = balance.weigh().await?;
        println!("iteration {}: {}", i, reading);
    }

    balance.disconnect().await?;

    Ok(())
}
