//! Listen for Art-Net and print the first channels of a universe
//!
//! ```text
//! cargo run --example listen -- [universe] [port]
//! RUST_LOG=artnet_in=debug cargo run --example listen
//! ```

use std::thread;
use std::time::Duration;

use artnet_in::{ARTNET_PORT, Receiver, ReceiverConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let universe: u16 = args.next().map_or(Ok(0), |s| s.parse())?;
    let port: u16 = args.next().map_or(Ok(ARTNET_PORT), |s| s.parse())?;

    let mut receiver = Receiver::new();
    receiver.start(
        ReceiverConfig::default()
            .with_port(port)
            .with_active_universe(universe),
    )?;
    let query = receiver.query();

    println!("Listening for universe {universe} on port {port} (Ctrl-C to quit)\n");

    loop {
        thread::sleep(Duration::from_millis(500));

        let status = receiver.status();
        if !status.state.is_active() {
            println!("receiver {status}");
            break;
        }

        let levels: Vec<String> = (0..8).map(|ch| format!("{:3}", query.dmx(ch))).collect();
        match query.signal_age() {
            Some(age) => println!("[{}]  last frame {age:.1?} ago", levels.join(" ")),
            None => println!("[{}]  no signal", levels.join(" ")),
        }
    }

    Ok(())
}
