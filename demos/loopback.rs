//! Send a few ArtDmx frames to a local receiver and read them back

use std::net::{Ipv4Addr, UdpSocket};
use std::thread;
use std::time::Duration;

use artnet_in::{ArtDmx, Receiver, ReceiverConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Art-Net Loopback Example");
    println!("========================\n");

    let mut receiver = Receiver::new();
    receiver.start(
        ReceiverConfig::default()
            .with_bind_address(Ipv4Addr::LOCALHOST.into())
            .with_port(0),
    )?;
    let target = receiver.local_addr().ok_or("receiver not bound")?;
    println!("Receiver bound to {target}");

    let sender = UdpSocket::bind("127.0.0.1:0")?;
    let query = receiver.query();

    for (sequence, level) in [(1u8, 0u8), (2, 64), (3, 128), (4, 255)] {
        let frame = ArtDmx::new(0, sequence, vec![level; 4]);
        sender.send_to(&frame.encode(), target)?;
        thread::sleep(Duration::from_millis(20));

        println!(
            "sent {level:3} -> dmx(0) = {:3}, dmxf(0) = {:.3}",
            query.dmx(0),
            query.dmxf(0)
        );
    }

    // a partial frame leaves channels 2 and 3 alone
    sender.send_to(&ArtDmx::new(0, 5, vec![10u8, 20]).encode(), target)?;
    thread::sleep(Duration::from_millis(20));
    println!("\nafter partial frame: {:?}", &query.channels()[..4]);

    println!("status: {}", receiver.status());
    receiver.stop();
    println!("status: {}", receiver.status());

    Ok(())
}
