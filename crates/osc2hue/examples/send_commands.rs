//! Send a series of commands to a running osc2hue instance.
//!
//! ```text
//! cargo run --example send_commands -- [host:port]
//! ```

use std::net::UdpSocket;
use std::thread;
use std::time::Duration;

use rosc::{OscMessage, OscPacket, OscType};

const NULL: OscType = OscType::Int(-1);

fn send(socket: &UdpSocket, target: &str, addr: &str, args: Vec<OscType>) -> anyhow::Result<()> {
    let packet = OscPacket::Message(OscMessage {
        addr: addr.to_string(),
        args,
    });
    let bytes = rosc::encoder::encode(&packet)?;
    socket.send_to(&bytes, target)?;
    thread::sleep(Duration::from_secs(3));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let target = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());
    let socket = UdpSocket::bind("0.0.0.0:0")?;

    println!("Sending commands to {} (-1 skips a value)", target);

    println!("1. Color only (x=0.3, y=0.4)");
    send(
        &socket,
        &target,
        "/hue/all/set",
        vec![OscType::Float(0.3), OscType::Float(0.4), NULL, NULL],
    )?;

    println!("2. Brightness only (50%)");
    send(
        &socket,
        &target,
        "/hue/all/set",
        vec![NULL, NULL, OscType::Float(0.5), NULL],
    )?;

    println!("3. Color + brightness (80%) with a 2000ms transition");
    send(
        &socket,
        &target,
        "/hue/all/set",
        vec![
            OscType::Float(0.6),
            OscType::Float(0.3),
            OscType::Float(0.8),
            OscType::Int(2000),
        ],
    )?;

    println!("4. Transition only (3000ms), current color and brightness kept");
    send(
        &socket,
        &target,
        "/hue/all/set",
        vec![NULL, NULL, NULL, OscType::Int(3000)],
    )?;

    println!("5. Brightness shorthand on light #1 (127 of 254)");
    send(
        &socket,
        &target,
        "/hue/light/1/brightness",
        vec![OscType::Int(127), OscType::Int(1000)],
    )?;

    println!("6. Color shorthand on every light");
    send(
        &socket,
        &target,
        "/hue/all/color",
        vec![OscType::Float(0.15), OscType::Float(0.06)],
    )?;

    println!("7. Everything off, then on again");
    send(&socket, &target, "/hue/all/on", vec![OscType::Int(0)])?;
    send(&socket, &target, "/hue/all/on", vec![OscType::Bool(true)])?;

    println!("Done");
    Ok(())
}
