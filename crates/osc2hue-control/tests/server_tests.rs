#![cfg(feature = "osc")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use osc2hue_control::osc::types::encode_message;
use osc2hue_control::{CommandRouter, HueError, LightBridge, OscServer};
use osc2hue_core::{DeviceRegistry, Light, Scalar, UpdateIntent};
use rosc::{OscBundle, OscMessage, OscPacket, OscTime, OscType};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Clone, Default)]
struct RecordingBridge {
    calls: Arc<Mutex<Vec<(String, UpdateIntent)>>>,
}

#[async_trait]
impl LightBridge for RecordingBridge {
    async fn update_light(&self, light_id: &str, intent: &UpdateIntent) -> Result<(), HueError> {
        self.calls
            .lock()
            .unwrap()
            .push((light_id.to_string(), intent.clone()));
        Ok(())
    }
}

impl RecordingBridge {
    async fn wait_for_calls(&self, count: usize) -> Vec<(String, UpdateIntent)> {
        for _ in 0..100 {
            {
                let calls = self.calls.lock().unwrap();
                if calls.len() >= count {
                    return calls.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.calls.lock().unwrap().clone()
    }
}

struct Harness {
    bridge: RecordingBridge,
    target: std::net::SocketAddr,
    sender: UdpSocket,
    stop: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<osc2hue_control::Result<()>>,
}

async fn start() -> Harness {
    let bridge = RecordingBridge::default();
    let registry = DeviceRegistry::new(vec![Light::new("a1b2", "Desk"), Light::new("c3d4", "Shelf")]);
    let router = CommandRouter::new(Some(bridge.clone()), registry);

    let server = OscServer::bind("127.0.0.1", 0).await.unwrap();
    let target = server.local_addr();
    let (stop, stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        server
            .run_until(&router, async {
                let _ = stopped.await;
            })
            .await
    });

    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    Harness {
        bridge,
        target,
        sender,
        stop,
        handle,
    }
}

impl Harness {
    async fn shutdown(self) {
        self.stop.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_set_message_reaches_bridge() {
    let harness = start().await;

    let bytes = encode_message(
        "/hue/light/2/set",
        &[
            Scalar::Float(0.6),
            Scalar::Float(0.3),
            Scalar::Float(0.8),
            Scalar::Int(2000),
        ],
    )
    .unwrap();
    harness.sender.send_to(&bytes, harness.target).await.unwrap();

    let calls = harness.bridge.wait_for_calls(1).await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "c3d4");
    assert_eq!(calls[0].1.transition_ms, Some(2000));
    assert!(calls[0].1.color.is_some());

    harness.shutdown().await;
}

#[tokio::test]
async fn test_bundle_and_bad_packets() {
    let harness = start().await;

    // Garbage and unknown addresses are dropped without stopping the server
    harness
        .sender
        .send_to(b"not an osc packet", harness.target)
        .await
        .unwrap();
    let unknown = encode_message("/other/thing", &[Scalar::Int(1)]).unwrap();
    harness.sender.send_to(&unknown, harness.target).await.unwrap();

    let bundle = OscPacket::Bundle(OscBundle {
        timetag: OscTime {
            seconds: 0,
            fractional: 1,
        },
        content: vec![
            OscPacket::Message(OscMessage {
                addr: "/hue/all/on".to_string(),
                args: vec![OscType::Bool(true)],
            }),
            OscPacket::Message(OscMessage {
                addr: "/hue/light/a1b2/brightness".to_string(),
                args: vec![OscType::Int(127), OscType::String("slow".to_string())],
            }),
        ],
    });
    let bytes = rosc::encoder::encode(&bundle).unwrap();
    harness.sender.send_to(&bytes, harness.target).await.unwrap();

    let calls = harness.bridge.wait_for_calls(3).await;
    let ids: Vec<&str> = calls.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["a1b2", "c3d4", "a1b2"]);
    assert_eq!(calls[0].1.on, Some(true));
    assert!((calls[2].1.brightness.unwrap() - 0.5).abs() < 0.01);
    assert_eq!(calls[2].1.transition_ms, None);

    harness.shutdown().await;
}
