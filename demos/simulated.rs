// SPDX-License-Identifier: MPL-2.0

//! Demo program: run the provisioner against a simulated board.
//!
//! The simulated camera shows one QR code, the station joins the network a
//! second after being asked to, a broker client appears shortly after that,
//! and the reset button is pressed once the client is being served.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example simulated -- [qr-payload]
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=qrprov_lib=debug cargo run --example simulated -- 'WIFI:S:Lab;T:WPA;P:hunter2;;'
//! ```

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use qrprov_lib::activity::BrokerObserver;
use qrprov_lib::error::{AdvertiseError, BrokerError, CameraError};
use qrprov_lib::peripheral::{
    BrokerService, CameraSource, Connectivity, ControlPanel, DecodeError, DecodedSymbol,
    MemoryStore, Orientation, Peripherals, Presentation, ServiceAdvertiser, ServiceRecord,
    SymbolDecoder,
};
use qrprov_lib::{ConnectivityStatus, Frame, Provisioner, ProvisionerConfig, Region};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

const DEFAULT_PAYLOAD: &str = "WIFI:S:DemoNet;T:WPA;P:demo-pass;;";

/// Timeline shared by the simulated peripherals.
struct Sim {
    payload: String,
    frame_shown: bool,
    joined_at: Option<Instant>,
    broker: Option<Arc<dyn BrokerObserver>>,
    client_at: Option<Instant>,
    serving_since: Option<Instant>,
}

type Shared = Arc<Mutex<Sim>>;

struct SimCamera(Shared);

impl CameraSource for SimCamera {
    fn init(&mut self) -> Result<(), CameraError> {
        println!("[camera] grayscale 320x240");
        Ok(())
    }

    fn try_get_frame(&mut self) -> Option<Frame> {
        let mut sim = self.0.lock();
        if sim.frame_shown {
            return None;
        }
        sim.frame_shown = true;
        Frame::new(320, 240, vec![0x80; 320 * 240])
    }

    fn release(&mut self, _frame: Frame) {}
}

struct SimDecoder(Shared);

impl SymbolDecoder for SimDecoder {
    fn detect(&mut self, _frame: &Frame) -> usize {
        1
    }

    fn decode(
        &mut self,
        _index: usize,
        orientation: Orientation,
    ) -> Result<DecodedSymbol, DecodeError> {
        // The camera image is mirrored, as on the real board
        match orientation {
            Orientation::Normal => Err(DecodeError::DataEcc),
            Orientation::Mirrored => Ok(DecodedSymbol::from_payload(self.0.lock().payload.clone())),
        }
    }
}

struct SimStation(Shared);

impl Connectivity for SimStation {
    fn status(&mut self) -> ConnectivityStatus {
        match self.0.lock().joined_at {
            Some(at) if Instant::now() >= at => ConnectivityStatus::Connected,
            Some(_) => ConnectivityStatus::Disconnected,
            None => ConnectivityStatus::Stopped,
        }
    }

    fn local_address(&self) -> Option<IpAddr> {
        self.0
            .lock()
            .joined_at
            .map(|_| IpAddr::V4(Ipv4Addr::new(192, 168, 4, 20)))
    }

    fn connect(&mut self, ssid: &str, _password: &str) {
        println!("[wifi] joining {ssid}");
        self.0.lock().joined_at = Some(Instant::now() + Duration::from_secs(1));
    }

    fn persist_last_credential(&mut self, persist: bool) {
        println!("[wifi] persist last credential: {persist}");
    }

    fn erase_credentials(&mut self) {
        println!("[wifi] credentials erased");
    }

    fn disconnect(&mut self) {
        self.0.lock().joined_at = None;
    }

    fn restart_device(&mut self) {
        println!("[system] restart");
    }
}

struct SimBroker(Shared);

impl BrokerService for SimBroker {
    fn start(&mut self, observer: Arc<dyn BrokerObserver>) -> Result<(), BrokerError> {
        println!("[broker] listening");
        let mut sim = self.0.lock();
        sim.broker = Some(observer);
        sim.client_at = Some(Instant::now() + Duration::from_secs(2));
        Ok(())
    }

    fn pump(&mut self) {
        let mut sim = self.0.lock();
        let due = sim.client_at.is_some_and(|at| Instant::now() >= at);
        if let (true, Some(observer)) = (due, sim.broker.clone()) {
            sim.client_at = None;
            observer.on_connected("sensorlogger-phone");
            observer.on_subscribe("sensorlogger-phone", "#");
            observer.on_message("accelerometer");
        }
    }
}

struct SimAdvertiser;

impl ServiceAdvertiser for SimAdvertiser {
    fn advertise(
        &mut self,
        hostname: &str,
        services: &[ServiceRecord],
    ) -> Result<(), AdvertiseError> {
        for record in services {
            println!(
                "[mdns] {hostname}.local _{}._{} port {}",
                record.service, record.protocol, record.port
            );
        }
        Ok(())
    }
}

struct SimScreen;

impl Presentation for SimScreen {
    fn log_line(&mut self, text: &str) {
        println!("[screen] {text}");
    }

    fn clear(&mut self) {}

    fn resize_log_region(&mut self, region: Region) {
        println!(
            "[screen] log area {}x{} at ({}, {})",
            region.width, region.height, region.x, region.y
        );
    }

    fn render_qr(&mut self, text: &str) {
        println!("[screen] QR code: {text}");
    }

    fn preview_frame(&mut self, _frame: &Frame) {}

    fn play_boot_tone(&mut self) {
        println!("[speaker] boot");
    }

    fn play_success_tone(&mut self) {
        println!("[speaker] success");
    }

    fn play_error_tone(&mut self) {
        println!("[speaker] error");
    }
}

struct SimControls(Shared);

impl ControlPanel for SimControls {
    fn reset_clicked(&mut self) -> bool {
        self.0
            .lock()
            .serving_since
            .is_some_and(|at| Instant::now() >= at + Duration::from_secs(2))
    }

    fn touched(&mut self) -> bool {
        false
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qrprov_lib=info")),
        )
        .init();

    let payload = env::args().nth(1).unwrap_or_else(|| DEFAULT_PAYLOAD.to_string());
    let sim = Arc::new(Mutex::new(Sim {
        payload,
        frame_shown: false,
        joined_at: None,
        broker: None,
        client_at: None,
        serving_since: None,
    }));

    let peripherals = Peripherals {
        camera: Box::new(SimCamera(Arc::clone(&sim))),
        decoder: Box::new(SimDecoder(Arc::clone(&sim))),
        connectivity: Box::new(SimStation(Arc::clone(&sim))),
        store: Box::new(MemoryStore::new()),
        broker: Box::new(SimBroker(Arc::clone(&sim))),
        advertiser: Box::new(SimAdvertiser),
        presentation: Box::new(SimScreen),
        controls: Box::new(SimControls(Arc::clone(&sim))),
    };

    let config = ProvisionerConfig::default()
        .with_settle_delays(Duration::from_millis(500), Duration::from_millis(200));
    let mut provisioner = Provisioner::boot(peripherals, config)?;

    let mut events = provisioner.events().subscribe();
    let watcher = Arc::clone(&sim);
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if event.entered_state() == Some(qrprov_lib::ProvisioningState::Servicing) {
                watcher.lock().serving_since = Some(Instant::now());
            }
            println!("[event] {} {:?}", event.at.format("%H:%M:%S%.3f"), event.kind);
        }
    });

    provisioner.run().await;

    let stats = provisioner.stats();
    println!(
        "Done: {} frame(s), {} decoded, {} mirrored retries",
        stats.frames, stats.decoded, stats.mirror_retries
    );
    Ok(())
}
