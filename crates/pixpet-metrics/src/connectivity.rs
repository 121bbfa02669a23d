//! Best-effort "are we online" signal.
//!
//! Two strategies are offered. Interface enumeration asks `sysinfo` whether
//! any non-loopback interface holds a routable address; it is instant and
//! never touches the network. The reachability probe opens a TCP connection
//! to a well-known host on a worker thread so the loop never waits on DNS or
//! a slow handshake.
use std::net::{IpAddr, TcpStream, ToSocketAddrs};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use pixpet_config::{ConnectivityMode, TelemetryConfig};
use sysinfo::Networks;

pub enum Connectivity {
    Interfaces,
    Probe(ReachabilityProbe),
    #[cfg(test)]
    Fixed(bool),
}

impl Connectivity {
    pub fn from_config(config: &TelemetryConfig) -> Self {
        match config.connectivity {
            ConnectivityMode::Interfaces => Connectivity::Interfaces,
            ConnectivityMode::Probe => Connectivity::Probe(ReachabilityProbe::start(
                config.probe_addr.clone(),
                config.probe_timeout(),
            )),
        }
    }

    pub fn is_connected(&mut self) -> bool {
        match self {
            Connectivity::Interfaces => interfaces_connected(),
            Connectivity::Probe(probe) => probe.is_connected(),
            #[cfg(test)]
            Connectivity::Fixed(value) => *value,
        }
    }
}

fn interfaces_connected() -> bool {
    let networks = Networks::new_with_refreshed_list();
    let online = has_routable_interface(networks.list().iter().map(|(name, data)| {
        let addrs: Vec<IpAddr> = data.ip_networks().iter().map(|net| net.addr).collect();
        (name.clone(), addrs)
    }));
    tracing::debug!(interfaces = networks.list().len(), online, "interface scan");
    online
}

/// `true` when some non-loopback interface carries a routable address.
fn has_routable_interface<I>(interfaces: I) -> bool
where
    I: IntoIterator<Item = (String, Vec<IpAddr>)>,
{
    interfaces
        .into_iter()
        .filter(|(name, _)| !is_loopback_name(name))
        .any(|(_, addrs)| addrs.iter().any(is_routable))
}

fn is_loopback_name(name: &str) -> bool {
    name == "lo" || name.starts_with("lo0") || name.eq_ignore_ascii_case("loopback")
}

fn is_routable(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => !(v4.is_loopback() || v4.is_unspecified() || v4.is_link_local()),
        // fe80::/10 is configured on every interface that is merely up.
        IpAddr::V6(v6) => {
            !(v6.is_loopback() || v6.is_unspecified() || (v6.segments()[0] & 0xffc0) == 0xfe80)
        }
    }
}

/// TCP reachability check run off the loop thread.
///
/// At most one probe is in flight. [`is_connected`](Self::is_connected)
/// collects a finished result without blocking and re-arms the next probe,
/// so each reading is at most one refresh old. Until the first probe
/// finishes the host reads as offline.
pub struct ReachabilityProbe {
    addr: String,
    timeout: Duration,
    last_known: Option<bool>,
    pending: Option<Receiver<bool>>,
}

impl ReachabilityProbe {
    /// Create the probe and launch the first check immediately.
    pub fn start(addr: String, timeout: Duration) -> Self {
        let mut probe = Self {
            addr,
            timeout,
            last_known: None,
            pending: None,
        };
        probe.arm();
        probe
    }

    fn arm(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(spawn_probe(self.addr.clone(), self.timeout));
        }
    }

    fn collect(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => None,
        };
        self.pending = None;
        if let Some(value) = result {
            self.last_known = Some(value);
        }
    }

    /// Latest known reachability; `false` until a probe has completed.
    pub fn is_connected(&mut self) -> bool {
        self.collect();
        self.arm();
        self.last_known.unwrap_or(false)
    }
}

fn spawn_probe(addr: String, timeout: Duration) -> Receiver<bool> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let reachable = probe_once(&addr, timeout);
        tracing::debug!(addr = %addr, reachable, "reachability probe finished");
        let _ = tx.send(reachable);
    });
    rx
}

fn probe_once(addr: &str, timeout: Duration) -> bool {
    let candidates = match addr.to_socket_addrs() {
        Ok(candidates) => candidates,
        Err(err) => {
            tracing::debug!(addr, error = %err, "probe address did not resolve");
            return false;
        }
    };
    candidates
        .into_iter()
        .any(|sock| TcpStream::connect_timeout(&sock, timeout).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr, TcpListener};
    use std::time::Instant;

    /// Poll until the first probe lands, like the loop does once per refresh.
    fn settle(probe: &mut ReachabilityProbe) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while probe.last_known.is_none() && Instant::now() < deadline {
            probe.is_connected();
            thread::sleep(Duration::from_millis(10));
        }
        probe.is_connected()
    }

    fn iface(name: &str, addrs: &[IpAddr]) -> (String, Vec<IpAddr>) {
        (name.to_string(), addrs.to_vec())
    }

    #[test]
    fn loopback_only_host_is_offline() {
        let ifaces = vec![iface("lo", &[IpAddr::V4(Ipv4Addr::LOCALHOST)])];
        assert!(!has_routable_interface(ifaces));
    }

    #[test]
    fn lan_address_counts_as_online() {
        let ifaces = vec![
            iface("lo", &[IpAddr::V4(Ipv4Addr::LOCALHOST)]),
            iface("eth0", &[IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20))]),
        ];
        assert!(has_routable_interface(ifaces));
    }

    #[test]
    fn link_local_only_interface_is_offline() {
        let ifaces = vec![
            iface("wlan0", &[IpAddr::V6("fe80::1".parse::<Ipv6Addr>().unwrap())]),
            iface("eth0", &[IpAddr::V4(Ipv4Addr::new(169, 254, 3, 4))]),
            iface("eth1", &[]),
        ];
        assert!(!has_routable_interface(ifaces));
    }

    #[test]
    fn global_ipv6_counts_as_online() {
        let ifaces = vec![iface(
            "eth0",
            &[IpAddr::V6("2001:db8::5".parse::<Ipv6Addr>().unwrap())],
        )];
        assert!(has_routable_interface(ifaces));
    }

    #[test]
    fn probe_reaches_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let mut probe = ReachabilityProbe::start(addr, Duration::from_millis(500));
        assert!(settle(&mut probe));
    }

    #[test]
    fn probe_to_closed_port_is_offline() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().to_string()
        };
        let mut probe = ReachabilityProbe::start(addr, Duration::from_millis(500));
        assert!(!settle(&mut probe));
    }

    #[test]
    fn pending_probe_never_blocks_the_caller() {
        // Non-routable address: the connect either hangs until the timeout or
        // fails fast; the caller must not wait in either case.
        let mut probe =
            ReachabilityProbe::start("10.255.255.1:80".to_string(), Duration::from_secs(3));
        let started = Instant::now();
        for _ in 0..5 {
            if probe.last_known.is_none() {
                assert!(!probe.is_connected());
            }
        }
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn pending_receiver_is_kept_until_it_reports() {
        let (tx, rx) = mpsc::channel();
        let mut probe = ReachabilityProbe {
            addr: "unused:1".to_string(),
            timeout: Duration::from_millis(10),
            last_known: None,
            pending: Some(rx),
        };
        assert!(!probe.is_connected());
        assert!(probe.pending.is_some());

        tx.send(true).unwrap();
        assert!(probe.is_connected());
        assert_eq!(probe.last_known, Some(true));
    }

    #[test]
    fn unresolvable_probe_address_is_offline() {
        assert!(!probe_once("not a host", Duration::from_millis(100)));
    }

    #[test]
    fn fixed_connectivity_reports_its_value() {
        assert!(Connectivity::Fixed(true).is_connected());
        assert!(!Connectivity::Fixed(false).is_connected());
    }
}
