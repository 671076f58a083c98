//! Serial port friendly-name resolution
//!
//! Port pickers should show `FT232R USB UART` rather than a bare
//! `/dev/ttyUSB0`. This module resolves a platform port identifier to a
//! human-readable name through a small capability trait, with a
//! platform-backed implementation and a trivial pass-through. Resolution
//! never fails: whatever goes wrong, the caller gets a displayable string.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Shown when port enumeration itself fails
pub const UNKNOWN_PORT_NAME: &str = "Unknown Port Name";

/// Capability resolving a port identifier to a display name
pub trait PortNameResolver: Send + Sync {
    /// Human-readable name for `port`
    ///
    /// Always returns something displayable, falling back to the
    /// identifier itself or [`UNKNOWN_PORT_NAME`].
    fn friendly_name(&self, port: &str) -> String;
}

/// Resolver kind selected by the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NameResolverKind {
    /// Ask the platform for device names
    #[default]
    System,
    /// Echo the identifier back unchanged
    Passthrough,
}

/// Platform-backed resolver using serial port enumeration
///
/// A port that enumerates as USB resolves to its product string. A port
/// that enumerates without one (PCI, Bluetooth, platform UART) keeps its
/// identifier. When enumeration itself fails the resolver returns
/// [`UNKNOWN_PORT_NAME`] so the picker stays usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPortNameResolver;

impl PortNameResolver for SystemPortNameResolver {
    fn friendly_name(&self, port: &str) -> String {
        match tokio_serial::available_ports() {
            Ok(ports) => {
                for info in ports {
                    if info.port_name != port {
                        continue;
                    }
                    if let tokio_serial::SerialPortType::UsbPort(usb) = info.port_type {
                        if let Some(product) = usb.product {
                            debug!("Resolved port {} to '{}'", port, product);
                            return product;
                        }
                    }
                    // Enumerated, but the platform has no name for it
                    break;
                }
                port.to_string()
            }
            Err(e) => {
                warn!("Serial port enumeration failed: {}", e);
                UNKNOWN_PORT_NAME.to_string()
            }
        }
    }
}

/// Pass-through resolver: the identifier is its own name
///
/// Used on hosts without enumeration support and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughNameResolver;

impl PortNameResolver for PassthroughNameResolver {
    fn friendly_name(&self, port: &str) -> String {
        port.to_string()
    }
}

/// Build the resolver for the requested kind
pub fn resolver_for(kind: NameResolverKind) -> Box<dyn PortNameResolver> {
    match kind {
        NameResolverKind::System => Box::new(SystemPortNameResolver),
        NameResolverKind::Passthrough => Box::new(PassthroughNameResolver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        let resolver = PassthroughNameResolver;
        assert_eq!(resolver.friendly_name("/dev/ttyUSB0"), "/dev/ttyUSB0");
        assert_eq!(resolver.friendly_name("COM3"), "COM3");
    }

    #[test]
    fn test_system_resolver_never_fails() {
        // The identifier cannot correspond to a real port, so the result
        // is either the echoed identifier or the enumeration-failure
        // sentinel depending on the host.
        let resolver = SystemPortNameResolver;
        let name = resolver.friendly_name("sercon-no-such-port");
        assert!(name == "sercon-no-such-port" || name == UNKNOWN_PORT_NAME);
    }

    #[test]
    fn test_resolver_kind_default() {
        assert_eq!(NameResolverKind::default(), NameResolverKind::System);
    }

    #[test]
    fn test_resolver_factory() {
        let system = resolver_for(NameResolverKind::System);
        let name = system.friendly_name("sercon-no-such-port");
        assert!(!name.is_empty());

        let passthrough = resolver_for(NameResolverKind::Passthrough);
        assert_eq!(passthrough.friendly_name("COM9"), "COM9");
    }

    #[test]
    fn test_resolver_kind_serde() {
        let kind: NameResolverKind = serde_yaml::from_str("passthrough").unwrap();
        assert_eq!(kind, NameResolverKind::Passthrough);
        assert_eq!(serde_yaml::to_string(&NameResolverKind::System).unwrap().trim(), "system");
    }
}
