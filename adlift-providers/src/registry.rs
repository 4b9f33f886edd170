//! Network registry.
//!
//! Static descriptors for every supported network, including the sample
//! unit IDs networks publish for test traffic. Test-ID substitution is a
//! configuration-time convenience: callers resolve the effective unit ID
//! here before constructing a lifecycle unit, the engine itself only ever
//! sees a final ID.

use std::sync::OnceLock;

use adlift_core::{AdNetwork, AdUnitConfig, Platform};

// ============================================================================
// Network Descriptor
// ============================================================================

/// Static description of one ad network.
#[derive(Debug, Clone)]
pub struct NetworkDescriptor {
    /// The network this descriptor covers.
    pub id: AdNetwork,
    /// Published sample unit ID for Android test traffic.
    pub test_unit_android: Option<&'static str>,
    /// Published sample unit ID for iOS test traffic.
    pub test_unit_ios: Option<&'static str>,
}

impl NetworkDescriptor {
    /// Returns the network's display name.
    pub fn display_name(&self) -> &'static str {
        self.id.display_name()
    }

    /// Returns the sample unit ID for a platform, if the network
    /// publishes one.
    pub fn test_unit_id(&self, platform: Platform) -> Option<&'static str> {
        match platform {
            Platform::Android => self.test_unit_android,
            Platform::Ios => self.test_unit_ios,
        }
    }
}

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all network descriptors.
static DESCRIPTORS: OnceLock<Vec<NetworkDescriptor>> = OnceLock::new();

fn init_descriptors() -> Vec<NetworkDescriptor> {
    vec![
        NetworkDescriptor {
            id: AdNetwork::Admob,
            // Google's published native-overlay sample units.
            test_unit_android: Some("ca-app-pub-3940256099942544/2247696110"),
            test_unit_ios: Some("ca-app-pub-3940256099942544/3986624511"),
        },
        NetworkDescriptor {
            id: AdNetwork::AppLovin,
            test_unit_android: None,
            test_unit_ios: None,
        },
        NetworkDescriptor {
            id: AdNetwork::IronSource,
            test_unit_android: None,
            test_unit_ios: None,
        },
        NetworkDescriptor {
            id: AdNetwork::Simulated,
            test_unit_android: Some("sim-test-unit"),
            test_unit_ios: Some("sim-test-unit"),
        },
    ]
}

// ============================================================================
// Network Registry
// ============================================================================

/// Global registry of network descriptors, initialized lazily.
pub struct NetworkRegistry;

impl NetworkRegistry {
    /// Returns all network descriptors.
    pub fn all() -> &'static [NetworkDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a descriptor by network kind.
    pub fn get(id: AdNetwork) -> Option<&'static NetworkDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Looks up a network by CLI name.
    pub fn get_by_cli_name(name: &str) -> Option<&'static NetworkDescriptor> {
        Self::all().iter().find(|d| d.id.cli_name() == name)
    }

    /// Substitutes the platform sample unit ID into a test-mode config.
    ///
    /// Leaves the config untouched when test mode is off or the network
    /// publishes no sample unit for the platform.
    pub fn apply_test_id(config: &mut AdUnitConfig, network: AdNetwork, platform: Platform) {
        if !config.test_mode {
            return;
        }
        if let Some(test_id) = Self::get(network).and_then(|d| d.test_unit_id(platform)) {
            config.id = test_id.to_string();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
