//! Built-in generators.
//!
//! These cover the stock operator-facing artifacts: DHCP host maps
//! (`dnsmasq`, `dhcpd`), console-manager entries (`conman`), and
//! warewulf-style node provisioning (`warewulf`). `hostfile`, `syslog` and
//! `powerman` are registered stubs that fail with a clear message until
//! implemented, and `example` is a no-op used by tests.

mod conman;
mod dhcpd;
mod dnsmasq;
mod example;
mod stubs;
mod warewulf;

pub use conman::Conman;
pub use dhcpd::Dhcpd;
pub use dnsmasq::Dnsmasq;
pub use example::Example;
pub use stubs::{Hostfile, Powerman, Syslog};
pub use warewulf::Warewulf;

use super::Generator;
use std::sync::Arc;

/// All built-in generators, in registration order.
#[must_use]
pub fn all() -> Vec<Arc<dyn Generator>> {
    vec![
        Arc::new(Conman),
        Arc::new(Dhcpd),
        Arc::new(Dnsmasq),
        Arc::new(Example),
        Arc::new(Hostfile),
        Arc::new(Powerman),
        Arc::new(Syslog),
        Arc::new(Warewulf),
    ]
}

/// Banner framing generated blocks so operators can tell generated content
/// from hand-maintained files.
pub(crate) const GENERATED_HEADER: &str =
    "# ========== DYNAMICALLY GENERATED BY CONFGEN ==========\n";
pub(crate) const GENERATED_FOOTER: &str =
    "# ======================================================";
