//! Injected compliance-engine capability.
//!
//! The compiled acquisition is handed to an external engine that checks
//! sessions against it. This module only defines the seam:
//!
//! - [`ComplianceService`]: trait implemented by engine bridges
//! - [`MockComplianceService`]: deterministic implementation for tests

mod mock;
mod provider;

pub use mock::MockComplianceService;
pub use provider::{ComplianceRecord, ComplianceReport, ComplianceService};
