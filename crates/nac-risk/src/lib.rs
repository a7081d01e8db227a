//! NAC Risk: security risk and compliance coverage
//!
//! ```text
//! VendorProfile ──────────────────────────→ RiskScorer ───────→ RiskScore
//! (VendorProfile, frameworks, catalog) ───→ ComplianceScorer ─→ ComplianceScore
//! ```
//!
//! # Example
//!
//! ```
//! use nac_core::{RiskLevel, VendorProfile};
//! use nac_risk::calculate_risk;
//!
//! let mut vendor = VendorProfile::new("acme", "Acme NAC").with_zero_trust(90.0);
//! vendor.features.security.ai_threat_detection = true;
//!
//! let risk = calculate_risk(&vendor);
//! assert_eq!(risk.level, RiskLevel::Low);
//! ```

pub mod compliance;
pub mod risk;

pub use compliance::{calculate_compliance, ComplianceScorer};
pub use risk::{calculate_risk, mttr_risk, threat_detection_risk, RiskScorer, RiskWeights};
