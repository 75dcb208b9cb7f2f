//! Core domain types for the deploytrack deployment registry.
//!
//! This crate contains:
//! - Deployment identifiers
//! - The deployment record and its request shape
//! - Webhook event parsing for GitHub deployment notifications

pub mod deployment;
pub mod error;
pub mod id;
pub mod webhook;

pub use deployment::{Deployment, DeploymentInput};
pub use error::{Error, Result};
pub use id::DeploymentId;
pub use webhook::WebhookEvent;
