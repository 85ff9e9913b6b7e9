//! HTTP client for the upstream campaign API.
//!
//! One attempt per call, no retry; callers that must always render use
//! [`CampaignClient::load_campaigns_or_empty`].

pub mod client;

pub use client::CampaignClient;
