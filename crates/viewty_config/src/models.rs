// --- File: crates/viewty_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. DATABASE_URL loaded via APP_DATABASE__URL or DATABASE_URL
}

// --- Scheduling Config ---
// Knobs for the slot grid and the booking horizon. All times are naive
// agent-local values; no timezone database is consulted.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulingConfig {
    /// Length of every offered slot, in minutes.
    #[serde(default = "default_slot_duration_minutes")]
    pub slot_duration_minutes: u16,
    /// How far into the future a visit may be booked, in days from "today".
    #[serde(default = "default_booking_horizon_days")]
    pub booking_horizon_days: u16,
}

fn default_slot_duration_minutes() -> u16 {
    30
}

fn default_booking_horizon_days() -> u16 {
    60
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            slot_duration_minutes: default_slot_duration_minutes(),
            booking_horizon_days: default_booking_horizon_days(),
        }
    }
}

impl SchedulingConfig {
    /// Slot length as a chrono duration.
    pub fn slot_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.slot_duration_minutes))
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>, // Central DB config

    #[serde(default)]
    pub scheduling: SchedulingConfig,
}
