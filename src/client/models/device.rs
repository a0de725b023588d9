//! Push device registration models

use serde::Serialize;

/// Mobile platform of a push token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlatform {
    Android,
    Ios,
}

/// Body of `POST /notificaciones/device`
#[derive(Debug, Clone, Serialize)]
pub struct DeviceRegistration {
    #[serde(rename = "expoPushToken")]
    pub push_token: String,

    pub platform: DevicePlatform,
}
