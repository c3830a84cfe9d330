//! Frames the relay itself produces, and connect parameters.
//!
//! Everything else on the socket is forwarded untouched.

use serde::{Deserialize, Serialize};

/// Control frames sent by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlFrame {
    #[serde(rename = "userCount")]
    UserCount {
        count: usize,
        #[serde(rename = "ImNew")]
        im_new: bool,
    },
}

impl ControlFrame {
    pub fn user_count(count: usize, im_new: bool) -> Self {
        ControlFrame::UserCount { count, im_new }
    }

    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Query parameters of `/ws`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectParams {
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
}

impl ConnectParams {
    /// The requested room, if one was given and it is not blank.
    pub fn room(&self) -> Option<&str> {
        self.room_id.as_deref().filter(|r| !r.trim().is_empty())
    }
}
