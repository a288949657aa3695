use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ClientMessage {
    Ping { ts: u64 },
    Command { cmd: Command },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "cmd")]
pub enum Command {
    Spin,
    ResetRotation,
    /// Raw comma-separated option text, as typed by the user.
    SetLabels {
        text: String,
    },
    /// Already parsed options.
    SetOptions {
        labels: Vec<String>,
    },
    Shuffle,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    AssignId { id: String },
    Frame { frame: WheelFrame },
    Result { result: SpinResult },
    Rejected { reason: RejectReason },
    Pong { ts: u64 },
}

/// Everything a renderer needs to draw one frame of the wheel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WheelFrame {
    pub labels: Vec<String>,
    /// Radians.
    pub rotation: f64,
    pub spinning: bool,
    /// Slice layout at `rotation`, one entry per label.
    pub slices: Vec<SliceView>,
}

/// Geometry of one slice at a given wheel rotation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SliceView {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub center_angle: f64,
    /// Where the label sits, relative to the wheel center, in units of the
    /// wheel radius.
    pub label_anchor: [f64; 2],
    pub display_label: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpinResult {
    pub index: usize,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    EmptyWheel,
    SpinAlreadyInProgress,
}
