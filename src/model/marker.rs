use crate::foundation::core::Frame;

/// A named point or span on a layer's timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Marker {
    pub start_time: Frame,
    pub duration: Frame,
    pub comment: String,
}
