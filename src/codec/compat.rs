//! Writer-side compatibility gating.
//!
//! A gate caps the tag codes an encoder may emit so that older players can read the output.
//! Decoding never consults a gate.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::codec::tag_code::TagCode;
use crate::foundation::error::{PagError, PagResult};

/// Newest tag a conservative build may emit.
pub const STABLE_LEVEL: TagCode = TagCode::TextWigglySelector;

/// File format version written by default, and the newest one accepted when reading.
pub const CURRENT_VERSION: u8 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    Stable,
    #[default]
    Beta,
    Custom,
}

/// Resolved gate: the numeric level alone decides which tags pass.
///
/// Serialized as its [`GateConfig`], so a deserialized gate is always a valid one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "GateConfig", into = "GateConfig")]
pub struct CompatibilityGate {
    mode: GateMode,
    level: u16,
}

impl Default for CompatibilityGate {
    fn default() -> Self {
        Self::beta()
    }
}

impl CompatibilityGate {
    pub fn stable() -> Self {
        Self {
            mode: GateMode::Stable,
            level: STABLE_LEVEL.ordinal(),
        }
    }

    /// Everything this build knows how to write.
    pub fn beta() -> Self {
        Self {
            mode: GateMode::Beta,
            level: TagCode::MAX.ordinal(),
        }
    }

    pub fn custom(level: u16) -> PagResult<Self> {
        if level == 0 {
            return Err(PagError::validation(
                "custom compatibility level must be at least 1",
            ));
        }
        Ok(Self {
            mode: GateMode::Custom,
            level,
        })
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn is_tag_code_supported(&self, code: TagCode) -> bool {
        self.level >= code.ordinal()
    }

    /// Like [`CompatibilityGate::is_tag_code_supported`], logging tags that are held back.
    pub fn admit(&self, code: TagCode) -> bool {
        let supported = self.is_tag_code_supported(code);
        if !supported {
            tracing::debug!(tag = %code, level = self.level, "tag withheld by compatibility gate");
        }
        supported
    }

    /// First code of `preference` (newest first) that the gate admits.
    pub fn select(&self, preference: &[TagCode]) -> Option<TagCode> {
        preference
            .iter()
            .copied()
            .find(|&code| self.is_tag_code_supported(code))
            .or_else(|| {
                if let Some(first) = preference.first() {
                    tracing::debug!(
                        tag = %first,
                        level = self.level,
                        "no variant admitted by compatibility gate"
                    );
                }
                None
            })
    }
}

/// User-facing gate configuration, resolved into a [`CompatibilityGate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    pub mode: GateMode,
    /// Required for `custom`, ignored by the presets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u16>,
}

impl GateConfig {
    pub fn resolve(&self) -> PagResult<CompatibilityGate> {
        match (self.mode, self.level) {
            (GateMode::Stable, _) => Ok(CompatibilityGate::stable()),
            (GateMode::Beta, _) => Ok(CompatibilityGate::beta()),
            (GateMode::Custom, Some(level)) => CompatibilityGate::custom(level),
            (GateMode::Custom, None) => Err(PagError::validation(
                "custom compatibility mode requires a level",
            )),
        }
    }
}

impl From<CompatibilityGate> for GateConfig {
    fn from(gate: CompatibilityGate) -> Self {
        Self {
            mode: gate.mode,
            level: (gate.mode == GateMode::Custom).then_some(gate.level),
        }
    }
}

impl TryFrom<GateConfig> for CompatibilityGate {
    type Error = PagError;

    fn try_from(config: GateConfig) -> PagResult<Self> {
        config.resolve()
    }
}

/// Options for encoding a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeOptions {
    pub gate: GateConfig,
    /// Format version written to the file header.
    pub version: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            gate: GateConfig::default(),
            version: CURRENT_VERSION,
        }
    }
}

impl EncodeOptions {
    /// Parse options from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PagResult<Self> {
        let options: Self = serde_json::from_reader(r)
            .map_err(|e| PagError::serde(format!("parse encode options JSON: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PagResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PagError::validation(format!("open encode options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> PagResult<()> {
        if self.version == 0 || self.version > CURRENT_VERSION {
            return Err(PagError::validation(format!(
                "file version {} is not in 1..={CURRENT_VERSION}",
                self.version
            )));
        }
        self.gate.resolve().map(|_| ())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/compat.rs"]
mod tests;
