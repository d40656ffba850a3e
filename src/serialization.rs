//! Saving and loading simulator sessions and exported traces.
//!
//! A session file holds a [`SimulationConfig`](crate::config::SimulationConfig):
//! pathology, parameter store with its per-lead overrides, display layout
//! and noise seed. Redraw results and lead strips can be exported the same
//! way. Any serde type picks up [`Serializable`] through a blanket impl.
//!
//! # Session file formats
//!
//! - **Binary** (bincode): any extension other than `.json`
//! - **JSON** (serde_json): `.json`, hand-editable; missing fields take
//!   their defaults
//!
//! # Example
//!
//! ```rust
//! use ekgsim::prelude::*;
//!
//! let store = ParameterStore::new()
//!     .set_param(Param::StElevation, 40.0, LeadSelection::Lead(LeadId::V2));
//!
//! let json = store.to_json().unwrap();
//! let restored = ParameterStore::from_json(&json).unwrap();
//! assert_eq!(restored, store);
//!
//! let bytes = store.to_bytes(SerializableFormat::Binary).unwrap();
//! let restored = ParameterStore::from_bytes(&bytes, SerializableFormat::Binary).unwrap();
//! assert_eq!(restored, store);
//! ```

use crate::error::{EkgError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// On-disk encoding of a session or trace file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializableFormat {
    /// bincode encoding, used unless the file name ends in `.json`.
    #[default]
    Binary,

    /// Pretty-printed JSON, for hand-written sessions and trace export.
    Json,
}

impl std::fmt::Display for SerializableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializableFormat::Binary => write!(f, "BINARY"),
            SerializableFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for SerializableFormat {
    type Err = EkgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "BINARY" | "BIN" => Ok(SerializableFormat::Binary),
            "JSON" => Ok(SerializableFormat::Json),
            _ => Err(EkgError::InvalidParameter {
                name: "format",
                message: format!("Unknown format '{}'. Expected: BINARY, JSON", s),
            }),
        }
    }
}

fn serialization_error(context: &str, e: impl std::fmt::Display) -> EkgError {
    EkgError::SerializationError {
        message: format!("{context} failed: {e}"),
    }
}

/// Save and load for session state and rendered traces.
pub trait Serializable: Serialize + DeserializeOwned + Sized {
    /// Serializes to a byte vector.
    fn to_bytes(&self, format: SerializableFormat) -> Result<Vec<u8>> {
        match format {
            SerializableFormat::Binary => bincode::serialize(self)
                .map_err(|e| serialization_error("Binary serialization", e)),
            SerializableFormat::Json => serde_json::to_vec_pretty(self)
                .map_err(|e| serialization_error("JSON serialization", e)),
        }
    }

    /// Deserializes from a byte slice.
    fn from_bytes(bytes: &[u8], format: SerializableFormat) -> Result<Self> {
        match format {
            SerializableFormat::Binary => bincode::deserialize(bytes)
                .map_err(|e| serialization_error("Binary deserialization", e)),
            SerializableFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| serialization_error("JSON deserialization", e)),
        }
    }

    /// Serializes to a JSON string.
    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| serialization_error("JSON serialization", e))
    }

    /// Deserializes from a JSON string.
    fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| serialization_error("JSON deserialization", e))
    }

    /// Serializes to a writer.
    fn save<W: Write>(&self, writer: W, format: SerializableFormat) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        match format {
            SerializableFormat::Binary => bincode::serialize_into(&mut writer, self)
                .map_err(|e| serialization_error("Binary serialization", e))?,
            SerializableFormat::Json => serde_json::to_writer_pretty(&mut writer, self)
                .map_err(|e| serialization_error("JSON serialization", e))?,
        }
        writer.flush().map_err(|e| EkgError::IoError {
            message: format!("Failed to flush writer: {}", e),
        })
    }

    /// Deserializes from a reader.
    fn load<R: Read>(reader: R, format: SerializableFormat) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        match format {
            SerializableFormat::Binary => bincode::deserialize_from(&mut reader)
                .map_err(|e| serialization_error("Binary deserialization", e)),
            SerializableFormat::Json => serde_json::from_reader(&mut reader)
                .map_err(|e| serialization_error("JSON deserialization", e)),
        }
    }

    /// Saves to a file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P, format: SerializableFormat) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(|e| EkgError::IoError {
            message: format!("Failed to create file: {}", e),
        })?;
        self.save(file, format)
    }

    /// Loads from a file.
    fn load_from_file<P: AsRef<Path>>(path: P, format: SerializableFormat) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| EkgError::IoError {
            message: format!("Failed to open file: {}", e),
        })?;
        Self::load(file, format)
    }

    /// Saves to a file, inferring format from the file extension.
    ///
    /// - `.json` -> JSON format
    /// - All other extensions -> Binary format
    fn save_to_file_auto<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let format = infer_format_from_path(path.as_ref());
        self.save_to_file(path, format)
    }

    /// Loads from a file, inferring format from the file extension.
    ///
    /// - `.json` -> JSON format
    /// - All other extensions -> Binary format
    fn load_from_file_auto<P: AsRef<Path>>(path: P) -> Result<Self> {
        let format = infer_format_from_path(path.as_ref());
        Self::load_from_file(path, format)
    }
}

/// Every serde type, from a single [`ParameterStore`](crate::store::ParameterStore)
/// to a full [`Redraw`](crate::render::Redraw), is serializable.
impl<T> Serializable for T where T: Serialize + DeserializeOwned + Sized {}

/// Picks the session file format from the extension: `.json` is JSON,
/// anything else is binary.
pub fn infer_format_from_path(path: &Path) -> SerializableFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => SerializableFormat::Json,
        _ => SerializableFormat::Binary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NullNoise;
    use crate::render::{DisplayLayout, Redraw, Simulator};
    use crate::store::ParameterStore;
    use crate::types::{LeadId, LeadSelection, Param, Pathology};

    #[test]
    fn test_format_parsing() {
        assert_eq!(
            "BINARY".parse::<SerializableFormat>().unwrap(),
            SerializableFormat::Binary
        );
        assert_eq!(
            "json".parse::<SerializableFormat>().unwrap(),
            SerializableFormat::Json
        );
        assert!("csv".parse::<SerializableFormat>().is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(SerializableFormat::Binary.to_string(), "BINARY");
        assert_eq!(SerializableFormat::Json.to_string(), "JSON");
    }

    #[test]
    fn test_store_binary_serialization() {
        let store = ParameterStore::from_preset(Pathology::Hyperkalemia)
            .set_param(Param::TWaveAmp, 180.0, LeadSelection::Lead(LeadId::V3));

        let bytes = store.to_bytes(SerializableFormat::Binary).unwrap();
        assert!(!bytes.is_empty());

        let restored = ParameterStore::from_bytes(&bytes, SerializableFormat::Binary).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn test_store_json_uses_readable_keys() {
        let store = ParameterStore::new()
            .set_param(Param::StElevation, 35.0, LeadSelection::Lead(LeadId::AVF));

        let json = store.to_json().unwrap();
        assert!(json.contains("\"aVF\""));
        assert!(json.contains("st_elevation"));

        let restored = ParameterStore::from_json(&json).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn test_redraw_save_and_load() {
        let mut sim = Simulator::new(NullNoise);
        sim.select_pathology(Pathology::Rbbb);
        let layout = DisplayLayout {
            strip_samples: 20,
            rhythm_samples: 40,
            ..DisplayLayout::default()
        };
        let redraw = sim.redraw(&layout);

        let mut buffer = Vec::new();
        redraw.save(&mut buffer, SerializableFormat::Json).unwrap();
        let restored = Redraw::load(buffer.as_slice(), SerializableFormat::Json).unwrap();
        assert_eq!(restored.strips.len(), 12);
        assert_eq!(restored.header, redraw.header);
    }

    #[test]
    fn test_malformed_input_is_error() {
        let err = ParameterStore::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EkgError::SerializationError { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ParameterStore::load_from_file_auto("/nonexistent/ekgsim/store.json").unwrap_err();
        assert!(matches!(err, EkgError::IoError { .. }));
    }

    #[test]
    fn test_infer_format() {
        assert_eq!(
            infer_format_from_path(Path::new("session.json")),
            SerializableFormat::Json
        );
        assert_eq!(
            infer_format_from_path(Path::new("session.bin")),
            SerializableFormat::Binary
        );
        assert_eq!(
            infer_format_from_path(Path::new("session")),
            SerializableFormat::Binary
        );
        assert_eq!(
            infer_format_from_path(Path::new("path/to/session.JSON")),
            SerializableFormat::Binary // case-sensitive
        );
    }
}
