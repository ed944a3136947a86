//! Blueprint loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable blueprint files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Auto-detects format by checking for valid RON start
//! - Writing: Always uses brotli compression

use std::fs;
use std::io::Cursor;
use std::path::Path;

use super::blueprint::{validate_blueprint, Blueprint};

/// Error type for blueprint loading
#[derive(Debug)]
pub enum BlueprintError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for BlueprintError {
    fn from(e: std::io::Error) -> Self {
        BlueprintError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for BlueprintError {
    fn from(e: ron::error::SpannedError) -> Self {
        BlueprintError::ParseError(e)
    }
}

impl From<ron::Error> for BlueprintError {
    fn from(e: ron::Error) -> Self {
        BlueprintError::SerializeError(e)
    }
}

impl std::fmt::Display for BlueprintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlueprintError::IoError(e) => write!(f, "IO error: {}", e),
            BlueprintError::ParseError(e) => write!(f, "Parse error: {}", e),
            BlueprintError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            BlueprintError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

/// Decode file bytes into RON text, decompressing when the content is not
/// plain RON. RON files start with '(' or whitespace; brotli is binary.
fn decode_bytes(bytes: &[u8]) -> Result<String, BlueprintError> {
    let is_plain_ron = bytes
        .first()
        .map(|&b| b == b'(' || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t')
        .unwrap_or(false);

    if is_plain_ron {
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            BlueprintError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8: {}", e),
            ))
        })
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(bytes), &mut decompressed).map_err(|e| {
            BlueprintError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("brotli decompression failed: {}", e),
            ))
        })?;
        String::from_utf8(decompressed).map_err(|e| {
            BlueprintError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8 after decompression: {}", e),
            ))
        })
    }
}

/// Load a blueprint from a RON file (supports both compressed and
/// uncompressed)
pub fn load_blueprint<P: AsRef<Path>>(path: P) -> Result<Blueprint, BlueprintError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let contents = decode_bytes(&bytes)?;

    let blueprint: Blueprint = match ron::from_str(&contents) {
        Ok(bp) => bp,
        Err(e) => {
            eprintln!("RON parse error in {}: {}", path.display(), e);
            return Err(e.into());
        }
    };

    // Reject malformed content before it reaches the mesh builder
    validate_blueprint(&blueprint).map_err(BlueprintError::ValidationError)?;

    Ok(blueprint)
}

/// Load a blueprint from a RON string (for embedded samples or testing)
pub fn load_blueprint_from_str(s: &str) -> Result<Blueprint, BlueprintError> {
    let blueprint: Blueprint = ron::from_str(s)?;
    validate_blueprint(&blueprint).map_err(BlueprintError::ValidationError)?;
    Ok(blueprint)
}

/// Save a blueprint to a compressed RON file (brotli)
pub fn save_blueprint<P: AsRef<Path>>(
    blueprint: &Blueprint,
    path: P,
) -> Result<(), BlueprintError> {
    let data = serialize_blueprint(blueprint)?;
    fs::write(path, data)?;
    Ok(())
}

/// Serialize a blueprint to compressed bytes
pub fn serialize_blueprint(blueprint: &Blueprint) -> Result<Vec<u8>, BlueprintError> {
    validate_blueprint(blueprint).map_err(BlueprintError::ValidationError)?;

    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());
    let ron_string = ron::ser::to_string_pretty(blueprint, config)?;

    // quality 6, window 22 - good balance of speed/ratio
    let mut compressed = Vec::new();
    brotli::BrotliCompress(
        &mut Cursor::new(ron_string.as_bytes()),
        &mut compressed,
        &brotli::enc::BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        },
    )
    .map_err(|e| {
        BlueprintError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("brotli compression failed: {}", e),
        ))
    })?;

    Ok(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::samples;

    #[test]
    fn test_compressed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courtyard.ron");

        let original = samples::courtyard();
        save_blueprint(&original, &path).unwrap();
        let loaded = load_blueprint(&path).unwrap();

        assert_eq!(loaded.contour, original.contour);
        assert_eq!(loaded.hole, original.hole);
        assert_eq!(loaded.walls, original.walls);
        assert_eq!(loaded.floor_material, original.floor_material);
        assert!((loaded.ceiling_height - original.ceiling_height).abs() < 0.001);
    }

    #[test]
    fn test_plain_ron_auto_detected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.ron");

        let ron_string = ron::ser::to_string_pretty(
            &samples::square_room(),
            ron::ser::PrettyConfig::new(),
        )
        .unwrap();
        std::fs::write(&path, &ron_string).unwrap();

        let loaded = load_blueprint(&path).unwrap();
        assert_eq!(loaded.contour.len(), 4);
        assert_eq!(loaded.walls.len(), 4);
    }

    #[test]
    fn test_malformed_blueprint_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ron");

        let mut bad = samples::square_room();
        bad.floor_height = 10.0; // Above the ceiling
        let ron_string =
            ron::ser::to_string_pretty(&bad, ron::ser::PrettyConfig::new()).unwrap();
        std::fs::write(&path, &ron_string).unwrap();

        match load_blueprint(&path) {
            Err(BlueprintError::ValidationError(msg)) => {
                assert!(msg.contains("not below ceiling"))
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.ron");
        std::fs::write(&path, [0xFFu8, 0x00, 0x12, 0x34]).unwrap();
        assert!(load_blueprint(&path).is_err());
    }

    #[test]
    fn test_load_from_str() {
        let ron_string =
            ron::ser::to_string_pretty(&samples::courtyard(), ron::ser::PrettyConfig::new())
                .unwrap();
        let loaded = load_blueprint_from_str(&ron_string).unwrap();
        assert!(loaded.has_hole());
    }
}
