//! User-placed waypoints and their save-game encoding.

use bincode::{Decode, Encode};
use thiserror::Error;

use super::transform::MapPoint;

/// A numbered waypoint in map space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
pub struct Mark {
    pub x: i64,
    pub y: i64,
}

impl Mark {
    #[inline]
    pub fn at(p: MapPoint) -> Self {
        Self { x: p.x, y: p.y }
    }

    #[inline]
    pub fn point(&self) -> MapPoint {
        MapPoint::new(self.x, self.y)
    }
}

#[derive(Debug, Error)]
pub enum MarkError {
    #[error("could not encode marks: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("could not decode marks: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("{0} trailing bytes after mark list")]
    Trailing(usize),
}

fn config() -> impl bincode::config::Config {
    bincode::config::standard()
        .with_fixed_int_encoding()
        .with_little_endian()
}

/// Serialize marks in order for the save file.
pub fn encode_marks(marks: &[Mark]) -> Result<Vec<u8>, MarkError> {
    Ok(bincode::encode_to_vec(marks, config())?)
}

/// Inverse of [`encode_marks`]; the whole buffer must be consumed.
pub fn decode_marks(bytes: &[u8]) -> Result<Vec<Mark>, MarkError> {
    let (marks, used): (Vec<Mark>, usize) = bincode::decode_from_slice(bytes, config())?;
    if used != bytes.len() {
        return Err(MarkError::Trailing(bytes.len() - used));
    }
    Ok(marks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_keep_their_order() {
        let marks = vec![Mark { x: 1, y: -2 }, Mark { x: 1 << 30, y: 7 }];
        let bytes = encode_marks(&marks).unwrap();
        // length prefix plus two fixed-width pairs
        assert_eq!(bytes.len(), 8 + 2 * 16);
        assert_eq!(decode_marks(&bytes).unwrap(), marks);
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let mut bytes = encode_marks(&[Mark { x: 0, y: 0 }]).unwrap();
        bytes.push(0xFF);
        assert!(matches!(decode_marks(&bytes), Err(MarkError::Trailing(1))));
    }

    #[test]
    fn truncated_input_is_an_error() {
        let bytes = encode_marks(&[Mark { x: 3, y: 4 }]).unwrap();
        assert!(matches!(decode_marks(&bytes[..10]), Err(MarkError::Decode(_))));
    }
}
