//! Framing for the co-processor UART link
//!
//! `START 0xA5 | LENGTH u16 LE | TYPE | PAYLOAD (0-1024) | CHECKSUM`, where
//! the checksum XORs both length bytes, the type and every payload byte.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Maximum payload size in bytes
///
/// Large enough for a full banner message plus the property name header.
pub const MAX_PAYLOAD_SIZE: usize = 1024;

/// Bytes surrounding the payload (START + LENGTH + TYPE + CHECKSUM)
pub const FRAME_OVERHEAD: usize = 1 + 2 + 1 + 1;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = FRAME_OVERHEAD + MAX_PAYLOAD_SIZE;

/// Link framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Invalid frame structure or unknown message type
    InvalidFrame,
    /// Text field is not valid UTF-8
    InvalidText,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// One link frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Build a frame, copying `payload`
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Build a frame that carries only its type
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// XOR over the length bytes, the type and the payload
    fn checksum(length: [u8; 2], msg_type: u8, payload: &[u8]) -> u8 {
        payload
            .iter()
            .fold(length[0] ^ length[1] ^ msg_type, |acc, &b| acc ^ b)
    }

    /// Encoded size of this frame in bytes
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Write this frame to the start of `buffer`
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let out = buffer
            .get_mut(..self.encoded_len())
            .ok_or(FrameError::BufferTooSmall)?;

        // Payload is capped at MAX_PAYLOAD_SIZE, well inside u16
        let length = (self.payload.len() as u16).to_le_bytes();
        let (header, rest) = out.split_at_mut(4);
        let (body, trailer) = rest.split_at_mut(self.payload.len());

        header.copy_from_slice(&[FRAME_START, length[0], length[1], self.msg_type]);
        body.copy_from_slice(&self.payload);
        trailer[0] = Self::checksum(length, self.msg_type, &self.payload);

        Ok(out.len())
    }

    /// Encode this frame into an owned buffer
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut bytes = Vec::new();
        bytes
            .resize_default(self.encoded_len())
            .map_err(|_| FrameError::BufferTooSmall)?;
        self.encode(&mut bytes)?;
        Ok(bytes)
    }
}

/// Where the parser is within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Discarding bytes until START
    Hunting,
    LengthLow,
    LengthHigh { low: u8 },
    Type { length: u16 },
    Payload { length: u16 },
    Checksum,
}

/// Byte-at-a-time frame decoder
///
/// Bytes before a START byte are skipped, so the parser resynchronises on
/// its own after line noise or a rejected frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    msg_type: u8,
    length: [u8; 2],
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            stage: Stage::Hunting,
            msg_type: 0,
            length: [0; 2],
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame and wait for the next START byte
    pub fn reset(&mut self) {
        self.stage = Stage::Hunting;
        self.payload.clear();
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` once a frame completes with a good
    /// checksum and `Ok(None)` while more bytes are needed. On error the
    /// partial frame is dropped and the parser starts hunting again.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.stage = match self.stage {
            Stage::Hunting if byte == FRAME_START => Stage::LengthLow,
            Stage::Hunting => Stage::Hunting,
            Stage::LengthLow => Stage::LengthHigh { low: byte },
            Stage::LengthHigh { low } => {
                let length = u16::from_le_bytes([low, byte]);
                if usize::from(length) > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.length = [low, byte];
                Stage::Type { length }
            }
            Stage::Type { length } => {
                self.msg_type = byte;
                self.payload.clear();
                match length {
                    0 => Stage::Checksum,
                    _ => Stage::Payload { length },
                }
            }
            Stage::Payload { length } => {
                // Cannot overflow: length was checked against MAX_PAYLOAD_SIZE
                let _ = self.payload.push(byte);
                if self.payload.len() < usize::from(length) {
                    Stage::Payload { length }
                } else {
                    Stage::Checksum
                }
            }
            Stage::Checksum => {
                let expected = Frame::checksum(self.length, self.msg_type, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }
                self.stage = Stage::Hunting;
                return Ok(Some(Frame {
                    msg_type: self.msg_type,
                    payload: core::mem::take(&mut self.payload),
                }));
            }
        };
        Ok(None)
    }

    /// Feed bytes until a frame completes
    ///
    /// Bytes after the completed frame are left unread.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encoded(msg_type: u8, payload: &[u8]) -> Vec<u8, MAX_FRAME_SIZE> {
        Frame::new(msg_type, payload).unwrap().encode_to_vec().unwrap()
    }

    #[test]
    fn test_ack_layout() {
        let bytes = encoded(0x22, &[1]);
        // START, len 1, type, payload, 0x01 ^ 0x00 ^ 0x22 ^ 0x01
        assert_eq!(&bytes[..], &[0xA5, 0x01, 0x00, 0x22, 0x01, 0x22]);
    }

    #[test]
    fn test_typed_only_frame() {
        let mut out = [0u8; FRAME_OVERHEAD];
        let written = Frame::empty(0x03).encode(&mut out).unwrap();
        assert_eq!(written, FRAME_OVERHEAD);
        assert_eq!(out, [FRAME_START, 0, 0, 0x03, 0x03]);
    }

    #[test]
    fn test_length_is_little_endian() {
        let bytes = encoded(0x01, &[b'm'; 0x0102]);
        assert_eq!(bytes[1], 0x02);
        assert_eq!(bytes[2], 0x01);
        assert_eq!(bytes.len(), 0x0102 + FRAME_OVERHEAD);
    }

    #[test]
    fn test_short_output_buffer() {
        let frame = Frame::new(0x20, b"abc").unwrap();
        let mut out = [0u8; 7];
        assert_eq!(frame.encode(&mut out), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_oversize_payload_refused() {
        let payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x01, &payload), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_decode_encoded_frame() {
        let bytes = encoded(0x01, b"\x05speed80");
        let frame = FrameParser::new().feed_bytes(&bytes).unwrap().unwrap();
        assert_eq!(frame.msg_type, 0x01);
        assert_eq!(&frame.payload[..], b"\x05speed80");
    }

    #[test]
    fn test_corrupt_checksum_rejected() {
        let mut bytes = encoded(0x02, b"\x04infoup");
        let last = bytes.len() - 1;
        bytes[last] = !bytes[last];
        assert_eq!(
            FrameParser::new().feed_bytes(&bytes),
            Err(FrameError::InvalidChecksum)
        );
    }

    #[test]
    fn test_declared_length_too_long() {
        let [lo, hi] = (MAX_PAYLOAD_SIZE as u16 + 1).to_le_bytes();
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&[FRAME_START, lo]), Ok(None));
        assert_eq!(parser.feed(hi), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_noise_before_start_skipped() {
        let mut stream: Vec<u8, 64> = Vec::from_slice(&[0x13, 0x37, 0x00]).unwrap();
        stream.extend_from_slice(&encoded(0x03, &[0x02])).unwrap();

        let frame = FrameParser::new().feed_bytes(&stream).unwrap().unwrap();
        assert_eq!(frame.msg_type, 0x03);
        assert_eq!(&frame.payload[..], &[0x02]);
    }

    #[test]
    fn test_next_frame_parses_after_rejection() {
        let mut parser = FrameParser::new();
        let mut bad = encoded(0x01, b"x");
        let last = bad.len() - 1;
        bad[last] ^= 0x40;

        assert!(parser.feed_bytes(&bad).is_err());
        let frame = parser.feed_bytes(&encoded(0x01, b"y")).unwrap().unwrap();
        assert_eq!(&frame.payload[..], b"y");
    }

    #[test]
    fn test_reset_drops_partial_frame() {
        let bytes = encoded(0x02, b"abc");
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&bytes[..5]), Ok(None));
        parser.reset();
        assert_eq!(parser.feed_bytes(&bytes[5..]), Ok(None));
        assert!(parser.feed_bytes(&bytes).unwrap().is_some());
    }

    proptest! {
        #[test]
        fn test_random_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let mut parser = FrameParser::new();
            for byte in bytes {
                let _ = parser.feed(byte);
            }
        }

        #[test]
        fn test_any_payload_survives_link(
            msg_type in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..MAX_PAYLOAD_SIZE),
        ) {
            let bytes = encoded(msg_type, &payload);
            let frame = FrameParser::new().feed_bytes(&bytes).unwrap().unwrap();
            prop_assert_eq!(frame.msg_type, msg_type);
            prop_assert_eq!(&frame.payload[..], &payload[..]);
        }
    }
}
