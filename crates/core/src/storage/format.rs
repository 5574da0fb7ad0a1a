use crate::errors::CoreError;

/// Magic bytes identifying a PTRD (Paper Trader) record.
pub const MAGIC: &[u8; 4] = b"PTRD";

/// Current record format version.
pub const CURRENT_VERSION: u16 = 1;

/// Header size in bytes: magic(4) + version(2) + payload_len(8) = 14
pub const HEADER_SIZE: usize = 14;

/// Wrap a serialized payload in a versioned envelope.
///
/// Layout:
/// ```text
/// [PTRD: 4B] [version: 2B LE] [payload_len: 8B LE] [payload: variable]
/// ```
pub fn write_record(version: u16, payload: &[u8]) -> Vec<u8> {
    let payload_len = payload.len() as u64;
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(payload);

    buf
}

/// Parse an envelope, validating magic, version, and length.
/// Returns the format version and the payload slice.
pub fn read_record(data: &[u8]) -> Result<(u16, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFormat(
            "Record too small to carry a valid header".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFormat(
            "Invalid magic bytes — not a PTRD record".into(),
        ));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let payload_len = u64::from_le_bytes(
        data[6..14]
            .try_into()
            .map_err(|_| CoreError::InvalidFormat("Failed to read payload length".into()))?,
    );

    let expected_end = HEADER_SIZE + payload_len as usize;
    if data.len() < expected_end {
        return Err(CoreError::InvalidFormat(format!(
            "Record truncated: expected {} bytes of payload, got {}",
            payload_len,
            data.len() - HEADER_SIZE
        )));
    }

    Ok((version, &data[HEADER_SIZE..expected_end]))
}
