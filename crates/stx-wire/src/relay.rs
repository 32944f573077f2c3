use crate::cursor::ByteCursor;
use crate::error::WireError;

/// Encoded size of one relayer record.
///
/// Relayer records describe the peers a message passed through. They are
/// not interpreted here; the vector is skipped wholesale.
pub const RELAY_DATA_ENCODED_SIZE: usize = 107;

/// Skip the relayer vector at the front of a message body.
///
/// Wire layout:
///
/// ```text
///   count (u32 BE) │ count × 107-byte relay record
/// ```
///
/// Returns the number of records skipped.
///
/// # Errors
///
/// [`WireError::CursorUnderflow`] if the body is shorter than the vector
/// it declares. An absurd count overflows to the same error rather than
/// wrapping.
pub fn skip_relayers(cursor: &mut ByteCursor) -> Result<u32, WireError> {
    let count = cursor.read_u32()?;
    if count == 0 {
        return Ok(0);
    }

    let span = (count as usize)
        .checked_mul(RELAY_DATA_ENCODED_SIZE)
        .ok_or(WireError::CursorUnderflow {
            offset: cursor.position(),
            needed: usize::MAX,
            remaining: cursor.remaining(),
        })?;
    cursor.skip(span)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vector_consumes_only_count() {
        let mut cursor = ByteCursor::new(vec![0, 0, 0, 0, 0x0D]);
        assert_eq!(skip_relayers(&mut cursor).unwrap(), 0);
        assert_eq!(cursor.read_u8().unwrap(), 0x0D);
    }

    #[test]
    fn skips_whole_records() {
        let mut buf = 2u32.to_be_bytes().to_vec();
        buf.extend_from_slice(&[0xAA; 2 * RELAY_DATA_ENCODED_SIZE]);
        buf.push(0x0B);
        let mut cursor = ByteCursor::new(buf);

        assert_eq!(skip_relayers(&mut cursor).unwrap(), 2);
        assert_eq!(cursor.read_u8().unwrap(), 0x0B);
    }

    #[test]
    fn declared_count_beyond_body_underflows() {
        let mut buf = 3u32.to_be_bytes().to_vec();
        buf.extend_from_slice(&[0u8; RELAY_DATA_ENCODED_SIZE]);
        let mut cursor = ByteCursor::new(buf);

        assert!(matches!(
            skip_relayers(&mut cursor),
            Err(WireError::CursorUnderflow { .. })
        ));
    }
}
