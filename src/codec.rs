//! Byte-buffer codec helpers for S7 data.
//!
//! This module provides the conversion helpers used throughout the protocol
//! engine and useful to callers interpreting raw area bytes: big-endian
//! word/double-word/real access at a byte offset, BCD conversion, the BCD
//! `DATE_AND_TIME` layout used by the PLC clock, the 1984-epoch day-count
//! dates found in block headers, fixed-length ASCII extraction, and bit
//! access.
//!
//! All multi-byte values on the wire are big-endian.
//!
//! # Example
//!
//! ```
//! use siemens_s7::codec::{get_word_at, get_real_at, set_word_at};
//!
//! let mut db = vec![0u8; 8];
//! set_word_at(&mut db, 0, 1234);
//! assert_eq!(get_word_at(&db, 0), 1234);
//!
//! // IEEE 754 big-endian float at byte offset 4
//! db[4..8].copy_from_slice(&42.5f32.to_be_bytes());
//! assert_eq!(get_real_at(&db, 4), 42.5);
//! ```

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};

/// Reads a big-endian 16-bit word at the given byte offset.
///
/// # Panics
///
/// Panics if `pos + 2` exceeds the buffer length.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::get_word_at;
///
/// let buf = [0x12, 0x34];
/// assert_eq!(get_word_at(&buf, 0), 0x1234);
/// ```
#[inline]
pub fn get_word_at(buf: &[u8], pos: usize) -> u16 {
    u16::from_be_bytes([buf[pos], buf[pos + 1]])
}

/// Writes a big-endian 16-bit word at the given byte offset.
///
/// # Panics
///
/// Panics if `pos + 2` exceeds the buffer length.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::set_word_at;
///
/// let mut buf = [0u8; 2];
/// set_word_at(&mut buf, 0, 0x1234);
/// assert_eq!(buf, [0x12, 0x34]);
/// ```
#[inline]
pub fn set_word_at(buf: &mut [u8], pos: usize, value: u16) {
    buf[pos..pos + 2].copy_from_slice(&value.to_be_bytes());
}

/// Reads a big-endian 32-bit double word at the given byte offset.
///
/// # Panics
///
/// Panics if `pos + 4` exceeds the buffer length.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::get_dword_at;
///
/// let buf = [0x00, 0x01, 0x00, 0x00];
/// assert_eq!(get_dword_at(&buf, 0), 65536);
/// ```
#[inline]
pub fn get_dword_at(buf: &[u8], pos: usize) -> u32 {
    u32::from_be_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

/// Writes a big-endian 32-bit double word at the given byte offset.
///
/// # Panics
///
/// Panics if `pos + 4` exceeds the buffer length.
#[inline]
pub fn set_dword_at(buf: &mut [u8], pos: usize, value: u32) {
    buf[pos..pos + 4].copy_from_slice(&value.to_be_bytes());
}

/// Reads a big-endian IEEE 754 single-precision float (S7 `REAL`) at the
/// given byte offset.
///
/// # Panics
///
/// Panics if `pos + 4` exceeds the buffer length.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::{get_real_at, set_real_at};
///
/// let mut buf = [0u8; 4];
/// set_real_at(&mut buf, 0, 3.25);
/// assert_eq!(get_real_at(&buf, 0), 3.25);
/// ```
#[inline]
pub fn get_real_at(buf: &[u8], pos: usize) -> f32 {
    f32::from_bits(get_dword_at(buf, pos))
}

/// Writes a big-endian IEEE 754 single-precision float (S7 `REAL`) at the
/// given byte offset.
///
/// # Panics
///
/// Panics if `pos + 4` exceeds the buffer length.
#[inline]
pub fn set_real_at(buf: &mut [u8], pos: usize, value: f32) {
    set_dword_at(buf, pos, value.to_bits());
}

/// Reads a single bit of the byte at the given offset.
///
/// # Panics
///
/// Panics if `pos` exceeds the buffer length.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::get_bit_at;
///
/// let buf = [0b0000_0101];
/// assert!(get_bit_at(&buf, 0, 0));
/// assert!(!get_bit_at(&buf, 0, 1));
/// assert!(get_bit_at(&buf, 0, 2));
/// ```
#[inline]
pub fn get_bit_at(buf: &[u8], pos: usize, bit: u8) -> bool {
    (buf[pos] & (1 << (bit & 0x07))) != 0
}

/// Sets or clears a single bit of the byte at the given offset.
///
/// # Panics
///
/// Panics if `pos` exceeds the buffer length.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::set_bit_at;
///
/// let mut buf = [0u8];
/// set_bit_at(&mut buf, 0, 5, true);
/// assert_eq!(buf[0], 0b0010_0000);
/// ```
#[inline]
pub fn set_bit_at(buf: &mut [u8], pos: usize, bit: u8, state: bool) {
    let mask = 1 << (bit & 0x07);
    if state {
        buf[pos] |= mask;
    } else {
        buf[pos] &= !mask;
    }
}

/// Converts a packed BCD byte to its decimal value.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::bcd_to_byte;
///
/// assert_eq!(bcd_to_byte(0x23), 23);
/// assert_eq!(bcd_to_byte(0x59), 59);
/// ```
#[inline]
pub fn bcd_to_byte(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

/// Converts a decimal value (0-99) to a packed BCD byte.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::byte_to_bcd;
///
/// assert_eq!(byte_to_bcd(23), 0x23);
/// assert_eq!(byte_to_bcd(59), 0x59);
/// ```
#[inline]
pub fn byte_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decodes the six-byte BCD `DATE_AND_TIME` prefix at the given offset.
///
/// Layout: year, month, day, hour, minute, second, each packed BCD. Years
/// below 90 are interpreted as 20xx, otherwise 19xx.
///
/// Returns `None` when the BCD fields do not form a valid calendar date.
///
/// # Panics
///
/// Panics if `pos + 6` exceeds the buffer length.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::get_date_time_at;
///
/// let buf = [0x23, 0x06, 0x15, 0x12, 0x34, 0x56];
/// let dt = get_date_time_at(&buf, 0).unwrap();
/// assert_eq!(dt.to_string(), "2023-06-15 12:34:56");
/// ```
pub fn get_date_time_at(buf: &[u8], pos: usize) -> Option<NaiveDateTime> {
    let year = bcd_to_byte(buf[pos]) as i32;
    let year = if year < 90 { year + 2000 } else { year + 1900 };
    let month = bcd_to_byte(buf[pos + 1]) as u32;
    let day = bcd_to_byte(buf[pos + 2]) as u32;
    let hour = bcd_to_byte(buf[pos + 3]) as u32;
    let min = bcd_to_byte(buf[pos + 4]) as u32;
    let sec = bcd_to_byte(buf[pos + 5]) as u32;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, min, sec)
}

/// Encodes a date/time as the eight-byte BCD `DATE_AND_TIME` layout at the
/// given offset.
///
/// Layout: year (two digits), month, day, hour, minute, second, a zero
/// millisecond byte, and the weekday (1 = Sunday through 7 = Saturday), each
/// packed BCD.
///
/// # Panics
///
/// Panics if `pos + 8` exceeds the buffer length.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use siemens_s7::codec::set_date_time_at;
///
/// let dt = NaiveDate::from_ymd_opt(2023, 6, 15)
///     .unwrap()
///     .and_hms_opt(12, 34, 56)
///     .unwrap();
/// let mut buf = [0u8; 8];
/// set_date_time_at(&mut buf, 0, &dt);
/// assert_eq!(buf, [0x23, 0x06, 0x15, 0x12, 0x34, 0x56, 0x00, 0x05]);
/// ```
pub fn set_date_time_at(buf: &mut [u8], pos: usize, dt: &NaiveDateTime) {
    buf[pos] = byte_to_bcd((dt.year().rem_euclid(100)) as u8);
    buf[pos + 1] = byte_to_bcd(dt.month() as u8);
    buf[pos + 2] = byte_to_bcd(dt.day() as u8);
    buf[pos + 3] = byte_to_bcd(dt.hour() as u8);
    buf[pos + 4] = byte_to_bcd(dt.minute() as u8);
    buf[pos + 5] = byte_to_bcd(dt.second() as u8);
    buf[pos + 6] = 0;
    buf[pos + 7] = byte_to_bcd(dt.weekday().num_days_from_sunday() as u8 + 1);
}

/// Converts a block-header day count (days since 1984-01-01) to a date.
///
/// Block descriptors store their code and interface timestamps in this
/// compact form. Returns `None` only on arithmetic overflow, which no
/// 16-bit day count can produce.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::get_block_date;
///
/// assert_eq!(get_block_date(0).unwrap().to_string(), "1984-01-01");
/// // 1984 is a leap year
/// assert_eq!(get_block_date(366).unwrap().to_string(), "1985-01-01");
/// ```
pub fn get_block_date(days: u16) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1984, 1, 1)?.checked_add_days(Days::new(u64::from(days)))
}

/// Extracts a fixed-length ASCII string at the given offset.
///
/// Non-ASCII bytes are replaced, trailing spaces and NULs are trimmed.
///
/// # Panics
///
/// Panics if `pos + len` exceeds the buffer length.
///
/// # Example
///
/// ```
/// use siemens_s7::codec::get_string_at;
///
/// let buf = b"6ES7 315-2EH14-0AB0 ";
/// assert_eq!(get_string_at(buf, 0, 20), "6ES7 315-2EH14-0AB0");
/// ```
pub fn get_string_at(buf: &[u8], pos: usize, len: usize) -> String {
    String::from_utf8_lossy(&buf[pos..pos + len])
        .trim_end_matches(['\0', ' '])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_roundtrip() {
        let mut buf = [0u8; 6];
        set_word_at(&mut buf, 2, 0xABCD);
        assert_eq!(buf, [0x00, 0x00, 0xAB, 0xCD, 0x00, 0x00]);
        assert_eq!(get_word_at(&buf, 2), 0xABCD);
    }

    #[test]
    fn test_dword_roundtrip() {
        let mut buf = [0u8; 8];
        set_dword_at(&mut buf, 1, 0x1234_5678);
        assert_eq!(get_dword_at(&buf, 1), 0x1234_5678);
        assert_eq!(buf[1], 0x12);
        assert_eq!(buf[4], 0x78);
    }

    #[test]
    fn test_real_roundtrip() {
        let mut buf = [0u8; 4];
        set_real_at(&mut buf, 0, -118.625);
        assert_eq!(get_real_at(&buf, 0), -118.625);
        // IEEE 754 big-endian encoding of -118.625
        assert_eq!(buf, [0xC2, 0xED, 0x40, 0x00]);
    }

    #[test]
    fn test_bit_access() {
        let mut buf = [0u8; 2];
        set_bit_at(&mut buf, 1, 7, true);
        assert_eq!(buf, [0x00, 0x80]);
        assert!(get_bit_at(&buf, 1, 7));
        set_bit_at(&mut buf, 1, 7, false);
        assert!(!get_bit_at(&buf, 1, 7));
    }

    #[test]
    fn test_bcd_conversion() {
        assert_eq!(bcd_to_byte(0x00), 0);
        assert_eq!(bcd_to_byte(0x45), 45);
        assert_eq!(bcd_to_byte(0x99), 99);
        assert_eq!(byte_to_bcd(0), 0x00);
        assert_eq!(byte_to_bcd(45), 0x45);
        assert_eq!(byte_to_bcd(99), 0x99);
    }

    #[test]
    fn test_date_time_decode() {
        let buf = [0x23, 0x12, 0x31, 0x23, 0x59, 0x58];
        let dt = get_date_time_at(&buf, 0).unwrap();
        assert_eq!(dt.to_string(), "2023-12-31 23:59:58");
    }

    #[test]
    fn test_date_time_year_pivot() {
        // 89 -> 2089, 90 -> 1990
        let buf = [0x89, 0x01, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(get_date_time_at(&buf, 0).unwrap().year(), 2089);
        let buf = [0x90, 0x01, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(get_date_time_at(&buf, 0).unwrap().year(), 1990);
    }

    #[test]
    fn test_date_time_invalid() {
        // month 13 is not a date
        let buf = [0x23, 0x13, 0x01, 0x00, 0x00, 0x00];
        assert!(get_date_time_at(&buf, 0).is_none());
    }

    #[test]
    fn test_date_time_encode() {
        let dt = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(6, 7, 8)
            .unwrap();
        let mut buf = [0xFFu8; 8];
        set_date_time_at(&mut buf, 0, &dt);
        // 2024-02-29 is a Thursday: weekday byte is 5 (1 = Sunday)
        assert_eq!(buf, [0x24, 0x02, 0x29, 0x06, 0x07, 0x08, 0x00, 0x05]);
    }

    #[test]
    fn test_date_time_roundtrip() {
        let dt = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap();
        let mut buf = [0u8; 8];
        set_date_time_at(&mut buf, 0, &dt);
        assert_eq!(get_date_time_at(&buf, 0).unwrap(), dt);
    }

    #[test]
    fn test_block_date_epoch() {
        assert_eq!(get_block_date(0).unwrap().to_string(), "1984-01-01");
        assert_eq!(get_block_date(31).unwrap().to_string(), "1984-02-01");
        assert_eq!(get_block_date(366).unwrap().to_string(), "1985-01-01");
    }

    #[test]
    fn test_string_extraction() {
        let buf = b"Original Siemens Equipment\0\0  ";
        assert_eq!(
            get_string_at(buf, 0, buf.len()),
            "Original Siemens Equipment"
        );
        assert_eq!(get_string_at(b"ABCDEF", 2, 3), "CDE");
    }
}
